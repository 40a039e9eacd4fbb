// src/tools/args.rs

//! Tool call → argument vector.
//!
//! Validation that can be done without running anything (missing ids,
//! missing confirmation) happens here, so a bad call never spawns a process.

use std::time::Duration;

use crate::errors::ToolError;
use crate::tools::{
    ConfigAction, FeatureAction, InstallParams, PinAction, SourceAction, SourceParams, ToolCall,
    UninstallParams, UpgradeParams,
};
use crate::types::ExecutionRequest;

impl ToolCall {
    /// Build the argument vector for this call.
    pub fn to_args(&self) -> Result<Vec<String>, ToolError> {
        let mut args = ArgBuilder::default();

        match self {
            ToolCall::List { local_only, exact, id } => {
                args.push("list");
                args.flag(*local_only, "-l");
                args.flag(*exact && id.is_some(), "--exact");
                args.opt(id.as_deref());
            }
            ToolCall::Search { query, exact, prerelease } => {
                args.push("search").push(query);
                args.flag(*exact, "--exact");
                args.flag(*prerelease, "--pre");
            }
            ToolCall::Install(p) => install_args(&mut args, p)?,
            ToolCall::Upgrade(p) => upgrade_args(&mut args, p)?,
            ToolCall::Uninstall(p) => uninstall_args(&mut args, p)?,
            ToolCall::Info { id, exact, verbose } => {
                args.push("info").push(id);
                args.flag(*exact, "--exact");
                args.flag(*verbose, "--verbose");
            }
            ToolCall::Outdated { ignore_pinned, include_prerelease } => {
                args.push("outdated");
                args.flag(*ignore_pinned, "--ignore-pinned");
                args.flag(*include_prerelease, "--pre");
            }
            ToolCall::Pin { action, id } => {
                args.push("pin").push(action.as_str());
                if *action != PinAction::List {
                    let id = require(id.as_deref(), || {
                        format!("id is required for {}", action.as_str())
                    })?;
                    args.push("-n").push(id);
                }
            }
            ToolCall::Feature { action, name } => {
                args.push("feature").push(action.as_str());
                if *action != FeatureAction::List {
                    let name = require(name.as_deref(), || {
                        "name is required for enable/disable".to_string()
                    })?;
                    args.push("-n").push(name);
                }
            }
            ToolCall::Source(p) => source_args(&mut args, p)?,
            ToolCall::Config { action, key, value } => {
                args.push("config").push(action.as_str());
                match action {
                    ConfigAction::List => {}
                    ConfigAction::Get | ConfigAction::Unset => {
                        let key = require(key.as_deref(), || {
                            format!("key is required for {}", action.as_str())
                        })?;
                        args.push(key);
                    }
                    ConfigAction::Set => {
                        // An empty value is a legitimate "set to blank".
                        let missing = || "key and value are required for set".to_string();
                        let key = require(key.as_deref(), missing)?;
                        let value = value
                            .as_deref()
                            .ok_or_else(|| ToolError::MissingArgument(missing()))?;
                        args.push(key).push(value);
                    }
                }
            }
            ToolCall::Help { topic } => {
                args.opt(topic.as_deref());
                args.push("-?");
            }
        }

        Ok(args.finish())
    }

    /// Per-call timeout requested by the caller, if any.
    pub fn timeout(&self) -> Option<Duration> {
        let secs = match self {
            ToolCall::Install(p) => p.timeout_sec,
            ToolCall::Upgrade(p) => p.timeout_sec,
            ToolCall::Uninstall(p) => p.timeout_sec,
            _ => None,
        };
        secs.map(Duration::from_secs)
    }

    /// Full request: arguments, timeout and tool name.
    pub fn to_request(&self) -> Result<ExecutionRequest, ToolError> {
        Ok(ExecutionRequest::new(self.to_args()?)
            .with_timeout(self.timeout())
            .with_tool(self.name()))
    }
}

fn install_args(args: &mut ArgBuilder, p: &InstallParams) -> Result<(), ToolError> {
    confirm(p.yes, "install")?;
    args.push("install").push(&p.id);
    if let Some(ref v) = p.version {
        args.push("--version").push(v);
    }
    args.flag(p.prerelease, "--pre");
    args.flag(p.force, "--force");
    if let Some(ref s) = p.source {
        args.push("-s").push(s);
    }
    args.flag(p.yes, "-y");
    args.flag(p.fail_on_stderr, "--fail-on-standard-error");
    args.extend(&p.extra_args);
    Ok(())
}

fn upgrade_args(args: &mut ArgBuilder, p: &UpgradeParams) -> Result<(), ToolError> {
    confirm(p.yes, "upgrade")?;
    args.push("upgrade").push(&p.id);
    args.flag(p.prerelease, "--pre");
    args.flag(p.force, "--force");
    if let Some(ref s) = p.source {
        args.push("-s").push(s);
    }
    args.flag(p.yes, "-y");
    args.flag(p.fail_on_stderr, "--fail-on-standard-error");
    args.extend(&p.extra_args);
    Ok(())
}

fn uninstall_args(args: &mut ArgBuilder, p: &UninstallParams) -> Result<(), ToolError> {
    confirm(p.yes, "uninstall")?;
    args.push("uninstall").push(&p.id);
    if let Some(ref v) = p.version {
        args.push("--version").push(v);
    }
    args.flag(p.force, "--force");
    args.flag(p.yes, "-y");
    args.extend(&p.extra_args);
    Ok(())
}

fn source_args(args: &mut ArgBuilder, p: &SourceParams) -> Result<(), ToolError> {
    args.push("source").push(p.action.as_str());
    match p.action {
        SourceAction::List => {}
        SourceAction::Add => {
            let missing = || "name and source are required for add".to_string();
            let name = require(p.name.as_deref(), missing)?;
            let source = require(p.source.as_deref(), missing)?;
            args.push("-n").push(name).push("-s").push(source);
            if let Some(ref user) = p.user {
                args.push("-u").push(user);
            }
            if let Some(ref password) = p.password {
                args.push("-p").push(password);
            }
        }
        _ => {
            let name = require(p.name.as_deref(), || {
                "name is required for this action".to_string()
            })?;
            args.push("-n").push(name);
        }
    }
    Ok(())
}

fn confirm(yes: bool, tool: &'static str) -> Result<(), ToolError> {
    if yes {
        Ok(())
    } else {
        Err(ToolError::ConfirmationRequired { tool })
    }
}

/// Treats an empty string the same as a missing value.
fn require<'a>(value: Option<&'a str>, msg: impl FnOnce() -> String) -> Result<&'a str, ToolError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ToolError::MissingArgument(msg()))
}

#[derive(Default)]
struct ArgBuilder {
    args: Vec<String>,
}

impl ArgBuilder {
    fn push(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    fn flag(&mut self, on: bool, arg: &str) -> &mut Self {
        if on {
            self.args.push(arg.to_string());
        }
        self
    }

    fn opt(&mut self, arg: Option<&str>) -> &mut Self {
        if let Some(a) = arg {
            self.args.push(a.to_string());
        }
        self
    }

    fn extend(&mut self, extra: &[String]) -> &mut Self {
        self.args.extend(extra.iter().cloned());
        self
    }

    fn finish(self) -> Vec<String> {
        self.args
    }
}
