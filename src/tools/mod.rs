// src/tools/mod.rs

//! Package-manager tools.
//!
//! Each [`ToolCall`] variant is one tool. [`args`] turns a call into the
//! argument vector for the executable, [`dispatch`] runs it through a
//! [`crate::exec::CommandBackend`] and shapes the output, and [`privilege`]
//! answers "is this session elevated?" for the mutating tools.
//!
//! `ToolCall` doubles as the CLI's subcommand set, so the clap attributes
//! here define the user-facing flags.

pub mod args;
pub mod dispatch;
pub mod privilege;

use std::fmt;

use clap::{ArgAction, Args, Subcommand, ValueEnum};

pub use dispatch::{Annotations, ToolDispatcher, ToolOutput};
pub use privilege::{FixedPrivilege, PrivilegeProbe, SystemPrivilegeProbe};

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ToolCall {
    /// List installed (local) packages.
    List {
        /// Pass `-l` (local only).
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        local_only: bool,
        /// Match `id` exactly (only used together with an id).
        #[arg(long)]
        exact: bool,
        /// Package id to filter on.
        id: Option<String>,
    },

    /// Search remote packages.
    Search {
        query: String,
        #[arg(long)]
        exact: bool,
        /// Include prerelease versions.
        #[arg(long)]
        prerelease: bool,
    },

    /// Install a package.
    Install(InstallParams),

    /// Upgrade a package (or every package with id "all").
    Upgrade(UpgradeParams),

    /// Uninstall a package.
    Uninstall(UninstallParams),

    /// Show package information.
    Info {
        id: String,
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        exact: bool,
        #[arg(long)]
        verbose: bool,
    },

    /// List outdated packages.
    Outdated {
        #[arg(long)]
        ignore_pinned: bool,
        #[arg(long)]
        include_prerelease: bool,
    },

    /// List, add or remove pins.
    Pin {
        #[arg(value_enum, default_value_t = PinAction::List)]
        action: PinAction,
        #[arg(long)]
        id: Option<String>,
    },

    /// List, enable or disable features.
    Feature {
        #[arg(value_enum, default_value_t = FeatureAction::List)]
        action: FeatureAction,
        #[arg(long)]
        name: Option<String>,
    },

    /// List or manage package sources.
    Source(SourceParams),

    /// Get, set, unset or list config values.
    Config {
        #[arg(value_enum, default_value_t = ConfigAction::List)]
        action: ConfigAction,
        #[arg(long)]
        key: Option<String>,
        #[arg(long)]
        value: Option<String>,
    },

    /// Show help, optionally for one command.
    Help {
        topic: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct InstallParams {
    pub id: String,
    #[arg(long)]
    pub version: Option<String>,
    #[arg(long)]
    pub prerelease: bool,
    #[arg(long)]
    pub force: bool,
    #[arg(long)]
    pub source: Option<String>,
    /// Must stay true; installs are refused otherwise.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub yes: bool,
    #[arg(long)]
    pub fail_on_stderr: bool,
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_sec: Option<u64>,
    /// Passed through verbatim after `--`.
    #[arg(last = true)]
    pub extra_args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct UpgradeParams {
    pub id: String,
    #[arg(long)]
    pub prerelease: bool,
    #[arg(long)]
    pub force: bool,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub yes: bool,
    #[arg(long)]
    pub fail_on_stderr: bool,
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_sec: Option<u64>,
    #[arg(last = true)]
    pub extra_args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct UninstallParams {
    pub id: String,
    #[arg(long)]
    pub version: Option<String>,
    #[arg(long)]
    pub force: bool,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub yes: bool,
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_sec: Option<u64>,
    #[arg(last = true)]
    pub extra_args: Vec<String>,
}

#[derive(Clone, PartialEq, Eq, Args)]
pub struct SourceParams {
    #[arg(value_enum, default_value_t = SourceAction::List)]
    pub action: SourceAction,
    #[arg(long)]
    pub name: Option<String>,
    /// Feed URL or path (for `add`).
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub user: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
}

// Keep credentials out of logs and error output.
impl fmt::Debug for SourceParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceParams")
            .field("action", &self.action)
            .field("name", &self.name)
            .field("source", &self.source)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PinAction {
    #[default]
    List,
    Add,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FeatureAction {
    #[default]
    List,
    Enable,
    Disable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SourceAction {
    #[default]
    List,
    Add,
    Remove,
    Enable,
    Disable,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConfigAction {
    Get,
    Set,
    Unset,
    #[default]
    List,
}

impl ToolCall {
    /// Stable tool name, as exposed to remote callers.
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::List { .. } => "choco_list",
            ToolCall::Search { .. } => "choco_search",
            ToolCall::Install(_) => "choco_install",
            ToolCall::Upgrade(_) => "choco_upgrade",
            ToolCall::Uninstall(_) => "choco_uninstall",
            ToolCall::Info { .. } => "choco_info",
            ToolCall::Outdated { .. } => "choco_outdated",
            ToolCall::Pin { .. } => "choco_pin",
            ToolCall::Feature { .. } => "choco_feature",
            ToolCall::Source(_) => "choco_source",
            ToolCall::Config { .. } => "choco_config",
            ToolCall::Help { .. } => "choco_help",
        }
    }

    /// Install, upgrade and uninstall change the machine and report
    /// exit-code / reboot annotations.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            ToolCall::Install(_) | ToolCall::Upgrade(_) | ToolCall::Uninstall(_)
        )
    }
}

impl PinAction {
    pub fn as_str(self) -> &'static str {
        match self {
            PinAction::List => "list",
            PinAction::Add => "add",
            PinAction::Remove => "remove",
        }
    }
}

impl FeatureAction {
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureAction::List => "list",
            FeatureAction::Enable => "enable",
            FeatureAction::Disable => "disable",
        }
    }
}

impl SourceAction {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceAction::List => "list",
            SourceAction::Add => "add",
            SourceAction::Remove => "remove",
            SourceAction::Enable => "enable",
            SourceAction::Disable => "disable",
            SourceAction::Update => "update",
        }
    }
}

impl ConfigAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigAction::Get => "get",
            ConfigAction::Set => "set",
            ConfigAction::Unset => "unset",
            ConfigAction::List => "list",
        }
    }
}
