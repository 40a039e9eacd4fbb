// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::ConfigOverrides;
use crate::tools::ToolCall;

/// Command-line arguments for `chocogate`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "chocogate",
    version,
    about = "Run Chocolatey commands through a bounded, time-limited process gateway.",
    long_about = None,
    disable_help_subcommand = true
)]
pub struct CliArgs {
    /// Path to a config file (TOML).
    ///
    /// Default: `Chocogate.toml` in the current working directory, if it
    /// exists.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CHOCOGATE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Executable to run instead of `choco` (overrides `CHOCO_BIN`).
    #[arg(long, value_name = "BIN", global = true)]
    pub executable: Option<String>,

    /// Default timeout per command in milliseconds.
    #[arg(long, value_name = "MS", global = true)]
    pub timeout_ms: Option<u64>,

    /// Maximum number of commands running at once.
    #[arg(long, value_name = "N", global = true)]
    pub max_concurrency: Option<usize>,

    /// Print the argument vector that would be run, but don't run it.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Tool(ToolCall),

    /// Run the package manager with raw arguments.
    Exec {
        /// Timeout for this invocation, in seconds.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout_sec: Option<u64>,

        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "ARGS"
        )]
        args: Vec<String>,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl CliArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            executable: self.executable.clone(),
            timeout_ms: self.timeout_ms,
            max_concurrency: self.max_concurrency,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::tools::{PinAction, ToolCall};

    #[test]
    fn cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parses_install_with_passthrough() {
        let args = CliArgs::try_parse_from([
            "chocogate", "--max-concurrency", "2", "install", "git", "--version", "2.44.0",
            "--timeout-sec", "60", "--", "--params", "/NoShellIntegration",
        ])
        .unwrap();

        assert_eq!(args.max_concurrency, Some(2));
        match args.command {
            Command::Tool(ToolCall::Install(p)) => {
                assert_eq!(p.id, "git");
                assert_eq!(p.version.as_deref(), Some("2.44.0"));
                assert!(p.yes);
                assert_eq!(p.timeout_sec, Some(60));
                assert_eq!(p.extra_args, ["--params", "/NoShellIntegration"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn pin_defaults_to_list() {
        let args = CliArgs::try_parse_from(["chocogate", "pin"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Tool(ToolCall::Pin { action: PinAction::List, id: None })
        ));
    }

    #[test]
    fn exec_takes_raw_arguments() {
        let args = CliArgs::try_parse_from(["chocogate", "exec", "list", "-l", "--exact"]).unwrap();
        match args.command {
            Command::Exec { args, timeout_sec } => {
                assert_eq!(args, ["list", "-l", "--exact"]);
                assert_eq!(timeout_sec, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn help_subcommand_is_the_tool() {
        let args = CliArgs::try_parse_from(["chocogate", "help", "install"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Tool(ToolCall::Help { topic: Some(ref t) }) if t == "install"
        ));
    }

    #[test]
    fn list_local_only_can_be_turned_off() {
        let args = CliArgs::try_parse_from(["chocogate", "list", "--local-only", "false"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Tool(ToolCall::List { local_only: false, .. })
        ));
    }
}
