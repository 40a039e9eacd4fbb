// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod tools;
pub mod types;

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::{GatewayConfig, load_and_validate, process_env};
use crate::exec::Gateway;
use crate::tools::{ToolCall, ToolDispatcher};
use crate::types::ExecutionRequest;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file, environment, CLI overrides)
/// - the execution gateway (limiter + runner)
/// - the tool dispatcher, or a raw passthrough for `exec`
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(
        args.config.as_deref().map(Path::new),
        process_env,
        &args.overrides(),
    )?;
    debug!(?cfg, "resolved configuration");

    let request = build_request(&args.command)?;

    if args.dry_run {
        print_dry_run(&cfg, &request);
        return Ok(());
    }

    let gateway = Gateway::from_config(&cfg);
    info!(
        executable = %cfg.executable,
        max_concurrency = cfg.max_concurrency,
        "gateway ready"
    );

    match args.command {
        Command::Tool(call) => run_tool(gateway, &call).await,
        Command::Exec { .. } => run_exec(&gateway, &request).await,
    }
}

fn build_request(command: &Command) -> Result<ExecutionRequest> {
    Ok(match command {
        Command::Tool(call) => call.to_request()?,
        Command::Exec { args, timeout_sec } => ExecutionRequest::new(args.iter().cloned())
            .with_timeout(timeout_sec.map(std::time::Duration::from_secs))
            .with_tool("exec"),
    })
}

async fn run_tool(gateway: Gateway, call: &ToolCall) -> Result<()> {
    let dispatcher = ToolDispatcher::new(gateway);
    let output = dispatcher.invoke(call).await?;

    print!("{}", output.text);
    if let Some(ann) = output.annotations {
        eprintln!("exit_code={}", ann.exit_code);
        eprintln!("reboot_required={}", ann.reboot_required);
    }
    Ok(())
}

async fn run_exec(gateway: &Gateway, request: &ExecutionRequest) -> Result<()> {
    let res = gateway.run(request).await?;

    print!("{}", res.stdout);
    eprint!("{}", res.stderr);
    if res.reboot_required {
        eprintln!("reboot_required=true");
    }
    if !res.success {
        anyhow::bail!("command exited with code {}", res.exit_code);
    }
    Ok(())
}

/// Print resolved config and the argument vector; nothing is executed.
fn print_dry_run(cfg: &GatewayConfig, request: &ExecutionRequest) {
    println!("chocogate dry-run");
    println!("  executable       = {}", cfg.executable);
    println!("  timeout          = {:?}", request.timeout().unwrap_or(cfg.default_timeout));
    println!("  max_concurrency  = {}", cfg.max_concurrency);
    println!("  max_output_bytes = {}", cfg.max_output_bytes);
    println!();
    println!("tool: {}", request.display_name());
    println!("args: {:?}", request.args());

    debug!("dry-run complete (no execution)");
}
