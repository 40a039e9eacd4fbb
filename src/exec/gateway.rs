// src/exec/gateway.rs

//! Admission-controlled execution: limiter in front of the runner.

use std::time::Instant;

use tracing::{debug, info};

use crate::config::GatewayConfig;
use crate::errors::Result;
use crate::exec::limiter::ConcurrencyLimiter;
use crate::exec::runner::ProcessRunner;
use crate::types::{ExecuteOptions, ExecutionRequest, ExecutionResult};

/// The single entry point the tool layer calls into.
///
/// Cheap to clone; clones share the same limiter.
#[derive(Debug, Clone)]
pub struct Gateway {
    limiter: ConcurrencyLimiter,
    runner: ProcessRunner,
}

impl Gateway {
    pub fn new(limiter: ConcurrencyLimiter, runner: ProcessRunner) -> Self {
        Self { limiter, runner }
    }

    pub fn from_config(cfg: &GatewayConfig) -> Self {
        let runner = ProcessRunner::new(cfg.executable.clone())
            .with_default_timeout(cfg.default_timeout)
            .with_max_output_bytes(cfg.max_output_bytes);
        Self::new(ConcurrencyLimiter::new(cfg.max_concurrency), runner)
    }

    pub fn limiter(&self) -> &ConcurrencyLimiter {
        &self.limiter
    }

    pub fn runner(&self) -> &ProcessRunner {
        &self.runner
    }

    /// Run `args` against the configured executable.
    pub async fn execute<I, S>(&self, args: I, options: ExecuteOptions) -> Result<ExecutionResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut request = ExecutionRequest::new(args).with_timeout(options.timeout);
        if let Some(tool) = options.tool {
            request = request.with_tool(tool);
        }
        self.run(&request).await
    }

    /// Wait for a slot, run the request, release the slot.
    pub async fn run(&self, request: &ExecutionRequest) -> Result<ExecutionResult> {
        let tool = request.display_name();

        let queued_at = Instant::now();
        let slot = self.limiter.acquire().await;
        debug!(
            tool,
            waited_ms = queued_at.elapsed().as_millis() as u64,
            "acquired execution slot"
        );

        let started = Instant::now();
        let outcome = self.runner.run(request).await;
        slot.release();

        let duration_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            Ok(res) => info!(
                tool,
                duration_ms,
                exit_code = res.exit_code,
                success = res.success,
                reboot_required = res.reboot_required,
                "command finished"
            ),
            Err(err) => info!(tool, duration_ms, error = %err, "command could not be started"),
        }

        outcome
    }
}
