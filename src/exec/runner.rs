// src/exec/runner.rs

//! Run one external command to completion under a timeout and an output
//! ceiling.
//!
//! The runner knows nothing about concurrency limits; see
//! [`crate::exec::Gateway`] for the admission-controlled entry point.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use crate::errors::{GatewayError, Result};
use crate::exec::classify::classify;
use crate::exec::tree::{ProcessTree, kill_and_reap};
use crate::types::{ExecutionRequest, ExecutionResult, Termination};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15 * 60);
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

const READ_CHUNK: usize = 8 * 1024;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Spawns the configured executable with a request's arguments.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
    default_timeout: Duration,
    max_output_bytes: usize,
}

/// stdout/stderr collected so far, sharing one byte budget.
#[derive(Debug, Default)]
struct CapturedOutput {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl CapturedOutput {
    fn len(&self) -> usize {
        self.stdout.len() + self.stderr.len()
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

impl ProcessRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            default_timeout: DEFAULT_TIMEOUT,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_max_output_bytes(mut self, bytes: usize) -> Self {
        self.max_output_bytes = bytes;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    pub fn max_output_bytes(&self) -> usize {
        self.max_output_bytes
    }

    /// Run the request to a terminal state.
    ///
    /// Only a failure to launch the executable is an `Err`. Non-zero exits,
    /// timeouts and output overflow all come back as a failed
    /// [`ExecutionResult`] carrying whatever output was captured.
    pub async fn run(&self, request: &ExecutionRequest) -> Result<ExecutionResult> {
        let timeout = request.timeout().unwrap_or(self.default_timeout);

        let mut child = self.spawn(request)?;
        let tree = ProcessTree::attach(&child);
        debug!(
            program = %self.program,
            pid = child.id(),
            ?timeout,
            "spawned command"
        );

        let mut captured = CapturedOutput::default();
        let termination = self.drive(&mut child, &mut captured, timeout).await;

        let termination = match termination {
            Ok(t) => t,
            Err(err) => {
                // Reading a pipe or waiting failed after spawn; the process
                // state is unknown, so treat it as a forced stop.
                warn!(program = %self.program, error = %err, "lost track of child process");
                kill_and_reap(&mut child, &tree).await;
                Termination::Exited(None)
            }
        };

        match termination {
            Termination::TimedOut => {
                warn!(program = %self.program, ?timeout, "command timed out; killing");
                kill_and_reap(&mut child, &tree).await;
            }
            Termination::BufferExceeded => {
                warn!(
                    program = %self.program,
                    limit = self.max_output_bytes,
                    "command output exceeded limit; killing"
                );
                kill_and_reap(&mut child, &tree).await;
            }
            Termination::Exited(_) => {}
        }

        let stdout = String::from_utf8_lossy(&captured.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&captured.stderr).into_owned();
        Ok(classify(termination.exit_code(), stdout, stderr))
    }

    fn spawn(&self, request: &ExecutionRequest) -> Result<Child> {
        let mut cmd = Command::new(&self.program);
        cmd.args(request.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Own process group, so `ProcessTree` can take down grandchildren too.
        #[cfg(unix)]
        {
            cmd.process_group(0);
        }

        #[cfg(windows)]
        {
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        cmd.spawn().map_err(|source| GatewayError::SpawnError {
            program: self.program.clone(),
            source,
        })
    }

    /// Drain both pipes and wait for exit, bounded by `timeout`.
    async fn drive(
        &self,
        child: &mut Child,
        captured: &mut CapturedOutput,
        timeout: Duration,
    ) -> std::io::Result<Termination> {
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let limit = self.max_output_bytes;

        let work = async {
            if !capture(stdout, stderr, captured, limit).await? {
                return Ok(Termination::BufferExceeded);
            }
            let status = child.wait().await?;
            Ok(Termination::Exited(status.code()))
        };

        match tokio::time::timeout(timeout, work).await {
            Ok(res) => res,
            Err(_) => Ok(Termination::TimedOut),
        }
    }
}

/// Read both streams to EOF. Returns `false` once the combined size would
/// exceed `limit`; bytes up to the limit are kept.
async fn capture<O, E>(
    stdout: Option<O>,
    stderr: Option<E>,
    captured: &mut CapturedOutput,
    limit: usize,
) -> std::io::Result<bool>
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut out_open = stdout.is_some();
    let mut err_open = stderr.is_some();
    let (mut stdout, mut stderr) = (stdout, stderr);
    let mut out_buf = [0u8; READ_CHUNK];
    let mut err_buf = [0u8; READ_CHUNK];

    while out_open || err_open {
        let (stream, n) = tokio::select! {
            n = read_some(&mut stdout, &mut out_buf), if out_open => (Stream::Stdout, n?),
            n = read_some(&mut stderr, &mut err_buf), if err_open => (Stream::Stderr, n?),
        };

        if n == 0 {
            match stream {
                Stream::Stdout => out_open = false,
                Stream::Stderr => err_open = false,
            }
            continue;
        }

        let chunk = match stream {
            Stream::Stdout => &out_buf[..n],
            Stream::Stderr => &err_buf[..n],
        };
        if !append(captured, stream, chunk, limit) {
            return Ok(false);
        }
    }

    Ok(true)
}

async fn read_some<R: AsyncRead + Unpin>(
    reader: &mut Option<R>,
    buf: &mut [u8],
) -> std::io::Result<usize> {
    match reader {
        Some(r) => r.read(buf).await,
        None => Ok(0),
    }
}

fn append(captured: &mut CapturedOutput, stream: Stream, chunk: &[u8], limit: usize) -> bool {
    let room = limit.saturating_sub(captured.len());
    let take = chunk.len().min(room);
    let sink = match stream {
        Stream::Stdout => &mut captured.stdout,
        Stream::Stderr => &mut captured.stderr,
    };
    sink.extend_from_slice(&chunk[..take]);
    take == chunk.len()
}
