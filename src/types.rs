use std::time::Duration;

/// One command line to run through the gateway.
///
/// Arguments are passed to the executable discretely; they are never joined
/// into a string or handed to a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    args: Vec<String>,
    timeout: Option<Duration>,
    tool: Option<String>,
}

impl ExecutionRequest {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            timeout: None,
            tool: None,
        }
    }

    /// Per-call timeout; `None` falls back to the runner's default.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Tool name used for the outcome log event.
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn tool(&self) -> Option<&str> {
        self.tool.as_deref()
    }

    /// Name to report in logs: the explicit tool name, else the first
    /// argument (the package manager sub-command).
    pub fn display_name(&self) -> &str {
        self.tool
            .as_deref()
            .or_else(|| self.args.first().map(String::as_str))
            .unwrap_or("<none>")
    }
}

/// Options accepted by [`crate::exec::Gateway::execute`].
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    pub timeout: Option<Duration>,
    pub tool: Option<String>,
}

/// Normalised outcome of one execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// True only when the process exited on its own with code 0.
    pub success: bool,
    /// Observed exit code, or `1` if none was observable (killed, signalled).
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    /// Best-effort text/exit-code heuristic. See [`crate::exec::classify`].
    pub reboot_required: bool,
}

impl ExecutionResult {
    /// Text to show a caller when the execution failed: stderr, or stdout if
    /// stderr is empty.
    pub fn error_message(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// How a spawned process came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Natural exit; `None` when the platform reports no code (signal).
    Exited(Option<i32>),
    TimedOut,
    BufferExceeded,
}

impl Termination {
    /// Exit code as seen by classification. Forced terminations have none.
    pub fn exit_code(self) -> Option<i32> {
        match self {
            Termination::Exited(code) => code,
            Termination::TimedOut | Termination::BufferExceeded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_tool() {
        let req = ExecutionRequest::new(["install", "git"]).with_tool("choco_install");
        assert_eq!(req.display_name(), "choco_install");

        let req = ExecutionRequest::new(["outdated"]);
        assert_eq!(req.display_name(), "outdated");
    }

    #[test]
    fn error_message_falls_back_to_stdout() {
        let mut res = ExecutionResult {
            success: false,
            exit_code: 1,
            stdout: "out".into(),
            stderr: String::new(),
            reboot_required: false,
        };
        assert_eq!(res.error_message(), "out");

        res.stderr = "err".into();
        assert_eq!(res.error_message(), "err");
    }
}
