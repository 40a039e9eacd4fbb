#![allow(dead_code)]

use chocogate::exec::classify;
use chocogate::types::ExecutionResult;

/// Builder for `ExecutionResult` to simplify test setup.
///
/// Goes through the real classifier, so `success` and `reboot_required` are
/// whatever production code would derive from the same exit code and output.
pub struct ExecutionResultBuilder {
    exit_code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl ExecutionResultBuilder {
    /// Process exited on its own with `code`.
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Process was killed (timeout / overflow); no exit code observed.
    pub fn killed() -> Self {
        Self {
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    pub fn stdout(mut self, text: &str) -> Self {
        self.stdout = text.to_string();
        self
    }

    pub fn stderr(mut self, text: &str) -> Self {
        self.stderr = text.to_string();
        self
    }

    pub fn build(self) -> ExecutionResult {
        classify(self.exit_code, self.stdout, self.stderr)
    }
}

/// Shorthand for a clean exit-0 result with the given stdout.
pub fn ok(stdout: &str) -> ExecutionResult {
    ExecutionResultBuilder::exited(0).stdout(stdout).build()
}

/// Shorthand for a failed result with the given exit code and stderr.
pub fn failed(code: i32, stderr: &str) -> ExecutionResult {
    ExecutionResultBuilder::exited(code).stderr(stderr).build()
}
