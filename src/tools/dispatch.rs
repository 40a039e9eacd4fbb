// src/tools/dispatch.rs

//! Run a [`ToolCall`] and shape what the caller sees.

use tracing::debug;

use crate::errors::ToolError;
use crate::exec::CommandBackend;
use crate::exec::classify::REBOOT_REQUIRED_EXIT_CODE;
use crate::tools::ToolCall;
use crate::tools::privilege::{PrivilegeProbe, SystemPrivilegeProbe};
use crate::types::ExecutionResult;

/// Text returned to the caller, plus metadata for mutating tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub annotations: Option<Annotations>,
}

/// Exit code and reboot flag reported by install/upgrade/uninstall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotations {
    pub exit_code: i32,
    pub reboot_required: bool,
}

pub struct ToolDispatcher<B> {
    backend: B,
    probe: Box<dyn PrivilegeProbe>,
}

impl<B: CommandBackend> ToolDispatcher<B> {
    pub fn new(backend: B) -> Self {
        Self::with_probe(backend, Box::new(SystemPrivilegeProbe))
    }

    pub fn with_probe(backend: B, probe: Box<dyn PrivilegeProbe>) -> Self {
        Self { backend, probe }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Validate, execute, and map the result.
    ///
    /// A failed execution becomes [`ToolError::CommandFailed`], except exit
    /// code 3010 ("succeeded, reboot required"), which is reported as
    /// success with `reboot_required` set.
    pub async fn invoke(&self, call: &ToolCall) -> Result<ToolOutput, ToolError> {
        let request = call.to_request()?;
        debug!(tool = call.name(), argc = request.args().len(), "dispatching tool call");

        let elevated = if call.is_mutating() {
            Some(self.probe.is_elevated().await)
        } else {
            None
        };

        let result = self.backend.execute(request).await?;
        if !result.success && !is_reboot_pending_success(&result) {
            return Err(ToolError::CommandFailed {
                message: result.error_message().to_string(),
                result: Box::new(result),
            });
        }

        Ok(match elevated {
            None => ToolOutput {
                text: result.stdout,
                annotations: None,
            },
            Some(elevated) => {
                let annotations = Annotations {
                    exit_code: result.exit_code,
                    reboot_required: result.reboot_required,
                };
                let text = match non_admin_notice(call) {
                    Some(notice) if !elevated => format!("{notice}\n\n{}", result.stdout),
                    _ => result.stdout,
                };
                ToolOutput {
                    text,
                    annotations: Some(annotations),
                }
            }
        })
    }
}

fn is_reboot_pending_success(result: &ExecutionResult) -> bool {
    result.exit_code == REBOOT_REQUIRED_EXIT_CODE
}

fn non_admin_notice(call: &ToolCall) -> Option<&'static str> {
    match call {
        ToolCall::Install(_) => {
            Some("[Non-admin session] Some installs may fail or be user-scoped only.")
        }
        ToolCall::Upgrade(_) => {
            Some("[Non-admin session] Some upgrades may fail or be user-scoped only.")
        }
        ToolCall::Uninstall(_) => {
            Some("[Non-admin session] Some uninstalls may fail or be partial.")
        }
        _ => None,
    }
}
