// src/tools/privilege.rs

//! Elevation probe used to annotate mutating tool output.

use std::future::Future;
use std::pin::Pin;

pub trait PrivilegeProbe: Send + Sync {
    /// `true` if the current session can make machine-wide changes. Any
    /// failure to find out counts as `false`.
    fn is_elevated(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>>;
}

/// Asks the operating system.
///
/// On Windows this runs a short PowerShell check for the Administrators role;
/// everywhere else it reports `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPrivilegeProbe;

impl PrivilegeProbe for SystemPrivilegeProbe {
    fn is_elevated(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        Box::pin(system_is_elevated())
    }
}

/// Fixed answer, for tests and for callers that already know.
#[derive(Debug, Clone, Copy)]
pub struct FixedPrivilege(pub bool);

impl PrivilegeProbe for FixedPrivilege {
    fn is_elevated(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        let elevated = self.0;
        Box::pin(async move { elevated })
    }
}

#[cfg(windows)]
async fn system_is_elevated() -> bool {
    use std::process::Stdio;
    use std::time::Duration;

    use tokio::process::Command;
    use tracing::debug;

    const CHECK: &str = "[Security.Principal.WindowsPrincipal]::new(\
        [Security.Principal.WindowsIdentity]::GetCurrent()).IsInRole(\
        [Security.Principal.WindowsBuiltInRole]::Administrator)";

    let mut cmd = Command::new("powershell");
    cmd.args(["-NoProfile", "-NonInteractive", "-Command", CHECK])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .creation_flags(0x0800_0000);

    match tokio::time::timeout(Duration::from_secs(5), cmd.output()).await {
        Ok(Ok(out)) => String::from_utf8_lossy(&out.stdout)
            .trim()
            .eq_ignore_ascii_case("true"),
        Ok(Err(e)) => {
            debug!(error = %e, "elevation probe failed to run");
            false
        }
        Err(_) => {
            debug!("elevation probe timed out");
            false
        }
    }
}

#[cfg(not(windows))]
async fn system_is_elevated() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_probe_reports_its_value() {
        assert!(FixedPrivilege(true).is_elevated().await);
        assert!(!FixedPrivilege(false).is_elevated().await);
    }

    #[cfg(not(windows))]
    #[tokio::test]
    async fn non_windows_is_never_elevated() {
        assert!(!SystemPrivilegeProbe.is_elevated().await);
    }
}
