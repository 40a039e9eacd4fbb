// src/exec/tree.rs

//! Killing a child together with the processes it started.
//!
//! On Unix the child is spawned as the leader of its own process group and
//! the whole group is sent `SIGKILL`. On Windows the child is placed in a Job
//! Object created with `JOB_OBJECT_LIMIT_KILL_ON_JOB_CLOSE`: terminating the
//! job takes down installers such as `msiexec` that `choco` launched, and
//! dropping the handle does the same if the run is abandoned.
//!
//! Processes started before the child joins its job are not covered.

use tokio::process::Child;

pub(crate) use imp::ProcessTree;

#[cfg(unix)]
mod imp {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;
    use tokio::process::Child;
    use tracing::{debug, warn};

    #[derive(Debug)]
    pub(crate) struct ProcessTree {
        pgid: Option<Pid>,
    }

    impl ProcessTree {
        /// The child must have been spawned with `process_group(0)`.
        pub(crate) fn attach(child: &Child) -> Self {
            Self {
                pgid: child.id().map(|pid| Pid::from_raw(pid as i32)),
            }
        }

        pub(crate) fn kill(&self) {
            let Some(pgid) = self.pgid else {
                return;
            };
            match killpg(pgid, Signal::SIGKILL) {
                Ok(()) => {}
                Err(Errno::ESRCH) => debug!(pgid = pgid.as_raw(), "process group already gone"),
                Err(e) => warn!(pgid = pgid.as_raw(), error = %e, "failed to kill process group"),
            }
        }
    }
}

#[cfg(windows)]
mod imp {
    use tokio::process::Child;
    use tracing::warn;
    use windows::Win32::Foundation::{CloseHandle, HANDLE};
    use windows::Win32::System::JobObjects::{
        AssignProcessToJobObject, CreateJobObjectW, JOB_OBJECT_LIMIT_KILL_ON_JOB_CLOSE,
        JOBOBJECT_EXTENDED_LIMIT_INFORMATION, JobObjectExtendedLimitInformation,
        SetInformationJobObject, TerminateJobObject,
    };
    use windows::core::PCWSTR;

    #[derive(Debug)]
    pub(crate) struct ProcessTree {
        job: Option<JobObject>,
    }

    impl ProcessTree {
        pub(crate) fn attach(child: &Child) -> Self {
            let job = JobObject::new().and_then(|job| {
                job.assign(child)?;
                Ok(job)
            });
            match job {
                Ok(job) => Self { job: Some(job) },
                Err(e) => {
                    warn!(error = %e, "could not place command in a job object; only the direct process can be killed");
                    Self { job: None }
                }
            }
        }

        pub(crate) fn kill(&self) {
            if let Some(job) = &self.job {
                if let Err(e) = job.terminate() {
                    warn!(error = %e, "failed to terminate job object");
                }
            }
        }
    }

    /// Owned Job Object handle; closing it kills every process still in it.
    #[derive(Debug)]
    struct JobObject {
        handle: HANDLE,
    }

    // SAFETY: a job handle is a kernel object reference usable from any thread.
    unsafe impl Send for JobObject {}
    unsafe impl Sync for JobObject {}

    impl JobObject {
        fn new() -> windows::core::Result<Self> {
            // SAFETY: the handle is owned by `job` from here on, and `info`
            // outlives the call that reads it.
            unsafe {
                let job = Self {
                    handle: CreateJobObjectW(None, PCWSTR::null())?,
                };

                let mut info: JOBOBJECT_EXTENDED_LIMIT_INFORMATION = std::mem::zeroed();
                info.BasicLimitInformation.LimitFlags = JOB_OBJECT_LIMIT_KILL_ON_JOB_CLOSE;
                SetInformationJobObject(
                    job.handle,
                    JobObjectExtendedLimitInformation,
                    (&raw const info).cast(),
                    std::mem::size_of::<JOBOBJECT_EXTENDED_LIMIT_INFORMATION>() as u32,
                )?;

                Ok(job)
            }
        }

        fn assign(&self, child: &Child) -> windows::core::Result<()> {
            let Some(raw) = child.raw_handle() else {
                return Ok(());
            };
            // SAFETY: `raw` belongs to a live child that has not been reaped.
            unsafe { AssignProcessToJobObject(self.handle, HANDLE(raw)) }
        }

        fn terminate(&self) -> windows::core::Result<()> {
            // SAFETY: `handle` is a valid job handle until drop.
            unsafe { TerminateJobObject(self.handle, 1) }
        }
    }

    impl Drop for JobObject {
        fn drop(&mut self) {
            // SAFETY: closed exactly once.
            unsafe {
                let _ = CloseHandle(self.handle);
            }
        }
    }
}

#[cfg(not(any(unix, windows)))]
mod imp {
    use tokio::process::Child;

    #[derive(Debug)]
    pub(crate) struct ProcessTree;

    impl ProcessTree {
        pub(crate) fn attach(_child: &Child) -> Self {
            Self
        }

        pub(crate) fn kill(&self) {}
    }
}

/// Kill the child and everything in its tree, then reap the child.
pub(crate) async fn kill_and_reap(child: &mut Child, tree: &ProcessTree) {
    tree.kill();

    if let Err(e) = child.start_kill() {
        tracing::debug!(error = %e, "start_kill failed; child likely already exited");
    }
    if let Err(e) = child.wait().await {
        tracing::warn!(error = %e, "failed to reap killed child");
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::process::Stdio;
    use std::time::Duration;

    use tokio::process::Command;

    use super::*;

    fn spawn_group(script: &str) -> Child {
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .process_group(0);
        cmd.spawn().unwrap()
    }

    #[tokio::test]
    async fn kill_takes_down_the_group_leader() {
        let mut child = spawn_group("sleep 30");
        let tree = ProcessTree::attach(&child);

        tokio::time::timeout(Duration::from_secs(5), kill_and_reap(&mut child, &tree))
            .await
            .unwrap();

        // Already reaped: a second wait returns the cached status.
        let status = child.wait().await.unwrap();
        assert_eq!(status.code(), None, "killed by signal, no exit code");
    }

    #[tokio::test]
    async fn killing_an_exited_group_is_harmless() {
        let mut child = spawn_group("exit 0");
        let tree = ProcessTree::attach(&child);
        child.wait().await.unwrap();

        // ESRCH path: nothing left in the group.
        tree.kill();
        kill_and_reap(&mut child, &tree).await;
    }
}
