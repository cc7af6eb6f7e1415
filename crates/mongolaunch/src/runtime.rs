//! Container runtime process seam

use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use mongolaunch_common::{Error, Result};

/// Exit status of a finished runtime invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeExit {
    pub code: i32,
}

impl RuntimeExit {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

impl From<ExitStatus> for RuntimeExit {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self { code };
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self { code: 128 + signal };
            }
        }

        Self { code: 1 }
    }
}

/// Something that can execute container runtime commands
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Program name shown in plans and logs
    fn program(&self) -> &str;

    /// Run the runtime with `args` in the foreground and wait for it to exit
    async fn run(&self, args: &[String]) -> Result<RuntimeExit>;
}

/// Runs the runtime as a child process sharing this process's stdio
#[derive(Debug, Clone)]
pub struct ProcessRuntime {
    program: String,
}

impl ProcessRuntime {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ContainerRuntime for ProcessRuntime {
    fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, args: &[String]) -> Result<RuntimeExit> {
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| Error::RuntimeSpawn {
                program: self.program.clone(),
                source,
            })?;

        debug!(program = %self.program, pid = ?child.id(), "Container runtime started");

        // The terminal delivers Ctrl-C to the runtime as well; let it stop
        // the container and report its own status.
        let status = tokio::select! {
            status = child.wait() => status?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received, waiting for the container runtime to exit");
                child.wait().await?
            }
        };

        let exit = RuntimeExit::from(status);
        if exit.success() {
            debug!(program = %self.program, "Container runtime exited cleanly");
        } else {
            warn!(program = %self.program, code = exit.code, "Container runtime exited with failure");
        }
        Ok(exit)
    }
}
