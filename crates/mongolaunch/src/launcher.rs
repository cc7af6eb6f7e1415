//! The launcher: resolve the storage directory and start the container

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use mongolaunch_common::{Config, ContainerInvocation, Result, Secrets};

use crate::paths;
use crate::render;
use crate::runtime::{ContainerRuntime, ProcessRuntime, RuntimeExit};

/// Everything needed to start the container, resolved but not executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub runtime: String,
    pub storage_path: PathBuf,
    pub invocation: ContainerInvocation,
}

/// Starts one MongoDB container per call to [`Launcher::launch`]
pub struct Launcher {
    config: Config,
    base_dir: PathBuf,
    runtime: Arc<dyn ContainerRuntime>,
}

impl Launcher {
    /// Launcher anchored at the configured base directory, or at the
    /// directory of the running executable when none is configured.
    /// A relative base directory is taken from the current working directory.
    pub fn new(config: Config) -> Result<Self> {
        let base_dir = match &config.storage.base_dir {
            Some(dir) => paths::resolve_base_dir(dir)?,
            None => paths::entry_dir()?,
        };
        let runtime = Arc::new(ProcessRuntime::new(config.runtime.program.clone()));
        Ok(Self::with_runtime(config, base_dir, runtime))
    }

    pub fn with_runtime(config: Config, base_dir: PathBuf, runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self {
            config,
            base_dir,
            runtime,
        }
    }

    /// Resolve the storage path and build the runtime arguments
    pub fn plan(&self) -> Result<LaunchPlan> {
        let storage_path = paths::storage_path(&self.base_dir, &self.config.storage.relative_path);
        let invocation = self.config.invocation(&storage_path)?;
        debug!(
            base_dir = %self.base_dir.display(),
            storage = %storage_path.display(),
            "Resolved launch plan"
        );

        Ok(LaunchPlan {
            runtime: self.runtime.program().to_string(),
            storage_path,
            invocation,
        })
    }

    /// Create the storage directory when configured to; otherwise leave it
    /// to the container runtime.
    pub fn prepare_storage(&self, plan: &LaunchPlan) -> Result<()> {
        if self.config.storage.create_dir {
            std::fs::create_dir_all(&plan.storage_path)?;
            info!(path = %plan.storage_path.display(), "Storage directory ready");
        }
        Ok(())
    }

    /// Start the container in the foreground and wait for the runtime to exit.
    ///
    /// Runtime failures (port in use, name collision, missing image, daemon
    /// down) come back as a non-zero [`RuntimeExit`], not as an error.
    pub async fn launch(&self) -> Result<RuntimeExit> {
        let plan = self.plan()?;
        self.prepare_storage(&plan)?;

        info!(
            container = plan.invocation.name(),
            storage = %plan.storage_path.display(),
            "Starting MongoDB container"
        );
        info!("{}", render::command_line(&plan, Secrets::Masked));

        self.runtime.run(&plan.invocation.to_args()).await
    }
}
