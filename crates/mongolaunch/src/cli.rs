//! CLI command handlers

use std::process::ExitCode;

use anyhow::Result;
use tracing::info;

use mongolaunch::render::{self, PlanFormat};
use mongolaunch::Launcher;
use mongolaunch_common::uri::{client_env, connection_uri, ConnectionTarget};
use mongolaunch_common::{Config, Secrets};

/// Start the container, or only print what would run
pub async fn handle_launch(config: Config, dry_run: bool) -> Result<ExitCode> {
    let launcher = Launcher::new(config)?;

    if dry_run {
        let plan = launcher.plan()?;
        println!("{}", render::command_line(&plan, Secrets::Masked));
        return Ok(ExitCode::SUCCESS);
    }

    let exit = launcher.launch().await?;
    info!(code = exit.code, "Container runtime finished");
    Ok(exit_code(exit.code))
}

/// Print the resolved runtime command
pub fn handle_plan(config: Config, format: PlanFormat, secrets: Secrets) -> Result<ExitCode> {
    let plan = Launcher::new(config)?.plan()?;
    println!("{}", render::render(&plan, format, secrets)?);
    Ok(ExitCode::SUCCESS)
}

fn connection_target(config: &Config) -> Result<ConnectionTarget> {
    Ok(ConnectionTarget::resolve(config.container.host_port, |key| {
        std::env::var(key).ok()
    })?)
}

/// Print the connection string for the launched database
pub fn handle_uri(config: &Config, secrets: Secrets) -> Result<ExitCode> {
    let target = connection_target(config)?;
    let uri = connection_uri(&config.container.credentials(), &target, secrets)?;
    println!("{uri}");
    Ok(ExitCode::SUCCESS)
}

/// Print `KEY=value` lines a client application can source
pub fn handle_env(config: &Config, secrets: Secrets) -> Result<ExitCode> {
    let target = connection_target(config)?;
    for (key, value) in client_env(&config.container.credentials(), &target, secrets) {
        println!("{key}={}", render::shell_quote(&value));
    }
    Ok(ExitCode::SUCCESS)
}

pub fn handle_version() -> ExitCode {
    println!("mongolaunch version {}", env!("CARGO_PKG_VERSION"));
    ExitCode::SUCCESS
}

/// Process exit code for a runtime status; out-of-range values become 1
pub fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}
