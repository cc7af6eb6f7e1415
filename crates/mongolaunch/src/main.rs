//! mongolaunch - throwaway MongoDB for local development
//!
//! Run without arguments to start `sample-mongodb` in the foreground:
//! - port 27017 published on the host
//! - root credentials set through the image's environment
//! - data kept in `.tmp/mongo` next to the executable
//! - container removed when it stops

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use mongolaunch::config::{self, Overrides};
use mongolaunch::render::PlanFormat;
use mongolaunch_common::{Config, Secrets};

mod cli;

#[derive(Parser)]
#[command(name = "mongolaunch")]
#[command(author, version, about = "Start a throwaway MongoDB container for local development", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path (TOML or JSON); defaults apply when absent
    #[arg(short, long, env = "MONGOLAUNCH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Container runtime program
    #[arg(long, env = "MONGOLAUNCH_RUNTIME", global = true)]
    runtime: Option<String>,

    /// Directory the storage path is anchored at (default: the executable's directory)
    #[arg(long, env = "MONGOLAUNCH_BASE_DIR", global = true)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MongoDB container in the foreground (default)
    Launch {
        /// Print the runtime command instead of running it
        #[arg(long)]
        dry_run: bool,

        /// Create the storage directory before starting the container
        #[arg(long)]
        create_dir: bool,
    },

    /// Show the resolved runtime command
    Plan {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = PlanFormat::Text)]
        format: PlanFormat,

        /// Include the root password in the output
        #[arg(long)]
        show_password: bool,
    },

    /// Print the connection string for the launched database
    Uri {
        /// Include the root password in the output
        #[arg(long)]
        show_password: bool,
    },

    /// Print the MONGODB_* variables a client application reads
    Env {
        /// Include the root password in the output
        #[arg(long)]
        show_password: bool,
    },

    /// Show version information
    Version,
}

fn secrets(show_password: bool) -> Secrets {
    if show_password {
        Secrets::Revealed
    } else {
        Secrets::Masked
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            let runtime_missing = e
                .downcast_ref::<mongolaunch_common::Error>()
                .is_some_and(mongolaunch_common::Error::is_runtime_missing);
            if runtime_missing {
                ExitCode::from(127)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run() -> Result<ExitCode> {
    // Initialize tracing on stderr; RUST_LOG replaces the default filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mongolaunch=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Launch {
        dry_run: false,
        create_dir: false,
    });

    let mut overrides = Overrides {
        runtime: cli.runtime,
        base_dir: cli.base_dir,
        create_dir: false,
    };
    if let Commands::Launch { create_dir, .. } = &command {
        overrides.create_dir = *create_dir;
    }

    let config = match &cli.config {
        Some(path) => config::load(path, &overrides)?,
        None => {
            let mut config = Config::default();
            config::apply(&mut config, &overrides);
            config
        }
    };

    match command {
        Commands::Launch { dry_run, .. } => cli::handle_launch(config, dry_run).await,
        Commands::Plan { format, show_password } => cli::handle_plan(config, format, secrets(show_password)),
        Commands::Uri { show_password } => cli::handle_uri(&config, secrets(show_password)),
        Commands::Env { show_password } => cli::handle_env(&config, secrets(show_password)),
        Commands::Version => Ok(cli::handle_version()),
    }
}
