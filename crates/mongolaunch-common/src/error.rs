//! Error types for mongolaunch
//!
//! Failures reported by the container runtime itself are not errors here:
//! they are exit statuses and travel back to the caller untouched.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using mongolaunch's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for mongolaunch
#[derive(Error, Debug)]
pub enum Error {
    // Configuration Errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Invocation Errors
    #[error("Invalid invocation")]
    InvalidInvocation(#[from] InvocationError),

    // Entry point resolution
    #[error("Cannot resolve launcher location: {0}")]
    EntryPoint(String),

    // Runtime process could not be started at all
    #[error("Failed to start container runtime `{program}`")]
    RuntimeSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    // IO Errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the runtime program does not exist on this host.
    pub fn is_runtime_missing(&self) -> bool {
        matches!(
            self,
            Error::RuntimeSpawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Violations of the container invocation invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    #[error("Container name must not be empty")]
    EmptyName,

    #[error("Invalid container name: {0}")]
    InvalidName(String),

    #[error("Invalid image reference: {0:?}")]
    InvalidImage(String),

    #[error("Port must be non-zero ({0})")]
    ZeroPort(&'static str),

    #[error("Invalid environment variable key: {0:?}")]
    InvalidEnvKey(String),

    #[error("Mount path must be absolute: {}", .0.display())]
    RelativeMount(PathBuf),
}
