//! mongolaunch - throwaway MongoDB for local development
//!
//! Resolves a storage directory next to the launcher executable and asks the
//! container runtime to start an auto-removed `mongo:latest` container with
//! that directory mounted as its data directory.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod launcher;
pub mod paths;
pub mod render;
pub mod runtime;

pub use launcher::{LaunchPlan, Launcher};
pub use runtime::{ContainerRuntime, ProcessRuntime, RuntimeExit};
