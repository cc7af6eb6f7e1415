//! mongolaunch common - shared types for the development MongoDB launcher
//!
//! This crate provides the pieces every launcher component agrees on:
//! - Error types and handling
//! - Configuration management
//! - The container invocation model
//! - MongoDB connection URIs

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod types;
pub mod uri;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
