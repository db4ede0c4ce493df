//! Core domain types and port definitions for sitectl.
//!
//! This crate is adapter-free: it holds the types the adapters exchange
//! and nothing about processes, filesystem layout, or CLI surfaces. The
//! runtime crate implements the [`WorkerSupervisor`] port; the CLI
//! consumes it.

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod outcome;
pub mod paths;
pub mod ports;
pub mod status;

pub use config::{ConfigError, DEFAULT_STARTUP_GRACE_MS, SiteConfig};
pub use error::SupervisorError;
pub use outcome::Outcome;
pub use paths::{LOCK_FILE_NAME, PID_FILE_NAME, StatePaths};
pub use ports::WorkerSupervisor;
pub use status::WorkerStatus;
