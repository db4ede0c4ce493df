//! CLI surface for the sitectl supervisor.
//!
//! Argument parsing lives in [`parser`] and [`commands`]; the thin
//! command handlers in [`handlers`] delegate to the supervisor port and
//! format outcomes for the terminal.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings for test infrastructure
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;

// Used by main.rs: async runtime, log output and the supervisor wiring
use sitectl_runtime as _;
use tokio as _;
use tracing as _;
use tracing_subscriber as _;

pub mod commands;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use commands::Commands;
pub use parser::Cli;
