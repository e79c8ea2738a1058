//! CLI argument models and configuration resolution for the enumerator binary.
//!
//! Exposes the clap-backed flag types plus the project/credential resolution
//! that must succeed before any network call is attempted.

pub mod cli_args;
pub mod config;

pub use cli_args::{Cli, Command};
pub use config::{resolve_run_config, ConfigurationError, RunConfig};
