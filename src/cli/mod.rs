//! CLI module for the movies service
//!
//! Provides command-line interface for:
//! - serve: Resolve config, load the seed and serve HTTP (default)
//! - check-seed: One-shot seed dataset validation

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check_seed, resolve_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
