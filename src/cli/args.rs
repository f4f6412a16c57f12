//! CLI argument definitions using clap
//!
//! Commands:
//! - movies-api [serve] [--config <path>] [--port <port>] [--seed <path>]
//! - movies-api check-seed [--seed <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// In-memory movie catalogue served over HTTP
#[derive(Parser, Debug)]
#[command(name = "movies-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Defaults to `serve` with no flags
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Listening port (overrides the config file and PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Seed dataset to load instead of the bundled one
        #[arg(long)]
        seed: Option<PathBuf>,
    },

    /// Validate a seed dataset and exit
    CheckSeed {
        /// Seed file; the bundled dataset when omitted
        #[arg(long)]
        seed: Option<PathBuf>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve {
            config: None,
            port: None,
            seed: None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
