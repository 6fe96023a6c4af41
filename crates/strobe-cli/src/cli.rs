//! CLI structure and argument parsing for `strobe`.
//!
//! Standard command-subcommand layout built with clap derive macros:
//!
//! ```bash
//! # Browse the curated feed, five pages deep
//! strobe browse --pages 5
//!
//! # Machine-readable output
//! strobe browse --pages 2 --json
//!
//! # Validate configuration and probe the remote
//! strobe check
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI for the `strobe` command.
#[derive(Parser, Debug)]
#[command(name = "strobe", version, about = "Browse an incremental, deduplicating photo feed")]
pub struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a config file (defaults to the platform config directory;
    /// STROBE_ACCESS_KEY / STROBE_API_URL override file values)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and render pages from the feed
    Browse {
        /// Maximum number of pages to load
        #[arg(short, long, default_value_t = 3)]
        pages: u32,

        /// Emit one JSON object per photo instead of formatted text
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration and probe the remote with a single request
    Check,
}
