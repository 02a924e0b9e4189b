//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wheelwatch - Classify wheel/trackpad delta streams into semantic gestures
#[derive(Parser, Debug)]
#[command(name = "wheelwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a trace through the analyzer and print its notifications
    Replay {
        /// Input trace file
        #[arg(short, long)]
        input: PathBuf,

        /// Write the replay report as JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print per-notification axis payloads
        #[arg(short, long)]
        detailed: bool,
    },

    /// Generate a synthetic trace file
    Synth {
        /// Pattern: flick, glide, crawl, jitter, two-axis
        #[arg(short, long, default_value = "flick")]
        pattern: String,

        /// Output file name (defaults to the pattern name)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List trace files
    List {
        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "analyzer.velocity", "wheelstop.wheelstop_delay")
        key: String,

        /// Value to set
        value: String,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the traces directory
    pub fn traces_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".wheelwatch").join("traces"))
            .unwrap_or_else(|| PathBuf::from("traces"))
    }
}
