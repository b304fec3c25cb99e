//! Argument definitions for the `pak` binary

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Table,
    /// Machine-readable JSON
    Json,
}

#[derive(Parser)]
#[command(name = "pak")]
#[command(about = "pak - Packrat CLI - QR-labeled box inventory with cross-box search")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute (defaults to the interactive session)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, uses config file value or defaults to 'off'
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/packrat/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Set output format
    #[arg(short = 'f', long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a scanned or typed payload to a box identifier and show it
    Scan {
        /// Raw payload; read from stdin when omitted (pipe the decoder here)
        raw: Option<String>,
    },

    /// Show one box and its items
    Show {
        /// Box identifier (normalized before lookup)
        box_id: String,
    },

    /// List all boxes with item counts
    Boxes,

    /// Collection totals
    Stats,

    /// Search items by name or tag substring
    Search {
        /// Case-insensitive query
        query: String,
    },

    /// Add an item to a box (creates the box if needed)
    Add {
        /// Box identifier
        box_id: String,

        /// Item display name
        name: String,

        /// Comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,

        /// Ask the configured suggestion provider for tags when none given
        #[arg(short, long)]
        suggest: bool,
    },

    /// Remove an item from a box
    Rm {
        /// Box identifier
        box_id: String,

        /// Item identifier
        item_id: String,
    },

    /// Explicitly save a box, creating it empty if it does not exist
    ///
    /// A brand-new box with no items is dropped rather than persisted.
    Save {
        /// Box identifier
        box_id: String,
    },

    /// Interactive session (dashboard, scanner, box and search views)
    Interactive,
}
