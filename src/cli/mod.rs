//! CLI command definitions for magma-config
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod init;

use clap::{Parser, Subcommand, ValueEnum};
use init::InitArgs;
use std::path::PathBuf;

/// Environment variable naming the config file directly, bypassing ascent search.
pub const CONFIG_PATH_ENV: &str = "MAGMA_CONFIG_PATH";

/// Output format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary (default)
    #[default]
    Text,
    /// The config as pretty-printed JSON
    Json,
}

/// Locate, inspect and create magma.json project configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to start the search from (default: current directory)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Explicit config file (overrides ascent search and MAGMA_CONFIG_PATH)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the path of the nearest magma.json
    Find,

    /// Load the nearest magma.json and print it
    Show {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the absolute output locations derived from the config
    Paths,

    /// Print the active compiler and its options
    Compiler,

    /// Write a default magma.json
    Init(InitArgs),
}
