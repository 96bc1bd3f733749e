//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// opencast - Catalogue local video and keep AirPlay displays in sync
#[derive(Parser, Debug)]
#[command(name = "opencast")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// Path to config.toml (default: ~/.config/opencast/config.toml)
    #[arg(short, long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List TV shows with their episode counts
    Shows,

    /// List movies
    Movies,

    /// Keep all displays in sync until interrupted
    Broadcast,

    /// Play a file on a display, then keep broadcasting
    Play {
        /// Video file to play
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Display name (default: first configured display)
        #[arg(short, long)]
        display: Option<String>,
    },

    /// List configured displays
    Displays,
}
