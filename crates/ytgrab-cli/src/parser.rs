//! Top-level argument parser.

use clap::Parser;

use crate::commands::Commands;

/// Download videos through a small web front-end, or serve a directory.
#[derive(Parser, Debug)]
#[command(name = "ytgrab")]
#[command(about = "Web front-end for yt-dlp and a local static file server")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
