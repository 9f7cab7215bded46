//! Subcommands and their flags.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use ytgrab_axum::{ServerConfig, StaticServerConfig};

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the download web service
    Web(WebArgs),

    /// Write a placeholder index.html and serve a directory over HTTP
    Static(StaticArgs),
}

/// Flags for `ytgrab web`.
#[derive(Args, Debug)]
pub struct WebArgs {
    /// Interface to bind
    #[arg(long, env = "YTGRAB_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Directory finished downloads are written to (created if missing)
    #[arg(long, env = "YTGRAB_DOWNLOAD_DIR", default_value = "downloads")]
    pub download_dir: PathBuf,

    /// yt-dlp executable
    #[arg(long, env = "YTDLP_PATH", default_value = "yt-dlp")]
    pub ytdlp_path: PathBuf,

    /// Do not run `yt-dlp -U` before each download
    #[arg(long, env = "YTGRAB_SKIP_UPDATE")]
    pub skip_update: bool,

    /// Maximum simultaneous downloads (0 = unlimited)
    #[arg(long, env = "YTGRAB_MAX_CONCURRENT", default_value_t = 0)]
    pub max_concurrent: usize,

    /// Fail a download that runs longer than this many seconds
    #[arg(long, env = "YTGRAB_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl WebArgs {
    pub fn into_config(self) -> ServerConfig {
        ServerConfig::default()
            .with_host(self.host)
            .with_port(self.port)
            .with_download_dir(self.download_dir)
            .with_ytdlp_program(self.ytdlp_path)
            .with_skip_update(self.skip_update)
            .with_max_concurrent(self.max_concurrent)
            .with_timeout(self.timeout_secs.map(Duration::from_secs))
    }
}

/// Flags for `ytgrab static`.
#[derive(Args, Debug)]
pub struct StaticArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = ytgrab_axum::static_site::DEFAULT_PORT)]
    pub port: u16,

    /// Directory to serve [default: current directory]
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Open the page in the default browser once the server is up
    #[arg(long)]
    pub open: bool,
}

impl StaticArgs {
    pub fn into_config(self) -> Result<StaticServerConfig> {
        let dir = match self.dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Cannot determine current directory")?,
        };
        Ok(StaticServerConfig::new(dir)
            .with_port(self.port)
            .with_open_browser(self.open))
    }
}
