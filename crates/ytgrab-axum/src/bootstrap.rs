//! Axum server bootstrap - the composition root.
//!
//! This module is the only place where the job store, the yt-dlp runner and
//! the supervisor are wired together for the web adapter.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;
use ytgrab_core::{InMemoryJobStore, JobService, JobStore, ensure_download_dir};
use ytgrab_download::{
    JobSupervisor, MediaDownloader, SupervisorConfig, YtDlpConfig, YtDlpDownloader,
};

use crate::state::AppState;

/// Server configuration for the web adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// Where job outputs are written; created at startup.
    pub download_dir: PathBuf,
    /// yt-dlp program name or path.
    pub ytdlp_program: PathBuf,
    /// Skip the per-job `yt-dlp -U`.
    pub skip_update: bool,
    /// Maximum concurrent downloads, `0` for unbounded.
    pub max_concurrent: usize,
    /// Per-job time limit.
    pub timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            download_dir: PathBuf::from("downloads"),
            ytdlp_program: PathBuf::from(YtDlpConfig::DEFAULT_PROGRAM),
            skip_update: false,
            max_concurrent: 0,
            timeout: None,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_ytdlp_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.ytdlp_program = program.into();
        self
    }

    #[must_use]
    pub const fn with_skip_update(mut self, skip: bool) -> Self {
        self.skip_update = skip;
        self
    }

    #[must_use]
    pub const fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn supervisor_config(&self) -> SupervisorConfig {
        SupervisorConfig::new()
            .with_max_concurrent(self.max_concurrent)
            .with_timeout(self.timeout)
    }
}

/// Application context for the web adapter.
pub struct AppContext {
    /// Job submission and lookup.
    pub jobs: JobService,
    /// Owner of the background download tasks.
    pub supervisor: Arc<JobSupervisor>,
}

impl AppContext {
    /// Wire a store, a downloader and a supervisor into a context.
    pub fn new(
        store: Arc<dyn JobStore>,
        downloader: Arc<dyn MediaDownloader>,
        config: SupervisorConfig,
    ) -> Self {
        let supervisor = Arc::new(JobSupervisor::new(Arc::clone(&store), downloader, config));
        let jobs = JobService::new(store, supervisor.clone());
        Self { jobs, supervisor }
    }
}

/// Bootstrap the web server services.
///
/// Creates the download directory and resolves it to an absolute path so
/// stored job paths stay valid.
pub fn bootstrap(config: &ServerConfig) -> Result<AppContext> {
    let download_dir = ensure_download_dir(&config.download_dir).with_context(|| {
        format!(
            "Failed to prepare download directory {}",
            config.download_dir.display()
        )
    })?;

    info!(
        target: "ytgrab.http",
        download_dir = %download_dir.display(),
        ytdlp = %config.ytdlp_program.display(),
        skip_update = config.skip_update,
        max_concurrent = config.max_concurrent,
        timeout = ?config.timeout,
        "Web bootstrap resolved configuration"
    );

    let downloader = YtDlpDownloader::new(
        YtDlpConfig::new(download_dir)
            .with_program(&config.ytdlp_program)
            .with_skip_update(config.skip_update),
    );

    Ok(AppContext::new(
        Arc::new(InMemoryJobStore::new()),
        Arc::new(downloader),
        config.supervisor_config(),
    ))
}

/// Serve the web routes on `listener` until `shutdown` is cancelled, then
/// cancel every running job.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<()> {
    let addr: SocketAddr = listener.local_addr()?;
    let app = crate::routes::create_router(Arc::clone(&state));

    info!(target: "ytgrab.http", "ytgrab web server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    state.supervisor.shutdown().await;
    info!(target: "ytgrab.http", "ytgrab web server shut down");
    Ok(())
}

/// Start the web server and run it until Ctrl+C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let state: AppState = Arc::new(bootstrap(&config)?);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(shutdown.clone()));

    serve(listener, state, shutdown).await
}

/// Cancel `token` on Ctrl+C.
pub(crate) async fn cancel_on_ctrl_c(token: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(target: "ytgrab.http", "Received Ctrl+C, shutting down");
    }
    token.cancel();
}
