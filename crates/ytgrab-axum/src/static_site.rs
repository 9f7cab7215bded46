//! Local static file server.
//!
//! Writes a placeholder `index.html` into a directory and serves that
//! directory unmodified with `ServeDir` until Ctrl+C.

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::bootstrap::cancel_on_ctrl_c;

/// File the placeholder page is written to.
pub const INDEX_FILE: &str = "index.html";

/// Default port for the static server.
pub const DEFAULT_PORT: u16 = 8000;

/// Placeholder page written before serving.
pub const PLACEHOLDER_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Local Server Test</title>
    <style>
        body { font-family: sans-serif; text-align: center; padding: 50px; background-color: #f4f4f9; }
        h1 { color: #333; }
        p { color: #555; }
        .note { margin-top: 20px; color: #a00; font-weight: bold; }
    </style>
</head>
<body>
    <h1>Local Server is Running Successfully!</h1>
    <p>This file was automatically generated and served by ytgrab.</p>
    <div class="note">Close this terminal window (Ctrl+C) to stop the server.</div>
</body>
</html>
"#;

/// Configuration for the static server.
#[derive(Debug, Clone)]
pub struct StaticServerConfig {
    /// Interface to bind; all interfaces by default.
    pub host: String,
    pub port: u16,
    /// Directory to serve.
    pub dir: PathBuf,
    /// Open the index page in the default browser once listening.
    pub open_browser: bool,
}

impl StaticServerConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            dir: dir.into(),
            open_browser: false,
        }
    }

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
    pub const fn with_open_browser(mut self, open: bool) -> Self {
        self.open_browser = open;
        self
    }
}

/// URL of the placeholder page for a server on `port`.
pub fn index_url(port: u16) -> String {
    format!("http://localhost:{port}/{INDEX_FILE}")
}

/// Write [`PLACEHOLDER_HTML`] to `<dir>/index.html`, replacing any existing
/// file, and return its path.
pub async fn write_placeholder(dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(INDEX_FILE);
    tokio::fs::write(&path, PLACEHOLDER_HTML).await?;
    info!(target: "ytgrab.static", path = %path.display(), "Created placeholder page");
    Ok(path)
}

/// Router serving `dir` as-is.
pub fn static_router(dir: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(TraceLayer::new_for_http())
}

/// Bind the static server's listener.
///
/// An occupied port gets a dedicated message.
pub async fn bind(config: &StaticServerConfig) -> Result<TcpListener> {
    let addr = format!("{}:{}", config.host, config.port);
    match TcpListener::bind(&addr).await {
        Ok(listener) => Ok(listener),
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => bail!(
            "Port {} is already in use. Try a different port with --port.",
            config.port
        ),
        Err(e) => Err(anyhow::Error::new(e).context(format!("Failed to bind {addr}"))),
    }
}

/// Serve `dir` on `listener` until `shutdown` is cancelled.
pub async fn serve_static(
    listener: TcpListener,
    dir: &Path,
    shutdown: CancellationToken,
) -> Result<()> {
    axum::serve(listener, static_router(dir))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    info!(target: "ytgrab.static", "Server stopped by user");
    Ok(())
}

/// Write the placeholder, bind, optionally open a browser and serve until
/// Ctrl+C.
pub async fn start_static_server(config: StaticServerConfig) -> Result<()> {
    write_placeholder(&config.dir).await.with_context(|| {
        format!("Error creating HTML file in {}", config.dir.display())
    })?;

    let listener = bind(&config).await?;
    let local: SocketAddr = listener.local_addr()?;
    let url = index_url(local.port());

    info!(target: "ytgrab.static", dir = %config.dir.display(), "Serving directory");
    info!(target: "ytgrab.static", "Server started at: {url}");

    if config.open_browser {
        if let Err(e) = open::that_detached(&url) {
            warn!(target: "ytgrab.static", error = %e, "Could not open browser");
        }
    }

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(shutdown.clone()));
    serve_static(listener, &config.dir, shutdown).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_a_complete_document() {
        assert!(PLACEHOLDER_HTML.starts_with("<!DOCTYPE html>"));
        assert!(PLACEHOLDER_HTML.trim_end().ends_with("</html>"));
        assert!(PLACEHOLDER_HTML.contains("<h1>Local Server is Running Successfully!</h1>"));
        assert!(PLACEHOLDER_HTML.contains("Ctrl+C"));
        assert_eq!(
            PLACEHOLDER_HTML.matches("<body>").count(),
            PLACEHOLDER_HTML.matches("</body>").count()
        );
    }

    #[test]
    fn index_url_uses_localhost() {
        assert_eq!(index_url(8000), "http://localhost:8000/index.html");
    }

    #[test]
    fn config_defaults() {
        let config = StaticServerConfig::new("/srv/site");
        assert_eq!(config.port, 8000);
        assert!(!config.open_browser);
        assert_eq!(config.dir, PathBuf::from("/srv/site"));
    }
}
