//! Axum web adapter for ytgrab.
//!
//! Two servers live here:
//! - the job web service (`bootstrap`, `routes`, `handlers`), which submits
//!   URLs to the download supervisor and serves finished files
//! - the local static file server (`static_site`)

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Dev-dependencies used only by the integration tests
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use serde_json as _;

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;
pub mod static_site;

// Re-export primary types
pub use bootstrap::{AppContext, ServerConfig, bootstrap, serve, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
pub use static_site::{StaticServerConfig, start_static_server, static_router, write_placeholder};
