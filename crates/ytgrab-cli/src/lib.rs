//! `ytgrab` command-line interface.
//!
//! Parsing and logging setup live in the library so they can be tested;
//! `main.rs` only dispatches.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary only
use dotenvy as _;
use tokio as _;

pub mod commands;
pub mod logging;
pub mod parser;

pub use commands::{Commands, StaticArgs, WebArgs};
pub use logging::init_tracing;
pub use parser::Cli;
