#![warn(missing_docs)]
//! The products REST API server.
//!
//! Wires the SQLite product store into the Axum router and serves it. The
//! binary reads its settings from defaults, an optional TOML file and `APP_`
//! prefixed environment variables, in that order of precedence.

pub mod app;

mod cli;
pub use cli::Cli;

mod config;
pub use config::AppConfig;
