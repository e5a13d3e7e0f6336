//! Configuration types for the Axum HTTP server.
//!
//! This module provides configuration options for the REST API server,
//! including network binding, the allowed cross-origin caller and the request
//! body limit.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Configuration for the Axum HTTP server.
///
/// # Examples
///
/// ```
/// use products_axum::config::AxumConfig;
///
/// // Use default configuration
/// let config = AxumConfig::default();
///
/// // Custom configuration
/// let config = AxumConfig {
///     bind_address: "127.0.0.1:3000".parse().unwrap(),
///     allowed_origin: Some("http://localhost:5173".to_string()),
///     body_limit: 1024 * 1024,
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AxumConfig {
    /// The address to bind the server to
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// The single origin allowed to make cross-origin requests.
    ///
    /// When unset, every request that carries an `Origin` header is refused.
    #[serde(default)]
    pub allowed_origin: Option<String>,

    /// The largest accepted request body, in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 4000))
}

fn default_body_limit() -> usize {
    100 * 1024
}

impl Default for AxumConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            allowed_origin: None,
            body_limit: default_body_limit(),
        }
    }
}
