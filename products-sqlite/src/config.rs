//! Where the product store keeps its data.
//!
//! Leaving `database_path` unset gives an in-memory store. Every in-memory
//! store is private to the [`Db`](crate::Db) that opened it and disappears
//! when that handle is dropped, which suits tests and throwaway runs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for opening the product store.
///
/// Missing keys take their [`Default`] values, so an empty configuration
/// section opens a fresh in-memory store.
///
/// ```
/// use products_sqlite::config::SqliteConfig;
/// use std::path::PathBuf;
///
/// let scratch = SqliteConfig::default();
/// assert!(scratch.database_path.is_none());
///
/// let persistent = SqliteConfig {
///     database_path: Some(PathBuf::from("products.db")),
///     ..Default::default()
/// };
/// assert!(persistent.create_if_missing);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// File holding the products table; `None` keeps everything in memory.
    pub database_path: Option<PathBuf>,

    /// Create the file on first open instead of failing when it is absent.
    pub create_if_missing: bool,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            create_if_missing: true,
        }
    }
}
