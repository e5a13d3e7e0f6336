//! The concrete application served by the binary.

use products_core::ports::Application;
use products_sqlite::Db;

/// An application backed by the SQLite product store.
#[derive(Clone)]
pub struct ServerApp(pub Db);

impl Application for ServerApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.0
    }
}
