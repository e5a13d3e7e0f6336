mod product;

pub use product::ProductRepository;

/// Base trait for a storage backend, fixing the error type of its operations.
pub trait Repository {
    /// The error produced when the backend fails to complete an operation
    type Error: std::error::Error + Send + Sync + 'static;
}

/// The application as seen by the HTTP layer.
///
/// An application owns a product store. Request handlers reach the store
/// through [`Application::database`] and never construct one themselves.
pub trait Application {
    /// The product store backing this application
    type Repository: ProductRepository;

    /// Access the product store.
    fn database(&self) -> &Self::Repository;
}
