use crate::models::{Product, ProductDraft, ProductId, ProductUpdate};

/// Repository interface for product records.
///
/// Implementations own id assignment: [`ProductRepository::create_product`]
/// returns the stored record including its new id. Operations that target a
/// single product return `Ok(None)` (or `Ok(false)`) when no product has the
/// given id, leaving the not-found response to the caller.
pub trait ProductRepository: super::Repository {
    /// List every product, ordered by id.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send;

    /// Get a single product.
    fn get_product(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send;

    /// Store a new, available product.
    fn create_product(
        &self,
        draft: ProductDraft,
    ) -> impl Future<Output = Result<Product, Self::Error>> + Send;

    /// Replace the name, price and availability of an existing product.
    fn update_product(
        &self,
        product_id: ProductId,
        update: ProductUpdate,
    ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send;

    /// Flip the availability of an existing product, leaving all other fields untouched.
    fn toggle_availability(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send;

    /// Remove a product.
    ///
    /// # Returns
    ///
    /// `true` if a product was removed, `false` if none had the given id.
    fn delete_product(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
