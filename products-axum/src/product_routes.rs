//! REST API endpoints for product operations.
//!
//! Handlers only ever see requests that have passed their route's field
//! validators, so they assume well-formed input and concern themselves with
//! the product store alone.

use crate::{
    ApiApplication,
    openapi::document_route,
    routes::{Operation, RouteTable},
};
use aide::axum::{
    ApiRouter,
    routing::{self, ApiMethodRouter},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use indexmap::IndexMap;
use products_core::{
    models::{Product, ProductDraft, ProductId, ProductUpdate},
    ports::ProductRepository as _,
};
use tracing::{Level, event};

/// Path parameter for product-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
struct Id {
    /// The Id of the product
    #[schemars(with = "i64")]
    id: ProductId,
}

// Chains a documented handler onto the method router already registered for
// a path, or starts a new one.
macro_rules! bind {
    ($existing:expr, $method:ident, $handler:expr, $doc:expr) => {{
        let doc = $doc;
        match $existing {
            Some(router) => router.$method($handler, move |op| document_route(doc, op)),
            None => routing::$method($handler, move |op| document_route(doc, op)),
        }
    }};
}

/// Creates a router serving every route of the table.
///
/// Definitions sharing a path pattern are merged into one method router, and
/// paths are registered in the order they first appear in the table.
pub(crate) fn router<T: ApiApplication>(table: &RouteTable) -> ApiRouter<T> {
    let mut paths: IndexMap<&'static str, Option<ApiMethodRouter<T>>> = IndexMap::new();

    for route in table.routes() {
        let slot = paths.entry(route.path).or_default();
        let existing = slot.take();
        *slot = Some(match route.operation {
            Operation::ListProducts => bind!(existing, get_with, list_products::<T>, route.doc),
            Operation::ReadProduct => bind!(existing, get_with, get_product::<T>, route.doc),
            Operation::CreateProduct => {
                bind!(existing, post_with, create_product::<T>, route.doc)
            }
            Operation::UpdateProduct => bind!(existing, put_with, update_product::<T>, route.doc),
            Operation::ToggleAvailability => {
                bind!(existing, patch_with, toggle_availability::<T>, route.doc)
            }
            Operation::DeleteProduct => {
                bind!(existing, delete_with, delete_product::<T>, route.doc)
            }
        });
    }

    paths
        .into_iter()
        .filter_map(|(path, method_router)| method_router.map(|method_router| (path, method_router)))
        .fold(ApiRouter::new(), |router, (path, method_router)| {
            router.api_route(path, method_router)
        })
}

fn store_failure(err: impl std::error::Error, message: String) -> (StatusCode, String) {
    event!(Level::ERROR, err = err.to_string());
    (StatusCode::INTERNAL_SERVER_ERROR, message)
}

fn not_found(id: ProductId) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("unknown product {}", id))
}

/// List every product, ordered by id.
///
/// # Returns
///
/// - `200 OK`: All products
/// - `500 Internal Server Error`: Database query failed
async fn list_products<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Vec<Product>>, (StatusCode, String)> {
    app.database()
        .list_products()
        .await
        .map(Json)
        .map_err(|err| store_failure(err, "failed to list products".to_string()))
}

/// Retrieve a single product.
///
/// # Returns
///
/// - `200 OK`: The product
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database query failed
async fn get_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { id }): Path<Id>,
) -> Result<Json<Product>, (StatusCode, String)> {
    app.database()
        .get_product(id)
        .await
        .map_err(|err| store_failure(err, format!("failed to get product {}", id)))?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Create a new product.
///
/// The product always starts out available.
///
/// # Returns
///
/// - `201 Created`: The stored product, including its assigned id
/// - `500 Internal Server Error`: Database operation failed
async fn create_product<T: ApiApplication>(
    State(app): State<T>,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>), (StatusCode, String)> {
    let product = app
        .database()
        .create_product(draft)
        .await
        .map_err(|err| store_failure(err, "failed to create product".to_string()))?;

    event!(Level::DEBUG, id = %product.id, "created product");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace the name, price and availability of a product.
///
/// # Returns
///
/// - `200 OK`: The updated product
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
async fn update_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { id }): Path<Id>,
    Json(update): Json<ProductUpdate>,
) -> Result<Json<Product>, (StatusCode, String)> {
    app.database()
        .update_product(id, update)
        .await
        .map_err(|err| store_failure(err, format!("failed to update product {}", id)))?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Flip the availability of a product, leaving its other fields untouched.
///
/// # Returns
///
/// - `200 OK`: The product with its new availability
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
async fn toggle_availability<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { id }): Path<Id>,
) -> Result<Json<Product>, (StatusCode, String)> {
    app.database()
        .toggle_availability(id)
        .await
        .map_err(|err| store_failure(err, format!("failed to update product {}", id)))?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Remove a product.
///
/// # Returns
///
/// - `200 OK`: A confirmation message
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
async fn delete_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { id }): Path<Id>,
) -> Result<Json<String>, (StatusCode, String)> {
    let deleted = app
        .database()
        .delete_product(id)
        .await
        .map_err(|err| store_failure(err, format!("failed to delete product {}", id)))?;

    if deleted {
        Ok(Json("Product deleted".to_string()))
    } else {
        Err(not_found(id))
    }
}
