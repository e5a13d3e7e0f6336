//! Repository trait implementations for the SQLite database.

use crate::Db;
use products_core::{
    models::{Product, ProductId},
    ports::Repository,
};

mod product;

impl Repository for Db {
    type Error = sqlx::Error;
}

/// A `product` table row.
#[derive(sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId(row.id),
            name: row.name,
            price: row.price,
            availability: row.availability,
        }
    }
}
