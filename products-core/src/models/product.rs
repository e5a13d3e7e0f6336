use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// The store-generated identifier of a product.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ProductId> for i64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A product record as held by the store.
///
/// The `id` is assigned by the store on creation and never changes. A product
/// always has a non-blank `name` and a strictly positive `price`; new products
/// start out available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier of the product
    pub id: ProductId,
    /// Display name of the product
    pub name: String,
    /// Unit price of the product
    pub price: f64,
    /// Whether the product can currently be ordered
    pub availability: bool,
}

// The schema is written out by hand so that the published documentation
// carries example values for every field.
#[cfg(feature = "schemars")]
impl schemars::JsonSchema for Product {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Product".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "object",
            "required": ["id", "name", "price", "availability"],
            "properties": {
                "id": {
                    "type": "integer",
                    "format": "int64",
                    "description": "The product Id",
                    "examples": [1]
                },
                "name": {
                    "type": "string",
                    "description": "The product name",
                    "examples": ["Monitor curvo de 32 pulgadas"]
                },
                "price": {
                    "type": "number",
                    "description": "The product price",
                    "examples": [300]
                },
                "availability": {
                    "type": "boolean",
                    "description": "The product availability",
                    "examples": [true]
                }
            }
        })
    }
}
