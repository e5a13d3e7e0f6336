use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

/// The body of a product creation request.
///
/// New products are always created as available, so only the name and price
/// are taken from the caller.
#[serde_as]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(inline))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// The product name
    #[serde(deserialize_with = "trimmed")]
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    pub name: String,
    /// The product price, greater than zero
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[cfg_attr(feature = "schemars", schemars(with = "f64"))]
    pub price: f64,
}

/// The body of a full product update.
#[serde_as]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(inline))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    /// The product name
    #[serde(deserialize_with = "trimmed")]
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    pub name: String,
    /// The product price, greater than zero
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[cfg_attr(feature = "schemars", schemars(with = "f64"))]
    pub price: f64,
    /// Whether the product can currently be ordered
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[cfg_attr(feature = "schemars", schemars(with = "bool"))]
    pub availability: bool,
}

fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|name| name.trim().to_owned())
}
