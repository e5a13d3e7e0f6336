//! The field validators shared by the product routes.

use super::{FieldValidator, Rule, rules};

const ID_RULES: &[Rule] = &[Rule::new(rules::is_integer, "invalid id")];

const NAME_RULES: &[Rule] = &[Rule::new(rules::is_non_blank_string, "name is required")];

const PRICE_RULES: &[Rule] = &[
    Rule::new(rules::is_present, "price is required"),
    Rule::new(rules::is_numeric, "not a number"),
    Rule::new(rules::is_positive, "price must be a positive value"),
];

const AVAILABILITY_RULES: &[Rule] = &[Rule::new(rules::is_boolean, "invalid availability value")];

/// The `id` path parameter must be an integer.
pub const PRODUCT_ID: FieldValidator = FieldValidator::path("id", ID_RULES);

/// The `name` body member must be a non-blank string.
pub const NAME: FieldValidator = FieldValidator::body("name", NAME_RULES);

/// The `price` body member must be a number greater than zero.
pub const PRICE: FieldValidator = FieldValidator::body("price", PRICE_RULES);

/// The `availability` body member must be a boolean.
pub const AVAILABILITY: FieldValidator = FieldValidator::body("availability", AVAILABILITY_RULES);
