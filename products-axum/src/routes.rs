//! The route table.
//!
//! Each [`RouteDef`] binds a method and path pattern to the validators that
//! guard it, the operation that serves it, and the documentation published
//! for it. The same static table drives both the dispatcher and the API
//! documentation, so the two cannot drift apart.

use crate::error::RouteTableError;
use axum::http::Method;
use products_core::validation::{FieldValidator, Source, fields};

/// The prefix shared by every product route.
pub const PRODUCTS_PATH: &str = "/api/products";

/// The handler a route is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// List every product
    ListProducts,
    /// Read one product
    ReadProduct,
    /// Create a product
    CreateProduct,
    /// Replace a product's fields
    UpdateProduct,
    /// Flip a product's availability
    ToggleAvailability,
    /// Remove a product
    DeleteProduct,
}

impl Operation {
    /// The method the operation's handler is served under.
    pub fn method(self) -> Method {
        match self {
            Self::ListProducts | Self::ReadProduct => Method::GET,
            Self::CreateProduct => Method::POST,
            Self::UpdateProduct => Method::PUT,
            Self::ToggleAvailability => Method::PATCH,
            Self::DeleteProduct => Method::DELETE,
        }
    }
}

/// The documented outcome of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `200 OK` with a list of products
    Products,
    /// `200 OK` with a single product
    Product,
    /// `201 Created` with the new product
    Created,
    /// `200 OK` with a confirmation message
    Deleted,
    /// `400 Bad Request` with the field errors
    Invalid,
    /// `404 Not Found`
    NotFound,
}

impl Outcome {
    /// The HTTP status code of the outcome.
    pub fn status(self) -> u16 {
        match self {
            Self::Products | Self::Product | Self::Deleted => 200,
            Self::Created => 201,
            Self::Invalid => 400,
            Self::NotFound => 404,
        }
    }
}

/// A documented response of a route.
#[derive(Debug, Clone, Copy)]
pub struct ResponseDoc {
    /// What the response carries
    pub outcome: Outcome,
    /// Human-readable description of the response
    pub description: &'static str,
}

/// Documentation metadata of a route. It has no effect on request handling.
#[derive(Debug, Clone, Copy)]
pub struct RouteDoc {
    /// One-line summary of the operation
    pub summary: &'static str,
    /// Longer description of the operation
    pub description: &'static str,
    /// Every response the operation documents
    pub responses: &'static [ResponseDoc],
}

/// A single entry of the route table.
#[derive(Debug, Clone)]
pub struct RouteDef {
    /// The HTTP method matched exactly
    pub method: Method,
    /// The path pattern, with parameters written as `{name}`
    pub path: &'static str,
    /// Field validators, run in order before the handler
    pub validators: &'static [FieldValidator],
    /// The handler the route is bound to
    pub operation: Operation,
    /// Documentation metadata
    pub doc: RouteDoc,
}

impl RouteDef {
    /// The names of the parameters captured by the path pattern.
    pub fn path_params(&self) -> impl Iterator<Item = &'static str> {
        self.path
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
    }
}

/// The routes of the products API, in registration order.
pub static ROUTES: [RouteDef; 6] = [
    RouteDef {
        method: Method::GET,
        path: "/api/products",
        validators: &[],
        operation: Operation::ListProducts,
        doc: RouteDoc {
            summary: "Get a list of products",
            description: "Return a list of products",
            responses: &[ResponseDoc {
                outcome: Outcome::Products,
                description: "Successful response",
            }],
        },
    },
    RouteDef {
        method: Method::GET,
        path: "/api/products/{id}",
        validators: &[fields::PRODUCT_ID],
        operation: Operation::ReadProduct,
        doc: RouteDoc {
            summary: "Get a product by Id",
            description: "Return a product based on its unique Id",
            responses: &[
                ResponseDoc {
                    outcome: Outcome::Product,
                    description: "Successful response",
                },
                ResponseDoc {
                    outcome: Outcome::Invalid,
                    description: "Bad Request - Invalid Id",
                },
                ResponseDoc {
                    outcome: Outcome::NotFound,
                    description: "Not found",
                },
            ],
        },
    },
    RouteDef {
        method: Method::POST,
        path: "/api/products",
        validators: &[fields::NAME, fields::PRICE],
        operation: Operation::CreateProduct,
        doc: RouteDoc {
            summary: "Create a new product",
            description: "Returns a new record in the database",
            responses: &[
                ResponseDoc {
                    outcome: Outcome::Created,
                    description: "Successful response",
                },
                ResponseDoc {
                    outcome: Outcome::Invalid,
                    description: "Bad Request - Invalid input data",
                },
            ],
        },
    },
    RouteDef {
        method: Method::PUT,
        path: "/api/products/{id}",
        validators: &[
            fields::PRODUCT_ID,
            fields::NAME,
            fields::PRICE,
            fields::AVAILABILITY,
        ],
        operation: Operation::UpdateProduct,
        doc: RouteDoc {
            summary: "Updates a product with user input",
            description: "Returns the updated product",
            responses: &[
                ResponseDoc {
                    outcome: Outcome::Product,
                    description: "Successful response",
                },
                ResponseDoc {
                    outcome: Outcome::Invalid,
                    description: "Bad Request - invalid Id or invalid input data",
                },
                ResponseDoc {
                    outcome: Outcome::NotFound,
                    description: "Product not found",
                },
            ],
        },
    },
    RouteDef {
        method: Method::PATCH,
        path: "/api/products/{id}",
        validators: &[fields::PRODUCT_ID],
        operation: Operation::ToggleAvailability,
        doc: RouteDoc {
            summary: "Update product availability",
            description: "Toggles the availability of the product and returns it",
            responses: &[
                ResponseDoc {
                    outcome: Outcome::Product,
                    description: "Successful response",
                },
                ResponseDoc {
                    outcome: Outcome::Invalid,
                    description: "Bad Request - invalid Id",
                },
                ResponseDoc {
                    outcome: Outcome::NotFound,
                    description: "Product not found",
                },
            ],
        },
    },
    RouteDef {
        method: Method::DELETE,
        path: "/api/products/{id}",
        validators: &[fields::PRODUCT_ID],
        operation: Operation::DeleteProduct,
        doc: RouteDoc {
            summary: "Deletes a product by a given id",
            description: "Returns a confirmation message",
            responses: &[
                ResponseDoc {
                    outcome: Outcome::Deleted,
                    description: "Successful response",
                },
                ResponseDoc {
                    outcome: Outcome::Invalid,
                    description: "Bad Request - invalid Id",
                },
                ResponseDoc {
                    outcome: Outcome::NotFound,
                    description: "Product not found",
                },
            ],
        },
    },
];

/// A route table that has passed its consistency checks.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    routes: &'static [RouteDef],
}

impl RouteTable {
    /// Check a set of route definitions and build a table from them.
    ///
    /// # Errors
    ///
    /// Fails if two definitions share a method and path, if a definition's
    /// method disagrees with its operation, if a path validator names a
    /// parameter missing from the pattern, or if a summary is blank.
    pub fn new(routes: &'static [RouteDef]) -> Result<Self, RouteTableError> {
        for (i, route) in routes.iter().enumerate() {
            if routes[..i]
                .iter()
                .any(|other| other.method == route.method && other.path == route.path)
            {
                return Err(RouteTableError::Duplicate {
                    method: route.method.clone(),
                    path: route.path,
                });
            }

            let expected = route.operation.method();
            if expected != route.method {
                return Err(RouteTableError::MethodMismatch {
                    method: route.method.clone(),
                    path: route.path,
                    expected,
                });
            }

            if let Some(validator) = route.validators.iter().find(|validator| {
                validator.source == Source::Path
                    && !route.path_params().any(|param| param == validator.field)
            }) {
                return Err(RouteTableError::UnknownPathParameter {
                    method: route.method.clone(),
                    path: route.path,
                    field: validator.field,
                });
            }

            if route.doc.summary.trim().is_empty() {
                return Err(RouteTableError::MissingSummary {
                    method: route.method.clone(),
                    path: route.path,
                });
            }
        }

        Ok(Self { routes })
    }

    /// The checked table of the products API.
    pub fn products() -> Result<Self, RouteTableError> {
        Self::new(&ROUTES)
    }

    /// The definitions, in registration order.
    pub fn routes(&self) -> &'static [RouteDef] {
        self.routes
    }

    /// Find the definition for a method and a matched path pattern.
    ///
    /// axum answers `HEAD` with the `GET` handler, so it resolves to the
    /// `GET` definition as well.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<&'static RouteDef> {
        let method = if *method == Method::HEAD {
            &Method::GET
        } else {
            method
        };
        self.routes
            .iter()
            .find(|route| route.method == *method && route.path == path)
    }
}
