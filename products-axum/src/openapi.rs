//! OpenAPI documentation generation and serving.
//!
//! The document is assembled from the same route table that drives request
//! handling, and is served alongside an interactive RapiDoc interface.

use std::sync::Arc;

use crate::routes::{Outcome, ResponseDoc, RouteDoc};
use aide::{
    axum::{ApiRouter, IntoApiResponse, routing::get},
    openapi::{OpenApi, ReferenceOr, StatusCode, Tag},
    transform::{TransformOpenApi, TransformOperation},
};
use axum::{
    Extension, Json,
    response::{Html, IntoResponse},
};
use products_core::{models::Product, validation::ValidationReport};

/// The tag every product operation is filed under.
pub const PRODUCTS_TAG: &str = "Products";

/// Serve the RapiDoc interactive API documentation interface.
async fn serve_rapidoc() -> impl IntoApiResponse {
    let html = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Products REST API</title>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/rapidoc/9.3.8/rapidoc-min.js" integrity="sha512-0ES6eX4K9J1PrIEjIizv79dTlN5HwI2GW9Ku6ymb8dijMHF5CIplkS8N0iFJ/wl3GybCSqBJu8HDhiFkZRAf0g==" crossorigin="anonymous" referrerpolicy="no-referrer"></script>
  </head>
  <body>
    <rapi-doc spec-url="/docs/api.json"
        show-method-in-nav-bar="as-colored-text"
        use-path-in-nav-bar="true"
        allow-try="true"
    ></rapi-doc>
  </body>
</html>"#;
    Html(html).into_response()
}

/// Serve the raw OpenAPI document.
async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(api).into_response()
}

/// Creates a router for documentation endpoints.
pub(crate) fn docs_routes() -> ApiRouter {
    ApiRouter::new()
        .route("/", get(serve_rapidoc))
        .route("/api.json", get(serve_docs))
}

/// Configure the OpenAPI document metadata.
pub(crate) fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("Products REST API")
        .version("1.0.0")
        .description("API Docs for Products")
        .tag(Tag {
            name: PRODUCTS_TAG.into(),
            description: Some("API operations related to products".into()),
            ..Default::default()
        })
}

/// Attach a route's documentation metadata to its operation.
pub(crate) fn document_route(doc: RouteDoc, op: TransformOperation) -> TransformOperation {
    let op = op
        .summary(doc.summary)
        .description(doc.description)
        .tag(PRODUCTS_TAG);

    doc.responses
        .iter()
        .fold(op, |op, response| document_response(*response, op))
}

fn document_response(response: ResponseDoc, op: TransformOperation) -> TransformOperation {
    let description = response.description;
    match response.outcome {
        // The 200 responses are inferred from the handlers' return types
        Outcome::Products | Outcome::Product | Outcome::Deleted => {
            describe_inferred(op, response.outcome.status(), description)
        }
        Outcome::Created => {
            op.response_with::<201, Json<Product>, _>(|res| res.description(description))
        }
        Outcome::Invalid => op.response_with::<400, Json<ValidationReport>, _>(|res| {
            res.description(description)
        }),
        Outcome::NotFound => op.response_with::<404, String, _>(|res| res.description(description)),
    }
}

fn describe_inferred<'a>(
    mut op: TransformOperation<'a>,
    status: u16,
    description: &'static str,
) -> TransformOperation<'a> {
    let inferred = op
        .inner_mut()
        .responses
        .as_mut()
        .and_then(|responses| responses.responses.get_mut(&StatusCode::Code(status)));

    if let Some(ReferenceOr::Item(response)) = inferred {
        response.description = description.to_owned();
    }
    op
}
