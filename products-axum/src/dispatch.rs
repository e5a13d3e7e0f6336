//! Per-route request validation.
//!
//! The dispatcher runs after axum has matched a route. It looks the route up
//! in the [`RouteTable`], runs the route's field validators over the path
//! parameters and JSON body, and only lets the request reach its handler when
//! every field is acceptable.

use crate::routes::{Operation, RouteDef, RouteTable};
use axum::{
    Json,
    body::{Body, Bytes},
    extract::{FromRequestParts, MatchedPath, RawPathParams, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use products_core::{
    models::{ProductDraft, ProductUpdate},
    validation::{RequestInput, ValidationErrors, ValidationReport, validate},
};
use serde::Deserialize as _;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{Level, event};

/// Shared state of the validation middleware.
#[derive(Debug, Clone)]
pub(crate) struct Dispatcher {
    pub(crate) table: RouteTable,
    pub(crate) body_limit: usize,
}

/// Validate a matched request against its route's field validators.
///
/// Requests for routes without validators pass through untouched. Otherwise
/// the body is buffered and checked. A JSON body that passes is handed on in
/// the exact form it was validated in, so the handler's typed extractor sees
/// the same fields the validators did.
pub(crate) async fn validate_request(
    State(dispatcher): State<Arc<Dispatcher>>,
    request: Request,
    next: Next,
) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .and_then(|matched| dispatcher.table.lookup(request.method(), matched.as_str()));

    let Some(route) = route.filter(|route| !route.validators.is_empty()) else {
        return next.run(request).await;
    };

    let (mut parts, body) = request.into_parts();

    let params = match RawPathParams::from_request_parts(&mut parts, &()).await {
        Ok(params) => params,
        Err(rejection) => return rejection.into_response(),
    };

    let bytes = match axum::body::to_bytes(body, dispatcher.body_limit).await {
        Ok(bytes) => bytes,
        Err(err) if exceeds_limit(&err) => {
            event!(Level::DEBUG, limit = dispatcher.body_limit, "request body too large");
            return (StatusCode::PAYLOAD_TOO_LARGE, "request body too large").into_response();
        }
        Err(err) => {
            event!(Level::DEBUG, err = err.to_string(), "unable to read request body");
            return (StatusCode::BAD_REQUEST, "failed to read request body").into_response();
        }
    };

    let parsed = match parse_body(&parts.headers, &bytes) {
        Ok(parsed) => parsed,
        Err(errors) => return reject(route, errors),
    };
    let is_json = parsed.is_some();
    let input = RequestInput::new(
        params.iter(),
        parsed.unwrap_or_else(|| Value::Object(Map::new())),
    );

    let mut errors = validate(route.validators, &input);
    if errors.is_empty() && decode_body(route.operation, input.body()).is_err() {
        errors.record("body", "invalid request body");
    }
    if !errors.is_empty() {
        return reject(route, errors);
    }

    let body = if is_json {
        match serde_json::to_vec(input.body()) {
            Ok(body) => {
                parts
                    .headers
                    .insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
                Bytes::from(body)
            }
            Err(err) => {
                event!(Level::ERROR, err = err.to_string());
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to forward request body",
                )
                    .into_response();
            }
        }
    } else {
        bytes
    };

    next.run(Request::from_parts(parts, Body::from(body))).await
}

fn reject(route: &RouteDef, errors: ValidationErrors) -> Response {
    event!(
        Level::DEBUG,
        method = %route.method,
        path = route.path,
        %errors,
        "rejected invalid request"
    );
    (StatusCode::BAD_REQUEST, Json(ValidationReport::from(errors))).into_response()
}

/// Whether a body read failed because the body was larger than allowed.
fn exceeds_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(err) = source {
        if err.is::<LengthLimitError>() {
            return true;
        }
        source = err.source();
    }
    false
}

/// Decode the validated body into the input type of the route's handler.
fn decode_body(operation: Operation, body: &Value) -> Result<(), serde_json::Error> {
    match operation {
        Operation::CreateProduct => ProductDraft::deserialize(body).map(drop),
        Operation::UpdateProduct => ProductUpdate::deserialize(body).map(drop),
        Operation::ListProducts
        | Operation::ReadProduct
        | Operation::ToggleAvailability
        | Operation::DeleteProduct => Ok(()),
    }
}

/// Decode the request body for validation.
///
/// Returns `None` for a body without a JSON content type, or an empty one.
/// Such a request has no body fields at all.
fn parse_body(headers: &HeaderMap, bytes: &Bytes) -> Result<Option<Value>, ValidationErrors> {
    if !is_json(headers) || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(bytes).map(Some).map_err(|_| {
        let mut errors = ValidationErrors::default();
        errors.record("body", "malformed JSON body");
        errors
    })
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}
