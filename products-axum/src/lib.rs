#![warn(missing_docs)]
//! The products REST API, implemented with Axum.
//!
//! Every request passes through three stages before it reaches a handler:
//!
//! 1. the [admission gate](admission), which refuses cross-origin callers
//!    other than the one configured origin;
//! 2. route matching against the static [route table](routes);
//! 3. the [dispatcher](dispatch), which runs the matched route's field
//!    validators and answers `400 Bad Request` when any of them fail.
//!
//! The OpenAPI description of the API is generated from the same route table
//! and served under `/docs`.

pub mod admission;
pub mod config;
mod dispatch;
pub mod error;
mod openapi;
mod product_routes;
pub mod routes;

use admission::{AdmissionGate, admit};
use aide::{axum::ApiRouter, openapi::OpenApi};
use axum::{Extension, middleware};
use config::AxumConfig;
use dispatch::{Dispatcher, validate_request};
use error::RouterError;
use openapi::{api_docs, docs_routes};
use products_core::ports::Application;
use routes::RouteTable;
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;
use tracing::{Level, event};

pub use openapi::PRODUCTS_TAG;

/// Construct the full API router with the given state and config.
///
/// Returns the router together with the generated OpenAPI document, which is
/// also served by the router at `/docs/api.json`.
///
/// # Errors
///
/// Fails if the route table is inconsistent, if the allowed origin is not a
/// valid header value, or if the documentation cannot be generated.
pub fn router<T: ApiApplication>(
    state: T,
    config: &AxumConfig,
) -> Result<(axum::Router, Arc<OpenApi>), RouterError> {
    let table = RouteTable::products()?;
    let gate = Arc::new(AdmissionGate::new(config.allowed_origin.as_deref())?);
    let dispatcher = Arc::new(Dispatcher {
        table,
        body_limit: config.body_limit,
    });

    let failures = Arc::new(Mutex::new(Vec::<String>::new()));
    aide::generate::extract_schemas(true);
    aide::generate::on_error({
        let failures = failures.clone();
        move |err| {
            if let Ok(mut failures) = failures.lock() {
                failures.push(err.to_string());
            }
        }
    });

    let mut api = OpenApi::default();
    let router = ApiRouter::new()
        .merge(product_routes::router::<T>(&table))
        .route_layer(middleware::from_fn_with_state(dispatcher, validate_request))
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs);

    let failures = failures
        .lock()
        .map(|failures| failures.join("; "))
        .unwrap_or_default();
    if !failures.is_empty() {
        return Err(RouterError::Documentation(failures));
    }

    let api = Arc::new(api);
    let router = router
        .layer(Extension(api.clone()))
        .layer(gate.cors_layer())
        .layer(middleware::from_fn_with_state(gate, admit))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok((router, api))
}

/// Serve the router on the configured address until interrupted.
pub async fn start_server(config: &AxumConfig, router: axum::Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    event!(
        Level::INFO,
        "Listening for requests on {}",
        listener.local_addr()?
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => event!(Level::INFO, "shutting down"),
        Err(err) => event!(
            Level::ERROR,
            err = err.to_string(),
            "unable to listen for shutdown signal"
        ),
    }
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone + Send + Sync + 'static + Application<Repository: Clone + Send + Sync + 'static>
{
}

// this is the blanket implementation
impl<T> ApiApplication for T where
    T: Clone + Send + Sync + 'static + Application<Repository: Clone + Send + Sync + 'static>
{
}
