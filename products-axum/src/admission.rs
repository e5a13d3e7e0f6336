//! The cross-origin admission gate.
//!
//! Every inbound request passes through [`admit`] before anything else runs.
//! A request that names an origin other than the single configured one is
//! refused outright, so neither body parsing nor routing ever sees it.

use crate::error::InvalidOrigin;
use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::{Level, event};

/// Decides which requests may proceed, based on their `Origin` header.
#[derive(Debug, Clone, Default)]
pub struct AdmissionGate {
    allowed_origin: Option<HeaderValue>,
}

impl AdmissionGate {
    /// Create a gate that admits the given origin, or no cross-origin caller at all.
    ///
    /// An empty origin is treated the same as no origin.
    pub fn new(allowed_origin: Option<&str>) -> Result<Self, InvalidOrigin> {
        let allowed_origin = allowed_origin
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| InvalidOrigin(origin.to_owned()))
            })
            .transpose()?;
        Ok(Self { allowed_origin })
    }

    /// Whether a request with the given `Origin` header may proceed.
    ///
    /// Requests without an `Origin` header come from the same origin or from a
    /// non-browser client and are always admitted. Otherwise the origin must
    /// match the configured one exactly.
    pub fn is_allowed(&self, origin: Option<&HeaderValue>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.allowed_origin.as_ref() == Some(origin),
        }
    }

    /// The CORS response headers sent to admitted callers.
    pub fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers(AllowHeaders::mirror_request());

        match &self.allowed_origin {
            Some(origin) => layer.allow_origin(AllowOrigin::exact(origin.clone())),
            None => layer,
        }
    }
}

/// Middleware that refuses requests from origins the gate does not admit.
pub(crate) async fn admit(
    State(gate): State<Arc<AdmissionGate>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request.headers().get(header::ORIGIN);
    if gate.is_allowed(origin) {
        return next.run(request).await;
    }

    let origin = origin
        .map(|origin| String::from_utf8_lossy(origin.as_bytes()).into_owned())
        .unwrap_or_default();
    event!(Level::WARN, origin = %origin, "rejected cross-origin request");
    (
        StatusCode::FORBIDDEN,
        format!("CORS error: origin {origin} is not allowed"),
    )
        .into_response()
}
