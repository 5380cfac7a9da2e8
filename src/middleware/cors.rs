//! CORS preflight handling for browser clients.
//!
//! Note:
//! - Actual responses already carry `Access-Control-Allow-Origin: *` and the
//!   other `Access-Control-Allow-*` headers from the proxy response builder.
//!   This layer only answers `OPTIONS` preflights, the part a gateway would
//!   otherwise handle.
//!
//! Policy:
//! - Any origin, any header, `GET, POST, OPTIONS`; never with credentials.
//!   The origin policy must stay `Any`: a per-origin policy would rewrite the
//!   wildcard the proxy response builder sets on every response.

use std::time::Duration;

use axum::Router;
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Apply the preflight policy to the given Router.
///
/// IMPORTANT:
/// - Do not combine wildcard origin (`Any`) with `allow_credentials(true)`.
pub fn apply(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(60 * 10));

    router.layer(cors)
}
