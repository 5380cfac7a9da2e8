/*
 * Responsibility
 * - v1 URL layout
 * - /health, /hotels (GET list, POST add)
 * - Preflight (OPTIONS) is answered by the CORS layer applied in app.rs
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    hotels::{add, list},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/hotels", get(list).post(add))
}
