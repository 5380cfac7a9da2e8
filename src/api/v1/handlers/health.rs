/*
 * Responsibility
 * - GET /health (liveness)
 * - Reports which store backends the process was wired with
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "hotelStore": state.hotels.backend_name(),
            "imageStore": state.images.backend_name(),
        })),
    )
}
