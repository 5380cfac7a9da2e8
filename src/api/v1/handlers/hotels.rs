/*
 * Responsibility
 * - /hotels handlers: list the caller's hotels, add a hotel with an optional image
 * - list_hotels / add_hotel work on the transport-neutral ProxyRequest
 * - list / add are the axum adapters (HTTP request -> ProxyRequest -> HTTP response)
 */
use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode, Uri},
};
use bytes::Bytes;
use uuid::Uuid;

use crate::{
    api::v1::dto::hotels::{AddHotelForm, HotelResponse, HotelsResponse},
    error::AppError,
    proxy::{Operation, ProxyRequest, ProxyResponse},
    repos::{Hotel, hotel_repo::NO_FILE_SENTINEL},
    services::{auth::claims::GROUPS_CLAIM, form},
    state::AppState,
};

pub const TOKEN_MISSING: &str = "Query parameter 'token' not present.";
pub const SUBJECT_MISSING: &str = "Token does not carry a subject claim.";
pub const BODY_MISSING: &str = "Couldn't find a valid hotel information in the request";
pub const BODY_NOT_BASE64: &str = "Request body is not valid base64.";
pub const FORM_UNPARSEABLE: &str = "Couldn't parse multipart form data.";
pub const NOT_ADMIN: &str = "Unauthorized. Must be a member of admin group";

/// Header a transport sets when it base64-encoded the body (binary payloads).
pub const BASE64_BODY_HEADER: &str = "content-transfer-encoding";

pub async fn list_hotels(state: &AppState, req: &ProxyRequest) -> Result<ProxyResponse, AppError> {
    // No query string at all means the transport was not wired to forward it.
    if req.query.is_none() {
        tracing::warn!("query string is missing; the route must forward query parameters");
        return Ok(ProxyResponse::ok(Operation::ListHotels));
    }

    let token = req.query_param("token").unwrap_or_default();
    if token.is_empty() {
        return Err(AppError::bad_request(TOKEN_MISSING));
    }

    let claims = state.claims.read(token)?;
    let owner_id = claims
        .subject()
        .ok_or_else(|| AppError::bad_request(SUBJECT_MISSING))?;

    let rows = state.hotels.scan_by_owner(owner_id).await?;
    tracing::info!(owner_id, count = rows.len(), "listed hotels");

    let body = HotelsResponse {
        hotels: rows.into_iter().map(HotelResponse::from).collect(),
    };
    Ok(ProxyResponse::json(StatusCode::OK, Operation::ListHotels, &body))
}

pub async fn add_hotel(state: &AppState, req: &ProxyRequest) -> Result<ProxyResponse, AppError> {
    let Some(body) = req.body.as_ref().filter(|b| !b.is_empty()) else {
        return Err(AppError::not_found(BODY_MISSING));
    };

    let raw = form::decode_body(body, req.is_base64_encoded).map_err(|e| {
        tracing::warn!(error = %e, "rejecting add-hotel body");
        AppError::bad_request(BODY_NOT_BASE64)
    })?;

    let form_data = form::parse_multipart(raw, req.content_type())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "rejecting add-hotel body");
            AppError::bad_request(FORM_UNPARSEABLE)
        })?;

    let fields = AddHotelForm::from_form(&form_data);

    // Authorization before anything is validated or written.
    let id_token = fields
        .id_token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            tracing::warn!("add-hotel request without idToken");
            AppError::unauthorized(NOT_ADMIN)
        })?;
    let claims = state.claims.read(id_token)?;
    let group = claims.first_value(GROUPS_CLAIM);
    if group != Some(&*state.admin_group) {
        tracing::warn!(group = ?group, "caller is not a member of the admin group");
        return Err(AppError::unauthorized(NOT_ADMIN));
    }

    let valid = fields.validate().map_err(AppError::validation)?;

    // The image goes first: the record references it by key.
    let file_name = match form_data.file {
        Some(file) => {
            let size = file.data.len();
            let content_type = file.content_type.as_deref().unwrap_or("unknown");
            state
                .images
                .put_object(&state.bucket_name, &file.file_name, file.data)
                .await?;
            tracing::info!(bucket = %state.bucket_name, key = %file.file_name, size, content_type, "image uploaded");
            file.file_name
        }
        None => NO_FILE_SENTINEL.to_string(),
    };

    let hotel = Hotel {
        owner_id: valid.owner_id,
        id: Uuid::new_v4().to_string(),
        name: valid.name,
        city: valid.city,
        price: valid.price,
        rating: valid.rating,
        file_name,
    };
    state.hotels.put(&hotel).await?;

    tracing::info!(owner_id = %hotel.owner_id, id = %hotel.id, file_name = %hotel.file_name, "hotel added");
    Ok(ProxyResponse::ok(Operation::AddHotel))
}

/// GET /hotels?token=...
pub async fn list(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> ProxyResponse {
    let query = match uri.query().filter(|q| !q.is_empty()) {
        None => None,
        Some(_) => match Query::<HashMap<String, String>>::try_from_uri(&uri) {
            Ok(Query(map)) => Some(map),
            Err(e) => {
                tracing::warn!(error = %e, "unparseable query string");
                return AppError::bad_request(TOKEN_MISSING).into_proxy_response(Operation::ListHotels);
            }
        },
    };

    let req = ProxyRequest {
        query,
        headers,
        body: None,
        is_base64_encoded: false,
    };

    respond(Operation::ListHotels, list_hotels(&state, &req).await)
}

/// POST /hotels (multipart/form-data)
pub async fn add(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> ProxyResponse {
    let is_base64_encoded = headers
        .get(BASE64_BODY_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("base64"));

    let req = ProxyRequest {
        query: None,
        headers,
        body: (!body.is_empty()).then_some(body),
        is_base64_encoded,
    };

    respond(Operation::AddHotel, add_hotel(&state, &req).await)
}

fn respond(operation: Operation, result: Result<ProxyResponse, AppError>) -> ProxyResponse {
    result.unwrap_or_else(|e| e.into_proxy_response(operation))
}
