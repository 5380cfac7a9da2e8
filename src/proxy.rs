//! Transport-neutral request/response envelope.
//!
//! The hotel operations never see axum types: handlers translate the HTTP
//! request into a [`ProxyRequest`] and turn the returned [`ProxyResponse`]
//! back into HTTP. This keeps the operations testable without a router.
//!
//! Responsibility:
//! - Request envelope (query map, headers, raw body + base64 flag)
//! - Response builder (fixed CORS headers + JSON body)

use std::collections::HashMap;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Serialize;

/// Inbound request as delivered by the transport layer.
#[derive(Debug, Clone, Default)]
pub struct ProxyRequest {
    /// `None` when the request carried no query string at all.
    pub query: Option<HashMap<String, String>>,
    pub headers: HeaderMap,
    /// `None` when the request carried no body.
    pub body: Option<Bytes>,
    pub is_base64_encoded: bool,
}

impl ProxyRequest {
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.as_ref()?.get(name).map(String::as_str)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

/// Which operation a response belongs to; decides `Access-Control-Allow-Methods`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListHotels,
    AddHotel,
}

impl Operation {
    pub fn allowed_methods(self) -> &'static str {
        match self {
            Operation::ListHotels => "OPTIONS,GET",
            Operation::AddHotel => "OPTIONS,POST",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl ProxyResponse {
    /// 200 with the fixed headers and no body.
    pub fn ok(operation: Operation) -> Self {
        Self::build(StatusCode::OK, operation, None::<&()>)
    }

    pub fn json<T: Serialize>(status: StatusCode, operation: Operation, payload: &T) -> Self {
        Self::build(status, operation, Some(payload))
    }

    pub fn build<T: Serialize>(
        status: StatusCode,
        operation: Operation,
        payload: Option<&T>,
    ) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("*"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(operation.allowed_methods()),
        );
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        // Payloads are plain structs with string keys; serialization cannot fail for them.
        let body = payload.map(|p| serde_json::to_string(p).unwrap_or_else(|_| "{}".to_string()));

        Self {
            status,
            headers,
            body,
        }
    }

    #[cfg(test)]
    pub fn header(&self, name: &axum::http::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// `{"Error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    #[serde(rename = "Error")]
    pub error: &'a str,
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let body = match self.body {
            Some(b) => Body::from(b),
            None => Body::empty(),
        };
        let mut res = Response::new(body);
        *res.status_mut() = self.status;
        *res.headers_mut() = self.headers;
        res
    }
}
