//! multipart/form-data parsing for request bodies that arrive as raw bytes.
//!
//! The body may have been base64-encoded by the transport; decoding happens
//! before parsing. Parsing uses `multer` (the engine behind axum's `Multipart`)
//! directly on the buffered bytes, so the upload limit is the one enforced by
//! the HTTP middleware rather than the extractor's default. When the
//! `Content-Type` header carries no boundary, the boundary is taken from the
//! first body line (`--<boundary>`).

use std::collections::HashMap;
use std::convert::Infallible;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("body is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("no multipart boundary found")]
    MissingBoundary,
    #[error("multipart parsing failed: {0}")]
    Multipart(#[from] multer::Error),
}

/// One uploaded file part.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    /// First part that carried a filename; later file parts are ignored.
    pub file: Option<FilePart>,
}

impl FormData {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

pub fn decode_body(body: &Bytes, is_base64_encoded: bool) -> Result<Bytes, FormError> {
    if !is_base64_encoded {
        return Ok(body.clone());
    }
    // Transports tend to wrap long base64 payloads; whitespace is not significant.
    let compact: Vec<u8> = body
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    Ok(Bytes::from(STANDARD.decode(compact)?))
}

pub async fn parse_multipart(body: Bytes, content_type: Option<&str>) -> Result<FormData, FormError> {
    let boundary = content_type
        .and_then(boundary_from_content_type)
        .or_else(|| sniff_boundary(&body))
        .ok_or(FormError::MissingBoundary)?;

    let stream = futures::stream::once(async move { Ok::<Bytes, Infallible>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut form = FormData::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        // Browsers send `filename=""` for an empty file input; that is not an attachment.
        match field
            .file_name()
            .filter(|n| !n.is_empty())
            .map(str::to_string)
        {
            Some(file_name) => {
                let content_type = field.content_type().map(|m| m.to_string());
                let data = field.bytes().await?;
                if form.file.is_none() {
                    form.file = Some(FilePart {
                        file_name,
                        content_type,
                        data,
                    });
                }
            }
            None => {
                let text = field.text().await?;
                // First occurrence wins, like the file part.
                form.fields.entry(name).or_insert(text);
            }
        }
    }

    Ok(form)
}

fn boundary_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("boundary") {
            return None;
        }
        let value = value.trim().trim_matches('"');
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn sniff_boundary(body: &[u8]) -> Option<String> {
    let line_end = body.iter().position(|&b| b == b'\n')?;
    let line = std::str::from_utf8(&body[..line_end]).ok()?;
    let boundary = line.trim_end_matches('\r').strip_prefix("--")?;
    (!boundary.is_empty()).then(|| boundary.to_string())
}
