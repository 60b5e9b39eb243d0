//! Request decoding helpers
//!
//! [`JsonBody`] replaces `axum::Json` for inbound payloads so that every
//! decode failure becomes the same 400 envelope regardless of the handler.
//! [`IdParam`] does the same for the `:id` path segment, turning every
//! unusable id into a 404.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::ApiError;

/// Largest request body the API accepts
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// JSON request body extractor
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::BadRequest(format!(
                    "body must not be larger than {MAX_BODY_BYTES} bytes"
                ))
            } else {
                ApiError::BadRequest("body could not be read".to_string())
            }
        })?;

        decode_json(&bytes).map(JsonBody)
    }
}

/// Parse exactly one JSON value of type `T` from `bytes`
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::BadRequest("body must not be empty".to_string()));
    }

    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = T::deserialize(&mut deserializer).map_err(describe_json_error)?;

    deserializer.end().map_err(|_| {
        ApiError::BadRequest("body must only contain a single JSON value".to_string())
    })?;

    Ok(value)
}

fn describe_json_error(err: serde_json::Error) -> ApiError {
    let message = match err.classify() {
        Category::Syntax => format!(
            "body contains badly-formed JSON (at line {}, column {})",
            err.line(),
            err.column()
        ),
        Category::Eof => "body contains badly-formed JSON".to_string(),
        Category::Data => format!("body contains invalid JSON: {err}"),
        Category::Io => "body could not be read".to_string(),
    };
    ApiError::BadRequest(message)
}

/// Parse a path id, accepting only base-10 integers of at least 1
pub fn read_id_param(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id >= 1)
}

/// Resource id taken from the `:id` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParam(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for IdParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Segments that do not decode to UTF-8 are rejected by `Path` itself
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        read_id_param(&raw).map(IdParam).ok_or(ApiError::NotFound)
    }
}
