//! Custom error types for the API service
//!
//! Every failure is rendered through the envelope writer as
//! `{"error": ...}`. Server-side failures never reach the client in detail;
//! they are attached to the response as a [`ServerFailure`] extension and
//! logged by the request middleware.

use std::collections::BTreeMap;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use common::envelope::{Envelope, write_json};
use serde::Serialize;
use thiserror::Error;

const SERVER_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process your request";
const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Unexpected failure inside a handler
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    /// Resource or route not found
    #[error("the requested resource could not be found")]
    NotFound,

    /// Route matched but the method is not registered on it
    #[error("the {0} method is not supported for this resource")]
    MethodNotAllowed(Method),

    /// Request body could not be decoded
    #[error("{0}")]
    BadRequest(String),

    /// One or more fields failed validation
    #[error("failed validation")]
    FailedValidation(BTreeMap<String, String>),
}

/// Detail of a server-side failure, logged with the request that caused it
#[derive(Debug, Clone)]
pub struct ServerFailure(pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Internal(err) => {
                let mut response =
                    error_response(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE);
                response
                    .extensions_mut()
                    .insert(ServerFailure(format!("{err:#}")));
                response
            }
            ApiError::NotFound => error_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
            ApiError::MethodNotAllowed(method) => error_response(
                StatusCode::METHOD_NOT_ALLOWED,
                format!("the {method} method is not supported for this resource"),
            ),
            ApiError::BadRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            ApiError::FailedValidation(errors) => {
                error_response(StatusCode::UNPROCESSABLE_ENTITY, errors)
            }
        }
    }
}

/// Send `message` under the `"error"` key with `status`
///
/// If the envelope itself cannot be written, the client gets a bare 500 with
/// no body and the failure is recorded for logging.
pub fn error_response(status: StatusCode, message: impl Serialize) -> Response {
    match write_json(status, &Envelope::new("error", message), None) {
        Ok(response) => response,
        Err(err) => {
            let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
            response
                .extensions_mut()
                .insert(ServerFailure(err.to_string()));
            response
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde_json::{Value, json};

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let response = ApiError::from(anyhow::anyhow!("connection refused")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let failure = response.extensions().get::<ServerFailure>().unwrap();
        assert!(failure.0.contains("connection refused"));

        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": SERVER_ERROR_MESSAGE }));
    }

    #[tokio::test]
    async fn test_not_found() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<ServerFailure>().is_none());
        assert_eq!(body_json(response).await, json!({ "error": NOT_FOUND_MESSAGE }));
    }

    #[tokio::test]
    async fn test_method_not_allowed_names_method() {
        let response = ApiError::MethodNotAllowed(Method::DELETE).into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "the DELETE method is not supported for this resource" })
        );
    }

    #[tokio::test]
    async fn test_bad_request_carries_message() {
        let response = ApiError::BadRequest("body must not be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "body must not be empty" })
        );
    }

    #[tokio::test]
    async fn test_failed_validation_renders_field_map() {
        let mut errors = BTreeMap::new();
        errors.insert("title".to_string(), "must be provided".to_string());
        errors.insert("year".to_string(), "must be provided".to_string());

        let response = ApiError::FailedValidation(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await,
            json!({ "error": { "title": "must be provided", "year": "must be provided" } })
        );
    }

    #[tokio::test]
    async fn test_unwritable_envelope_falls_back_to_bare_500() {
        struct Unserializable;

        impl Serialize for Unserializable {
            fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
                Err(S::Error::custom("value cannot be serialized"))
            }
        }

        let response = error_response(StatusCode::BAD_REQUEST, Unserializable);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<ServerFailure>().is_some());
        assert!(response.headers().get("content-type").is_none());

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }
}
