//! Integration tests for the validator and envelope writer
//!
//! These tests exercise the path every endpoint takes when input fails
//! validation: checks accumulate in a validator and the resulting field map
//! is written as a single `"error"` envelope.

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use common::{
    envelope::{Envelope, write_json},
    validator::{Validator, unique},
};
use serde_json::{Value, json};

#[tokio::test]
async fn test_validation_errors_render_as_error_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let genres = ["drama", "drama"];

    let mut v = Validator::new();
    v.check(!"".is_empty(), "title", "must be provided");
    v.check(false, "title", "must not be more than 500 bytes long");
    v.check(unique(&genres), "genres", "must not contain duplicate values");
    assert!(!v.valid());

    let response = write_json(
        StatusCode::UNPROCESSABLE_ENTITY,
        &Envelope::new("error", v.into_errors()),
        None,
    )?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    assert_eq!(body.last(), Some(&b'\n'));

    let parsed: Value = serde_json::from_slice(&body)?;
    assert_eq!(
        parsed,
        json!({
            "error": {
                "genres": "must not contain duplicate values",
                "title": "must be provided",
            }
        })
    );

    // Keys come out sorted, tab-indented
    let text = std::str::from_utf8(&body)?;
    assert!(text.starts_with("{\n\t\"error\": {\n\t\t\"genres\""));

    Ok(())
}

#[tokio::test]
async fn test_success_envelope_with_extra_headers() -> Result<(), Box<dyn std::error::Error>> {
    let mut headers = HeaderMap::new();
    headers.insert(header::LOCATION, HeaderValue::from_static("/v1/movies/3"));

    let response = write_json(
        StatusCode::CREATED,
        &Envelope::new("movie", json!({ "id": 3, "title": "Heat" })),
        Some(headers),
    )?;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/v1/movies/3");
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let parsed: Value = serde_json::from_slice(&body)?;
    assert_eq!(parsed.as_object().map(|o| o.len()), Some(1));
    assert_eq!(parsed["movie"]["title"], "Heat");

    Ok(())
}
