//! Common library for the Greenlight API
//!
//! This crate holds the pieces every resource endpoint reuses: the JSON
//! envelope writer, the field validator, and server configuration.

pub mod config;
pub mod envelope;
pub mod error;
pub mod validator;

/// Example usage of the validator and envelope modules
///
/// ```rust
/// use axum::http::StatusCode;
/// use common::envelope::{Envelope, write_json};
/// use common::validator::Validator;
///
/// let mut v = Validator::new();
/// v.check(!"".is_empty(), "title", "must be provided");
/// assert!(!v.valid());
///
/// let response = write_json(StatusCode::UNPROCESSABLE_ENTITY, &Envelope::new("error", v.errors()), None)
///     .expect("validation errors always serialize");
/// assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
/// ```
pub fn example_usage() {}
