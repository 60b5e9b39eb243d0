//! JSON envelope writer
//!
//! Every response body, success or error, is a JSON object with exactly one
//! top-level key. [`write_json`] renders it with tab indentation and a
//! trailing newline so responses are stable and easy to diff.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::Response,
};
use serde::{Serialize, ser::SerializeMap};
use serde_json::ser::{PrettyFormatter, Serializer};

/// Single-key wrapper around a response payload
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    key: &'static str,
    value: T,
}

impl<T> Envelope<T> {
    /// Wrap `value` under `key`
    pub fn new(key: &'static str, value: T) -> Self {
        Self { key, value }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.value)?;
        map.end()
    }
}

/// Render `envelope` as an `application/json` response
///
/// Caller-supplied `headers` replace any existing values under the same name;
/// the content type is always set last. If the envelope cannot be serialized
/// no response is built and the error is returned to the caller.
pub fn write_json<T: Serialize>(
    status: StatusCode,
    envelope: &Envelope<T>,
    headers: Option<HeaderMap>,
) -> Result<Response, serde_json::Error> {
    let mut body = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut body, PrettyFormatter::with_indent(b"\t"));
    envelope.serialize(&mut serializer)?;
    body.push(b'\n');

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;

    if let Some(headers) = headers {
        let target = response.headers_mut();
        let mut current = None;
        // A `None` name continues the values of the previous header
        for (name, value) in headers {
            if let Some(name) = name {
                target.remove(&name);
                current = Some(name);
            }
            if let Some(name) = &current {
                target.append(name.clone(), value);
            }
        }
    }

    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Ok(response)
}
