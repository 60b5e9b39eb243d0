//! Request middleware

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::error;

use crate::error::ServerFailure;

/// Log server-side failures together with the request that caused them
///
/// Handlers and the error responder only see the failure; the method and URI
/// are captured here before the request is consumed.
pub async fn log_server_failures(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let mut response = next.run(req).await;

    if let Some(ServerFailure(detail)) = response.extensions_mut().remove::<ServerFailure>() {
        error!(method = %method, uri = %uri, "{}", detail);
    }

    response
}
