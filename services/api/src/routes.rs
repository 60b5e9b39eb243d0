//! API service routes

use anyhow::Context;
use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware,
    response::Response,
    routing::{get, post},
};
use chrono::Utc;
use common::{
    envelope::{Envelope, write_json},
    validator::Validator,
};
use serde::Serialize;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    extract::{IdParam, JsonBody, MAX_BODY_BYTES},
    middleware::log_server_failures,
    models::{CreateMovieRequest, Movie, Runtime, validate_movie},
    state::AppState,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/healthcheck",
            get(healthcheck).fallback(method_not_allowed),
        )
        .route("/v1/movies", post(create_movie).fallback(method_not_allowed))
        .route("/v1/movies/:id", get(show_movie).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(log_server_failures))
        .with_state(state)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    environment: &'static str,
    version: &'static str,
}

/// Health check endpoint
pub async fn healthcheck(State(state): State<AppState>) -> ApiResult<Response> {
    let health = Health {
        status: "available",
        environment: state.config.env.as_str(),
        version: VERSION,
    };

    let response = write_json(StatusCode::OK, &Envelope::new("health", health), None)
        .context("failed to write health response")?;
    Ok(response)
}

/// Create a new movie
pub async fn create_movie(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateMovieRequest>,
) -> ApiResult<Response> {
    let mut movie = Movie::from(input);

    let mut v = Validator::new();
    validate_movie(&mut v, &movie);
    if !v.valid() {
        return Err(ApiError::FailedValidation(v.into_errors()));
    }

    movie.id = state.next_movie_id();
    info!(id = movie.id, title = %movie.title, "movie created");

    let location = HeaderValue::try_from(format!("/v1/movies/{}", movie.id))
        .context("failed to build location header")?;
    let mut headers = HeaderMap::new();
    headers.insert(header::LOCATION, location);

    let response = write_json(
        StatusCode::CREATED,
        &Envelope::new("movie", movie),
        Some(headers),
    )
    .context("failed to write movie response")?;
    Ok(response)
}

/// Get a movie by ID
pub async fn show_movie(IdParam(id): IdParam) -> ApiResult<Response> {
    // Placeholder until a movie store is wired in
    let movie = Movie {
        id,
        created_at: Utc::now(),
        title: "Casablanca".to_string(),
        year: None,
        runtime: Some(Runtime::from_minutes(102)),
        genres: Some(vec![
            "drama".to_string(),
            "romance".to_string(),
            "war".to_string(),
        ]),
        version: 1,
    };

    let response = write_json(StatusCode::OK, &Envelope::new("movie", movie), None)
        .context("failed to write movie response")?;
    Ok(response)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}
