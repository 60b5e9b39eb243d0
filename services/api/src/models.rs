//! API models for request and response payloads

pub mod movie;
pub mod runtime;

pub use movie::{CreateMovieRequest, Movie, validate_movie};
pub use runtime::Runtime;
