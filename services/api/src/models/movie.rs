//! Movie models for the API service

use chrono::{DateTime, Datelike, Utc};
use common::validator::{Validator, unique};
use serde::{Deserialize, Serialize};

use super::runtime::Runtime;

/// Earliest year a movie can have been released
pub const MIN_YEAR: i32 = 1888;
pub const MAX_TITLE_BYTES: usize = 500;
pub const MAX_GENRES: usize = 5;

/// Movie model
///
/// Optional fields are omitted from responses when absent; an empty genre
/// list is still emitted as `[]`.
#[derive(Debug, Clone, Serialize)]
pub struct Movie {
    pub id: i64,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<Runtime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    pub version: i32,
}

/// Request for movie creation
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMovieRequest {
    #[serde(default)]
    pub title: String,
    pub year: Option<i32>,
    pub runtime: Option<Runtime>,
    pub genres: Option<Vec<String>>,
}

impl From<CreateMovieRequest> for Movie {
    fn from(input: CreateMovieRequest) -> Self {
        Movie {
            id: 0,
            created_at: Utc::now(),
            title: input.title,
            year: input.year,
            runtime: input.runtime,
            genres: input.genres,
            version: 1,
        }
    }
}

/// Run every movie field check, recording failures in `v`
pub fn validate_movie(v: &mut Validator, movie: &Movie) {
    v.check(!movie.title.is_empty(), "title", "must be provided");
    v.check(
        movie.title.len() <= MAX_TITLE_BYTES,
        "title",
        "must not be more than 500 bytes long",
    );

    match movie.year {
        Some(year) => {
            v.check(year >= MIN_YEAR, "year", "must be greater than 1888");
            v.check(
                year <= Utc::now().year(),
                "year",
                "must not be in the future",
            );
        }
        None => v.add_error("year", "must be provided"),
    }

    match movie.runtime {
        Some(runtime) => v.check(runtime.minutes() > 0, "runtime", "must be a positive integer"),
        None => v.add_error("runtime", "must be provided"),
    }

    match &movie.genres {
        Some(genres) => {
            v.check(!genres.is_empty(), "genres", "must contain at least 1 genre");
            v.check(
                genres.len() <= MAX_GENRES,
                "genres",
                "must not contain more than 5 genres",
            );
            v.check(unique(genres), "genres", "must not contain duplicate values");
        }
        None => v.add_error("genres", "must be provided"),
    }
}
