//! Application state shared across handlers

use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use common::config::ServerConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    movie_ids: Arc<AtomicI64>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            movie_ids: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Hand out the next movie id, starting at 1
    pub fn next_movie_id(&self) -> i64 {
        self.movie_ids.fetch_add(1, Ordering::Relaxed)
    }
}
