use std::sync::Arc;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::{PosterUrls, SimilarityStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<AppStateInner>,
}

/// Everything handlers read; fixed once the server starts
pub struct AppStateInner {
    pub store: Arc<SimilarityStore>,
    pub posters: PosterUrls,
    pub default_count: usize,
    pub max_count: usize,
}

impl AppState {
    /// Creates state around a loaded store
    pub fn new(store: Arc<SimilarityStore>, config: &Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                posters: PosterUrls::from_config(config),
                default_count: config.default_count,
                max_count: config.max_count,
            }),
        }
    }

    pub fn store(&self) -> &SimilarityStore {
        &self.inner.store
    }

    /// Applies the default and bounds to a requested recommendation count
    pub fn resolve_count(&self, requested: Option<usize>) -> AppResult<usize> {
        let count = requested.unwrap_or(self.inner.default_count);
        if count == 0 {
            return Err(AppError::InvalidInput("count must be at least 1".to_string()));
        }
        if count > self.inner.max_count {
            return Err(AppError::InvalidInput(format!(
                "count must be at most {}",
                self.inner.max_count
            )));
        }
        Ok(count)
    }
}
