use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures while loading the similarity bundle at startup
///
/// Both variants are fatal: the server never starts without a store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("'{}' not found. Run the similarity export first to produce it.", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error loading movie data: {0}")]
    Load(String),
}

/// Per-request errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
