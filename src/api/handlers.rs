use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{MovieId, MovieRecord, MovieSummary};
use crate::services::{recommender, PosterUrls};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub movies: usize,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    pub title: String,
    pub movie_id: MovieId,
}

impl From<&MovieRecord> for CatalogEntry {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            title: movie.title.clone(),
            movie_id: movie.movie_id.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendedMovie {
    pub title: String,
    pub movie_id: MovieId,
    pub poster_path: Option<String>,
    pub poster_url: String,
}

impl RecommendedMovie {
    fn new(summary: MovieSummary, posters: &PosterUrls) -> Self {
        let poster_url = posters.url_for(summary.poster_path.as_deref());
        Self {
            title: summary.title,
            movie_id: summary.movie_id,
            poster_path: summary.poster_path,
            poster_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    /// Title the recommendations are similar to
    pub query: String,
    pub recommendations: Vec<RecommendedMovie>,
}

impl RecommendationResponse {
    fn new(query: String, summaries: Vec<MovieSummary>, posters: &PosterUrls) -> Self {
        Self {
            query,
            recommendations: summaries
                .into_iter()
                .map(|summary| RecommendedMovie::new(summary, posters))
                .collect(),
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let info = state.store().info();
    Json(HealthResponse {
        status: "healthy",
        movies: info.movie_count,
        loaded_at: info.loaded_at,
    })
}

/// Every catalog title in catalog order, for populating a picker
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    let movies = state.store().catalog().iter().map(CatalogEntry::from).collect();
    Json(movies)
}

/// Movies most similar to the given title
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let count = state.resolve_count(params.count)?;

    tracing::info!(
        request_id = %request_id,
        title = %params.title,
        count,
        "Processing recommendation request"
    );

    let summaries = recommender::recommend(state.store(), &params.title, count)?;

    tracing::info!(
        request_id = %request_id,
        returned = summaries.len(),
        "Recommendations ready"
    );

    Ok(Json(RecommendationResponse::new(
        params.title,
        summaries,
        &state.inner.posters,
    )))
}

/// Movies most similar to the movie with the given id
pub async fn recommend_by_id(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(movie_id): Path<String>,
    Query(params): Query<CountQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let count = state.resolve_count(params.count)?;

    tracing::info!(
        request_id = %request_id,
        movie_id = %movie_id,
        count,
        "Processing recommendation request by id"
    );

    let summaries = recommender::recommend_by_id(state.store(), &movie_id, count)?;
    let query = state
        .store()
        .resolve_id(&movie_id)
        .and_then(|position| state.store().movie(position))
        .map(|movie| movie.title.clone())
        .ok_or_else(|| AppError::NotFound(format!("Movie with id '{}' not found", movie_id)))?;

    tracing::info!(
        request_id = %request_id,
        returned = summaries.len(),
        "Recommendations ready"
    );

    Ok(Json(RecommendationResponse::new(
        query,
        summaries,
        &state.inner.posters,
    )))
}
