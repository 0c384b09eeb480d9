use std::cmp::Ordering;

use crate::{
    error::{AppError, AppResult},
    models::MovieSummary,
    services::store::SimilarityStore,
};

/// A catalog position paired with its similarity to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    pub position: usize,
    pub score: f32,
}

/// Ranks every other movie against `position`, most similar first
///
/// The query's own position is removed before sorting, so a duplicate that
/// scores as high as (or higher than) the query never gets dropped in its
/// place. The sort is stable: equal scores keep ascending catalog order.
/// NaN scores sort last.
pub fn rank(store: &SimilarityStore, position: usize, count: usize) -> Vec<Ranked> {
    let Some(row) = store.matrix().row(position) else {
        return Vec::new();
    };

    let mut ranked: Vec<Ranked> = row
        .iter()
        .enumerate()
        .filter(|(candidate, _)| *candidate != position)
        .map(|(candidate, &score)| Ranked {
            position: candidate,
            score,
        })
        .collect();

    ranked.sort_by(|a, b| descending(a.score, b.score));
    ranked.truncate(count);
    ranked
}

fn descending(a: f32, b: f32) -> Ordering {
    b.partial_cmp(&a)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Recommends the `count` movies most similar to `title`
///
/// Unknown titles are a recoverable [`AppError::NotFound`]. Asking for more
/// movies than the catalog holds returns every other movie.
pub fn recommend(store: &SimilarityStore, title: &str, count: usize) -> AppResult<Vec<MovieSummary>> {
    let position = store.position_of(title).ok_or_else(|| {
        tracing::warn!(%title, "Recommendation requested for unknown title");
        AppError::NotFound(not_found_message(title))
    })?;

    Ok(summarize(store, position, count))
}

/// Same as [`recommend`], keyed by movie id so duplicate titles stay addressable
pub fn recommend_by_id(
    store: &SimilarityStore,
    movie_id: &str,
    count: usize,
) -> AppResult<Vec<MovieSummary>> {
    let position = store.resolve_id(movie_id).ok_or_else(|| {
        tracing::warn!(%movie_id, "Recommendation requested for unknown movie id");
        AppError::NotFound(format!("Movie with id '{}' not found in our database.", movie_id))
    })?;

    Ok(summarize(store, position, count))
}

fn summarize(store: &SimilarityStore, position: usize, count: usize) -> Vec<MovieSummary> {
    rank(store, position, count)
        .into_iter()
        .filter_map(|ranked| store.movie(ranked.position))
        .map(MovieSummary::from)
        .collect()
}

/// User-facing message for a title that is not in the catalog
pub fn not_found_message(title: &str) -> String {
    format!(
        "Movie '{}' not found in our database. Please select from the list.",
        title
    )
}
