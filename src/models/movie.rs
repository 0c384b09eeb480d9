use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a movie as written in the bundle
///
/// Bundles produced from TMDB exports carry numeric ids, hand-made fixtures
/// often use strings, so both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Numeric(u64),
    Text(String),
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieId::Numeric(id) => write!(f, "{}", id),
            MovieId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<&str> for MovieId {
    /// Path segments arrive as text; digits are read back as the numeric form
    fn from(raw: &str) -> Self {
        raw.parse::<u64>()
            .map(MovieId::Numeric)
            .unwrap_or_else(|_| MovieId::Text(raw.to_string()))
    }
}

/// One catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    pub movie_id: MovieId,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MovieRecord {
    pub fn new(title: impl Into<String>, movie_id: MovieId, poster_path: Option<&str>) -> Self {
        Self {
            title: title.into(),
            movie_id,
            poster_path: poster_path.map(str::to_string),
        }
    }

    /// Poster path, treating an empty string the same as a missing one
    pub fn poster(&self) -> Option<&str> {
        self.poster_path.as_deref().filter(|path| !path.is_empty())
    }
}

/// Projection of a catalog entry returned by the recommender
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub title: String,
    pub movie_id: MovieId,
    pub poster_path: Option<String>,
}

impl From<&MovieRecord> for MovieSummary {
    fn from(record: &MovieRecord) -> Self {
        Self {
            title: record.title.clone(),
            movie_id: record.movie_id.clone(),
            poster_path: record.poster_path.clone(),
        }
    }
}
