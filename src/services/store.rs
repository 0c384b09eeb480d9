//! Similarity store: the movie catalog, its similarity matrix and the lookup
//! indexes derived from them.
//!
//! The store is built once at startup from a JSON bundle and never mutated,
//! so it can be shared behind an `Arc` by every request handler.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::StoreError,
    models::{MovieId, MovieRecord, SimilarityMatrix},
};

/// What to do when two catalog entries share a title (or an identifier)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateTitlePolicy {
    /// The earliest catalog position keeps the key
    #[default]
    First,
    /// The latest catalog position keeps the key
    Last,
    /// Duplicates make the bundle unloadable
    Reject,
}

/// On-disk layout of the bundle
///
/// Either a named object or the bare `[movies, similarity]` pair.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Bundle {
    Named {
        movies: Vec<MovieRecord>,
        similarity: Vec<Vec<f32>>,
    },
    Pair(Vec<MovieRecord>, Vec<Vec<f32>>),
}

impl Bundle {
    fn into_parts(self) -> (Vec<MovieRecord>, Vec<Vec<f32>>) {
        match self {
            Bundle::Named { movies, similarity } => (movies, similarity),
            Bundle::Pair(movies, similarity) => (movies, similarity),
        }
    }
}

/// Facts about the loaded bundle, reported by the health endpoint
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StoreInfo {
    pub source: Option<PathBuf>,
    pub movie_count: usize,
    /// Catalog entries whose title was shadowed by another entry
    pub duplicate_titles: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Read-only catalog + similarity matrix with title and id indexes
#[derive(Debug, Clone)]
pub struct SimilarityStore {
    catalog: Vec<MovieRecord>,
    matrix: SimilarityMatrix,
    titles: HashMap<String, usize>,
    ids: HashMap<MovieId, usize>,
    info: StoreInfo,
}

impl SimilarityStore {
    /// Loads a bundle file
    ///
    /// A missing file is reported as [`StoreError::NotFound`]; anything else
    /// that prevents building the store is [`StoreError::Load`].
    pub fn load(path: impl AsRef<Path>, policy: DuplicateTitlePolicy) -> Result<Self, StoreError> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound {
                path: path.to_path_buf(),
            },
            _ => StoreError::Load(format!("failed to read {}: {}", path.display(), e)),
        })?;

        let bundle: Bundle = serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::Load(format!("failed to decode {}: {}", path.display(), e))
        })?;

        let (catalog, rows) = bundle.into_parts();
        let mut store = Self::from_parts(catalog, rows, policy)?;
        store.info.source = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            movies = store.len(),
            duplicate_titles = store.info.duplicate_titles,
            "Similarity store loaded"
        );

        Ok(store)
    }

    /// Builds a store from in-memory parts with the same checks as [`SimilarityStore::load`]
    pub fn from_parts(
        catalog: Vec<MovieRecord>,
        rows: Vec<Vec<f32>>,
        policy: DuplicateTitlePolicy,
    ) -> Result<Self, StoreError> {
        let matrix = SimilarityMatrix::from_rows(rows)?;

        if matrix.size() != catalog.len() {
            return Err(StoreError::Load(format!(
                "similarity matrix is {0}x{0} but the catalog has {1} movies",
                matrix.size(),
                catalog.len()
            )));
        }

        let (titles, duplicate_titles) =
            build_index(catalog.iter().map(|m| m.title.clone()), policy, "title")?;
        let (ids, _) =
            build_index(catalog.iter().map(|m| m.movie_id.clone()), policy, "movie_id")?;

        let info = StoreInfo {
            source: None,
            movie_count: catalog.len(),
            duplicate_titles,
            loaded_at: Utc::now(),
        };

        Ok(Self {
            catalog,
            matrix,
            titles,
            ids,
            info,
        })
    }

    pub fn catalog(&self) -> &[MovieRecord] {
        &self.catalog
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn info(&self) -> &StoreInfo {
        &self.info
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn movie(&self, position: usize) -> Option<&MovieRecord> {
        self.catalog.get(position)
    }

    /// Catalog position for a title, after duplicate resolution
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.titles.get(title).copied()
    }

    pub fn position_of_id(&self, movie_id: &MovieId) -> Option<usize> {
        self.ids.get(movie_id).copied()
    }

    /// Resolves an identifier received as text
    ///
    /// `"285"` matches a numeric id first and a string id second.
    pub fn resolve_id(&self, raw: &str) -> Option<usize> {
        self.position_of_id(&MovieId::from(raw))
            .or_else(|| self.position_of_id(&MovieId::Text(raw.to_string())))
    }
}

/// Maps each key to a catalog position, folding repeats per `policy`
///
/// Returns the index and how many positions lost their key.
fn build_index<K>(
    keys: impl Iterator<Item = K>,
    policy: DuplicateTitlePolicy,
    field: &str,
) -> Result<(HashMap<K, usize>, usize), StoreError>
where
    K: Eq + Hash + std::fmt::Display,
{
    let mut index = HashMap::new();
    let mut shadowed = 0;

    for (position, key) in keys.enumerate() {
        let Some(existing) = index.get(&key).copied() else {
            index.insert(key, position);
            continue;
        };

        shadowed += 1;
        match policy {
            DuplicateTitlePolicy::Reject => {
                return Err(StoreError::Load(format!(
                    "duplicate {} '{}' at positions {} and {}",
                    field, key, existing, position
                )));
            }
            DuplicateTitlePolicy::First => {
                tracing::warn!(
                    %field,
                    %key,
                    kept = existing,
                    dropped = position,
                    "Duplicate key in catalog"
                );
            }
            DuplicateTitlePolicy::Last => {
                tracing::warn!(
                    %field,
                    %key,
                    kept = position,
                    dropped = existing,
                    "Duplicate key in catalog"
                );
                index.insert(key, position);
            }
        }
    }

    Ok((index, shadowed))
}
