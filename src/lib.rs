//! Content-based movie recommendations from a precomputed similarity matrix.
//!
//! A [`services::SimilarityStore`] is loaded once from a JSON bundle and
//! shared read-only; [`services::recommend`] ranks the rest of the catalog
//! against a title; [`api::create_router`] serves both over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
