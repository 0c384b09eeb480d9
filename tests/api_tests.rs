use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;

use movie_recommender::{
    api::{create_router, AppState},
    config::Config,
    models::{MovieId, MovieRecord},
    services::{DuplicateTitlePolicy, SimilarityStore},
};

fn fixture_store() -> SimilarityStore {
    let catalog = vec![
        MovieRecord::new("Avatar", MovieId::Numeric(19995), Some("/avatar.jpg")),
        MovieRecord::new("Aliens", MovieId::Numeric(679), Some("/aliens.jpg")),
        MovieRecord::new("Titanic", MovieId::Numeric(597), Some("")),
        MovieRecord::new("The Abyss", MovieId::Numeric(2756), None),
    ];
    let similarity = vec![
        vec![1.0, 0.9, 0.2, 0.5],
        vec![0.9, 1.0, 0.1, 0.6],
        vec![0.2, 0.1, 1.0, 0.3],
        vec![0.5, 0.6, 0.3, 1.0],
    ];
    SimilarityStore::from_parts(catalog, similarity, DuplicateTitlePolicy::First).unwrap()
}

fn create_test_server() -> TestServer {
    let state = AppState::new(Arc::new(fixture_store()), &Config::default());
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn titles(body: &Value) -> Vec<&str> {
    body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|movie| movie["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["movies"], 4);
}

#[tokio::test]
async fn test_list_movies_in_catalog_order() {
    let server = create_test_server();
    let response = server.get("/movies").await;
    response.assert_status_ok();

    let movies: Vec<Value> = response.json();
    let names: Vec<&str> = movies.iter().map(|m| m["title"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Avatar", "Aliens", "Titanic", "The Abyss"]);
    assert_eq!(movies[0]["movie_id"], 19995);
}

#[tokio::test]
async fn test_recommendations_for_known_title() {
    let server = create_test_server();
    let response = server
        .get("/recommendations")
        .add_query_param("title", "Avatar")
        .add_query_param("count", 2)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["query"], "Avatar");
    assert_eq!(titles(&body), vec!["Aliens", "The Abyss"]);
    assert_eq!(
        body["recommendations"][0]["poster_url"],
        "https://image.tmdb.org/t/p/w500/aliens.jpg"
    );
}

#[tokio::test]
async fn test_default_count_returns_every_other_movie_in_small_catalog() {
    let server = create_test_server();
    let response = server
        .get("/recommendations")
        .add_query_param("title", "Titanic")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(titles(&body), vec!["The Abyss", "Avatar", "Aliens"]);
}

#[tokio::test]
async fn test_missing_posters_use_placeholder() {
    let server = create_test_server();
    let response = server
        .get("/recommendations")
        .add_query_param("title", "Aliens")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let placeholder = "https://via.placeholder.com/500x750.png?text=No+Poster";
    for movie in body["recommendations"].as_array().unwrap() {
        if movie["title"] == "Titanic" || movie["title"] == "The Abyss" {
            assert_eq!(movie["poster_url"], placeholder);
        }
    }
}

#[tokio::test]
async fn test_unknown_title_is_not_found() {
    let server = create_test_server();
    let response = server
        .get("/recommendations")
        .add_query_param("title", "Unknown Title")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Movie 'Unknown Title' not found in our database. Please select from the list."
    );
}

#[tokio::test]
async fn test_zero_count_is_rejected() {
    let server = create_test_server();
    let response = server
        .get("/recommendations")
        .add_query_param("title", "Avatar")
        .add_query_param("count", 0)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_by_id() {
    let server = create_test_server();
    let response = server
        .get("/movies/679/recommendations")
        .add_query_param("count", 1)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["query"], "Aliens");
    assert_eq!(titles(&body), vec!["Avatar"]);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let server = create_test_server();
    let response = server.get("/movies/1/recommendations").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let id = "6f1c2a3e-9d4b-4c7a-8e2f-0a1b2c3d4e5f";
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let server = create_test_server();
    let response = server.get("/health").await;

    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}
