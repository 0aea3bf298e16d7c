// tests/author_cache_tests.rs

mod common;

use common::{app_state, spawn_api};
use frontend::authors::ANONYMOUS;

#[tokio::test]
async fn second_lookup_is_served_from_cache() {
    // Arrange
    let (address, api) = spawn_api().await;
    api.seed_profile("a1", "writer");
    let state = app_state(&address);

    // Act
    let first = state.authors.resolve("a1").await;
    let second = state.authors.resolve("a1").await;

    // Assert
    assert_eq!(first.username, "writer");
    assert_eq!(first, second);
    assert_eq!(api.count("GET /profile/a1"), 1);
    assert_eq!(state.authors.len().await, 1);
}

#[tokio::test]
async fn failure_falls_back_and_is_retried() {
    // Arrange
    let (address, api) = spawn_api().await;
    api.seed_profile("a1", "writer");
    api.fail_next_profile_lookups(1);
    let state = app_state(&address);

    // Act
    let failed = state.authors.resolve("a1").await;
    let retried = state.authors.resolve("a1").await;

    // Assert
    assert_eq!(failed.username, ANONYMOUS);
    assert_eq!(failed.avatar_url, state.config.default_avatar_url);
    assert_eq!(retried.username, "writer");
    assert_eq!(api.count("GET /profile/a1"), 2);
}

#[tokio::test]
async fn missing_fields_use_defaults() {
    let (address, api) = spawn_api().await;
    api.db()
        .profiles
        .insert("a2".to_string(), serde_json::json!({ "userId": "a2", "profilePictureUrl": "" }));
    let state = app_state(&address);

    let author = state.authors.resolve("a2").await;

    assert_eq!(author.username, ANONYMOUS);
    assert_eq!(author.avatar_url, state.config.default_avatar_url);
}

#[tokio::test]
async fn resolve_many_looks_up_each_id_once() {
    let (address, api) = spawn_api().await;
    api.seed_profile("a1", "writer");
    api.seed_profile("a2", "editor");
    let state = app_state(&address);

    let authors = state.authors.resolve_many(["a1", "a2", "a1", "a1"]).await;

    assert_eq!(authors.len(), 2);
    assert_eq!(authors["a2"].username, "editor");
    assert_eq!(api.count("GET /profile/a1"), 1);
    assert_eq!(api.count("GET /profile/a2"), 1);
}
