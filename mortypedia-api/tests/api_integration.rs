//! In-process HTTP tests for the Mortypedia API.
//!
//! The router runs against the in-memory likes store and mock collaborators,
//! so no database or network access is needed.
//!
//! Run with: `cargo test --test api_integration`

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use likes_repository::{InMemoryLikesRepository, LikesService};
use likes_shared::types::EntityType;
use mortypedia_api::{
    clients::{MockEntityMetadataSource, MockTextGenerator},
    config::create_cors_layer,
    identity::USER_ID_HEADER,
    server::{AppState, create_app},
};
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store: Arc<InMemoryLikesRepository>,
    generator: Arc<MockTextGenerator>,
}

fn metadata() -> MockEntityMetadataSource {
    MockEntityMetadataSource::new()
        .with_entity(EntityType::Character, 1, "Rick Sanchez")
        .with_entity(EntityType::Character, 42, "Mr. Poopybutthole")
        .with_entity(EntityType::Episode, 7, "Raising Gazorpazorp")
        .with_entity(EntityType::Location, 3, "Citadel of Ricks")
}

fn build(metadata: MockEntityMetadataSource, generator: MockTextGenerator) -> TestApp {
    let store = Arc::new(InMemoryLikesRepository::new());
    let generator = Arc::new(generator);
    let state = AppState {
        likes: Arc::new(LikesService::new(store.clone())),
        metadata: Arc::new(metadata),
        text_generator: generator.clone(),
    };
    TestApp {
        router: create_app(state, create_cors_layer(&["http://localhost:3000".to_string()])),
        store,
        generator,
    }
}

fn test_app() -> TestApp {
    build(metadata(), MockTextGenerator::replying("A genius scientist."))
}

async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn toggle(app: &TestApp, user: Option<&str>, entity_type: &str, entity_id: i32) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/likes/toggle",
        user,
        Some(json!({ "entityId": entity_id, "entityType": entity_type })),
    )
    .await
}

// ============================================================================
// Likes
// ============================================================================

#[tokio::test]
async fn test_like_lifecycle_scenario() {
    let app = test_app();

    let (status, body) = toggle(&app, Some("u1"), "character", 42).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, body) = send(&app, Method::GET, "/likes/character/42", Some("u1"), None).await;
    assert_eq!(body, json!({ "liked": true }));

    toggle(&app, Some("u1"), "character", 42).await;
    let (_, body) = send(&app, Method::GET, "/likes/character/42", Some("u1"), None).await;
    assert_eq!(body, json!({ "liked": false }));

    toggle(&app, Some("u1"), "episode", 7).await;
    toggle(&app, Some("u1"), "location", 3).await;

    let (status, body) = send(&app, Method::GET, "/likes", Some("u1"), None).await;
    assert_eq!(status, StatusCode::OK);
    let mut likes = body.as_array().unwrap().clone();
    likes.sort_by_key(|like| like["entityType"].as_str().unwrap().to_string());
    assert_eq!(
        likes,
        vec![
            json!({ "entityId": 7, "entityType": "episode" }),
            json!({ "entityId": 3, "entityType": "location" }),
        ]
    );

    let (status, body) = toggle(&app, None, "character", 1).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
    assert_eq!(app.store.len().await, 2);
}

#[tokio::test]
async fn test_likes_filter_by_type() {
    let app = test_app();
    toggle(&app, Some("u1"), "character", 1).await;
    toggle(&app, Some("u1"), "episode", 7).await;

    let (status, body) = send(&app, Method::GET, "/likes?entityType=episode", Some("u1"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "entityId": 7, "entityType": "episode" }]));
}

#[tokio::test]
async fn test_likes_are_scoped_to_caller() {
    let app = test_app();
    toggle(&app, Some("u1"), "character", 1).await;

    let (_, body) = send(&app, Method::GET, "/likes", Some("u2"), None).await;
    assert_eq!(body, json!([]));

    let (_, body) = send(&app, Method::GET, "/likes/character/1", Some("u2"), None).await;
    assert_eq!(body, json!({ "liked": false }));
}

#[tokio::test]
async fn test_anonymous_reads_are_rejected() {
    let app = test_app();

    let (status, _) = send(&app, Method::GET, "/likes", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/likes/character/1", Some("  "), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/likes/entities", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_entity_type_is_bad_request() {
    let app = test_app();

    let (status, body) = toggle(&app, Some("u1"), "planet", 1).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("planet"));

    let (status, _) = send(&app, Method::GET, "/likes?entityType=Character", Some("u1"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/likes/planet/1", Some("u1"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_malformed_toggle_body_is_bad_request() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/likes/toggle",
        Some("u1"),
        Some(json!({ "entityType": "character" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unparseable_path_and_query_answer_json_errors() {
    let app = test_app();

    for (method, uri) in [
        (Method::GET, "/likes/character/abc"),
        (Method::GET, "/likes/character/99999999999"),
        (Method::GET, "/likes?entityType=episode&entityType=x"),
        (Method::POST, "/entities/character/abc/description"),
    ] {
        let (status, body) = send(&app, method, uri, Some("u1"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string(), "{uri} answered {body}");
    }
    assert!(app.generator.prompts().await.is_empty());
}

#[tokio::test]
async fn test_store_outage_is_service_unavailable() {
    let app = test_app();
    app.store.set_unavailable(true);

    let (status, body) = toggle(&app, Some("u1"), "character", 1).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({ "error": "Store unavailable" }));
}

// ============================================================================
// My Likes
// ============================================================================

#[tokio::test]
async fn test_liked_entities_are_resolved_in_kind_order() {
    let app = test_app();
    toggle(&app, Some("u1"), "location", 3).await;
    toggle(&app, Some("u1"), "character", 1).await;
    toggle(&app, Some("u1"), "episode", 7).await;

    let (status, body) = send(&app, Method::GET, "/likes/entities", Some("u1"), None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|entity| entity["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Rick Sanchez", "Raising Gazorpazorp", "Citadel of Ricks"]);
    assert_eq!(body[1]["entityType"], "episode");
    assert_eq!(body[1]["image"], "/episodes.webp");
}

#[tokio::test]
async fn test_liked_entities_metadata_outage_is_bad_gateway() {
    let app = build(
        MockEntityMetadataSource::failing(),
        MockTextGenerator::replying("unused"),
    );
    toggle(&app, Some("u1"), "character", 1).await;

    let (status, body) = send(&app, Method::GET, "/likes/entities", Some("u1"), None).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "error": "Entity metadata unavailable" }));
}

// ============================================================================
// Descriptions
// ============================================================================

#[tokio::test]
async fn test_generate_description_returns_text() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/generate-description",
        None,
        Some(json!({ "prompt": "Describe Rick" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("A genius scientist."));
    assert_eq!(app.generator.prompts().await, vec!["Describe Rick".to_string()]);
}

#[tokio::test]
async fn test_generate_description_requires_prompt() {
    let app = test_app();

    for body in [Some(json!({})), Some(json!({ "prompt": "" })), None] {
        let (status, response) =
            send(&app, Method::POST, "/generate-description", None, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({ "error": "No prompt provided" }));
    }
    assert!(app.generator.prompts().await.is_empty());
}

#[tokio::test]
async fn test_generate_description_forwards_whitespace_prompt() {
    let app = test_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/generate-description",
        None,
        Some(json!({ "prompt": "  " })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.generator.prompts().await, vec!["  ".to_string()]);
}

#[tokio::test]
async fn test_generate_description_upstream_failure() {
    let app = build(metadata(), MockTextGenerator::failing());

    let (status, body) = send(
        &app,
        Method::POST,
        "/generate-description",
        None,
        Some(json!({ "prompt": "Describe Rick" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Something went wrong" }));
}

#[tokio::test]
async fn test_describe_entity_prompts_with_name() {
    let app = test_app();

    let (status, body) = send(&app, Method::POST, "/entities/character/1/description", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "entityId": 1,
            "entityType": "character",
            "name": "Rick Sanchez",
            "description": "A genius scientist."
        })
    );
    let prompts = app.generator.prompts().await;
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Rick Sanchez"));
}

#[tokio::test]
async fn test_describe_unknown_entity_is_not_found() {
    let app = test_app();

    let (status, _) = send(&app, Method::POST, "/entities/episode/999/description", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, "/entities/planet/1/description", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(app.generator.prompts().await.is_empty());
}

#[tokio::test]
async fn test_health() {
    let app = test_app();

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
