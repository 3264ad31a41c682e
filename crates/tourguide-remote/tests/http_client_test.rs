//! Integration tests for the HTTP adapters against a local mock endpoint

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tourguide_core::models::{ChatRequest, UserPreferences};
use tourguide_core::ports::{ChatEndpoint, SyncEndpoint};
use tourguide_core::TourGuideError;
use tourguide_knowledge::{KnowledgeSource, load_or_default};
use tourguide_remote::{HttpGuideClient, HttpKnowledgeSource};

#[derive(Clone, Default)]
struct Recorded {
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn chat(State(recorded): State<Recorded>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    recorded.bodies.lock().unwrap().push(body.clone());
    if body["message"] == "explode" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "model unavailable"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "response": format!("You said: {}", body["message"].as_str().unwrap_or_default()),
            "destination": body["destination"],
            "language": body["language"],
        })),
    )
}

async fn sync(State(recorded): State<Recorded>, Json(body): Json<Value>) -> StatusCode {
    recorded.bodies.lock().unwrap().push(body.clone());
    if body["reject"] == true {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    }
}

async fn set_preferences(
    State(recorded): State<Recorded>,
    Json(body): Json<Value>,
) -> Json<Value> {
    recorded.bodies.lock().unwrap().push(body.clone());
    Json(json!({"status": "success", "preferences": body}))
}

async fn knowledge() -> Json<Value> {
    Json(json!({
        "destinations": {
            "rome": {"name": "Rome, Italy", "attractions": ["Colosseum"]}
        },
        "phrases": {"en": {"greetings": ["Ciao"]}}
    }))
}

async fn spawn_server() -> (String, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/health", get(|| async { Json(json!({"status": "ok"})) }))
        .route("/chat", post(chat))
        .route("/api/sync", post(sync))
        .route("/set_preferences", post(set_preferences))
        .route("/data/offline_data.json", get(knowledge))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), recorded)
}

fn request(message: &str) -> ChatRequest {
    ChatRequest {
        message: message.to_string(),
        user_id: "user_test".to_string(),
        destination: "paris".to_string(),
        language: "fr".to_string(),
        coordinates: Some([48.8566, 2.3522]),
    }
}

#[tokio::test]
async fn test_chat_round_trip() {
    let (base_url, recorded) = spawn_server().await;
    let client = HttpGuideClient::new(base_url);

    let reply = client.chat(&request("Bonjour")).await.unwrap();
    assert_eq!(reply.text, "You said: Bonjour");

    let bodies = recorded.bodies.lock().unwrap();
    assert_eq!(bodies[0]["user_id"], "user_test");
    assert_eq!(bodies[0]["language"], "fr");
    assert_eq!(bodies[0]["coordinates"], json!([48.8566, 2.3522]));
}

#[tokio::test]
async fn test_chat_error_body() {
    let (base_url, _) = spawn_server().await;
    let client = HttpGuideClient::new(base_url);

    match client.chat(&request("explode")).await {
        Err(TourGuideError::Endpoint { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "model unavailable");
        }
        other => panic!("expected endpoint error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    // Nothing listens on port 9 of localhost
    let client = HttpGuideClient::new("http://127.0.0.1:9");

    let err = client.chat(&request("hello")).await.unwrap_err();
    assert!(err.is_network());
    assert!(!client.is_reachable().await);
}

#[tokio::test]
async fn test_health_probe() {
    let (base_url, _) = spawn_server().await;
    assert!(HttpGuideClient::new(base_url).is_reachable().await);
}

#[tokio::test]
async fn test_sync_accept_and_reject() {
    let (base_url, recorded) = spawn_server().await;
    let client = HttpGuideClient::new(base_url);

    client.sync(&json!({"type": "chat", "message": "hi"})).await.unwrap();
    let err = client.sync(&json!({"reject": true})).await.unwrap_err();
    assert!(matches!(err, TourGuideError::Endpoint { status: 400, .. }));

    assert_eq!(recorded.bodies.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_set_preferences() {
    let (base_url, recorded) = spawn_server().await;
    let client = HttpGuideClient::new(base_url);

    client
        .set_preferences("user_test", &UserPreferences::default())
        .await
        .unwrap();

    let bodies = recorded.bodies.lock().unwrap();
    assert_eq!(bodies[0]["user_id"], "user_test");
    assert_eq!(bodies[0]["travel_style"], "sightseeing");
}

#[tokio::test]
async fn test_http_knowledge_source() {
    let (base_url, _) = spawn_server().await;
    let source = HttpKnowledgeSource::new(format!("{}/data/offline_data.json", base_url));

    let kb = source.fetch().await.unwrap();
    assert_eq!(kb.destination("rome").unwrap().name, "Rome, Italy");
}

#[tokio::test]
async fn test_http_knowledge_source_falls_back() {
    let (base_url, _) = spawn_server().await;
    let source = HttpKnowledgeSource::new(format!("{}/missing.json", base_url));

    assert!(source.fetch().await.is_err());
    let kb = load_or_default(&source).await;
    assert!(kb.destination("paris").is_some());
}
