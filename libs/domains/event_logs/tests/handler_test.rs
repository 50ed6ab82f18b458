//! Handler tests for the event logs domain
//!
//! These drive the domain router with in-memory storage and check:
//! - Request parsing and validation outcomes
//! - The `{status, message, data: {data}}` envelope on every path
//! - HTTP status codes matching the envelope status

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_event_logs::*;
use http_body_util::BodyExt;
use mongodb::bson::{doc, oid::ObjectId};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use test_utils::TestDataBuilder;
use test_utils::assertions::{assert_envelope, assert_hex_id};
use tower::ServiceExt; // For oneshot()

fn app() -> (Router, Arc<InMemoryEventLogRepository>) {
    let store = Arc::new(InMemoryEventLogRepository::new());
    let service = EventLogService::new(store.clone());
    (router(service), store)
}

/// Repository whose reads fail the way a broken store does.
struct FailingRepo {
    timeout: bool,
}

#[async_trait::async_trait]
impl EventLogRepository for FailingRepo {
    async fn insert(&self, event_log: EventLog) -> Result<ObjectId> {
        Ok(event_log.id)
    }

    async fn find_by_id(&self, _id: ObjectId) -> Result<Option<EventLog>> {
        Err(self.error("find_by_id"))
    }

    async fn find_all(&self) -> Result<Vec<EventLog>> {
        Err(self.error("find_all"))
    }
}

impl FailingRepo {
    fn error(&self, operation: &'static str) -> EventLogError {
        if self.timeout {
            EventLogError::Timeout {
                operation,
                after: Duration::from_secs(10),
            }
        } else {
            let err = mongodb::bson::from_document::<EventLog>(doc! { "event_details": "flat" })
                .unwrap_err();
            EventLogError::Decode(err)
        }
    }
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn submit(app: &Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/event/submit")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

#[tokio::test]
async fn test_submit_returns_201_with_inserted_id() {
    let (app, store) = app();
    let builder = TestDataBuilder::from_test_name("submit_201");

    let (status, body) = submit(&app, builder.payload("login").to_string()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_envelope(&body, 201, "success");
    assert_hex_id(&body["data"]["data"]["InsertedID"], "insert ack");
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_submitted_record_is_retrievable_by_query_and_path() {
    let (app, _) = app();
    let payload = json!({
        "created": "2024-01-15T10:00:00Z",
        "event_name": "login",
        "event_details": {"user": "alice"}
    });

    let (_, ack) = submit(&app, payload.to_string()).await;
    let id = ack["data"]["data"]["InsertedID"].as_str().unwrap().to_string();

    let (status, body) = get(&app, &format!("/data?eventLogId={}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_envelope(&body, 200, "success");
    assert_eq!(
        body["data"]["data"],
        json!({
            "id": id,
            "created": "2024-01-15T10:00:00Z",
            "event_name": "login",
            "event_details": {"user": "alice"}
        })
    );

    let (status, by_path) = get(&app, &format!("/data/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_path, body);
}

#[tokio::test]
async fn test_submit_missing_field_returns_400_and_stores_nothing() {
    let (app, store) = app();

    let (status, body) = submit(
        &app,
        json!({"created": "2024-01-15T10:00:00Z", "event_details": {}}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&body, 400, "error");
    assert!(body["data"]["data"].as_str().unwrap().contains("event_name"));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_submit_without_details_returns_400() {
    let (app, store) = app();

    let (status, body) = submit(
        &app,
        json!({"created": "2024-01-15T10:00:00Z", "event_name": "login"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["data"].as_str().unwrap().contains("event_details"));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_submit_malformed_body_returns_400() {
    let (app, store) = app();

    let (status, body) = submit(&app, "{\"created\": \"2024").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_envelope(&body, 400, "error");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_alldata_empty_is_empty_array() {
    let (app, _) = app();

    let (status, body) = get(&app, "/alldata").await;

    assert_eq!(status, StatusCode::OK);
    assert_envelope(&body, 200, "success");
    assert_eq!(body["data"]["data"], json!([]));
}

#[tokio::test]
async fn test_alldata_returns_every_record() {
    let (app, _) = app();
    let builder = TestDataBuilder::from_test_name("alldata_n");

    for n in 0..3 {
        let name = builder.name("event", &n.to_string());
        let (status, _) = submit(&app, builder.payload(&name).to_string()).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(&app, "/alldata").await;
    assert_eq!(status, StatusCode::OK);

    let records = body["data"]["data"].as_array().unwrap();
    assert_eq!(records.len(), 3);
    for (n, record) in records.iter().enumerate() {
        assert_eq!(record["event_name"], builder.name("event", &n.to_string()));
        assert_eq!(record["event_details"], json!(builder.event_details()));
        assert_hex_id(&record["id"], "listed record");
    }
}

#[tokio::test]
async fn test_unknown_id_returns_500_envelope() {
    let (app, _) = app();

    let (status, body) = get(&app, "/data?eventLogId=65a1f0c2e4b0a1b2c3d4e5f6").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_envelope(&body, 500, "error");
}

#[tokio::test]
async fn test_invalid_id_returns_500_envelope() {
    let (app, _) = app();

    for uri in ["/data?eventLogId=zzz", "/data", "/data/not-an-id"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "uri {}", uri);
        assert_envelope(&body, 500, "error");
    }
}

#[tokio::test]
async fn test_client_supplied_id_is_ignored() {
    let (app, _) = app();

    let (_, ack) = submit(
        &app,
        json!({
            "id": "000000000000000000000001",
            "created": "t",
            "event_name": "n",
            "event_details": {}
        })
        .to_string(),
    )
    .await;

    assert_ne!(ack["data"]["data"]["InsertedID"], "000000000000000000000001");
}

#[tokio::test]
async fn test_unreadable_id_returns_500_envelope() {
    let (app, _) = app();

    for uri in ["/data?eventLogId=a&eventLogId=b", "/data/%FF"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "uri {}", uri);
        assert_envelope(&body, 500, "error");
    }
}

#[tokio::test]
async fn test_store_read_failures_return_500_envelope() {
    for timeout in [false, true] {
        let app = router(EventLogService::new(FailingRepo { timeout }));
        let id = ObjectId::new().to_hex();

        for uri in ["/alldata".to_string(), format!("/data?eventLogId={}", id)] {
            let (status, body) = get(&app, &uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "uri {}", uri);
            assert_envelope(&body, 500, "error");
            assert!(body["data"]["data"].is_string(), "no records leak for {}", uri);
        }
    }
}

#[tokio::test]
async fn test_submit_accepts_integer_beyond_i64() {
    let (app, store) = app();

    let (status, body) = submit(
        &app,
        r#"{"created": "t", "event_name": "n", "event_details": {"n": 18446744073709551615}}"#,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_envelope(&body, 201, "success");
    assert_eq!(store.len().await, 1);
}

#[test]
fn test_openapi_lists_event_log_paths() {
    use utoipa::OpenApi;

    let doc = ApiDoc::openapi();
    for path in ["/data", "/data/{eventLogId}", "/alldata", "/event/submit"] {
        assert!(doc.paths.paths.contains_key(path), "missing {}", path);
    }
}
