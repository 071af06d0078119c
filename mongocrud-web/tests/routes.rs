use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use mongocrud::{
    memory::InMemoryStore,
    record::Record,
    store::RecordStore,
};
use mongocrud_web::{app, AppState};

const CLIENTS: &str = "clients";
const MISSING_ID: &str = "000000000000000000000000";

struct TestApp {
    router: Router,
    backend: InMemoryStore,
    state: Arc<AppState>,
}

impl TestApp {
    fn new() -> Self {
        let backend = InMemoryStore::new();
        let state = Arc::new(AppState::new(RecordStore::new(backend.clone()).into_dyn(), CLIENTS));

        Self { router: app(state.clone()), backend, state }
    }

    async fn seed(&self, record: Record) -> String {
        self.state.records().insert(&record).await.unwrap().to_hex()
    }

    async fn records(&self) -> Vec<Record> {
        self.state.records().find_all().await.unwrap()
    }

    async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_form(&self, uri: &str, body: &str) -> (StatusCode, String) {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        if status == StatusCode::SEE_OTHER {
            assert_eq!(location.as_deref(), Some("/"));
        }

        (status, String::from_utf8(body.to_vec()).unwrap())
    }
}

fn error_message(body: &str) -> String {
    let json: Value = serde_json::from_str(body).unwrap();

    assert_eq!(json["success"], Value::Bool(false));
    json["message"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn index_lists_records() {
    let app = TestApp::new();
    let id = app.seed(Record::new("John", "test@example.com", "38")).await;

    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<td>John</td>"));
    assert!(body.contains("<td>test@example.com</td>"));
    assert!(body.contains(&format!("/edit/{id}")));
    assert!(body.contains(&format!("/delete/{id}")));
}

#[tokio::test]
async fn create_form_renders() {
    let app = TestApp::new();

    let (status, body) = app.get("/create").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"action="/create""#));
}

#[tokio::test]
async fn create_inserts_and_redirects() {
    let app = TestApp::new();

    let (status, _) = app.post_form("/create", "name=John&email=test%40example.com&age=38").await;

    assert_eq!(status, StatusCode::SEE_OTHER);

    let records = app.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "John");
    assert_eq!(records[0].email, "test@example.com");
    assert_eq!(records[0].age, "38");
    assert!(records[0].id.is_some());
}

#[tokio::test]
async fn create_defaults_missing_fields_to_empty() {
    let app = TestApp::new();

    let (status, _) = app.post_form("/create", "name=Solo").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(app.records().await[0].email, "");
}

#[tokio::test]
async fn create_rejects_a_non_form_body() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Request::post("/create").body(Body::from("{}")).unwrap())
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    error_message(&body);
    assert!(app.records().await.is_empty());
}

#[tokio::test]
async fn create_accepts_a_json_body() {
    let app = TestApp::new();

    let (status, _) = app
        .send(
            Request::post("/create")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"John","email":"test@example.com","age":"38"}"#))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::SEE_OTHER);

    let records = app.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "John");
    assert_eq!(records[0].email, "test@example.com");
    assert_eq!(records[0].age, "38");
}

#[tokio::test]
async fn edit_rejects_malformed_json() {
    let app = TestApp::new();
    let id = app.seed(Record::new("John", "test@example.com", "38")).await;

    let (status, body) = app
        .send(
            Request::post(format!("/edit/{id}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"name\":"))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    error_message(&body);
    assert_eq!(app.records().await[0].name, "John");
}

#[tokio::test]
async fn edit_page_shows_the_record() {
    let app = TestApp::new();
    let id = app.seed(Record::new("John", "test@example.com", "38")).await;

    let (status, body) = app.get(&format!("/edit/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="John""#));
    assert!(body.contains(&format!(r#"action="/edit/{id}""#)));
}

#[tokio::test]
async fn edit_page_for_a_missing_id_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app.get(&format!("/edit/{MISSING_ID}")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(error_message(&body).contains(MISSING_ID));
}

#[tokio::test]
async fn edit_updates_only_submitted_fields() {
    let app = TestApp::new();
    let id = app.seed(Record::new("John", "test@example.com", "38")).await;

    let (status, _) = app.post_form(&format!("/edit/{id}"), "name=Johnny").await;

    assert_eq!(status, StatusCode::SEE_OTHER);

    let records = app.records().await;
    assert_eq!(records[0].name, "Johnny");
    assert_eq!(records[0].email, "test@example.com");
    assert_eq!(records[0].age, "38");
}

#[tokio::test]
async fn delete_removes_the_record() {
    let app = TestApp::new();
    let id = app.seed(Record::new("John", "test@example.com", "38")).await;
    app.seed(Record::new("Mark", "mark@example.com", "41")).await;

    let (status, _) = app.post_form(&format!("/delete/{id}"), "").await;

    assert_eq!(status, StatusCode::SEE_OTHER);

    let records = app.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Mark");
}

#[tokio::test]
async fn malformed_ids_are_rejected_without_touching_the_store() {
    let app = TestApp::new();
    app.seed(Record::new("John", "test@example.com", "38")).await;

    for (method, uri) in [("GET", "/edit/not-an-id"), ("POST", "/edit/not-an-id"), ("POST", "/delete/xyz")] {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=Changed"))
            .unwrap();

        let (status, body) = app.send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert!(error_message(&body).contains("Invalid record id"));
    }

    let records = app.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "John");
}

#[tokio::test]
async fn store_failures_are_internal_errors() {
    let app = TestApp::new();
    app.backend.set_available(false);

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!error_message(&body).is_empty());

    let (status, _) = app.post_form("/create", "name=John").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn record_text_is_escaped() {
    let app = TestApp::new();
    app.seed(Record::new("<b>bold</b>", "a&b@example.com", "38")).await;

    let (_, body) = app.get("/").await;

    assert!(body.contains("&lt;b&gt;bold&lt;/b&gt;"));
    assert!(body.contains("a&amp;b@example.com"));
}
