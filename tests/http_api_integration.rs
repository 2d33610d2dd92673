//! Integration tests for the HTTP API.
//!
//! Builds the full router (auth middleware, tower-http stack) over the
//! in-memory store and the mock document source, then walks through the
//! upload, chat, export, preview and delete endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use docchat::adapters::auth::{MockAuthProvider, MockSessionValidator};
use docchat::adapters::chatpdf::MockDocumentSource;
use docchat::adapters::http::{app_router, AppState, AuthAppState, ConversationAppState, HttpSettings};
use docchat::adapters::memory::InMemoryConversationStore;
use docchat::application::PreviewRegistry;
use docchat::ports::DocumentSourceError;

// =============================================================================
// Test Infrastructure
// =============================================================================

const PDF: &[u8] = b"%PDF-1.7\n1 0 obj\n%%EOF";
const BOUNDARY: &str = "docchat-test-boundary";

struct TestApp {
    router: Router,
    source: MockDocumentSource,
    store: InMemoryConversationStore,
}

impl TestApp {
    fn new(source: MockDocumentSource) -> Self {
        let store = InMemoryConversationStore::new();
        let validator = MockSessionValidator::new()
            .with_test_user("alice-token", "alice")
            .with_test_user("bob-token", "bob");

        let state = AppState {
            conversations: ConversationAppState::new(
                Arc::new(store.clone()),
                Arc::new(source.clone()),
                Arc::new(PreviewRegistry::new()),
            ),
            auth: AuthAppState::new(Arc::new(MockAuthProvider::new())),
            session_validator: Arc::new(validator),
        };

        Self {
            router: app_router(state, &HttpSettings::default()),
            source,
            store,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>, axum::http::HeaderMap) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec(), headers)
    }

    async fn json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes, _) = self.send(request).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Uploads a PDF as `token` and returns the upload response body.
    async fn upload(&self, token: &str) -> Value {
        let (status, body) = self
            .json(upload_request(token, "report.pdf", "application/pdf", PDF))
            .await;
        assert_eq!(status, StatusCode::CREATED, "upload failed: {}", body);
        body
    }
}

fn upload_request(token: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/conversations")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(token: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn post_json(token: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(token: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

// =============================================================================
// Upload
// =============================================================================

#[tokio::test]
async fn upload_creates_conversation_with_suggestions_and_preview() {
    let app = TestApp::new(MockDocumentSource::new().with_source_id("src_123"));

    let body = app.upload("alice-token").await;

    assert_eq!(body["conversation"]["title"], "report.pdf");
    assert_eq!(body["suggestedQuestions"].as_array().unwrap().len(), 4);
    assert_eq!(body["welcome"]["title"], "Análise do Documento");
    assert_eq!(body["welcome"]["topics"].as_array().unwrap().len(), 3);
    assert!(body["previewUrl"]
        .as_str()
        .unwrap()
        .starts_with("/api/previews/"));
    assert_eq!(app.store.conversation_count(), 1);

    let (status, list) = app.json(get("alice-token", "/api/conversations")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["conversations"][0]["id"], body["conversation"]["id"]);
}

#[tokio::test]
async fn non_pdf_upload_is_rejected_without_vendor_call() {
    let app = TestApp::new(MockDocumentSource::new());

    let (status, body) = app
        .json(upload_request("alice-token", "notes.txt", "text/plain", b"hi"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NOT_PDF");
    assert_eq!(app.source.call_count(), 0);
    assert_eq!(app.store.conversation_count(), 0);
}

#[tokio::test]
async fn vendor_upload_failure_is_bad_gateway() {
    let app = TestApp::new(MockDocumentSource::new().with_upload_error(
        DocumentSourceError::Status {
            status: 401,
            body: "bad key".to_string(),
        },
    ));

    let (status, body) = app
        .json(upload_request("alice-token", "a.pdf", "application/pdf", PDF))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "DOCUMENT_SOURCE_ERROR");
    assert_eq!(app.store.conversation_count(), 0);
}

#[tokio::test]
async fn preview_is_served_to_owner_only() {
    let app = TestApp::new(MockDocumentSource::new());
    let body = app.upload("alice-token").await;
    let preview_url = body["previewUrl"].as_str().unwrap().to_string();

    let (status, bytes, headers) = app.send(get("alice-token", &preview_url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(bytes, PDF);

    let (status, _, _) = app.send(get("bob-token", &preview_url)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn released_preview_is_gone() {
    let app = TestApp::new(MockDocumentSource::new());
    let body = app.upload("alice-token").await;
    let preview_url = body["previewUrl"].as_str().unwrap().to_string();

    let (status, _, _) = app.send(delete("bob-token", &preview_url)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = app.send(delete("alice-token", &preview_url)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = app.send(get("alice-token", &preview_url)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = app.send(delete("alice-token", &preview_url)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Messages
// =============================================================================

#[tokio::test]
async fn send_then_read_messages() {
    let app = TestApp::new(
        MockDocumentSource::new()
            .with_source_id("src_123")
            .with_reply("It is a revenue report."),
    );
    let id = app.upload("alice-token").await["conversation"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, exchange) = app
        .json(post_json(
            "alice-token",
            &format!("/api/conversations/{}/messages", id),
            json!({ "content": "Summarize" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exchange["status"], "answered");
    assert_eq!(exchange["question"]["content"], "Summarize");
    assert_eq!(exchange["answer"]["content"], "It is a revenue report.");
    assert_eq!(exchange["persisted"], true);

    let (status, history) = app
        .json(get(
            "alice-token",
            &format!("/api/conversations/{}/messages", id),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let messages = history["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[1]["role"], "assistant");
}

#[tokio::test]
async fn blank_message_is_no_content() {
    let app = TestApp::new(MockDocumentSource::new());
    let id = app.upload("alice-token").await["conversation"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, body) = app
        .json(post_json(
            "alice-token",
            &format!("/api/conversations/{}/messages", id),
            json!({ "content": "   " }),
        ))
        .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    assert_eq!(app.store.message_count(), 0);
}

#[tokio::test]
async fn vendor_chat_failure_returns_apology() {
    let app = TestApp::new(
        MockDocumentSource::new().with_chat_error(DocumentSourceError::Timeout { secs: 120 }),
    );
    let id = app.upload("alice-token").await["conversation"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, exchange) = app
        .json(post_json(
            "alice-token",
            &format!("/api/conversations/{}/messages", id),
            json!({ "content": "Hello?" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(exchange["status"], "failed");
    assert_eq!(exchange["persisted"], false);
    assert_eq!(app.store.message_count(), 0);
}

#[tokio::test]
async fn other_user_is_forbidden() {
    let app = TestApp::new(MockDocumentSource::new());
    let id = app.upload("alice-token").await["conversation"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, body) = app
        .json(get("bob-token", &format!("/api/conversations/{}/messages", id)))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn quick_actions() {
    let app = TestApp::new(MockDocumentSource::new().with_reply("Resumo"));
    let id = app.upload("alice-token").await["conversation"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, exchange) = app
        .json(post_json(
            "alice-token",
            &format!("/api/conversations/{}/quick-actions/summarize", id),
            json!({}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exchange["answer"]["content"], "Resumo");

    let (status, body) = app
        .json(post_json(
            "alice-token",
            &format!("/api/conversations/{}/quick-actions/translate", id),
            json!({}),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNKNOWN_ACTION");
}

// =============================================================================
// Export and delete
// =============================================================================

#[tokio::test]
async fn export_csv_is_an_attachment() {
    let app = TestApp::new(MockDocumentSource::new().with_reply("Answer"));
    let id = app.upload("alice-token").await["conversation"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    app.send(post_json(
        "alice-token",
        &format!("/api/conversations/{}/messages", id),
        json!({ "content": "Question" }),
    ))
    .await;

    let (status, bytes, headers) = app
        .send(get(
            "alice-token",
            &format!("/api/conversations/{}/export?format=csv", id),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("report.pdf_conversa.csv"));
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("Remetente,Mensagem,Timestamp\n"));
    assert_eq!(text.lines().count(), 3);
}

#[tokio::test]
async fn export_html_escapes_messages() {
    let app = TestApp::new(MockDocumentSource::new().with_reply("Use <b> & more"));
    let id = app.upload("alice-token").await["conversation"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    app.send(post_json(
        "alice-token",
        &format!("/api/conversations/{}/messages", id),
        json!({ "content": "Question" }),
    ))
    .await;

    let (status, bytes, headers) = app
        .send(get(
            "alice-token",
            &format!("/api/conversations/{}/export?format=html", id),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("report.pdf_conversa.html"));
    let html = String::from_utf8(bytes).unwrap();
    assert!(html.contains("<h1>Conversa sobre: report.pdf</h1>"));
    assert!(html.contains("<strong>ASSISTANT:</strong> Use &lt;b&gt; &amp; more"));

    let (status, bytes, _) = app
        .send(get(
            "alice-token",
            &format!("/api/conversations/{}/export?format=table", id),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let table = String::from_utf8(bytes).unwrap();
    assert_eq!(table.matches("<tr><td>").count(), 2);
}

#[tokio::test]
async fn unsupported_export_format_is_400() {
    let app = TestApp::new(MockDocumentSource::new());
    let id = app.upload("alice-token").await["conversation"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, body) = app
        .json(get(
            "alice-token",
            &format!("/api/conversations/{}/export?format=docx", id),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNSUPPORTED_FORMAT");
}

#[tokio::test]
async fn delete_removes_conversation_even_if_vendor_fails() {
    let app = TestApp::new(
        MockDocumentSource::new()
            .with_source_id("src_9")
            .with_delete_error(DocumentSourceError::Network("reset".to_string())),
    );
    let body = app.upload("alice-token").await;
    let id = body["conversation"]["id"].as_str().unwrap().to_string();
    let preview_url = body["previewUrl"].as_str().unwrap().to_string();

    let (status, _, _) = app
        .send(delete("alice-token", &format!("/api/conversations/{}", id)))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.source.deleted_sources(), vec!["src_9".to_string()]);
    assert_eq!(app.store.conversation_count(), 0);

    let (status, _, _) = app.send(get("alice-token", &preview_url)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = app
        .send(get(
            "alice-token",
            &format!("/api/conversations/{}/messages", id),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_by_non_owner_is_forbidden() {
    let app = TestApp::new(MockDocumentSource::new());
    let id = app.upload("alice-token").await["conversation"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, _, _) = app
        .send(delete("bob-token", &format!("/api/conversations/{}", id)))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.conversation_count(), 1);
    assert_eq!(app.source.call_count(), 1);
}
