//! ChatPDF client - implementation of `DocumentSource` over HTTP.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ChatPdfConfig::new(api_key)
//!     .with_base_url("https://api.chatpdf.com/v1")
//!     .with_timeout(Duration::from_secs(120));
//!
//! let client = ChatPdfClient::new(config)?;
//! ```
//!
//! Calls are made once. A non-success status becomes
//! `DocumentSourceError::Status` with the response text.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;
use tracing::debug;

use super::dto::{AddFileResponse, ChatMessage, ChatRequest, ChatResponse, DeleteRequest};
use crate::domain::conversation::{AssistantReply, SourceId};
use crate::domain::document::{PdfUpload, PDF_CONTENT_TYPE};
use crate::ports::{DocumentSource, DocumentSourceError};

/// Default vendor endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.chatpdf.com/v1";

const API_KEY_HEADER: &str = "x-api-key";

/// Configuration for the ChatPDF client.
#[derive(Debug)]
pub struct ChatPdfConfig {
    api_key: Secret<String>,
    /// Base URL for the API, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ChatPdfConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// HTTP client for the ChatPDF-compatible vendor.
pub struct ChatPdfClient {
    config: ChatPdfConfig,
    client: Client,
}

impl ChatPdfClient {
    pub fn new(config: ChatPdfConfig) -> Result<Self, DocumentSourceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DocumentSourceError::Configuration(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(self.url(path))
            .header(API_KEY_HEADER, self.config.api_key())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, DocumentSourceError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(DocumentSourceError::status(status.as_u16(), body))
    }

    fn transport_error(&self, e: reqwest::Error) -> DocumentSourceError {
        if e.is_timeout() {
            DocumentSourceError::Timeout {
                secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            DocumentSourceError::Network(format!("Connection failed: {}", e))
        } else {
            DocumentSourceError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl DocumentSource for ChatPdfClient {
    async fn upload(&self, file: &PdfUpload) -> Result<SourceId, DocumentSourceError> {
        debug!(file_name = file.file_name(), bytes = file.len(), "Uploading document");

        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.file_name().to_string())
            .mime_str(PDF_CONTENT_TYPE)
            .map_err(|e| DocumentSourceError::Configuration(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self.send(self.post("/sources/add-file").multipart(form)).await?;
        let body: AddFileResponse = response
            .json()
            .await
            .map_err(|e| DocumentSourceError::Parse(format!("Failed to parse upload response: {}", e)))?;

        SourceId::new(body.source_id)
            .map_err(|_| DocumentSourceError::Parse("Upload response has an empty sourceId".into()))
    }

    async fn chat(
        &self,
        source_id: &SourceId,
        question: &str,
    ) -> Result<AssistantReply, DocumentSourceError> {
        debug!(source_id = %source_id, "Sending question to document service");

        let request = ChatRequest {
            source_id: source_id.as_str(),
            messages: vec![ChatMessage {
                role: "user",
                content: question,
            }],
        };

        let response = self.send(self.post("/chats/message").json(&request)).await?;
        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| DocumentSourceError::Parse(format!("Failed to parse chat response: {}", e)))?;

        let citations = body.citations();
        AssistantReply::new(body.content, citations)
            .map_err(|_| DocumentSourceError::Parse("Chat response has empty content".into()))
    }

    async fn delete_source(&self, source_id: &SourceId) -> Result<(), DocumentSourceError> {
        debug!(source_id = %source_id, "Deleting document from document service");

        let request = DeleteRequest {
            sources: [source_id.as_str()],
        };
        self.send(self.post("/sources/delete").json(&request)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> ChatPdfClient {
        ChatPdfClient::new(ChatPdfConfig::new("sec_test").with_base_url(server.url())).unwrap()
    }

    fn pdf() -> PdfUpload {
        PdfUpload::new(Some("report.pdf"), "application/pdf", b"%PDF-1.4".to_vec()).unwrap()
    }

    #[tokio::test]
    async fn upload_sends_multipart_with_api_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/sources/add-file")
            .match_header("x-api-key", "sec_test")
            .match_header("content-type", Matcher::Regex("multipart/form-data".into()))
            .match_body(Matcher::Regex("name=\"file\"; filename=\"report.pdf\"".into()))
            .with_status(200)
            .with_body(r#"{"sourceId":"src_123"}"#)
            .create_async()
            .await;

        let source_id = client_for(&server).upload(&pdf()).await.unwrap();

        assert_eq!(source_id.as_str(), "src_123");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upload_failure_carries_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/sources/add-file")
            .with_status(400)
            .with_body("File too large")
            .create_async()
            .await;

        let err = client_for(&server).upload(&pdf()).await.unwrap_err();

        assert_eq!(err, DocumentSourceError::status(400, "File too large"));
    }

    #[tokio::test]
    async fn chat_posts_source_id_and_question() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chats/message")
            .match_header("x-api-key", "sec_test")
            .match_body(Matcher::Json(serde_json::json!({
                "sourceId": "src_123",
                "messages": [{"role": "user", "content": "Summarize"}]
            })))
            .with_status(200)
            .with_body(r#"{"content":"A report.","sources":[{"id":"1","name":"p. 2"}]}"#)
            .create_async()
            .await;

        let source_id = SourceId::new("src_123").unwrap();
        let reply = client_for(&server).chat(&source_id, "Summarize").await.unwrap();

        assert_eq!(reply.content(), "A report.");
        assert_eq!(reply.citations().len(), 1);
        assert_eq!(reply.citations()[0].name, "p. 2");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn chat_with_blank_reply_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chats/message")
            .with_status(200)
            .with_body(r#"{"content":"  "}"#)
            .create_async()
            .await;

        let source_id = SourceId::new("src_123").unwrap();
        let err = client_for(&server).chat(&source_id, "Hi").await.unwrap_err();

        assert!(matches!(err, DocumentSourceError::Parse(_)));
    }

    #[tokio::test]
    async fn chat_keeps_reply_when_sources_have_unknown_shape() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chats/message")
            .with_status(200)
            .with_body(r#"{"content":"Answer text","sources":[{"pageNumber":3}]}"#)
            .create_async()
            .await;

        let source_id = SourceId::new("src_123").unwrap();
        let reply = client_for(&server).chat(&source_id, "Hi").await.unwrap();

        assert_eq!(reply.content(), "Answer text");
        assert!(reply.citations().is_empty());
    }

    #[tokio::test]
    async fn chat_server_error_is_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chats/message")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let source_id = SourceId::new("src_123").unwrap();
        let err = client_for(&server).chat(&source_id, "Hi").await.unwrap_err();

        assert_eq!(err.status_code(), Some(500));
    }

    #[tokio::test]
    async fn delete_posts_source_list() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/sources/delete")
            .match_body(Matcher::Json(serde_json::json!({"sources": ["src_123"]})))
            .with_status(200)
            .create_async()
            .await;

        let source_id = SourceId::new("src_123").unwrap();
        client_for(&server).delete_source(&source_id).await.unwrap();

        mock.assert_async().await;
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = ChatPdfConfig::new("k").with_base_url("http://localhost:9000/v1/");
        assert_eq!(config.base_url, "http://localhost:9000/v1");
    }

    #[test]
    fn config_debug_does_not_leak_key() {
        let config = ChatPdfConfig::new("sec_very_secret");
        assert!(!format!("{:?}", config).contains("sec_very_secret"));
    }
}
