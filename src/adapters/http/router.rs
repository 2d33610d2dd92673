//! Top-level router: API routes plus the tower-http middleware stack.

use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method, Request};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::auth::{auth_routes, AuthAppState};
use super::conversation::{conversation_router, ConversationAppState};
use super::middleware::{auth_middleware, AuthState};
use crate::config::ServerConfig;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Everything the HTTP layer needs.
#[derive(Clone)]
pub struct AppState {
    pub conversations: ConversationAppState,
    pub auth: AuthAppState,
    pub session_validator: AuthState,
}

/// Transport settings taken from `ServerConfig`.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
    pub cors_origins: Vec<String>,
}

impl From<&ServerConfig> for HttpSettings {
    fn from(config: &ServerConfig) -> Self {
        Self {
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            max_upload_bytes: config.max_upload_bytes,
            cors_origins: config.cors_origins_list(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

/// Builds the application router.
///
/// Conversation and preview routes sit behind `auth_middleware`; `/health`
/// and `/api/auth/*` are public.
pub fn app_router(state: AppState, settings: &HttpSettings) -> Router {
    let protected = conversation_router()
        .with_state(state.conversations)
        .layer(middleware::from_fn_with_state(
            state.session_validator,
            auth_middleware,
        ));

    let stack = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CompressionLayer::new())
        .layer(cors_layer(&settings.cors_origins))
        .layer(TimeoutLayer::new(settings.request_timeout));

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes().with_state(state.auth))
        .merge(protected)
        .layer(DefaultBodyLimit::max(settings.max_upload_bytes))
        .layer(stack)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::{MockAuthProvider, MockSessionValidator};
    use crate::adapters::chatpdf::MockDocumentSource;
    use crate::adapters::memory::InMemoryConversationStore;
    use crate::application::PreviewRegistry;
    use axum::http::StatusCode;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState {
            conversations: ConversationAppState::new(
                Arc::new(InMemoryConversationStore::new()),
                Arc::new(MockDocumentSource::new()),
                Arc::new(PreviewRegistry::new()),
            ),
            auth: AuthAppState::new(Arc::new(MockAuthProvider::new())),
            session_validator: Arc::new(MockSessionValidator::new().with_test_user("t", "alice")),
        };
        app_router(state, &HttpSettings::default())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = app().oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let response = app().oneshot(get_request("/health")).await.unwrap();
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn incoming_request_id_is_propagated() {
        let request = Request::builder()
            .uri("/health")
            .header(REQUEST_ID_HEADER, "req-42")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
    }

    #[tokio::test]
    async fn conversations_require_a_token() {
        let response = app()
            .oneshot(get_request("/api/conversations"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn conversations_list_with_token() {
        let request = Request::builder()
            .uri("/api/conversations")
            .header(header::AUTHORIZATION, "Bearer t")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn settings_follow_server_config() {
        let config = ServerConfig {
            request_timeout_secs: 42,
            max_upload_bytes: 1024,
            cors_origins: Some("http://localhost:5173".to_string()),
            ..Default::default()
        };
        let settings = HttpSettings::from(&config);

        assert_eq!(settings.request_timeout, Duration::from_secs(42));
        assert_eq!(settings.max_upload_bytes, 1024);
        assert_eq!(settings.cors_origins, vec!["http://localhost:5173"]);
    }
}
