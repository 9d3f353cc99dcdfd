//! HTTP routes exposing the chat core's two operations plus liveness.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use palaver::{ChatError, ChatErrorKind, ChatService, SessionId};
use serde::{Deserialize, Serialize};

pub struct AppState {
    pub chat: ChatService,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Provider-side failures ride back with HTTP 200 and a populated `error`
/// field so the caller always gets a usable `session_id`; only malformed
/// requests are rejected outright.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub status: &'static str,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/reset_session", post(reset_session))
        .route("/health", get(health))
        .with_state(state)
}

async fn chat(State(state): State<Arc<AppState>>, Json(request): Json<ChatRequest>) -> Response {
    let session_id = request.session_id.map(SessionId::from);

    match state.chat.handle_message(session_id, &request.message).await {
        Ok(reply) => Json(ChatResponse {
            response: reply.message,
            session_id: reply.session_id.to_string(),
            error: reply.error,
        })
        .into_response(),
        Err(error) => reject(error),
    }
}

async fn reset_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResetRequest>,
) -> Response {
    let session_id = request.session_id.unwrap_or_default();

    match state.chat.reset_session(&session_id).await {
        Ok(ack) => Json(ResetResponse {
            status: "ok",
            session_id: ack.session_id.to_string(),
        })
        .into_response(),
        Err(error) => reject(error),
    }
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

fn reject(error: ChatError) -> Response {
    let status = match error.kind {
        ChatErrorKind::EmptyMessage | ChatErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ChatErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(ErrorResponse { error: error.message })).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;
    use palaver::{
        chat_service_with_store, in_memory_store, Generation, GeneratorFuture, ProviderError,
        TextGenerator,
    };

    use super::{AppState, ChatRequest, ResetRequest, chat, health, reset_session};

    #[derive(Debug)]
    struct FakeGenerator {
        outcome: Result<String, ProviderError>,
    }

    impl TextGenerator for FakeGenerator {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn generate<'a>(
            &'a self,
            _prompt: String,
        ) -> GeneratorFuture<'a, Result<Generation, ProviderError>> {
            Box::pin(async move {
                self.outcome.clone().map(|text| Generation {
                    text,
                    elapsed: Duration::from_millis(1),
                })
            })
        }
    }

    fn state_with(outcome: Result<String, ProviderError>) -> Arc<AppState> {
        let generator = Arc::new(FakeGenerator { outcome });
        let store = in_memory_store("be concise", 20);
        Arc::new(AppState {
            chat: chat_service_with_store(generator, store),
        })
    }

    async fn read_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should collect");
        serde_json::from_slice(&bytes).expect("body should be json")
    }

    #[tokio::test]
    async fn chat_returns_reply_with_session_id_and_null_error() {
        let state = state_with(Ok("Hi there".to_string()));

        let response = chat(
            State(state),
            Json(ChatRequest {
                message: "Hello".to_string(),
                session_id: None,
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["response"], "Hi there");
        assert!(body["error"].is_null());
        assert!(!body["session_id"].as_str().unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn blank_messages_are_rejected_with_400() {
        let state = state_with(Ok("unused".to_string()));

        let response = chat(
            State(state),
            Json(ChatRequest {
                message: "   ".to_string(),
                session_id: Some("s1".to_string()),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn provider_failures_are_http_success_with_error_payload() {
        let state = state_with(Err(ProviderError::authentication(
            "http 401 Unauthorized: API key invalid",
        )));

        let response = chat(
            State(state),
            Json(ChatRequest {
                message: "Hello".to_string(),
                session_id: Some("s1".to_string()),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(
            body["response"],
            "Authentication error with AI service. Check API key."
        );
        assert_eq!(body["session_id"], "s1");
        assert!(body["error"].as_str().unwrap_or_default().contains("401"));
    }

    #[tokio::test]
    async fn reset_requires_a_session_id() {
        let state = state_with(Ok("unused".to_string()));

        let response = reset_session(
            State(state.clone()),
            Json(ResetRequest { session_id: None }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = reset_session(
            State(state),
            Json(ResetRequest {
                session_id: Some("s1".to_string()),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["session_id"], "s1");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = health().await;
        let body = read_json(response.into_response()).await;
        assert_eq!(body["status"], "ok");
    }
}
