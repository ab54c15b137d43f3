//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with dto / handlers / routes. [`api_router`]
//! assembles them under `/v1` and adds request tracing.

pub mod chat;
pub mod conversation;
pub mod error;

pub use chat::chat_routes;
pub use conversation::{conversation_routes, ConversationAppState};
pub use error::ApiError;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

/// Full application router.
///
/// - `GET /health`
/// - `/v1/projects/...` conversation endpoints
/// - `POST /v1/chat`
pub fn api_router(state: ConversationAppState) -> Router {
    let v1 = conversation_routes()
        .with_state(state)
        .merge(chat_routes());

    Router::new()
        .route("/health", get(health))
        .nest("/v1", v1)
        .layer(TraceLayer::new_for_http())
}

/// GET /health - Liveness probe.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{
        ConversationGateway, JsonObject, ListConversationsParams, MessagesParams, UpstreamError,
    };
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct NotFoundGateway;

    #[async_trait]
    impl ConversationGateway for NotFoundGateway {
        async fn list_conversations(
            &self,
            _project_id: &str,
            _params: &ListConversationsParams,
        ) -> Result<JsonObject, UpstreamError> {
            Err(UpstreamError::client(404, json!({"detail": "Project not found"})))
        }

        async fn update_conversation(
            &self,
            _project_id: &str,
            _session_id: &str,
            _name: Option<&str>,
        ) -> Result<JsonObject, UpstreamError> {
            Ok(JsonObject::new())
        }

        async fn get_conversation_messages(
            &self,
            _project_id: &str,
            _session_id: &str,
            _params: &MessagesParams,
        ) -> Result<JsonObject, UpstreamError> {
            Ok(JsonObject::new())
        }
    }

    fn app() -> Router {
        api_router(ConversationAppState::new(Arc::new(NotFoundGateway)))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn upstream_404_is_reported_as_400_with_upstream_detail() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/v1/projects/x/conversations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"detail": {"detail": "Project not found"}})
        );
    }

    #[tokio::test]
    async fn chat_is_mounted_under_v1() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/v1/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({
                            "conversation_id": "c",
                            "messages": [{"role": "user", "content": "topic"}]
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["steps"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = app()
            .oneshot(Request::builder().uri("/v2/chat").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
