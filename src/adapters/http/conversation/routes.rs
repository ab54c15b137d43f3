//! Axum routes for conversation endpoints.

use axum::routing::{get, put};
use axum::Router;

use super::handlers::{
    get_conversation_messages, list_conversations, update_conversation, ConversationAppState,
};

/// Creates routes for conversation endpoints.
///
/// Routes (mounted under `/v1`):
/// - `GET /projects/:project_id/conversations`
/// - `PUT /projects/:project_id/conversations/:session_id`
/// - `GET /projects/:project_id/conversations/:session_id/messages`
pub fn conversation_routes() -> Router<ConversationAppState> {
    Router::new()
        .route("/projects/:project_id/conversations", get(list_conversations))
        .route(
            "/projects/:project_id/conversations/:session_id",
            put(update_conversation),
        )
        .route(
            "/projects/:project_id/conversations/:session_id/messages",
            get(get_conversation_messages),
        )
}
