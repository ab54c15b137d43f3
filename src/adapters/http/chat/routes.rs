//! Axum routes for the chat relay endpoint.

use axum::routing::post;
use axum::Router;

use super::handlers::chat;

/// Creates the chat route (mounted under `/v1`):
/// - `POST /chat`
pub fn chat_routes() -> Router {
    Router::new().route("/chat", post(chat))
}
