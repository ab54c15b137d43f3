//! HTTP handlers for conversation endpoints.
//!
//! These handlers validate the request, delegate to the conversation gateway
//! and pass the upstream JSON back unchanged.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::ports::ConversationGateway;

use super::dto::{
    require_non_empty, ListConversationsQuery, MessagesQuery, UpdateConversationRequest,
    UpdateConversationResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for conversation handlers.
#[derive(Clone)]
pub struct ConversationAppState {
    pub gateway: Arc<dyn ConversationGateway>,
}

impl ConversationAppState {
    pub fn new(gateway: Arc<dyn ConversationGateway>) -> Self {
        Self { gateway }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// GET /v1/projects/{project_id}/conversations
// ════════════════════════════════════════════════════════════════════════════════

/// GET /v1/projects/{project_id}/conversations - List a page of conversations.
///
/// # Query Parameters
/// - `page` (default 1, at least 1)
/// - `order`: `asc` | `desc` (default `desc`)
/// - `order_by` (default `id`), `user_filter` (default `all`), `name` (optional)
///
/// # Errors
/// - 400: invalid parameters, or upstream 4xx
/// - 502: upstream 5xx
/// - 500: transport failure or malformed upstream response
pub async fn list_conversations(
    State(state): State<ConversationAppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<ListConversationsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(project_id) = path?;
    let Query(query) = query?;
    require_non_empty("project_id", &project_id)?;
    let params = query.into_params()?;

    let body = state
        .gateway
        .list_conversations(&project_id, &params)
        .await?;

    Ok((StatusCode::OK, Json(body)))
}

// ════════════════════════════════════════════════════════════════════════════════
// PUT /v1/projects/{project_id}/conversations/{session_id}
// ════════════════════════════════════════════════════════════════════════════════

/// PUT /v1/projects/{project_id}/conversations/{session_id} - Rename a conversation.
///
/// Returns `{"detail": ..., "data": ...}` on success.
pub async fn update_conversation(
    State(state): State<ConversationAppState>,
    path: Result<Path<(String, String)>, PathRejection>,
    body: Result<Json<UpdateConversationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path((project_id, session_id)) = path?;
    let Json(request) = body?;
    require_non_empty("project_id", &project_id)?;
    require_non_empty("session_id", &session_id)?;

    let body = state
        .gateway
        .update_conversation(&project_id, &session_id, request.name.as_deref())
        .await?;

    tracing::info!(%project_id, %session_id, "conversation updated");
    Ok((StatusCode::OK, Json(UpdateConversationResponse::from_upstream(body))))
}

// ════════════════════════════════════════════════════════════════════════════════
// GET /v1/projects/{project_id}/conversations/{session_id}/messages
// ════════════════════════════════════════════════════════════════════════════════

/// GET /v1/projects/{project_id}/conversations/{session_id}/messages - Page of messages.
pub async fn get_conversation_messages(
    State(state): State<ConversationAppState>,
    path: Result<Path<(String, String)>, PathRejection>,
    query: Result<Query<MessagesQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path((project_id, session_id)) = path?;
    let Query(query) = query?;
    require_non_empty("project_id", &project_id)?;
    require_non_empty("session_id", &session_id)?;
    let params = query.into_params()?;

    let body = state
        .gateway
        .get_conversation_messages(&project_id, &session_id, &params)
        .await?;

    Ok((StatusCode::OK, Json(body)))
}
