//! HTTP handler for the chat relay endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::ApiError;
use crate::domain::chat::{extract_user_text, latest_user_message, run_pipeline};

use super::dto::{ChatRequest, ChatResponse};

/// Detail returned when a chat request carries no user-role message.
pub const NO_USER_MESSAGE: &str = "At least one user message is required";

/// Detail returned when a chat request has an empty message list.
pub const EMPTY_MESSAGES: &str = "messages must not be empty";

/// POST /v1/chat - Relay the latest user message through the agent pipeline.
///
/// # Responses
/// - 200: reply plus one step per pipeline stage
/// - 204: the envelope carried no user text
/// - 400: empty message list, or no user message
pub async fn chat(payload: Result<Json<ChatRequest>, JsonRejection>) -> Result<Response, ApiError> {
    let Json(request) = payload?;

    if request.messages.is_empty() {
        return Err(ApiError::bad_request(EMPTY_MESSAGES));
    }
    let latest = latest_user_message(&request.messages)
        .ok_or_else(|| ApiError::bad_request(NO_USER_MESSAGE))?;

    let text = extract_user_text(&latest.content);
    if text.is_empty() {
        tracing::debug!(conversation_id = %request.conversation_id, "empty envelope, nothing to relay");
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let run = run_pipeline(&text);
    tracing::info!(
        conversation_id = %request.conversation_id,
        steps = run.steps.len(),
        "chat relayed"
    );

    let response = ChatResponse {
        conversation_id: request.conversation_id,
        reply: run.reply(),
        steps: run.steps,
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}
