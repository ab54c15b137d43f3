//! HTTP DTOs for the chat relay endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::chat::{ChatMessage, ChatStep};
use crate::ports::JsonObject;

/// Body of `POST /v1/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub conversation_id: String,
    pub messages: Vec<ChatMessage>,
    /// Opaque caller context; accepted but not interpreted.
    #[serde(default)]
    pub context: Option<JsonObject>,
}

/// Successful chat relay response.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub conversation_id: String,
    pub reply: String,
    pub steps: Vec<ChatStep>,
}
