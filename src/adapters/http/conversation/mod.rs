//! HTTP adapter for conversation endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ListConversationsQuery, MessagesQuery, UpdateConversationRequest, UpdateConversationResponse};
pub use handlers::ConversationAppState;
pub use routes::conversation_routes;
