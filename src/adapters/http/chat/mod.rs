//! HTTP adapter for the chat relay endpoint.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ChatRequest, ChatResponse};
pub use routes::chat_routes;
