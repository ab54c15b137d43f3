//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ConversationGateway` - the upstream conversation REST API

mod conversation_gateway;

pub use conversation_gateway::{
    ConversationGateway, JsonObject, ListConversationsParams, MessagesParams, SortOrder,
    UpstreamError,
};
