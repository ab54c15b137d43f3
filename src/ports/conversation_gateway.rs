//! Conversation Gateway Port - Interface to the upstream conversation API.
//!
//! The relay never stores conversations. Project and session identifiers are
//! passed straight through into upstream paths, and upstream JSON objects are
//! returned to callers as-is.
//!
//! # Example
//!
//! ```ignore
//! let params = ListConversationsParams::default().with_page(2);
//! let page = gateway.list_conversations("proj-1", &params).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// JSON object returned by the upstream API.
pub type JsonObject = serde_json::Map<String, Value>;

/// Port for the upstream conversation REST API.
#[async_trait]
pub trait ConversationGateway: Send + Sync {
    /// `GET /projects/{project_id}/conversations`
    async fn list_conversations(
        &self,
        project_id: &str,
        params: &ListConversationsParams,
    ) -> Result<JsonObject, UpstreamError>;

    /// `PUT /projects/{project_id}/conversations/{session_id}`
    ///
    /// Sends `{"name": name}` when a name is given, `{}` otherwise.
    async fn update_conversation(
        &self,
        project_id: &str,
        session_id: &str,
        name: Option<&str>,
    ) -> Result<JsonObject, UpstreamError>;

    /// `GET /projects/{project_id}/conversations/{session_id}/messages`
    async fn get_conversation_messages(
        &self,
        project_id: &str,
        session_id: &str,
        params: &MessagesParams,
    ) -> Result<JsonObject, UpstreamError>;
}

/// Sort direction accepted by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters for listing conversations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConversationsParams {
    pub page: u32,
    pub order: SortOrder,
    pub order_by: String,
    pub user_filter: String,
    /// Name filter; omitted from the query when `None`.
    pub name: Option<String>,
}

impl ListConversationsParams {
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Query pairs in the order the upstream API documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("order", self.order.to_string()),
            ("order_by", self.order_by.clone()),
            ("user_filter", self.user_filter.clone()),
        ];
        if let Some(ref name) = self.name {
            pairs.push(("name", name.clone()));
        }
        pairs
    }
}

impl Default for ListConversationsParams {
    fn default() -> Self {
        Self {
            page: 1,
            order: SortOrder::Desc,
            order_by: "id".to_string(),
            user_filter: "all".to_string(),
            name: None,
        }
    }
}

/// Query parameters for fetching conversation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessagesParams {
    pub page: u32,
    pub order: SortOrder,
}

impl MessagesParams {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("page", self.page.to_string()), ("order", self.order.to_string())]
    }
}

impl Default for MessagesParams {
    fn default() -> Self {
        Self {
            page: 1,
            order: SortOrder::Desc,
        }
    }
}

/// Upstream API errors.
///
/// Every failure is classified exactly once into one of three kinds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpstreamError {
    /// Upstream answered 4xx.
    #[error("upstream rejected the request with status {status}")]
    Client {
        status: u16,
        /// Upstream body: parsed JSON, or `{"detail": text}`.
        detail: Value,
    },

    /// Upstream answered 5xx.
    #[error("upstream failed with status {status}")]
    Server { status: u16, detail: Value },

    /// Transport failure, malformed response, or invalid local argument.
    #[error("{0}")]
    Generic(String),
}

impl UpstreamError {
    pub fn client(status: u16, detail: Value) -> Self {
        Self::Client { status, detail }
    }

    pub fn server(status: u16, detail: Value) -> Self {
        Self::Server { status, detail }
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic(message.into())
    }

    /// Upstream HTTP status, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Client { status, .. } | UpstreamError::Server { status, .. } => {
                Some(*status)
            }
            UpstreamError::Generic(_) => None,
        }
    }

    /// Returns true if the caller may reasonably retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, UpstreamError::Server { .. })
    }
}
