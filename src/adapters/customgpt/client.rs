//! CustomGPT client - reqwest implementation of [`ConversationGateway`].
//!
//! # Configuration
//!
//! ```ignore
//! let settings = Settings::load()?;
//! let client = CustomGptClient::new(&settings, Duration::from_secs(30))?;
//! let page = client.list_conversations("42", &ListConversationsParams::default()).await?;
//! ```
//!
//! # Error classification
//!
//! - 2xx: body decoded as a JSON object (empty body = empty object)
//! - 4xx: [`UpstreamError::Client`]
//! - 5xx: [`UpstreamError::Server`]
//! - transport failure, non-object or malformed body: [`UpstreamError::Generic`]

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use secrecy::{ExposeSecret, Secret};
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::Settings;
use crate::ports::{
    ConversationGateway, JsonObject, ListConversationsParams, MessagesParams, UpstreamError,
};

/// Whether the underlying connection pool belongs to this client.
///
/// `reqwest::Client` is a reference-counted handle, so nothing is torn down
/// explicitly either way: the pool is released when its last handle drops.
/// This flag only records which side holds that last handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Session {
    Owned,
    Shared,
}

/// HTTP client for the CustomGPT conversation endpoints.
pub struct CustomGptClient {
    http: Client,
    session: Session,
    api_key: Secret<String>,
    base_url: Url,
    timeout: Duration,
}

impl CustomGptClient {
    /// Creates a client with its own connection pool.
    pub fn new(settings: &Settings, timeout: Duration) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .build()
            .map_err(|e| UpstreamError::generic(format!("failed to create HTTP client: {}", e)))?;
        Self::build(settings, http, Session::Owned, timeout)
    }

    /// Creates a client on top of a caller-provided connection pool.
    ///
    /// The pool stays usable by its owner after this client is closed.
    pub fn with_http_client(
        settings: &Settings,
        http: Client,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        Self::build(settings, http, Session::Shared, timeout)
    }

    fn build(
        settings: &Settings,
        http: Client,
        session: Session,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(settings.api_base()).map_err(|e| {
            UpstreamError::generic(format!("invalid upstream base URL '{}': {}", settings.api_base(), e))
        })?;

        Ok(Self {
            http,
            session,
            api_key: Secret::new(settings.api_key().to_string()),
            base_url,
            timeout,
        })
    }

    /// True when this client created its own connection pool.
    pub fn owns_session(&self) -> bool {
        self.session == Session::Owned
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Release the client by dropping its pool handle.
    ///
    /// An owned pool is freed here because this was its only handle. A shared
    /// pool stays alive through the caller's clone.
    pub fn close(self) {
        tracing::debug!(owned = self.owns_session(), "closing CustomGPT client");
    }

    /// Builds an endpoint URL under the base URL, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                UpstreamError::generic(format!("base URL cannot carry a path: {}", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(self.api_key.expose_secret())
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
    }

    /// Sends a request and classifies the outcome.
    async fn send(&self, request: RequestBuilder) -> Result<JsonObject, UpstreamError> {
        let response = request.send().await.map_err(|e| {
            let err = self.transport_error(&e);
            tracing::warn!(error = %err, "upstream request failed");
            err
        })?;

        let status = response.status();
        let result = Self::handle_response(response).await;
        if let Err(ref err) = result {
            tracing::warn!(status = status.as_u16(), error = %err, "upstream returned an error");
        }
        result
    }

    fn transport_error(&self, e: &reqwest::Error) -> UpstreamError {
        if e.is_timeout() {
            UpstreamError::generic(format!(
                "upstream request timed out after {}s",
                self.timeout.as_secs_f32()
            ))
        } else if e.is_connect() {
            UpstreamError::generic(format!("connection to upstream failed: {}", e))
        } else {
            UpstreamError::generic(format!("upstream request failed: {}", e))
        }
    }

    async fn handle_response(response: Response) -> Result<JsonObject, UpstreamError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::generic(format!("failed to read upstream response: {}", e)))?;

        if status.is_success() {
            return decode_object(&body);
        }

        let detail = error_detail(&body);
        if status.is_client_error() {
            Err(UpstreamError::client(status.as_u16(), detail))
        } else if status.is_server_error() {
            Err(UpstreamError::server(status.as_u16(), detail))
        } else {
            Err(UpstreamError::generic(format!(
                "unexpected upstream status {}",
                status
            )))
        }
    }
}

/// Decodes a successful body. Empty bodies become an empty object.
fn decode_object(body: &[u8]) -> Result<JsonObject, UpstreamError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonObject::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(UpstreamError::generic("unexpected response type")),
        Err(e) => Err(UpstreamError::generic(format!(
            "malformed JSON in upstream response: {}",
            e
        ))),
    }
}

/// Upstream error body as JSON, wrapping plain text as `{"detail": text}`.
fn error_detail(body: &[u8]) -> Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| json!({ "detail": String::from_utf8_lossy(body) }))
}

#[async_trait]
impl ConversationGateway for CustomGptClient {
    async fn list_conversations(
        &self,
        project_id: &str,
        params: &ListConversationsParams,
    ) -> Result<JsonObject, UpstreamError> {
        let url = self.endpoint(&["projects", project_id, "conversations"])?;
        tracing::debug!(path = url.path(), "GET conversations");

        let request = self.request(Method::GET, url).query(&params.query_pairs());
        self.send(request).await
    }

    async fn update_conversation(
        &self,
        project_id: &str,
        session_id: &str,
        name: Option<&str>,
    ) -> Result<JsonObject, UpstreamError> {
        let url = self.endpoint(&["projects", project_id, "conversations", session_id])?;
        tracing::debug!(path = url.path(), "PUT conversation");

        let body = match name {
            Some(name) => json!({ "name": name }),
            None => json!({}),
        };
        let request = self.request(Method::PUT, url).json(&body);
        self.send(request).await
    }

    async fn get_conversation_messages(
        &self,
        project_id: &str,
        session_id: &str,
        params: &MessagesParams,
    ) -> Result<JsonObject, UpstreamError> {
        let url = self.endpoint(&[
            "projects",
            project_id,
            "conversations",
            session_id,
            "messages",
        ])?;
        tracing::debug!(path = url.path(), "GET conversation messages");

        let request = self.request(Method::GET, url).query(&params.query_pairs());
        self.send(request).await
    }
}
