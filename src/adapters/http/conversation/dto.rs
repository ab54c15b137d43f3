//! HTTP DTOs for conversation endpoints.
//!
//! These types decouple the HTTP API from the gateway parameter types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapters::http::error::ApiError;
use crate::ports::{JsonObject, ListConversationsParams, MessagesParams, SortOrder};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query parameters for `GET /v1/projects/{id}/conversations`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListConversationsQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub order: SortOrder,
    #[serde(default = "default_order_by")]
    pub order_by: String,
    #[serde(default = "default_user_filter")]
    pub user_filter: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl ListConversationsQuery {
    /// Validate and convert into gateway parameters.
    pub fn into_params(self) -> Result<ListConversationsParams, ApiError> {
        validate_page(self.page)?;
        require_non_empty("order_by", &self.order_by)?;
        require_non_empty("user_filter", &self.user_filter)?;
        if let Some(ref name) = self.name {
            require_non_empty("name", name)?;
        }

        Ok(ListConversationsParams {
            page: self.page,
            order: self.order,
            order_by: self.order_by,
            user_filter: self.user_filter,
            name: self.name,
        })
    }
}

/// Query parameters for `GET .../conversations/{session_id}/messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub order: SortOrder,
}

impl MessagesQuery {
    pub fn into_params(self) -> Result<MessagesParams, ApiError> {
        validate_page(self.page)?;
        Ok(MessagesParams {
            page: self.page,
            order: self.order,
        })
    }
}

/// Body of `PUT /v1/projects/{id}/conversations/{session_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateConversationRequest {
    #[serde(default)]
    pub name: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_order_by() -> String {
    "id".to_string()
}

fn default_user_filter() -> String {
    "all".to_string()
}

fn validate_page(page: u32) -> Result<(), ApiError> {
    if page < 1 {
        return Err(ApiError::bad_request("page must be at least 1"));
    }
    Ok(())
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{} must not be empty", field)));
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response of a successful conversation update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateConversationResponse {
    pub detail: String,
    pub data: Option<Value>,
}

impl UpdateConversationResponse {
    /// Wraps the upstream body. An upstream `data` field is unwrapped; an
    /// empty body becomes `null`.
    pub fn from_upstream(mut body: JsonObject) -> Self {
        let data = match body.remove("data") {
            Some(data) => Some(data),
            None if body.is_empty() => None,
            None => Some(Value::Object(body)),
        };

        Self {
            detail: "Conversation updated successfully".to_string(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list_query(json: Value) -> ListConversationsQuery {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn list_query_defaults() {
        let params = list_query(json!({})).into_params().unwrap();
        assert_eq!(params, ListConversationsParams::default());
    }

    #[test]
    fn list_query_rejects_page_zero() {
        assert!(list_query(json!({"page": 0})).into_params().is_err());
    }

    #[test]
    fn list_query_rejects_empty_strings() {
        assert!(list_query(json!({"order_by": ""})).into_params().is_err());
        assert!(list_query(json!({"user_filter": " "})).into_params().is_err());
        assert!(list_query(json!({"name": ""})).into_params().is_err());
    }

    #[test]
    fn list_query_rejects_unknown_order() {
        let result: Result<ListConversationsQuery, _> =
            serde_json::from_value(json!({"order": "sideways"}));
        assert!(result.is_err());
    }

    #[test]
    fn messages_query_rejects_page_zero() {
        let query: MessagesQuery = serde_json::from_value(json!({"page": 0})).unwrap();
        assert!(query.into_params().is_err());
    }

    #[test]
    fn update_request_accepts_null_name() {
        let req: UpdateConversationRequest =
            serde_json::from_value(json!({"name": null})).unwrap();
        assert!(req.name.is_none());
    }

    #[test]
    fn update_response_unwraps_data_field() {
        let body = json!({"status": "success", "data": {"id": 7}});
        let response = UpdateConversationResponse::from_upstream(
            body.as_object().unwrap().clone(),
        );
        assert_eq!(response.data, Some(json!({"id": 7})));
    }

    #[test]
    fn update_response_passes_whole_body_without_data_field() {
        let body = json!({"status": "ok"});
        let response = UpdateConversationResponse::from_upstream(
            body.as_object().unwrap().clone(),
        );
        assert_eq!(response.data, Some(json!({"status": "ok"})));
    }

    #[test]
    fn update_response_empty_body_is_null() {
        let response = UpdateConversationResponse::from_upstream(JsonObject::new());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"], Value::Null);
        assert_eq!(json["detail"], "Conversation updated successfully");
    }
}
