//! HTTP-shaped request and response events
//!
//! Field names follow the API-gateway wire shape (`httpMethod`, `statusCode`)
//! so events round-trip through JSON unchanged.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Inbound request event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    pub http_method: String,
    pub path: String,
    /// Raw request body; `None` when the transport delivered no body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(http_method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            path: path.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Outbound response event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    /// JSON-encoded body.
    pub body: String,
}

impl ApiResponse {
    /// Build a JSON response. Every response carries `Content-Type: application/json`.
    pub fn json(status_code: u16, body: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_wire_field_names() {
        let req: ApiRequest =
            serde_json::from_str(r#"{"httpMethod":"GET","path":"/users"}"#).unwrap();
        assert_eq!(req.http_method, "GET");
        assert_eq!(req.path, "/users");
        assert!(req.body.is_none());
    }

    #[test]
    fn response_uses_wire_field_names() {
        let resp = ApiResponse::json(200, &json!({"ok": true}));
        let wire = serde_json::to_value(&resp).unwrap();
        assert_eq!(wire["statusCode"], 200);
        assert_eq!(wire["headers"]["Content-Type"], "application/json");
    }

    #[test]
    fn json_response_sets_content_type() {
        let resp = ApiResponse::json(404, &json!({"error": "nope"}));
        assert_eq!(resp.status_code, 404);
        assert_eq!(
            resp.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }
}
