//! Typed create-user payload
//!
//! The body is validated once at the boundary; a missing or mistyped field
//! is a structured parse error, never a crash inside the handler.

use serde::Deserialize;
use thiserror::Error;

/// Payload for `POST /users`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum BodyError {
    /// The request carried no body (absent or blank).
    #[error("Missing request body")]
    Missing,

    /// The body was present but not a valid payload; the message is
    /// serde_json's diagnostic (names the missing/mistyped field).
    #[error("invalid request body: {0}")]
    Malformed(String),
}

impl CreateUser {
    pub fn parse(body: Option<&str>) -> Result<Self, BodyError> {
        let raw = body.filter(|b| !b.trim().is_empty()).ok_or(BodyError::Missing)?;
        serde_json::from_str(raw).map_err(|err| BodyError::Malformed(err.to_string()))
    }
}
