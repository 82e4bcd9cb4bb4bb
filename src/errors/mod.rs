//! Error handling module for the clubdesk client.
//!
//! Classifies server responses and transport failures into one error type that
//! resource clients store in their error cells.

use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::routes::Route;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const HTTP_ERROR: &str = "HTTP_ERROR";
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const INVALID_KEY: &str = "INVALID_KEY";
}

/// Per-field validation messages returned by the server on a rejected write.
///
/// Wire shape: `{"message": "...", "errors": {"title": ["..."], "text": []}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Messages attached to `field`, empty when the field was accepted.
    pub fn field(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when no field carries a message.
    pub fn is_empty(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }

    /// Iterate over fields that carry at least one message.
    pub fn failing_fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

/// Client error type.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Write rejected with structured per-field messages, usually a 422
    Validation { status: u16, errors: ValidationErrors },
    /// 401, no or expired session
    Unauthenticated(String),
    /// 403, session lacks the required role
    Forbidden(String),
    /// 404
    NotFound(String),
    /// Any other non-2xx status
    Status { status: u16, message: String },
    /// Connection, DNS or TLS failure; no response body
    Transport(String),
    /// Response body could not be decoded
    Decode(String),
    /// Invalid configuration
    Config(String),
    /// Record key that cannot be addressed; nothing was sent
    InvalidKey(String),
}

impl ClientError {
    /// Classify a non-2xx response from its status code and raw body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let json: Option<serde_json::Value> = serde_json::from_slice(body).ok();
        let message = json
            .as_ref()
            .and_then(|v| v.get("message").or_else(|| v.get("error")))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| {
                StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Request failed")
                    .to_string()
            });

        match status {
            401 => ClientError::Unauthenticated(message),
            403 => ClientError::Forbidden(message),
            404 => ClientError::NotFound(message),
            400..=499 => {
                let validation = json
                    .filter(|v| v.get("errors").is_some_and(|e| e.is_object()))
                    .and_then(|v| serde_json::from_value::<ValidationErrors>(v).ok());
                match validation {
                    Some(errors) => ClientError::Validation { status, errors },
                    None => ClientError::Status { status, message },
                }
            }
            _ => ClientError::Status { status, message },
        }
    }

    /// Get the HTTP status code for this error, if a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Validation { status, .. } => Some(*status),
            ClientError::Unauthenticated(_) => Some(401),
            ClientError::Forbidden(_) => Some(403),
            ClientError::NotFound(_) => Some(404),
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(_)
            | ClientError::Decode(_)
            | ClientError::Config(_)
            | ClientError::InvalidKey(_) => None,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Validation { .. } => codes::VALIDATION_ERROR,
            ClientError::Unauthenticated(_) => codes::UNAUTHENTICATED,
            ClientError::Forbidden(_) => codes::FORBIDDEN,
            ClientError::NotFound(_) => codes::NOT_FOUND,
            ClientError::Status { .. } => codes::HTTP_ERROR,
            ClientError::Transport(_) => codes::TRANSPORT_ERROR,
            ClientError::Decode(_) => codes::DECODE_ERROR,
            ClientError::Config(_) => codes::CONFIG_ERROR,
            ClientError::InvalidKey(_) => codes::INVALID_KEY,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            ClientError::Validation { errors, .. } => errors
                .message
                .clone()
                .unwrap_or_else(|| "The given data was invalid".to_string()),
            ClientError::Unauthenticated(msg) => msg.clone(),
            ClientError::Forbidden(msg) => msg.clone(),
            ClientError::NotFound(msg) => msg.clone(),
            ClientError::Status { message, .. } => message.clone(),
            ClientError::Transport(msg) => msg.clone(),
            ClientError::Decode(msg) => msg.clone(),
            ClientError::Config(msg) => msg.clone(),
            ClientError::InvalidKey(msg) => msg.clone(),
        }
    }

    /// Structured field errors, if this is a validation failure.
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            ClientError::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// View the router should switch to for this error.
    pub fn redirect(&self) -> Option<Route> {
        match self {
            ClientError::Unauthenticated(_) => Some(Route::Login),
            ClientError::Forbidden(_) => Some(Route::PermissionDenied),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code() {
            Some(status) => write!(f, "{} ({}): {}", self.error_code(), status, self.message()),
            None => write!(f, "{}: {}", self.error_code(), self.message()),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP error: {:?}", err);
        if err.is_decode() {
            ClientError::Decode(format!("Decode error: {}", err))
        } else {
            ClientError::Transport(format!("Transport error: {}", err))
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        ClientError::Decode(format!("JSON error: {}", err))
    }
}
