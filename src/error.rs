//! Error types for the BaseSpace client layer
//!
//! The property model itself never fails: a missing or wrong-shaped value is
//! `None`. Errors here describe what happens *around* it: a remote call that
//! came back with an error status, or a body that could not be decoded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the client layer
#[derive(Error, Debug)]
pub enum BaseSpaceError {
    #[error("BaseSpace API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        /// Structured status block from the error body, when the server sent one
        response_status: Option<ResponseStatus>,
        /// Error body as JSON, when it parsed
        body: Option<serde_json::Value>,
    },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Response envelope has no Response payload")]
    MissingResponse,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BaseSpaceError {
    /// Classify a failed call from its status code and raw body.
    ///
    /// A body that is not JSON is not an error of its own; it only means
    /// `body` and `response_status` stay empty.
    pub fn from_response(status: u16, body: &str) -> Self {
        let body: Option<serde_json::Value> = serde_json::from_str(body).ok();
        let response_status = body
            .as_ref()
            .and_then(|b| b.get("ResponseStatus"))
            .and_then(|rs| serde_json::from_value::<ResponseStatus>(rs.clone()).ok());

        let message = response_status
            .as_ref()
            .and_then(|rs| rs.message.clone().or_else(|| rs.error_code.clone()))
            .unwrap_or_else(|| default_reason(status).to_string());

        Self::Api {
            status,
            message,
            response_status,
            body,
        }
    }

    /// HTTP status of a failed remote call
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server error code (e.g. `BASESPACE.NOT_FOUND`) if the body carried one
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Api {
                response_status: Some(rs),
                ..
            } => rs.error_code.as_deref(),
            _ => None,
        }
    }
}

fn default_reason(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Request failed",
    }
}

/// Status block returned alongside every response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseStatus {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ResponseError>,
    #[serde(default)]
    pub stack_trace: Option<String>,
}

/// Field-level error inside a [`ResponseStatus`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseError {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

pub type Result<T> = std::result::Result<T, BaseSpaceError>;
