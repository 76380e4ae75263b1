//! Standardized API response envelope.
//!
//! Success responses carry `{status: true, data}` or `{status: true, msg}`;
//! expected failures carry `{status: false, msg}`; unexpected failures carry
//! `{status: false, error}` with the underlying error text.

use serde::{Deserialize, Serialize};

/// Standard successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: true,
            data: Some(data),
            msg: None,
        }
    }

    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            status: true,
            data: None,
            msg: Some(message.into()),
        }
    }
}

/// Error payload for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: bool,

    /// A human-readable explanation of an expected failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    /// The raw error text of an unexpected failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            status: false,
            msg: Some(msg.into()),
            error: None,
        }
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self {
            status: false,
            msg: None,
            error: Some(error.into()),
        }
    }
}
