// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types with consistent user-facing messages.

use crate::models::{NoData, Response};

/// Error returned by every portal operation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Non-2xx answer from the portal. `data` holds the envelope when the
    /// body could be parsed as one.
    #[error("HTTP error {status}")]
    Http {
        status: u16,
        data: Option<Box<Response<NoData>>>,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Response has no data")]
    MissingData,

    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::db::StorageError),
}

impl ClientError {
    /// Message shown when an error carries no server envelope.
    pub const GENERIC_MESSAGE: &'static str = "An error occurred";

    /// Message the server uses when the session cookie is gone.
    pub const NOT_LOGGED_IN_MESSAGE: &'static str = "You are not logged in";

    /// Text to show the user for this error.
    ///
    /// Server envelopes are shown verbatim; everything else collapses to
    /// the generic message.
    pub fn display_message(&self) -> &str {
        match self {
            ClientError::Http {
                data: Some(data), ..
            } => &data.message,
            _ => Self::GENERIC_MESSAGE,
        }
    }

    /// HTTP status code, if the error came from an HTTP response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check whether the server rejected the request because the session
    /// has ended.
    pub fn is_not_logged_in(&self) -> bool {
        match self {
            ClientError::Http {
                data: Some(data), ..
            } => {
                data.code == 401
                    && data.status.is_text("UNAUTHORIZED")
                    && data.message == Self::NOT_LOGGED_IN_MESSAGE
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

/// Result type alias for portal operations
pub type Result<T> = std::result::Result<T, ClientError>;
