// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Response envelope shared by every portal endpoint.

use crate::error::{ClientError, Result};
use crate::time_utils::parse_portal_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope wrapping every API payload.
///
/// Errors reuse the same shape with `data` absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    /// Server time of the response
    pub time: String,
    /// Numeric HTTP code echoed by the server
    pub code: u16,
    /// Request path
    pub path: String,
    /// Status reason, text (e.g. "OK") or numeric
    pub status: ResponseStatus,
    /// Human readable message
    pub message: String,
    /// Endpoint-specific payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Response<T> {
    /// Borrow the payload, failing if the server sent none.
    pub fn data(&self) -> Result<&T> {
        self.data.as_ref().ok_or(ClientError::MissingData)
    }

    /// Take the payload, failing if the server sent none.
    pub fn into_data(self) -> Result<T> {
        self.data.ok_or(ClientError::MissingData)
    }

    /// Parsed `time` field.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_portal_timestamp(&self.time)
    }
}

/// Payload of endpoints whose `data` carries nothing of interest
/// (commonly `{}`).
pub type NoData = serde_json::Value;

/// The envelope `status` is sent either as a reason phrase or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseStatus {
    Code(u16),
    Text(String),
}

impl ResponseStatus {
    /// Case-sensitive comparison against a textual status.
    pub fn is_text(&self, expected: &str) -> bool {
        matches!(self, ResponseStatus::Text(text) if text == expected)
    }
}
