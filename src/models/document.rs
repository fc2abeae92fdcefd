// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Document model, search query and document request bodies.

use crate::models::Page;
use serde::{Deserialize, Serialize};

/// Document metadata as returned by the portal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub id: u64,
    /// Public document identifier (UUID)
    pub document_id: String,
    pub name: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub description: String,
    pub uri: String,
    /// Size in bytes
    pub size: u64,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub formatted_size: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub icon: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub extension: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub reference_id: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub owner_name: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub owner_email: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub owner_phone: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub owner_last_login: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub updater_name: String,
}

/// `data` of the document search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPage {
    pub documents: Page<Document>,
}

/// `data` of the upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// `data` of endpoints returning a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentData {
    pub document: Document,
}

/// Editable document fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentForm {
    pub document_id: String,
    pub name: String,
    pub description: String,
}

/// A file selected for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZES: [u32; 4] = [4, 6, 10, 20];

/// Document search query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    /// Zero-based page index
    pub page: u32,
    /// Page size, always > 0
    pub size: u32,
    /// Name filter
    pub name: String,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            page: 0,
            size: PAGE_SIZES[0],
            name: String::new(),
        }
    }
}
