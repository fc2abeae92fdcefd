// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Document API client.

use crate::error::Result;
use crate::models::{DocumentData, DocumentForm, DocumentList, DocumentPage, Query, Response, UploadFile};
use crate::services::endpoints::{Mutation, QueryKind};
use crate::services::http::PortalHttp;

/// Path of the document API below the portal base URL.
pub const DOCUMENT_PATH: &str = "/documents";

/// Document API client.
#[derive(Clone)]
pub struct DocumentApi {
    http: PortalHttp,
    base_url: String,
}

impl DocumentApi {
    pub fn new(http: PortalHttp, api_url: &str) -> Self {
        Self {
            http,
            base_url: format!("{}{}", api_url.trim_end_matches('/'), DOCUMENT_PATH),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Search documents by name, one page at a time (tag `Documents`).
    pub async fn fetch_documents(&self, query: &Query) -> Result<Response<DocumentPage>> {
        let request = self
            .http
            .client()
            .get(self.url("/search"))
            .query(&[
                ("page", query.page.to_string()),
                ("size", query.size.to_string()),
                ("name", query.name.clone()),
            ]);
        self.http
            .query(QueryKind::FetchDocuments, query, request)
            .await
    }

    /// One document's details (tag `Documents`).
    pub async fn fetch_document(&self, document_id: &str) -> Result<Response<DocumentData>> {
        let url = self.url(&format!("/{}", urlencoding::encode(document_id)));
        let request = self.http.client().get(url);
        self.http
            .query(QueryKind::FetchDocument, document_id, request)
            .await
    }

    /// Upload files as one multipart request (`files` parts).
    pub async fn upload_documents(&self, files: Vec<UploadFile>) -> Result<Response<DocumentList>> {
        let count = files.len();
        let form = files
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, file| {
                let part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.name);
                form.part("files", part)
            });

        tracing::info!(count, "Uploading documents");
        let request = self.http.client().post(self.url("/upload")).multipart(form);
        self.http.mutate(Mutation::UploadDocuments, request).await
    }

    /// Update a document's name and description.
    pub async fn update_document(&self, document: &DocumentForm) -> Result<Response<DocumentData>> {
        let request = self.http.client().patch(&self.base_url).json(document);
        self.http.mutate(Mutation::UpdateDocument, request).await
    }

    /// Raw file contents.
    pub async fn download_document(&self, document_name: &str) -> Result<Vec<u8>> {
        let url = self.url(&format!("/download/{}", urlencoding::encode(document_name)));
        let request = self.http.client().get(url);
        self.http
            .mutate_bytes(Mutation::DownloadDocument, request)
            .await
    }
}
