// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Document list paging.

use crate::error::Result;
use crate::models::{Document, Page, Query, UploadFile, PAGE_SIZES};
use crate::services::DocumentApi;
use std::ops::Range;

impl Query {
    /// Previous page. Saturates at the first page.
    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn go_to(&mut self, page: u32) {
        self.page = page;
    }

    /// Change the page size; back to the first page. Zero is ignored.
    pub fn set_size(&mut self, size: u32) {
        if size == 0 {
            return;
        }
        self.size = size;
        self.page = 0;
    }

    /// Change the name filter; back to the first page.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.page = 0;
    }
}

/// Pager control: query state plus the page count of the last result.
///
/// Clicks on disabled controls are ignored; the raw [`Query`] operations
/// are not guarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pager {
    query: Query,
    total_pages: u32,
}

impl Pager {
    pub fn new(query: Query) -> Self {
        Self {
            query,
            total_pages: 0,
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Record the page count of the latest result.
    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages;
    }

    pub fn can_go_back(&self) -> bool {
        self.query.page > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.query.page.saturating_add(1) < self.total_pages
    }

    /// Page links, zero-based.
    pub fn page_numbers(&self) -> Range<u32> {
        0..self.total_pages
    }

    /// Whether the pager is shown at all.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    pub fn click_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.query.previous_page();
        true
    }

    pub fn click_forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.query.next_page();
        true
    }

    pub fn click_page(&mut self, page: u32) -> bool {
        if page >= self.total_pages || page == self.query.page {
            return false;
        }
        self.query.go_to(page);
        true
    }

    /// Select a page size from the offered choices.
    pub fn select_size(&mut self, size: u32) -> bool {
        if !PAGE_SIZES.contains(&size) {
            return false;
        }
        self.query.set_size(size);
        true
    }

    pub fn search(&mut self, name: impl Into<String>) {
        self.query.set_name(name);
    }
}

/// Document list view: pager plus the latest page of results.
pub struct DocumentBrowser {
    documents: DocumentApi,
    pager: Pager,
    page: Option<Page<Document>>,
}

impl DocumentBrowser {
    pub fn new(documents: DocumentApi) -> Self {
        Self {
            documents,
            pager: Pager::default(),
            page: None,
        }
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    pub fn page(&self) -> Option<&Page<Document>> {
        self.page.as_ref()
    }

    /// Load the page for the current query.
    pub async fn load(&mut self) -> Result<&Page<Document>> {
        let response = self.documents.fetch_documents(self.pager.query()).await?;
        let page = response.into_data()?.documents;

        if !page.is_consistent() {
            tracing::warn!(
                number = page.number,
                size = page.size,
                total_pages = page.total_pages,
                len = page.content.len(),
                "Inconsistent page from server"
            );
        }

        self.pager.set_total_pages(page.total_pages);
        Ok(&*self.page.insert(page))
    }

    /// Upload files and reload the current page.
    pub async fn upload(&mut self, files: Vec<UploadFile>) -> Result<Vec<Document>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }
        let uploaded = self.documents.upload_documents(files).await?;
        let uploaded = uploaded.into_data()?.documents;
        self.load().await?;
        Ok(uploaded)
    }

    /// "Showing a - b of n results" for the loaded page.
    pub fn summary(&self) -> Option<String> {
        self.page.as_ref().and_then(Page::summary)
    }
}
