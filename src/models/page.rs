// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generic pagination envelope.

use serde::{Deserialize, Serialize};

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index
    pub number: u32,
    /// Requested page size
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// One-based index range of the items on this page, `None` when empty.
    pub fn item_range(&self) -> Option<(u64, u64)> {
        if self.is_empty() {
            return None;
        }
        let first = u64::from(self.number) * u64::from(self.size) + 1;
        let last = first + self.content.len() as u64 - 1;
        Some((first, last))
    }

    /// "Showing a - b of n results", `None` when the page is empty.
    pub fn summary(&self) -> Option<String> {
        self.item_range().map(|(first, last)| {
            format!(
                "Showing {} - {} of {} results",
                first, last, self.total_elements
            )
        })
    }

    /// Check the structural invariants of a page returned by the server.
    pub fn is_consistent(&self) -> bool {
        self.content.len() <= self.size as usize
            && (self.is_empty() || self.number < self.total_pages)
    }
}
