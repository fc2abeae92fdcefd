// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local storage layer.

pub mod storage;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};

/// Storage keys as constants.
pub mod keys {
    /// Cached login flag (JSON boolean)
    pub const LOGGED_IN: &str = "[KEY] LOGGEDIN";
}
