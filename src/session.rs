// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side session state.
//!
//! The login flag is a usability hint only: it decides which views the
//! route guard lets through, while every real check happens server-side.

use crate::db::{keys, KeyValueStorage, MemoryStorage, StorageError};
use crate::error::{ClientError, Result};
use crate::models::{Role, User};
use crate::services::UserApi;
use std::sync::{Arc, RwLock};

/// Persisted "logged in" flag.
#[derive(Clone)]
pub struct SessionFlagStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionFlagStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Flag store backed by process memory.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Read the flag. Only the stored literal `true` counts as logged in;
    /// missing, malformed or unreadable values read as `false`.
    pub fn get(&self) -> bool {
        match self.storage.get_item(keys::LOGGED_IN) {
            Ok(Some(value)) => value == "true",
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read login flag, assuming logged out");
                false
            }
        }
    }

    pub fn set(&self, flag: bool) -> std::result::Result<(), StorageError> {
        let value = if flag { "true" } else { "false" };
        self.storage.set_item(keys::LOGGED_IN, value)
    }

    pub fn clear(&self) -> std::result::Result<(), StorageError> {
        self.storage.remove_item(keys::LOGGED_IN)
    }
}

/// Session context handed to the route guard and the login flow.
///
/// Wraps the persisted flag together with the last profile seen, and can
/// be refreshed against the server with [`Session::check`].
pub struct Session {
    flags: SessionFlagStore,
    user: RwLock<Option<User>>,
}

impl Session {
    pub fn new(flags: SessionFlagStore) -> Self {
        Self {
            flags,
            user: RwLock::new(None),
        }
    }

    pub fn flags(&self) -> &SessionFlagStore {
        &self.flags
    }

    pub fn is_logged_in(&self) -> bool {
        self.flags.get()
    }

    /// Last profile seen by this session, if any.
    pub fn user(&self) -> Option<User> {
        self.user.read().ok().and_then(|user| user.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.user.read().ok().and_then(|user| user.as_ref().map(|u| u.role))
    }

    /// Record a completed login.
    pub fn mark_logged_in(&self, user: User) -> Result<()> {
        self.flags.set(true)?;
        self.set_user(Some(user));
        Ok(())
    }

    /// Forget the login (after logout or a rejected session).
    pub fn mark_logged_out(&self) -> Result<()> {
        self.flags.set(false)?;
        self.set_user(None);
        Ok(())
    }

    /// Remember the latest profile returned by the server.
    pub fn observe(&self, user: &User) {
        self.set_user(Some(user.clone()));
    }

    /// Remove the flag entirely and forget the profile (explicit logout).
    pub fn clear(&self) -> Result<()> {
        self.flags.clear()?;
        self.set_user(None);
        Ok(())
    }

    /// Ask the server whether the session cookie is still valid.
    ///
    /// A profile answer marks the session logged in; 401 and 403 mark it
    /// logged out. Other failures leave the flag untouched and are
    /// returned.
    pub async fn check(&self, users: &UserApi) -> Result<bool> {
        match users.refetch_user().await {
            Ok(response) => {
                let user = response.into_data()?.user;
                tracing::debug!(user_id = %user.user_id, "Session check succeeded");
                self.mark_logged_in(user)?;
                Ok(true)
            }
            Err(ClientError::Http { status, .. }) if status == 401 || status == 403 => {
                tracing::info!(status, "Session check rejected, marking logged out");
                self.mark_logged_out()?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn set_user(&self, user: Option<User>) {
        if let Ok(mut current) = self.user.write() {
            *current = user;
        }
    }
}
