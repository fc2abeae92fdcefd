// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Docportal: client for a document and user management portal
//!
//! This crate provides the request layer of the portal client: typed API
//! calls, the tag-based query cache, the local login flag and the route
//! guard built on it.

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod login;
pub mod middleware;
pub mod models;
pub mod notify;
pub mod pagination;
pub mod routes;
pub mod services;
pub mod session;
pub mod time_utils;

use config::Config;
use db::KeyValueStorage;
use login::LoginFlow;
use middleware::Navigator;
use notify::Notifier;
use pagination::DocumentBrowser;
use services::PortalClient;
use session::{Session, SessionFlagStore};
use std::sync::Arc;

/// Shared client state.
pub struct Portal {
    pub config: Config,
    pub session: Arc<Session>,
    pub client: PortalClient,
    pub notifier: Arc<dyn Notifier>,
}

impl Portal {
    pub fn new(
        config: Config,
        storage: Arc<dyn KeyValueStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> error::Result<Self> {
        let session = Arc::new(Session::new(SessionFlagStore::new(storage)));
        let client = PortalClient::from_config(&config, session.clone(), notifier.clone())?;
        Ok(Self {
            config,
            session,
            client,
            notifier,
        })
    }

    /// Start a login flow returning to `from` when done.
    pub fn login(&self, from: Option<String>) -> LoginFlow {
        LoginFlow::new(self.client.users().clone(), self.session.clone(), from)
    }

    pub fn navigator(&self) -> Navigator {
        Navigator::new(self.session.clone(), self.notifier.clone())
    }

    pub fn document_browser(&self) -> DocumentBrowser {
        DocumentBrowser::new(self.client.documents().clone())
    }
}
