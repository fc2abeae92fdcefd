// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - portal API clients and the query cache.

pub mod cache;
pub mod document;
pub mod endpoints;
pub mod http;
pub mod user;

pub use cache::QueryCache;
pub use document::DocumentApi;
pub use endpoints::{Mutation, QueryKind, Tag};
pub use http::PortalHttp;
pub use user::UserApi;

use crate::config::Config;
use crate::error::Result;
use crate::notify::Notifier;
use crate::session::Session;
use std::sync::Arc;

/// Both API clients over one shared transport, cookie jar and cache.
#[derive(Clone)]
pub struct PortalClient {
    http: PortalHttp,
    users: UserApi,
    documents: DocumentApi,
}

impl PortalClient {
    pub fn new(
        api_url: &str,
        session: Arc<Session>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let http = PortalHttp::new(session, notifier)?;
        Ok(Self {
            users: UserApi::new(http.clone(), api_url),
            documents: DocumentApi::new(http.clone(), api_url),
            http,
        })
    }

    pub fn from_config(
        config: &Config,
        session: Arc<Session>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        Self::new(&config.api_url, session, notifier)
    }

    pub fn users(&self) -> &UserApi {
        &self.users
    }

    pub fn documents(&self) -> &DocumentApi {
        &self.documents
    }

    pub fn cache(&self) -> &QueryCache {
        self.http.cache()
    }
}
