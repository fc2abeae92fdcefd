// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared HTTP transport for the portal API.
//!
//! Handles:
//! - Cookie-backed sessions (credentials included on every request)
//! - Envelope parsing for successes and failures
//! - Error side effects (login flag reset, user notices)
//! - Cache lookups for queries and tag invalidation for mutations

use crate::error::{ClientError, Result};
use crate::models::{NoData, Response};
use crate::notify::{Notice, Notifier};
use crate::services::cache::QueryCache;
use crate::services::endpoints::{Mutation, QueryKind};
use crate::session::Session;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Transport shared by the user and document APIs.
#[derive(Clone)]
pub struct PortalHttp {
    http: reqwest::Client,
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
    cache: QueryCache,
}

impl PortalHttp {
    pub fn new(session: Arc<Session>, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            session,
            notifier,
            cache: QueryCache::new(),
        })
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run a cached query.
    pub async fn query<T, A>(
        &self,
        kind: QueryKind,
        args: &A,
        request: reqwest::RequestBuilder,
    ) -> Result<Response<T>>
    where
        T: Serialize + DeserializeOwned,
        A: Serialize + ?Sized,
    {
        let key = QueryCache::key(kind, args);
        self.cache
            .get_or_fetch(kind, &key, || self.send(request, kind.name(), false))
            .await
    }

    /// Run a mutation, invalidating its tags if it succeeds.
    pub async fn mutate<T>(
        &self,
        mutation: Mutation,
        request: reqwest::RequestBuilder,
    ) -> Result<Response<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request, mutation.name(), true).await?;
        self.cache.invalidate(mutation.invalidates());
        Ok(response)
    }

    /// Run a mutation whose body is raw bytes rather than an envelope.
    pub async fn mutate_bytes(
        &self,
        mutation: Mutation,
        request: reqwest::RequestBuilder,
    ) -> Result<Vec<u8>> {
        let response = self.execute(request, mutation.name()).await?;
        let bytes = response.bytes().await.map_err(|e| {
            let err = ClientError::from(e);
            self.report(&err);
            err
        })?;
        self.cache.invalidate(mutation.invalidates());
        Ok(bytes.to_vec())
    }

    /// Send a request and unwrap the envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        operation: &'static str,
        announce: bool,
    ) -> Result<Response<T>> {
        let response = self.execute(request, operation).await?;
        let envelope: Response<T> = response.json().await.map_err(|e| {
            let err = ClientError::Decode(format!("{}: {}", operation, e));
            self.report(&err);
            err
        })?;

        tracing::debug!(operation, code = envelope.code, "Portal request succeeded");
        if announce {
            self.notifier.notify(Notice::success(envelope.message.clone()));
        }
        Ok(envelope)
    }

    /// Send a request, mapping transport failures and non-2xx answers.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        operation: &'static str,
    ) -> Result<reqwest::Response> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(operation, error = %e, "Portal request failed");
                let err = ClientError::from(e);
                self.report(&err);
                return Err(err);
            }
        };

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let data = serde_json::from_str::<Response<NoData>>(&body)
            .ok()
            .map(Box::new);

        tracing::warn!(
            operation,
            status,
            message = data.as_ref().map(|d| d.message.as_str()).unwrap_or(""),
            "Portal returned an error"
        );

        let err = ClientError::Http { status, data };
        self.report(&err);
        Err(err)
    }

    /// Error side effects: reset the login flag on an ended session and
    /// notify the user.
    fn report(&self, err: &ClientError) {
        if err.is_not_logged_in() {
            if let Err(e) = self.session.mark_logged_out() {
                tracing::warn!(error = %e, "Failed to reset login flag");
            }
        }
        self.notifier.notify(Notice::error(err.display_message()));
    }
}
