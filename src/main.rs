// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Docportal command-line client
//!
//! Restores the saved session, logs in with configured credentials if
//! needed, then prints the profile and the first page of documents.

use anyhow::Context;
use docportal::{
    config::Config, db::FileStorage, login::LoginStep, notify::TracingNotifier, Portal,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(api_url = %config.api_url, "Starting docportal client");

    let storage = Arc::new(FileStorage::new(&config.state_file));
    tracing::info!(path = %config.state_file.display(), "Using local state file");

    let portal = Portal::new(config, storage, Arc::new(TracingNotifier))
        .context("Failed to build HTTP client")?;

    // The cookie jar starts empty, so a saved flag alone is not enough
    let logged_in = match portal.session.check(portal.client.users()).await {
        Ok(logged_in) => logged_in,
        Err(e) => {
            tracing::warn!(error = %e, "Session check failed");
            false
        }
    };

    if !logged_in && !login(&portal).await? {
        tracing::info!("Not logged in; set PORTAL_EMAIL and PORTAL_PASSWORD to log in");
        return Ok(());
    }

    let user = portal
        .client
        .users()
        .fetch_user()
        .await?
        .into_data()?
        .user;
    tracing::info!(
        user_id = %user.user_id,
        name = %user.full_name(),
        role = %user.role,
        mfa = user.mfa,
        "Profile loaded"
    );

    let mut browser = portal.document_browser();
    let page = browser.load().await?;
    for document in &page.content {
        tracing::info!(
            document_id = %document.document_id,
            name = %document.name,
            size = document.size,
            "Document"
        );
    }
    if let Some(summary) = browser.summary() {
        tracing::info!("{}", summary);
    }

    Ok(())
}

/// Log in with the configured credentials. Returns whether the session
/// ended up logged in.
async fn login(portal: &Portal) -> anyhow::Result<bool> {
    let Some((email, password)) = portal.config.credentials() else {
        return Ok(false);
    };

    let mut flow = portal.login(None);
    let values = flow.credentials_mut().values_mut();
    values.email = email.to_string();
    values.password = password.to_string();

    if let LoginStep::TwoFactor { .. } = flow.submit_credentials().await? {
        let code = portal
            .config
            .mfa_code
            .as_deref()
            .context("Account requires a one-time code; set PORTAL_MFA_CODE")?;
        if let Some(form) = flow.code_mut() {
            form.values_mut().fill(code);
        }
        flow.submit_code().await?;
    }

    Ok(matches!(flow.step(), LoginStep::Complete { .. }))
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docportal=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
