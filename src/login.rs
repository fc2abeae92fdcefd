// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login flow: credentials, optional second factor, then redirect.

use crate::error::{ClientError, Result};
use crate::forms::{FormState, LoginForm, QrCodeForm};
use crate::models::User;
use crate::services::UserApi;
use crate::session::Session;
use std::sync::Arc;

/// Where the login view is.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginStep {
    /// Email and password form
    Credentials,
    /// Password accepted, waiting for the one-time code
    TwoFactor { user: Box<User> },
    /// Logged in; navigate to `redirect`
    Complete { redirect: String },
}

/// State machine behind the login view.
pub struct LoginFlow {
    users: UserApi,
    session: Arc<Session>,
    from: Option<String>,
    step: LoginStep,
    credentials: FormState<LoginForm>,
    code: Option<FormState<QrCodeForm>>,
    error: Option<String>,
}

impl LoginFlow {
    /// Start the flow. A session already flagged as logged in completes
    /// immediately.
    pub fn new(users: UserApi, session: Arc<Session>, from: Option<String>) -> Self {
        let mut flow = Self {
            users,
            session,
            from,
            step: LoginStep::Credentials,
            credentials: FormState::new(LoginForm::default()),
            code: None,
            error: None,
        };
        if flow.session.is_logged_in() {
            flow.step = flow.complete_step();
        }
        flow
    }

    pub fn step(&self) -> &LoginStep {
        &self.step
    }

    /// Inline alert text of the last failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn credentials(&self) -> &FormState<LoginForm> {
        &self.credentials
    }

    pub fn credentials_mut(&mut self) -> &mut FormState<LoginForm> {
        &mut self.credentials
    }

    /// One-time code inputs, present in the two-factor step.
    pub fn code(&self) -> Option<&FormState<QrCodeForm>> {
        self.code.as_ref()
    }

    pub fn code_mut(&mut self) -> Option<&mut FormState<QrCodeForm>> {
        self.code.as_mut()
    }

    /// Submit email and password.
    pub async fn submit_credentials(&mut self) -> Result<&LoginStep> {
        if self.step != LoginStep::Credentials {
            return Err(ClientError::InvalidState("credentials already accepted"));
        }

        let form = self.credentials.begin_submit()?;
        let result = self.users.login_user(&form.to_request()).await;
        self.credentials.finish_submit();

        let user = match result.and_then(|response| response.into_data()) {
            Ok(data) => data.user,
            Err(e) => return Err(self.fail(e)),
        };
        self.error = None;

        if user.mfa {
            tracing::info!(user_id = %user.user_id, "Password accepted, second factor required");
            self.code = Some(FormState::new(QrCodeForm::for_user(user.user_id.clone())));
            self.step = LoginStep::TwoFactor {
                user: Box::new(user),
            };
        } else {
            tracing::info!(user_id = %user.user_id, "Logged in");
            self.session.mark_logged_in(user)?;
            self.step = self.complete_step();
        }

        Ok(&self.step)
    }

    /// Submit the one-time code of the two-factor step.
    pub async fn submit_code(&mut self) -> Result<&LoginStep> {
        let Some(code) = self.code.as_mut() else {
            return Err(ClientError::InvalidState("no second factor pending"));
        };

        let form = code.begin_submit()?;
        let result = self.users.verify_qr_code(&form.to_request()).await;
        code.finish_submit();

        let user = match result.and_then(|response| response.into_data()) {
            Ok(data) => data.user,
            Err(e) => return Err(self.fail(e)),
        };

        tracing::info!(user_id = %user.user_id, "Second factor verified, logged in");
        self.error = None;
        self.session.mark_logged_in(user)?;
        self.code = None;
        self.step = self.complete_step();
        Ok(&self.step)
    }

    fn complete_step(&self) -> LoginStep {
        LoginStep::Complete {
            redirect: self
                .from
                .clone()
                .filter(|from| from.starts_with('/') && !from.starts_with("//"))
                .unwrap_or_else(|| "/".to_string()),
        }
    }

    fn fail(&mut self, err: ClientError) -> ClientError {
        self.error = Some(err.display_message().to_string());
        err
    }
}
