// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User API client: authentication, profile and account administration.

use crate::error::Result;
use crate::models::{
    EmailAddress, NoData, ProfileUpdate, QrCodeRequest, RegisterRequest, Response, RoleRequest,
    UpdateNewPassword, UpdatePassword, UploadFile, UserData, UserRequest, UsersData,
};
use crate::services::cache::QueryCache;
use crate::services::endpoints::{Mutation, QueryKind};
use crate::services::http::PortalHttp;

/// Path of the user API below the portal base URL.
pub const USER_PATH: &str = "/user";

/// User API client.
#[derive(Clone)]
pub struct UserApi {
    http: PortalHttp,
    base_url: String,
}

impl UserApi {
    pub fn new(http: PortalHttp, api_url: &str) -> Self {
        Self {
            http,
            base_url: format!("{}{}", api_url.trim_end_matches('/'), USER_PATH),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ─── Queries ─────────────────────────────────────────────────

    /// Current user's profile (cached for two minutes, tag `User`).
    ///
    /// Every answer refreshes the session's profile snapshot, so the route
    /// guard sees role changes once the `User` tag is invalidated.
    pub async fn fetch_user(&self) -> Result<Response<UserData>> {
        let request = self.http.client().get(self.url("/profile"));
        let response: Response<UserData> =
            self.http.query(QueryKind::FetchUser, &(), request).await?;
        if let Some(data) = &response.data {
            self.http.session().observe(&data.user);
        }
        Ok(response)
    }

    /// Fetch the profile from the server, bypassing the cache.
    pub async fn refetch_user(&self) -> Result<Response<UserData>> {
        self.http
            .cache()
            .evict(&QueryCache::key(QueryKind::FetchUser, &()));
        self.fetch_user().await
    }

    /// All users (administration screen).
    pub async fn get_users(&self) -> Result<Response<UsersData>> {
        let request = self.http.client().get(self.url("/list"));
        self.http.query(QueryKind::GetUsers, &(), request).await
    }

    // ─── Authentication ──────────────────────────────────────────

    pub async fn register_user(&self, request: &RegisterRequest) -> Result<Response<NoData>> {
        let request = self.http.client().post(self.url("/register")).json(request);
        self.http.mutate(Mutation::RegisterUser, request).await
    }

    pub async fn login_user(&self, credentials: &UserRequest) -> Result<Response<UserData>> {
        let request = self.http.client().post(self.url("/login")).json(credentials);
        self.http.mutate(Mutation::LoginUser, request).await
    }

    /// Second factor of an MFA login.
    pub async fn verify_qr_code(&self, request: &QrCodeRequest) -> Result<Response<UserData>> {
        let request = self
            .http
            .client()
            .post(self.url("/verify/qrcode"))
            .json(request);
        self.http.mutate(Mutation::VerifyQrCode, request).await
    }

    /// End the server session and drop the local login state.
    pub async fn logout(&self) -> Result<Response<NoData>> {
        let request = self.http.client().post(self.url("/logout"));
        let response = self.http.mutate(Mutation::Logout, request).await?;
        self.http.session().clear()?;
        Ok(response)
    }

    // ─── Profile ─────────────────────────────────────────────────

    pub async fn update_user(&self, profile: &ProfileUpdate) -> Result<Response<UserData>> {
        let request = self.http.client().patch(self.url("/update")).json(profile);
        self.http.mutate(Mutation::UpdateUser, request).await
    }

    pub async fn update_photo(&self, photo: UploadFile) -> Result<Response<NoData>> {
        let part = reqwest::multipart::Part::bytes(photo.bytes).file_name(photo.name);
        let form = reqwest::multipart::Form::new().part("file", part);
        let request = self
            .http
            .client()
            .patch(self.url("/photo"))
            .multipart(form);
        self.http.mutate(Mutation::UpdatePhoto, request).await
    }

    pub async fn enable_mfa(&self) -> Result<Response<UserData>> {
        let request = self.http.client().patch(self.url("/mfa/setup"));
        self.http.mutate(Mutation::EnableMfa, request).await
    }

    pub async fn disable_mfa(&self) -> Result<Response<UserData>> {
        let request = self.http.client().patch(self.url("/mfa/cancel"));
        self.http.mutate(Mutation::DisableMfa, request).await
    }

    pub async fn update_password(&self, request: &UpdatePassword) -> Result<Response<NoData>> {
        let request = self
            .http
            .client()
            .patch(self.url("/updatepassword"))
            .json(request);
        self.http.mutate(Mutation::UpdatePassword, request).await
    }

    pub async fn update_role(&self, role: &RoleRequest) -> Result<Response<NoData>> {
        let request = self.http.client().patch(self.url("/updaterole")).json(role);
        self.http.mutate(Mutation::UpdateRole, request).await
    }

    // ─── Account state ───────────────────────────────────────────

    pub async fn toggle_account_expired(&self) -> Result<Response<NoData>> {
        self.toggle(Mutation::ToggleAccountExpired, "/toggleaccountexpired")
            .await
    }

    pub async fn toggle_account_locked(&self) -> Result<Response<NoData>> {
        self.toggle(Mutation::ToggleAccountLocked, "/toggleaccountlocked")
            .await
    }

    pub async fn toggle_account_enabled(&self) -> Result<Response<NoData>> {
        self.toggle(Mutation::ToggleAccountEnabled, "/toggleaccountenabled")
            .await
    }

    pub async fn toggle_credentials_expired(&self) -> Result<Response<NoData>> {
        self.toggle(Mutation::ToggleCredentialsExpired, "/togglecredentialsexpired")
            .await
    }

    async fn toggle(&self, mutation: Mutation, path: &str) -> Result<Response<NoData>> {
        let request = self.http.client().patch(self.url(path));
        self.http.mutate(mutation, request).await
    }

    // ─── Verification & password reset ───────────────────────────

    /// Request a password reset link.
    pub async fn reset_password(&self, email: &EmailAddress) -> Result<Response<NoData>> {
        let request = self
            .http
            .client()
            .post(self.url("/resetpassword"))
            .json(email);
        self.http.mutate(Mutation::ResetPassword, request).await
    }

    /// Confirm a new account with the emailed key.
    pub async fn verify_account(&self, key: &str) -> Result<Response<NoData>> {
        let request = self
            .http
            .client()
            .get(self.url("/verify/account"))
            .query(&[("key", key)]);
        self.http.mutate(Mutation::VerifyAccount, request).await
    }

    pub async fn verify_password(&self, key: &str) -> Result<Response<UserData>> {
        let request = self
            .http
            .client()
            .get(self.url("/verify/password"))
            .query(&[("key", key)]);
        self.http.mutate(Mutation::VerifyPassword, request).await
    }

    /// Check a password reset token, returning the user it belongs to.
    pub async fn verify_token(&self, token: &str) -> Result<Response<UserData>> {
        let request = self
            .http
            .client()
            .get(self.url("/verify/resetpassword"))
            .query(&[("key", token)]);
        self.http.mutate(Mutation::VerifyToken, request).await
    }

    /// Set a new password after a verified reset.
    pub async fn do_reset_password(&self, payload: &UpdateNewPassword) -> Result<Response<NoData>> {
        let request = self
            .http
            .client()
            .post(self.url("/resetpassword/reset"))
            .json(payload);
        self.http.mutate(Mutation::DoResetPassword, request).await
    }
}
