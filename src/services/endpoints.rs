// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cache declarations for every portal endpoint.
//!
//! Queries declare the tags they provide and how long their results are
//! retained. Mutations declare the tags they invalidate on success.

use std::time::Duration;

/// Retention for query results without an explicit setting.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(60);

/// Retention of the profile query.
pub const PROFILE_RETENTION: Duration = Duration::from_secs(120);

/// Label grouping cached reads so one mutation can invalidate them all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    User,
    Documents,
}

/// Cached read operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    FetchUser,
    GetUsers,
    FetchDocuments,
    FetchDocument,
}

impl QueryKind {
    pub fn name(&self) -> &'static str {
        match self {
            QueryKind::FetchUser => "fetchUser",
            QueryKind::GetUsers => "getUsers",
            QueryKind::FetchDocuments => "fetchDocuments",
            QueryKind::FetchDocument => "fetchDocument",
        }
    }

    /// Tags whose invalidation drops this query's results.
    pub fn provides(&self) -> &'static [Tag] {
        match self {
            QueryKind::FetchUser => &[Tag::User],
            // The user list is refetched on every visit instead
            QueryKind::GetUsers => &[],
            QueryKind::FetchDocuments | QueryKind::FetchDocument => &[Tag::Documents],
        }
    }

    pub fn retention(&self) -> Duration {
        match self {
            QueryKind::FetchUser => PROFILE_RETENTION,
            _ => DEFAULT_RETENTION,
        }
    }
}

/// Write operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    RegisterUser,
    LoginUser,
    UpdateUser,
    EnableMfa,
    DisableMfa,
    VerifyQrCode,
    UpdatePhoto,
    ToggleAccountExpired,
    ToggleAccountLocked,
    ToggleAccountEnabled,
    ToggleCredentialsExpired,
    Logout,
    UpdatePassword,
    UpdateRole,
    ResetPassword,
    VerifyAccount,
    VerifyPassword,
    VerifyToken,
    DoResetPassword,
    UploadDocuments,
    UpdateDocument,
    DownloadDocument,
}

impl Mutation {
    pub const ALL: [Mutation; 22] = [
        Mutation::RegisterUser,
        Mutation::LoginUser,
        Mutation::UpdateUser,
        Mutation::EnableMfa,
        Mutation::DisableMfa,
        Mutation::VerifyQrCode,
        Mutation::UpdatePhoto,
        Mutation::ToggleAccountExpired,
        Mutation::ToggleAccountLocked,
        Mutation::ToggleAccountEnabled,
        Mutation::ToggleCredentialsExpired,
        Mutation::Logout,
        Mutation::UpdatePassword,
        Mutation::UpdateRole,
        Mutation::ResetPassword,
        Mutation::VerifyAccount,
        Mutation::VerifyPassword,
        Mutation::VerifyToken,
        Mutation::DoResetPassword,
        Mutation::UploadDocuments,
        Mutation::UpdateDocument,
        Mutation::DownloadDocument,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::RegisterUser => "registerUser",
            Mutation::LoginUser => "loginUser",
            Mutation::UpdateUser => "updateUser",
            Mutation::EnableMfa => "enableMfa",
            Mutation::DisableMfa => "disableMfa",
            Mutation::VerifyQrCode => "verifyQrCode",
            Mutation::UpdatePhoto => "updatePhoto",
            Mutation::ToggleAccountExpired => "toggleAccountExpired",
            Mutation::ToggleAccountLocked => "toggleAccountLocked",
            Mutation::ToggleAccountEnabled => "toggleAccountEnabled",
            Mutation::ToggleCredentialsExpired => "toggleCredentialsExpired",
            Mutation::Logout => "logout",
            Mutation::UpdatePassword => "updatePassword",
            Mutation::UpdateRole => "updateRole",
            Mutation::ResetPassword => "resetPassword",
            Mutation::VerifyAccount => "verifyAccount",
            Mutation::VerifyPassword => "verifyPassword",
            Mutation::VerifyToken => "verifyToken",
            Mutation::DoResetPassword => "doResetPassword",
            Mutation::UploadDocuments => "uploadDocuments",
            Mutation::UpdateDocument => "updateDocument",
            Mutation::DownloadDocument => "downloadDocument",
        }
    }

    /// Tags invalidated when this mutation succeeds. Failures invalidate
    /// nothing.
    pub fn invalidates(&self) -> &'static [Tag] {
        match self {
            Mutation::RegisterUser
            | Mutation::LoginUser
            | Mutation::UpdatePassword
            | Mutation::DownloadDocument => &[],
            Mutation::UploadDocuments | Mutation::UpdateDocument => &[Tag::Documents],
            Mutation::UpdateUser
            | Mutation::EnableMfa
            | Mutation::DisableMfa
            | Mutation::VerifyQrCode
            | Mutation::UpdatePhoto
            | Mutation::ToggleAccountExpired
            | Mutation::ToggleAccountLocked
            | Mutation::ToggleAccountEnabled
            | Mutation::ToggleCredentialsExpired
            | Mutation::Logout
            | Mutation::UpdateRole
            | Mutation::ResetPassword
            | Mutation::VerifyAccount
            | Mutation::VerifyPassword
            | Mutation::VerifyToken
            | Mutation::DoResetPassword => &[Tag::User],
        }
    }
}
