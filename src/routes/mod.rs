// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client route table.

/// Path of the login view.
pub const LOGIN_PATH: &str = "/login";
/// Path the root redirects to.
pub const HOME_PATH: &str = "/documents";

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Requires the login flag
    Protected,
    /// Requires the login flag and an administrator role
    Restricted,
}

/// Every view reachable by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    ResetPassword,
    VerifyAccount,
    VerifyPassword,
    /// `/`, redirects to the document list
    Root,
    Documents,
    DocumentDetails { document_id: String },
    Users,
    /// `/user`, redirects to the profile tab
    UserHome,
    Profile,
    Password,
    Settings,
    Authorization,
    Authentication,
    /// Shown instead of a restricted route the user's role may not open
    AccessDenied,
    NotFound,
}

impl Route {
    /// Match a path (query string and trailing slash ignored).
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Root,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["resetpassword"] => Route::ResetPassword,
            ["verify", "account"] => Route::VerifyAccount,
            ["verify", "password"] => Route::VerifyPassword,
            ["documents"] => Route::Documents,
            ["documents", id] => Route::DocumentDetails {
                document_id: id.to_string(),
            },
            ["users"] => Route::Users,
            ["user"] => Route::UserHome,
            ["user", "profile"] => Route::Profile,
            ["user", "password"] => Route::Password,
            ["user", "settings"] => Route::Settings,
            ["user", "authorization"] => Route::Authorization,
            ["user", "authentication"] => Route::Authentication,
            _ => Route::NotFound,
        }
    }

    /// Canonical path of this route.
    pub fn path(&self) -> String {
        match self {
            Route::Login => LOGIN_PATH.to_string(),
            Route::Register => "/register".to_string(),
            Route::ResetPassword => "/resetpassword".to_string(),
            Route::VerifyAccount => "/verify/account".to_string(),
            Route::VerifyPassword => "/verify/password".to_string(),
            Route::Root => "/".to_string(),
            Route::Documents => HOME_PATH.to_string(),
            Route::DocumentDetails { document_id } => format!("/documents/{}", document_id),
            Route::Users => "/users".to_string(),
            Route::UserHome => "/user".to_string(),
            Route::Profile => "/user/profile".to_string(),
            Route::Password => "/user/password".to_string(),
            Route::Settings => "/user/settings".to_string(),
            Route::Authorization => "/user/authorization".to_string(),
            Route::Authentication => "/user/authentication".to_string(),
            Route::AccessDenied => "/restricted".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Login
            | Route::Register
            | Route::ResetPassword
            | Route::VerifyAccount
            | Route::VerifyPassword
            | Route::NotFound => Access::Public,
            Route::Users => Access::Restricted,
            Route::Root
            | Route::Documents
            | Route::DocumentDetails { .. }
            | Route::UserHome
            | Route::Profile
            | Route::Password
            | Route::Settings
            | Route::Authorization
            | Route::Authentication
            | Route::AccessDenied => Access::Protected,
        }
    }

    /// Fixed redirect target of index routes.
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            Route::Root => Some(HOME_PATH),
            Route::UserHome => Some("/user/profile"),
            _ => None,
        }
    }
}
