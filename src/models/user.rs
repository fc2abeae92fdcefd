// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model and user request bodies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User profile as returned by the portal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: u64,
    /// Public user identifier (UUID)
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub bio: String,
    /// Data URI of the MFA enrolment QR code, only present right after setup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_image_uri: Option<String>,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub image_url: String,
    pub account_non_expired: bool,
    pub account_non_locked: bool,
    pub credentials_non_expired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<Timestamp>,
    pub enabled: bool,
    pub mfa: bool,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub created_by: u64,
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub updated_by: u64,
    pub role: Role,
    /// Comma separated `resource:action` pairs
    #[serde(deserialize_with = "crate::models::null_as_default")]
    pub authorities: String,
}

impl User {
    /// Parsed view of the `authorities` string.
    pub fn permissions(&self) -> Vec<Permission> {
        parse_authorities(&self.authorities)
    }

    /// Display name ("First Last").
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Timestamps arrive either as epoch milliseconds or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

/// Fixed set of portal roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Admin,
    SuperAdmin,
    Manager,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::User, Role::Admin, Role::SuperAdmin, Role::Manager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Manager => "MANAGER",
        }
    }

    /// Label shown in the role selector, e.g. `ROLE_ADMIN`.
    pub fn label(&self) -> String {
        format!("ROLE_{}", self.as_str())
    }

    /// Whether this role may open the user administration screen.
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

/// One `resource:action` authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    pub resource: String,
    pub action: Action,
}

impl Permission {
    /// Parse a single `resource:action` pair.
    pub fn parse(raw: &str) -> Option<Self> {
        let (resource, action) = raw.trim().split_once(':')?;
        if resource.is_empty() || action.is_empty() {
            return None;
        }
        Some(Self {
            resource: resource.to_string(),
            action: Action::from(action),
        })
    }
}

/// Action part of an authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Other(String),
}

impl Action {
    /// Badge style used by the permissions list.
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            Action::Create => Some("bg-primary"),
            Action::Read => Some("bg-success"),
            Action::Update => Some("bg-warning"),
            Action::Delete => Some("bg-danger"),
            Action::Other(_) => None,
        }
    }
}

impl From<&str> for Action {
    fn from(value: &str) -> Self {
        match value {
            "create" => Action::Create,
            "read" => Action::Read,
            "update" => Action::Update,
            "delete" => Action::Delete,
            other => Action::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create => f.write_str("create"),
            Action::Read => f.write_str("read"),
            Action::Update => f.write_str("update"),
            Action::Delete => f.write_str("delete"),
            Action::Other(other) => f.write_str(other),
        }
    }
}

/// Split an authorities string into permissions, skipping malformed pairs.
pub fn parse_authorities(authorities: &str) -> Vec<Permission> {
    authorities
        .split(',')
        .filter(|pair| !pair.trim().is_empty())
        .filter_map(|pair| {
            let permission = Permission::parse(pair);
            if permission.is_none() {
                tracing::debug!(pair = %pair, "Skipping malformed authority");
            }
            permission
        })
        .collect()
}

// ─── Payloads ────────────────────────────────────────────────

/// `data` of endpoints returning a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub user: User,
}

/// `data` of the user list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsersData {
    #[serde(default)]
    pub users: Vec<User>,
}

// ─── Requests ────────────────────────────────────────────────

/// Login / profile update credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Account registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Profile fields editable by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
}

/// Password change for a logged-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePassword {
    pub password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Password reset completion (after following the emailed link).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewPassword {
    pub user_id: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub email: String,
}

/// Second-factor verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeRequest {
    pub user_id: String,
    pub qr_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleRequest {
    pub role: Role,
}
