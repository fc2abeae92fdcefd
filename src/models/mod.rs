// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the portal API.

pub mod document;
pub mod page;
pub mod response;
pub mod user;

pub use document::{
    Document, DocumentData, DocumentForm, DocumentList, DocumentPage, Query, UploadFile,
    PAGE_SIZES,
};
pub use page::Page;
pub use response::{NoData, Response, ResponseStatus};
pub use user::{
    Action, EmailAddress, Permission, ProfileUpdate, QrCodeRequest, RegisterRequest, Role,
    RoleRequest, UpdateNewPassword, UpdatePassword, User, UserData, UserRequest, UsersData,
};

use serde::{Deserialize, Deserializer};

/// Read a JSON `null` as the field type's default.
///
/// Container-level `#[serde(default)]` only covers missing keys; optional
/// profile and owner fields come back as explicit nulls.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
