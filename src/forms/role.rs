// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role selector of the authorization screen.

use crate::models::user::UnknownRole;
use crate::models::{Role, RoleRequest};

/// State of the role drop-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSelector {
    current: Role,
    updating: bool,
}

impl RoleSelector {
    pub fn new(current: Role) -> Self {
        Self {
            current,
            updating: false,
        }
    }

    pub fn current(&self) -> Role {
        self.current
    }

    /// `(value, label)` pairs in display order.
    pub fn options(&self) -> Vec<(&'static str, String)> {
        Role::ALL
            .iter()
            .map(|role| (role.as_str(), role.label()))
            .collect()
    }

    /// Plain users cannot change roles; nobody can while an update runs.
    pub fn is_disabled(&self) -> bool {
        self.current == Role::User || self.updating
    }

    /// Turn a selected option value into an update request.
    pub fn select(&self, value: &str) -> Result<RoleRequest, UnknownRole> {
        let role = value.parse::<Role>()?;
        Ok(RoleRequest { role })
    }

    pub fn set_updating(&mut self, updating: bool) {
        self.updating = updating;
    }
}
