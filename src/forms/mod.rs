// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Validated input forms.
//!
//! Constraints are declared on the form structs with `validator`. A
//! [`FormState`] wraps the values and tracks which fields the user has
//! touched, so errors surface field by field as in an "on touched" form.

pub mod account;
pub mod login;
pub mod role;

pub use account::{
    NewPasswordForm, ProfileForm, RegisterForm, ResetPasswordForm, UpdatePasswordForm,
};
pub use login::{LoginForm, QrCodeForm, QR_CODE_DIGITS};
pub use role::RoleSelector;

use std::collections::HashSet;
use validator::{Validate, ValidationErrors};

/// Key under which struct-level (cross-field) errors are reported.
pub const FORM_LEVEL: &str = "__all__";

/// A form with a fixed set of named fields.
pub trait Form: Validate + Clone {
    /// Field names, as reported in validation errors.
    const FIELDS: &'static [&'static str];
}

/// Values plus touched/submitting state of one form.
#[derive(Debug, Clone)]
pub struct FormState<F: Form> {
    values: F,
    touched: HashSet<&'static str>,
    submitting: bool,
}

impl<F: Form> FormState<F> {
    pub fn new(values: F) -> Self {
        Self {
            values,
            touched: HashSet::new(),
            submitting: false,
        }
    }

    pub fn values(&self) -> &F {
        &self.values
    }

    /// Mutable access for field edits. Does not mark anything touched.
    pub fn values_mut(&mut self) -> &mut F {
        &mut self.values
    }

    /// Mark a field as touched (blurred). Unknown names are ignored.
    pub fn touch(&mut self, field: &str) {
        if let Some(known) = F::FIELDS.iter().find(|name| **name == field) {
            self.touched.insert(*known);
        }
    }

    pub fn touch_all(&mut self) {
        self.touched.extend(F::FIELDS.iter().copied());
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    pub fn errors(&self) -> Option<ValidationErrors> {
        self.values.validate().err()
    }

    /// First error message of `field`, only once it has been touched.
    pub fn field_error(&self, field: &str) -> Option<String> {
        if !self.is_touched(field) {
            return None;
        }
        self.errors()
            .and_then(|errors| first_message(&errors, field))
    }

    /// First cross-field error message, only once every field is touched.
    pub fn form_error(&self) -> Option<String> {
        if !F::FIELDS.iter().all(|field| self.is_touched(field)) {
            return None;
        }
        self.errors()
            .and_then(|errors| first_message(&errors, FORM_LEVEL))
    }

    /// Touched and passing every constraint.
    pub fn is_field_valid(&self, field: &str) -> bool {
        self.is_touched(field)
            && self
                .errors()
                .map_or(true, |errors| !errors.field_errors().contains_key(field))
    }

    pub fn is_valid(&self) -> bool {
        self.values.validate().is_ok()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Submit is enabled only for a valid form with no submission in flight.
    pub fn can_submit(&self) -> bool {
        self.is_valid() && !self.submitting
    }

    /// Start a submission, returning the values to send.
    ///
    /// Touches every field so all errors become visible on failure.
    pub fn begin_submit(&mut self) -> Result<F, ValidationErrors> {
        self.touch_all();
        self.values.validate()?;
        self.submitting = true;
        Ok(self.values.clone())
    }

    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }
}

fn first_message(errors: &ValidationErrors, field: &str) -> Option<String> {
    let field_errors = errors.field_errors();
    let error = field_errors.get(field)?.first()?;
    Some(
        error
            .message
            .as_ref()
            .map(|message| message.to_string())
            .unwrap_or_else(|| error.code.to_string()),
    )
}
