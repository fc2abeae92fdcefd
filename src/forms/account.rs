// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, profile and password forms.

use crate::forms::Form;
use crate::models::{EmailAddress, ProfileUpdate, RegisterRequest, UpdateNewPassword, UpdatePassword};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(
        length(min = 3, message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: String,
    #[validate(length(min = 5, message = "Password must be at least 5 characters"))]
    pub password: String,
    pub phone: String,
    pub bio: String,
}

impl Form for RegisterForm {
    const FIELDS: &'static [&'static str] =
        &["first_name", "last_name", "email", "password", "phone", "bio"];
}

impl RegisterForm {
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            phone: non_empty(&self.phone),
            bio: non_empty(&self.bio),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(
        length(min = 3, message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: String,
    #[validate(length(min = 5, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 5, message = "Bio is required"))]
    pub bio: String,
}

impl Form for ProfileForm {
    const FIELDS: &'static [&'static str] = &["first_name", "last_name", "email", "phone", "bio"];
}

impl ProfileForm {
    /// Prefill from the current profile.
    pub fn from_user(user: &crate::models::User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            bio: user.bio.clone(),
        }
    }

    pub fn to_request(&self) -> ProfileUpdate {
        ProfileUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            bio: self.bio.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
#[validate(schema(function = "validate_update_password"))]
pub struct UpdatePasswordForm {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub password: String,
    #[validate(length(min = 5, message = "New password must be at least 5 characters"))]
    pub new_password: String,
    #[validate(length(min = 1, message = "Please confirm the new password"))]
    pub confirm_new_password: String,
}

impl Form for UpdatePasswordForm {
    const FIELDS: &'static [&'static str] = &["password", "new_password", "confirm_new_password"];
}

impl UpdatePasswordForm {
    pub fn to_request(&self) -> UpdatePassword {
        UpdatePassword {
            password: self.password.clone(),
            new_password: self.new_password.clone(),
            confirm_new_password: self.confirm_new_password.clone(),
        }
    }
}

/// New password entered after following a reset link.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
#[validate(schema(function = "validate_new_password"))]
pub struct NewPasswordForm {
    #[validate(length(min = 3, message = "User ID is required"))]
    pub user_id: String,
    #[validate(length(min = 5, message = "New password must be at least 5 characters"))]
    pub new_password: String,
    #[validate(length(min = 1, message = "Please confirm the new password"))]
    pub confirm_new_password: String,
}

impl Form for NewPasswordForm {
    const FIELDS: &'static [&'static str] = &["user_id", "new_password", "confirm_new_password"];
}

impl NewPasswordForm {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    pub fn to_request(&self) -> UpdateNewPassword {
        UpdateNewPassword {
            user_id: self.user_id.clone(),
            new_password: self.new_password.clone(),
            confirm_new_password: self.confirm_new_password.clone(),
        }
    }
}

/// Email address to send a reset link to.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ResetPasswordForm {
    #[validate(
        length(min = 3, message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: String,
}

impl Form for ResetPasswordForm {
    const FIELDS: &'static [&'static str] = &["email"];
}

impl ResetPasswordForm {
    pub fn to_request(&self) -> EmailAddress {
        EmailAddress {
            email: self.email.clone(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn passwords_match(new_password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if new_password == confirmation {
        Ok(())
    } else {
        Err(ValidationError::new("password_mismatch")
            .with_message(Cow::Borrowed("Passwords do not match")))
    }
}

fn validate_update_password(form: &UpdatePasswordForm) -> Result<(), ValidationError> {
    passwords_match(&form.new_password, &form.confirm_new_password)
}

fn validate_new_password(form: &NewPasswordForm) -> Result<(), ValidationError> {
    passwords_match(&form.new_password, &form.confirm_new_password)
}
