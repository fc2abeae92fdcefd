// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login and second-factor forms.

use crate::forms::Form;
use crate::models::{QrCodeRequest, UserRequest};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Number of single-digit inputs making up a one-time code.
pub const QR_CODE_DIGITS: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct LoginForm {
    #[validate(
        length(min = 3, message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl Form for LoginForm {
    const FIELDS: &'static [&'static str] = &["email", "password"];
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn to_request(&self) -> UserRequest {
        UserRequest {
            email: self.email.clone(),
            password: Some(self.password.clone()),
        }
    }
}

/// Six single-character inputs plus the (hidden) user id.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct QrCodeForm {
    #[validate(length(min = 3, message = "User ID is required"))]
    pub user_id: String,
    #[validate(custom(function = "validate_code_digit"))]
    pub qr_code1: String,
    #[validate(custom(function = "validate_code_digit"))]
    pub qr_code2: String,
    #[validate(custom(function = "validate_code_digit"))]
    pub qr_code3: String,
    #[validate(custom(function = "validate_code_digit"))]
    pub qr_code4: String,
    #[validate(custom(function = "validate_code_digit"))]
    pub qr_code5: String,
    #[validate(custom(function = "validate_code_digit"))]
    pub qr_code6: String,
}

impl Form for QrCodeForm {
    const FIELDS: &'static [&'static str] = &[
        "user_id", "qr_code1", "qr_code2", "qr_code3", "qr_code4", "qr_code5", "qr_code6",
    ];
}

impl QrCodeForm {
    /// Empty code inputs bound to the user awaiting verification.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Mutable access to the n-th input (0-based).
    pub fn digit_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.qr_code1),
            1 => Some(&mut self.qr_code2),
            2 => Some(&mut self.qr_code3),
            3 => Some(&mut self.qr_code4),
            4 => Some(&mut self.qr_code5),
            5 => Some(&mut self.qr_code6),
            _ => None,
        }
    }

    /// Spread a pasted code over the inputs, one character each.
    pub fn fill(&mut self, code: &str) {
        let mut chars = code.chars();
        for index in 0..QR_CODE_DIGITS {
            if let Some(digit) = self.digit_mut(index) {
                *digit = chars.next().map(String::from).unwrap_or_default();
            }
        }
    }

    /// Concatenation of the six inputs, in order.
    pub fn code(&self) -> String {
        [
            &self.qr_code1,
            &self.qr_code2,
            &self.qr_code3,
            &self.qr_code4,
            &self.qr_code5,
            &self.qr_code6,
        ]
        .into_iter()
        .map(String::as_str)
        .collect()
    }

    pub fn to_request(&self) -> QrCodeRequest {
        QrCodeRequest {
            user_id: self.user_id.clone(),
            qr_code: self.code(),
        }
    }
}

fn validate_code_digit(value: &str) -> Result<(), ValidationError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("QR Code is required"))),
        (Some(_), Some(_)) => Err(ValidationError::new("length")
            .with_message(Cow::Borrowed("Only one digit per input"))),
        (Some(c), None) if !c.is_ascii_digit() => Err(ValidationError::new("digit")
            .with_message(Cow::Borrowed("Only digits are allowed"))),
        _ => Ok(()),
    }
}
