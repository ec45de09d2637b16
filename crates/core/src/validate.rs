//! Client-side signup form validation.
//!
//! Runs before any network request; a form that fails here never reaches the
//! backend.

use serde::Serialize;
use thiserror::Error;

/// Minimum password length accepted by the signup form.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum username length accepted by the signup form.
pub const MIN_USERNAME_LEN: usize = 3;

/// The raw signup form as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// The payload actually sent to `POST /users/signup`. The backend expects
/// the raw password under the `pwd` key; the confirmation field never leaves
/// the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupPayload {
    pub name: String,
    pub username: String,
    pub email: String,
    pub pwd: String,
}

/// Which form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignupField {
    Name,
    Username,
    Email,
    Password,
    ConfirmPassword,
}

/// One per-field validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupFieldError {
    pub field: SignupField,
    pub message: &'static str,
}

/// All field errors for one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("signup form is invalid")]
pub struct SignupValidationError {
    pub fields: Vec<SignupFieldError>,
}

impl SignupValidationError {
    /// Message for a specific field, if that field failed.
    #[must_use]
    pub fn message_for(&self, field: SignupField) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|err| err.field == field)
            .map(|err| err.message)
    }

    /// First message, for single-line error displays.
    #[must_use]
    pub fn first_message(&self) -> Option<&'static str> {
        self.fields.first().map(|err| err.message)
    }
}

impl SignupForm {
    /// Validates every field and collects all messages at once.
    ///
    /// # Errors
    ///
    /// Returns `SignupValidationError` listing every failed field.
    pub fn validate(&self) -> Result<SignupPayload, SignupValidationError> {
        let mut fields = Vec::new();
        let mut push = |field, message| fields.push(SignupFieldError { field, message });

        if self.name.trim().is_empty() {
            push(SignupField::Name, "Name is required");
        }

        let username = self.username.trim();
        if username.is_empty() {
            push(SignupField::Username, "Username is required");
        } else if username.chars().count() < MIN_USERNAME_LEN {
            push(
                SignupField::Username,
                "Username must be at least 3 characters",
            );
        }

        let email = self.email.trim();
        if email.is_empty() {
            push(SignupField::Email, "Email is required");
        } else if !email_looks_valid(email) {
            push(SignupField::Email, "Please enter a valid email address");
        }

        if self.password.is_empty() {
            push(SignupField::Password, "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            push(
                SignupField::Password,
                "Password must be at least 6 characters",
            );
        }

        if self.confirm_password.is_empty() {
            push(
                SignupField::ConfirmPassword,
                "Please confirm your password",
            );
        } else if !self.password.is_empty() && self.password != self.confirm_password {
            push(SignupField::ConfirmPassword, "Passwords do not match");
        }

        if fields.is_empty() {
            Ok(SignupPayload {
                name: self.name.trim().to_string(),
                username: username.to_string(),
                email: email.to_string(),
                pwd: self.password.clone(),
            })
        } else {
            Err(SignupValidationError { fields })
        }
    }
}

/// Minimal `local@domain.tld` shape check; the backend remains the
/// authority on real deliverability.
fn email_looks_valid(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.contains(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
