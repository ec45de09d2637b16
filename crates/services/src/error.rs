//! Shared error types for the services crate.

use thiserror::Error;

use api::ApiError;
use chefs_core::model::QuizError;
use chefs_core::validate::SignupValidationError;

/// Errors surfaced by `SessionStore` login/signup.
///
/// Login failures are normalized to one generic message regardless of what
/// the backend said, so the UI never leaks which field was wrong. Signup
/// keeps the server's own text because the backend reports actionable
/// conflicts ("Email already registered") as plain text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,
    #[error(transparent)]
    Validation(#[from] SignupValidationError),
    #[error("{0}")]
    Rejected(String),
}

impl AuthError {
    /// The user-facing message for this failure.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Validation(err) => err
                .first_message()
                .unwrap_or("Please fix the highlighted fields")
                .to_string(),
            other => other.to_string(),
        }
    }
}

/// Errors surfaced by profile operations (update, image, delete).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("not signed in")]
    NotAuthenticated,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ProfileError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NotAuthenticated => "You need to sign in again.".to_string(),
            Self::Api(err) => err.message(),
        }
    }
}

/// Errors surfaced by catalog queries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

impl CatalogError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Api(err) => err.message(),
            Self::Quiz(err) => err.to_string(),
        }
    }
}
