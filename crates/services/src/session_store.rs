use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use api::{ApiError, ChefsApi, SessionVault};
use chefs_core::model::{User, UserId, UserPatch};
use chefs_core::validate::SignupForm;

use crate::error::{AuthError, ProfileError};

/// The generic login failure message. Deliberately identical for wrong
/// email, wrong password, and transport errors.
const LOGIN_FAILED: &str = "Incorrect username or password";

const SIGNUP_FAILED: &str = "Failed to create account";

/// The client's belief about the current authenticated identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    /// Authentication is derived, never stored: a session is authenticated
    /// exactly when it holds an identity.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Owns the session lifecycle: hydrate → login/signup → profile updates →
/// logout. Explicitly constructed with its collaborators; there is no
/// ambient global.
pub struct SessionStore {
    api: Arc<dyn ChefsApi>,
    vault: SessionVault,
    state: RwLock<SessionState>,
}

impl SessionStore {
    #[must_use]
    pub fn new(api: Arc<dyn ChefsApi>, vault: SessionVault) -> Self {
        Self {
            api,
            vault,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// A clone of the current state, for rendering.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user
            .clone()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user
            .as_ref()
            .map(|user| user.id)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated()
    }

    fn with_state(&self, apply: impl FnOnce(&mut SessionState)) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut guard);
    }

    /// Restores the persisted session, if any.
    ///
    /// The stored identity is applied immediately so the first render is not
    /// a login screen flash, then refreshed from the backend. A not-ok
    /// refresh means the identity is stale or deleted and the session is
    /// logged out; transport failures keep the stored identity (best
    /// effort).
    pub async fn hydrate(&self) {
        let Some(saved) = self.vault.load() else {
            return;
        };
        let id = saved.id;
        self.with_state(|state| {
            state.user = Some(saved);
            state.loading = false;
            state.error = None;
        });

        match self.api.get_user(id).await {
            Ok(latest) => {
                if let Err(err) = self.vault.store(&latest) {
                    warn!(%err, "failed to persist refreshed session");
                }
                self.with_state(|state| state.user = Some(latest));
            }
            Err(ApiError::Status { status, .. }) => {
                warn!(status, "persisted identity rejected by backend; logging out");
                self.logout();
            }
            Err(err) => {
                // Best effort: offline hydration keeps the stored identity.
                warn!(%err, "session refresh failed");
            }
        }
    }

    /// Authenticates and replaces the session identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for any failure; the error is
    /// also recorded in state so a page can render it after branching.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.with_state(|state| {
            state.loading = true;
            state.error = None;
        });

        match self.api.login(email, password).await {
            Ok(user) => {
                if let Err(err) = self.vault.store(&user) {
                    warn!(%err, "failed to persist session after login");
                }
                self.with_state(|state| {
                    state.user = Some(user.clone());
                    state.loading = false;
                    state.error = None;
                });
                Ok(user)
            }
            Err(err) => {
                debug!(%err, "login rejected");
                self.with_state(|state| {
                    state.user = None;
                    state.loading = false;
                    state.error = Some(LOGIN_FAILED.to_string());
                });
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Validates the form client-side, then creates the account. Validation
    /// failures never reach the network. Success behaves like login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for form failures and
    /// `AuthError::Rejected` with the server's message otherwise.
    pub async fn signup(&self, form: &SignupForm) -> Result<User, AuthError> {
        let payload = form.validate()?;

        self.with_state(|state| {
            state.loading = true;
            state.error = None;
        });

        match self.api.signup(&payload).await {
            Ok(user) => {
                if let Err(err) = self.vault.store(&user) {
                    warn!(%err, "failed to persist session after signup");
                }
                self.with_state(|state| {
                    state.user = Some(user.clone());
                    state.loading = false;
                    state.error = None;
                });
                Ok(user)
            }
            Err(err) => {
                let message = signup_message(&err);
                debug!(%err, "signup rejected");
                self.with_state(|state| {
                    state.user = None;
                    state.loading = false;
                    state.error = Some(message.clone());
                });
                Err(AuthError::Rejected(message))
            }
        }
    }

    /// Clears the persisted identity and resets to the initial empty state.
    /// Synchronous; no backend call.
    pub fn logout(&self) {
        if let Err(err) = self.vault.clear() {
            warn!(%err, "failed to clear session vault");
        }
        self.with_state(|state| *state = SessionState::default());
    }

    /// Resets the error without touching the identity.
    pub fn clear_error(&self) {
        self.with_state(|state| state.error = None);
    }

    /// Merges partial fields into the current identity and persists the
    /// result, without a backend call. Returns the merged identity, or
    /// `None` when unauthenticated.
    pub fn apply_user(&self, patch: &UserPatch) -> Option<User> {
        let merged = self.current_user()?.merge(patch);
        if let Err(err) = self.vault.store(&merged) {
            warn!(%err, "failed to persist updated session");
        }
        self.with_state(|state| state.user = Some(merged.clone()));
        Some(merged)
    }

    /// Pushes a profile edit to the backend, then adopts the returned
    /// identity wholesale.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotAuthenticated` without an identity, or the
    /// underlying `ApiError`.
    pub async fn update_profile(&self, patch: &UserPatch) -> Result<User, ProfileError> {
        let id = self.user_id().ok_or(ProfileError::NotAuthenticated)?;
        let updated = self.api.update_user(id, patch).await?;
        if let Err(err) = self.vault.store(&updated) {
            warn!(%err, "failed to persist updated session");
        }
        self.with_state(|state| state.user = Some(updated.clone()));
        Ok(updated)
    }

    /// Sets or clears the profile image via the dedicated endpoint.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::update_profile`].
    pub async fn set_profile_image(&self, image: Option<&str>) -> Result<User, ProfileError> {
        let id = self.user_id().ok_or(ProfileError::NotAuthenticated)?;
        let updated = self.api.update_profile_image(id, image).await?;
        if let Err(err) = self.vault.store(&updated) {
            warn!(%err, "failed to persist updated session");
        }
        self.with_state(|state| state.user = Some(updated.clone()));
        Ok(updated)
    }

    /// Deletes the account on the backend, then behaves like logout.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::update_profile`].
    pub async fn delete_account(&self) -> Result<(), ProfileError> {
        let id = self.user_id().ok_or(ProfileError::NotAuthenticated)?;
        self.api.delete_user(id).await?;
        self.logout();
        Ok(())
    }
}

fn signup_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { body, .. } if !body.trim().is_empty() => body.trim().to_string(),
        _ => SIGNUP_FAILED.to_string(),
    }
}
