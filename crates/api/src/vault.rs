use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use chefs_core::model::User;

/// Errors surfaced when persisting the session identity.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VaultError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Local persistence for the current identity. One file, one serialized
/// [`User`].
#[derive(Debug, Clone)]
pub struct SessionVault {
    path: PathBuf,
}

impl SessionVault {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Conventional vault location under an app data directory.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("session.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted identity, if any.
    ///
    /// A missing file means no session. A file that fails to parse is
    /// discarded and removed, so one corrupt write cannot wedge startup.
    #[must_use]
    pub fn load(&self) -> Option<User> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to read session vault");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "discarding corrupt session vault");
                let _ = fs::remove_file(&self.path);
                None
            }
        }
    }

    /// Persists the identity, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `VaultError` on serialization or filesystem failure.
    pub fn store(&self, user: &User) -> Result<(), VaultError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(user)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Removes the persisted identity. Missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `VaultError` on any other filesystem failure.
    pub fn clear(&self) -> Result<(), VaultError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
