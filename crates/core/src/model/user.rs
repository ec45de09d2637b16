use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// The authenticated identity as the backend returns it.
///
/// This is the shape persisted to the session vault, so wire names are kept
/// stable via camelCase renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub xp: i64,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl User {
    /// Field-wise merge of a partial update into this identity.
    ///
    /// Unset patch fields leave the current value untouched. `profile_image`
    /// uses a double `Option` so the patch can distinguish "unchanged" from
    /// "cleared".
    #[must_use]
    pub fn merge(&self, patch: &UserPatch) -> Self {
        Self {
            id: self.id,
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            username: patch
                .username
                .clone()
                .unwrap_or_else(|| self.username.clone()),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
            is_admin: patch.is_admin.unwrap_or(self.is_admin),
            xp: patch.xp.unwrap_or(self.xp),
            profile_image: match &patch.profile_image {
                Some(value) => value.clone(),
                None => self.profile_image.clone(),
            },
        }
    }
}

/// Partial update to a [`User`], as produced by profile edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xp: Option<i64>,
    /// `Some(None)` clears the image, `None` leaves it untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<Option<String>>,
}

impl UserPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.is_admin.is_none()
            && self.xp.is_none()
            && self.profile_image.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new(7),
            name: "Ada".into(),
            username: "ada".into(),
            email: "ada@example.com".into(),
            is_admin: false,
            xp: 120,
            profile_image: Some("avatar.png".into()),
        }
    }

    #[test]
    fn merge_applies_only_set_fields() {
        let user = sample_user();
        let patch = UserPatch {
            name: Some("Ada L.".into()),
            xp: Some(150),
            ..UserPatch::default()
        };

        let merged = user.merge(&patch);
        assert_eq!(merged.name, "Ada L.");
        assert_eq!(merged.xp, 150);
        assert_eq!(merged.username, "ada");
        assert_eq!(merged.email, "ada@example.com");
        assert_eq!(merged.profile_image.as_deref(), Some("avatar.png"));
    }

    #[test]
    fn merge_can_clear_profile_image() {
        let user = sample_user();
        let patch = UserPatch {
            profile_image: Some(None),
            ..UserPatch::default()
        };

        assert_eq!(user.merge(&patch).profile_image, None);
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let user = sample_user();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("isAdmin").is_some());
        assert!(json.get("profileImage").is_some());
        assert!(json.get("is_admin").is_none());
    }
}
