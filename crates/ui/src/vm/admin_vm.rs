use chefs_core::model::{User, UserId};

/// One user row in the admin table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRowVm {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub email: String,
    pub role_label: String,
    pub xp_label: String,
    /// The signed-in admin. Self-deletion goes through the profile page,
    /// not the admin table.
    pub is_self: bool,
}

#[must_use]
pub fn map_user_rows(users: &[User], current: Option<UserId>) -> Vec<UserRowVm> {
    users
        .iter()
        .map(|user| UserRowVm {
            id: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            role_label: if user.is_admin {
                "Admin".to_string()
            } else {
                "Member".to_string()
            },
            xp_label: user.xp.to_string(),
            is_self: current == Some(user.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str, is_admin: bool) -> User {
        User {
            id: UserId::new(id),
            name: name.to_string(),
            username: name.to_lowercase(),
            email: format!("{}@example.com", name.to_lowercase()),
            is_admin,
            xp: 120,
            profile_image: None,
        }
    }

    #[test]
    fn marks_the_signed_in_admin() {
        let rows = map_user_rows(
            &[user(1, "Ada", true), user(2, "Ben", false)],
            Some(UserId::new(1)),
        );
        assert!(rows[0].is_self);
        assert!(!rows[1].is_self);
        assert_eq!(rows[0].role_label, "Admin");
        assert_eq!(rows[1].role_label, "Member");
    }

    #[test]
    fn handles_no_current_user() {
        let rows = map_user_rows(&[user(1, "Ada", false)], None);
        assert!(!rows[0].is_self);
        assert_eq!(rows[0].xp_label, "120");
    }
}
