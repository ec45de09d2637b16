use std::sync::Arc;

use api::{ApiError, ChefsApi};
use chefs_core::model::{AchievementStatus, UserId, merge_unlocks};

/// Merges the achievement catalog with the user's unlock list. Unlock rules
/// are computed by the backend; this client only joins the two endpoints.
#[derive(Clone)]
pub struct AchievementsService {
    api: Arc<dyn ChefsApi>,
}

impl AchievementsService {
    #[must_use]
    pub fn new(api: Arc<dyn ChefsApi>) -> Self {
        Self { api }
    }

    /// Fetches catalog and unlock state concurrently and joins them.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if either request fails.
    pub async fn for_user(&self, user_id: UserId) -> Result<Vec<AchievementStatus>, ApiError> {
        let (catalog, unlocked) = tokio::join!(
            self.api.list_achievements(),
            self.api.list_user_achievements(user_id),
        );
        Ok(merge_unlocks(catalog?, &unlocked?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::InMemoryApi;
    use chefs_core::model::{Achievement, AchievementId};

    #[tokio::test]
    async fn joins_catalog_with_unlocks() {
        let api = InMemoryApi::new();
        for (id, title) in [(1, "First Dish"), (2, "Quiz Whiz")] {
            api.seed_achievement(Achievement {
                id: AchievementId::new(id),
                title: title.into(),
                description: None,
                icon: None,
            });
        }
        let user = UserId::new(4);
        api.seed_unlock(user, AchievementId::new(2));

        let service = AchievementsService::new(Arc::new(api));
        let statuses = service.for_user(user).await.unwrap();
        assert_eq!(statuses.len(), 2);
        assert!(!statuses[0].unlocked);
        assert!(statuses[1].unlocked);
    }

    #[tokio::test]
    async fn user_with_no_unlocks_sees_everything_locked() {
        let api = InMemoryApi::new();
        api.seed_achievement(Achievement {
            id: AchievementId::new(1),
            title: "First Dish".into(),
            description: None,
            icon: None,
        });

        let service = AchievementsService::new(Arc::new(api));
        let statuses = service.for_user(UserId::new(99)).await.unwrap();
        assert!(statuses.iter().all(|status| !status.unlocked));
    }
}
