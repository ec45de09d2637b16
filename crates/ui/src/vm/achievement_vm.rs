use chefs_core::model::AchievementStatus;

/// One achievement badge for the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AchievementVm {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
    pub state_label: String,
}

/// Unlocked badges sort ahead of locked ones; catalog order breaks ties.
#[must_use]
pub fn map_achievements(statuses: &[AchievementStatus]) -> Vec<AchievementVm> {
    let mut badges: Vec<AchievementVm> = statuses
        .iter()
        .map(|status| AchievementVm {
            title: status.achievement.title.clone(),
            description: status.achievement.description.clone().unwrap_or_default(),
            icon: status
                .achievement
                .icon
                .clone()
                .unwrap_or_else(|| "🏅".to_string()),
            unlocked: status.unlocked,
            state_label: if status.unlocked {
                "Unlocked".to_string()
            } else {
                "Locked".to_string()
            },
        })
        .collect();
    badges.sort_by_key(|badge| !badge.unlocked);
    badges
}

#[cfg(test)]
mod tests {
    use chefs_core::model::{Achievement, AchievementId};

    use super::*;

    fn status(id: i64, title: &str, unlocked: bool) -> AchievementStatus {
        AchievementStatus {
            achievement: Achievement {
                id: AchievementId::new(id),
                title: title.to_string(),
                description: None,
                icon: None,
            },
            unlocked,
        }
    }

    #[test]
    fn unlocked_badges_come_first() {
        let badges = map_achievements(&[
            status(1, "First Dish", false),
            status(2, "Streak", true),
            status(3, "Quiz Whiz", false),
        ]);
        assert_eq!(badges[0].title, "Streak");
        assert_eq!(badges[0].state_label, "Unlocked");
        assert_eq!(badges[1].title, "First Dish");
        assert_eq!(badges[2].title, "Quiz Whiz");
    }

    #[test]
    fn missing_icon_falls_back_to_default() {
        let badges = map_achievements(&[status(1, "First Dish", true)]);
        assert_eq!(badges[0].icon, "🏅");
    }
}
