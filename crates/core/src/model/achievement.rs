use serde::{Deserialize, Serialize};

use super::ids::AchievementId;

/// Catalog entry describing an achievement. Unlock rules live on the
/// backend; the client only merges the catalog with the user's unlock list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: AchievementId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// An achievement joined with whether the current user has unlocked it.
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementStatus {
    pub achievement: Achievement,
    pub unlocked: bool,
}

/// Joins the full catalog with the user's unlocked subset.
#[must_use]
pub fn merge_unlocks(
    catalog: Vec<Achievement>,
    unlocked: &[Achievement],
) -> Vec<AchievementStatus> {
    let unlocked_ids: std::collections::HashSet<AchievementId> =
        unlocked.iter().map(|a| a.id).collect();
    catalog
        .into_iter()
        .map(|achievement| AchievementStatus {
            unlocked: unlocked_ids.contains(&achievement.id),
            achievement,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn achievement(id: i64, title: &str) -> Achievement {
        Achievement {
            id: AchievementId::new(id),
            title: title.into(),
            description: None,
            icon: None,
        }
    }

    #[test]
    fn merge_marks_only_unlocked_entries() {
        let catalog = vec![achievement(1, "First Dish"), achievement(2, "Streak 7")];
        let unlocked = vec![achievement(2, "Streak 7")];

        let merged = merge_unlocks(catalog, &unlocked);
        assert_eq!(merged.len(), 2);
        assert!(!merged[0].unlocked);
        assert!(merged[1].unlocked);
    }
}
