//! Completion rollups for a skill or a whole cuisine.

use std::collections::HashSet;

use tracing::debug;

use api::{ApiError, ChefsApi};
use chefs_core::model::{CuisineId, LessonId, ProgressSummary, SkillId};

/// Progress over one skill: how many of its lessons are in the completed
/// set.
///
/// # Errors
///
/// Returns `ApiError` if the lesson list cannot be fetched.
pub async fn skill_progress(
    api: &dyn ChefsApi,
    completed: &HashSet<LessonId>,
    skill_id: SkillId,
) -> Result<ProgressSummary, ApiError> {
    let lessons = api.list_lessons(skill_id).await?;
    let ids: Vec<LessonId> = lessons.iter().map(|lesson| lesson.id).collect();
    Ok(ProgressSummary::for_lessons(&ids, completed))
}

/// Progress over a cuisine: summed across every skill under it.
///
/// One lessons call per skill, matching the backend's shape (there is no
/// batch endpoint). A skill whose lessons fetch fails is skipped rather than
/// failing the whole rollup.
///
/// # Errors
///
/// Returns `ApiError` only if the skill list itself cannot be fetched.
pub async fn cuisine_progress(
    api: &dyn ChefsApi,
    completed: &HashSet<LessonId>,
    cuisine_id: CuisineId,
) -> Result<ProgressSummary, ApiError> {
    let skills = api.list_skills(cuisine_id).await?;

    let mut summary = ProgressSummary::default();
    for skill in &skills {
        match skill_progress(api, completed, skill.id).await {
            Ok(part) => summary = summary.combine(part),
            Err(err) => {
                debug!(skill = %skill.id, %err, "skipping skill in cuisine rollup");
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::InMemoryApi;
    use chefs_core::model::{Cuisine, Lesson, Skill};

    fn seed_catalog(api: &InMemoryApi) {
        api.seed_cuisine(Cuisine {
            id: CuisineId::new(1),
            name: "Italian".into(),
            icon: None,
            description: None,
        });
        for (skill_id, lesson_ids) in [(1, vec![1, 2]), (2, vec![3])] {
            api.seed_skill(Skill {
                id: SkillId::new(skill_id),
                cuisine_id: CuisineId::new(1),
                name: format!("Skill {skill_id}"),
                description: None,
                order_index: 0,
            });
            for lesson_id in lesson_ids {
                api.seed_lesson(Lesson {
                    id: LessonId::new(lesson_id),
                    skill_id: SkillId::new(skill_id),
                    name: format!("Lesson {lesson_id}"),
                    description: None,
                    order_index: 0,
                    xp_reward: 10,
                    icon: None,
                });
            }
        }
    }

    #[tokio::test]
    async fn skill_progress_counts_completed_lessons() {
        let api = InMemoryApi::new();
        seed_catalog(&api);
        let completed: HashSet<LessonId> = [LessonId::new(1)].into_iter().collect();

        let summary = skill_progress(&api, &completed, SkillId::new(1))
            .await
            .unwrap();
        assert_eq!(summary.completed(), 1);
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.percentage(), 50.0);
    }

    #[tokio::test]
    async fn cuisine_progress_sums_across_skills() {
        let api = InMemoryApi::new();
        seed_catalog(&api);
        let completed: HashSet<LessonId> =
            [LessonId::new(1), LessonId::new(3)].into_iter().collect();

        let summary = cuisine_progress(&api, &completed, CuisineId::new(1))
            .await
            .unwrap();
        assert_eq!(summary.completed(), 2);
        assert_eq!(summary.total(), 3);
    }

    #[tokio::test]
    async fn cuisine_progress_skips_a_skill_whose_lessons_fail() {
        let api = InMemoryApi::new();
        seed_catalog(&api);
        api.set_fail_lessons(SkillId::new(1));
        let completed: HashSet<LessonId> =
            [LessonId::new(1), LessonId::new(3)].into_iter().collect();

        // On its own the failing skill is an error.
        assert!(
            skill_progress(&api, &completed, SkillId::new(1))
                .await
                .is_err()
        );

        // Rolled into the cuisine it is skipped, so only skill 2 counts.
        let summary = cuisine_progress(&api, &completed, CuisineId::new(1))
            .await
            .unwrap();
        assert_eq!(summary.completed(), 1);
        assert_eq!(summary.total(), 1);
    }

    #[tokio::test]
    async fn empty_scope_yields_zero_percentage() {
        let api = InMemoryApi::new();
        let completed = HashSet::new();

        let summary = skill_progress(&api, &completed, SkillId::new(42))
            .await
            .unwrap();
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.percentage(), 0.0);
    }
}
