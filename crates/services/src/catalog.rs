use std::collections::HashSet;
use std::sync::Arc;

use api::{ApiError, ChefsApi};
use chefs_core::model::{
    Cuisine, CuisineId, Lesson, LessonBundle, LessonId, ProgressSummary, Skill, SkillId, User,
    UserId,
};

use crate::error::CatalogError;

/// Read-side queries over the content catalog plus the admin user list.
/// Stateless; every view fetches fresh (no cross-view cache, matching the
/// backend-owned data model).
#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn ChefsApi>,
}

impl CatalogService {
    #[must_use]
    pub fn new(api: Arc<dyn ChefsApi>) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn cuisines(&self) -> Result<Vec<Cuisine>, ApiError> {
        self.api.list_cuisines().await
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn skills(&self, cuisine_id: CuisineId) -> Result<Vec<Skill>, ApiError> {
        self.api.list_skills(cuisine_id).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn lessons(&self, skill_id: SkillId) -> Result<Vec<Lesson>, ApiError> {
        self.api.list_lessons(skill_id).await
    }

    /// Fetches lesson content and quizzes, validating the quiz shape at
    /// ingestion so the attempt state machine never sees a malformed
    /// question.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Api` for request failures and
    /// `CatalogError::Quiz` for malformed quiz data.
    pub async fn lesson_bundle(&self, lesson_id: LessonId) -> Result<LessonBundle, CatalogError> {
        let bundle = self.api.get_lesson_bundle(lesson_id).await?;
        Ok(bundle.into_validated()?)
    }

    /// Completion rollup for one skill's lessons.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the lesson list cannot be fetched.
    pub async fn skill_progress(
        &self,
        skill_id: SkillId,
        completed: &HashSet<LessonId>,
    ) -> Result<ProgressSummary, ApiError> {
        crate::rollup::skill_progress(self.api.as_ref(), completed, skill_id).await
    }

    /// Completion rollup across every skill of a cuisine.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the skill list cannot be fetched.
    pub async fn cuisine_progress(
        &self,
        cuisine_id: CuisineId,
        completed: &HashSet<LessonId>,
    ) -> Result<ProgressSummary, ApiError> {
        crate::rollup::cuisine_progress(self.api.as_ref(), completed, cuisine_id).await
    }

    /// Admin: list every registered user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.api.list_users().await
    }

    /// Admin: delete a user by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.api.delete_user(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::InMemoryApi;
    use chefs_core::model::{Quiz, QuizError, QuizId};

    fn bundle_with_quiz(correct_answer: &str) -> LessonBundle {
        LessonBundle {
            lesson: Lesson {
                id: LessonId::new(1),
                skill_id: SkillId::new(1),
                name: "Sauces".into(),
                description: None,
                order_index: 0,
                xp_reward: 10,
                icon: None,
            },
            content: Vec::new(),
            quizzes: vec![Quiz {
                id: QuizId::new(1),
                lesson_id: LessonId::new(1),
                question_text: "What is a roux?".into(),
                correct_answer: correct_answer.into(),
                wrong_answer1: "a".into(),
                wrong_answer2: "b".into(),
                wrong_answer3: "c".into(),
                explanation: None,
                order_index: 0,
            }],
        }
    }

    #[tokio::test]
    async fn lesson_bundle_validates_quiz_shape() {
        let api = InMemoryApi::new();
        api.seed_bundle(bundle_with_quiz(""));
        let catalog = CatalogService::new(Arc::new(api));

        let err = catalog.lesson_bundle(LessonId::new(1)).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Quiz(QuizError::MissingCorrectAnswer { .. })
        ));
    }

    #[tokio::test]
    async fn lesson_bundle_passes_valid_data_through() {
        let api = InMemoryApi::new();
        api.seed_bundle(bundle_with_quiz("flour and fat"));
        let catalog = CatalogService::new(Arc::new(api));

        let bundle = catalog.lesson_bundle(LessonId::new(1)).await.unwrap();
        assert_eq!(bundle.quizzes.len(), 1);
    }

    #[tokio::test]
    async fn missing_lesson_surfaces_api_error() {
        let api = InMemoryApi::new();
        let catalog = CatalogService::new(Arc::new(api));

        let err = catalog.lesson_bundle(LessonId::new(404)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Api(_)));
    }
}
