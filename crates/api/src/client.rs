use async_trait::async_trait;

use chefs_core::model::{
    Achievement, Cuisine, CuisineId, Lesson, LessonBundle, LessonId, ProgressRecord, Skill,
    SkillId, User, UserId, UserPatch,
};
use chefs_core::validate::SignupPayload;

use crate::error::ApiError;

/// The backend REST surface this client consumes, one method per endpoint.
///
/// Services depend on this trait, never on a concrete transport, so tests
/// can substitute [`crate::InMemoryApi`].
#[async_trait]
pub trait ChefsApi: Send + Sync {
    /// `POST /users/login`
    async fn login(&self, email: &str, password: &str) -> Result<User, ApiError>;

    /// `POST /users/signup`
    async fn signup(&self, payload: &SignupPayload) -> Result<User, ApiError>;

    /// `GET /users/:id`
    async fn get_user(&self, id: UserId) -> Result<User, ApiError>;

    /// `PUT /users/:id`
    async fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError>;

    /// `PUT /users/:id/profile-image`
    async fn update_profile_image(
        &self,
        id: UserId,
        image: Option<&str>,
    ) -> Result<User, ApiError>;

    /// `DELETE /users/:id`
    async fn delete_user(&self, id: UserId) -> Result<(), ApiError>;

    /// `GET /users` (admin)
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// `GET /cuisines`
    async fn list_cuisines(&self) -> Result<Vec<Cuisine>, ApiError>;

    /// `GET /skills/cuisine/:cuisineId`
    async fn list_skills(&self, cuisine_id: CuisineId) -> Result<Vec<Skill>, ApiError>;

    /// `GET /lessons/skill/:skillId`
    async fn list_lessons(&self, skill_id: SkillId) -> Result<Vec<Lesson>, ApiError>;

    /// `GET /lessons/:lessonId/full`
    async fn get_lesson_bundle(&self, lesson_id: LessonId) -> Result<LessonBundle, ApiError>;

    /// `GET /user-progress/user/:userId`
    async fn list_progress(&self, user_id: UserId) -> Result<Vec<ProgressRecord>, ApiError>;

    /// `POST /user-progress/update`
    async fn submit_progress(&self, record: &ProgressRecord) -> Result<(), ApiError>;

    /// `GET /users/:userId/favorites/cuisines`
    async fn list_favorite_cuisines(&self, user_id: UserId) -> Result<Vec<Cuisine>, ApiError>;

    /// `POST /users/:userId/favorites/cuisines/:cuisineId`
    async fn add_favorite_cuisine(
        &self,
        user_id: UserId,
        cuisine_id: CuisineId,
    ) -> Result<(), ApiError>;

    /// `DELETE /users/:userId/favorites/cuisines/:cuisineId`
    async fn remove_favorite_cuisine(
        &self,
        user_id: UserId,
        cuisine_id: CuisineId,
    ) -> Result<(), ApiError>;

    /// `GET /achievements`
    async fn list_achievements(&self) -> Result<Vec<Achievement>, ApiError>;

    /// `GET /achievements/user/:userId`
    async fn list_user_achievements(&self, user_id: UserId) -> Result<Vec<Achievement>, ApiError>;
}
