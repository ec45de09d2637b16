use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use chefs_core::model::{
    Achievement, Cuisine, CuisineId, Lesson, LessonBundle, LessonId, ProgressRecord, Skill,
    SkillId, User, UserId, UserPatch,
};
use chefs_core::validate::SignupPayload;

use crate::client::ChefsApi;
use crate::error::ApiError;

/// `reqwest`-backed implementation of [`ChefsApi`].
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base: String,
}

impl HttpApi {
    /// Builds a client against the given API base (e.g.
    /// `http://localhost:8080/api`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if the base does not parse as an
    /// absolute URL.
    pub fn new(base: &str) -> Result<Self, ApiError> {
        let trimmed = base.trim().trim_end_matches('/');
        // Parse only to validate; path joining stays plain string formatting.
        let _ = Url::parse(trimmed)?;
        Ok(Self {
            client: Client::new(),
            base: trimmed.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.client.get(self.endpoint(path)).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

async fn expect_ok(response: Response) -> Result<(), ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(())
}

#[async_trait]
impl ChefsApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let response = self
            .client
            .post(self.endpoint("users/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        decode(response).await
    }

    async fn signup(&self, payload: &SignupPayload) -> Result<User, ApiError> {
        let response = self
            .client
            .post(self.endpoint("users/signup"))
            .json(payload)
            .send()
            .await?;
        decode(response).await
    }

    async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        self.get_json(&format!("users/{id}")).await
    }

    async fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError> {
        let response = self
            .client
            .put(self.endpoint(&format!("users/{id}")))
            .json(patch)
            .send()
            .await?;
        decode(response).await
    }

    async fn update_profile_image(
        &self,
        id: UserId,
        image: Option<&str>,
    ) -> Result<User, ApiError> {
        let response = self
            .client
            .put(self.endpoint(&format!("users/{id}/profile-image")))
            .json(&json!({ "profileImage": image }))
            .send()
            .await?;
        decode(response).await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("users/{id}")))
            .send()
            .await?;
        expect_ok(response).await
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("users").await
    }

    async fn list_cuisines(&self) -> Result<Vec<Cuisine>, ApiError> {
        self.get_json("cuisines").await
    }

    async fn list_skills(&self, cuisine_id: CuisineId) -> Result<Vec<Skill>, ApiError> {
        self.get_json(&format!("skills/cuisine/{cuisine_id}")).await
    }

    async fn list_lessons(&self, skill_id: SkillId) -> Result<Vec<Lesson>, ApiError> {
        self.get_json(&format!("lessons/skill/{skill_id}")).await
    }

    async fn get_lesson_bundle(&self, lesson_id: LessonId) -> Result<LessonBundle, ApiError> {
        self.get_json(&format!("lessons/{lesson_id}/full")).await
    }

    async fn list_progress(&self, user_id: UserId) -> Result<Vec<ProgressRecord>, ApiError> {
        self.get_json(&format!("user-progress/user/{user_id}"))
            .await
    }

    async fn submit_progress(&self, record: &ProgressRecord) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint("user-progress/update"))
            .json(record)
            .send()
            .await?;
        // The backend echoes the updated record (or user); the client
        // reconciles by re-fetching, so the body is not decoded here.
        expect_ok(response).await
    }

    async fn list_favorite_cuisines(&self, user_id: UserId) -> Result<Vec<Cuisine>, ApiError> {
        self.get_json(&format!("users/{user_id}/favorites/cuisines"))
            .await
    }

    async fn add_favorite_cuisine(
        &self,
        user_id: UserId,
        cuisine_id: CuisineId,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint(&format!(
                "users/{user_id}/favorites/cuisines/{cuisine_id}"
            )))
            .send()
            .await?;
        expect_ok(response).await
    }

    async fn remove_favorite_cuisine(
        &self,
        user_id: UserId,
        cuisine_id: CuisineId,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.endpoint(&format!(
                "users/{user_id}/favorites/cuisines/{cuisine_id}"
            )))
            .send()
            .await?;
        expect_ok(response).await
    }

    async fn list_achievements(&self) -> Result<Vec<Achievement>, ApiError> {
        self.get_json("achievements").await
    }

    async fn list_user_achievements(&self, user_id: UserId) -> Result<Vec<Achievement>, ApiError> {
        self.get_json(&format!("achievements/user/{user_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let api = HttpApi::new("http://localhost:8080/api/").unwrap();
        assert_eq!(api.endpoint("cuisines"), "http://localhost:8080/api/cuisines");
    }

    #[test]
    fn relative_base_url_is_rejected() {
        assert!(matches!(
            HttpApi::new("/api"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }
}
