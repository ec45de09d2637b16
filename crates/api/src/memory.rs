use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::oneshot;

use chefs_core::model::{
    Achievement, AchievementId, Cuisine, CuisineId, Lesson, LessonBundle, LessonId,
    ProgressRecord, Skill, SkillId, User, UserId, UserPatch,
};
use chefs_core::validate::SignupPayload;

use crate::client::ChefsApi;
use crate::error::ApiError;

/// In-memory [`ChefsApi`] double for service and workflow tests.
///
/// Seeded through `seed_*` methods, observable through `call_count`, and
/// steerable through failure toggles. All state is behind `Arc`s so clones
/// share one backend.
#[derive(Clone)]
pub struct InMemoryApi {
    users: Arc<Mutex<HashMap<UserId, User>>>,
    credentials: Arc<Mutex<HashMap<String, (String, UserId)>>>,
    next_user_id: Arc<AtomicU64>,
    cuisines: Arc<Mutex<Vec<Cuisine>>>,
    skills: Arc<Mutex<Vec<Skill>>>,
    lessons: Arc<Mutex<Vec<Lesson>>>,
    bundles: Arc<Mutex<HashMap<LessonId, LessonBundle>>>,
    progress: Arc<Mutex<HashMap<(UserId, LessonId), ProgressRecord>>>,
    favorites: Arc<Mutex<HashMap<UserId, BTreeSet<CuisineId>>>>,
    achievements: Arc<Mutex<Vec<Achievement>>>,
    unlocks: Arc<Mutex<HashMap<UserId, Vec<AchievementId>>>>,

    calls: Arc<AtomicU64>,
    offline: Arc<AtomicBool>,
    fail_submit: Arc<AtomicBool>,
    fail_progress_fetch: Arc<AtomicBool>,
    fail_lessons: Arc<Mutex<HashSet<SkillId>>>,
    reject_user_refresh: Arc<AtomicBool>,
    progress_gates: Arc<Mutex<VecDeque<oneshot::Receiver<()>>>>,
}

impl Default for InMemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<'a, T>(mutex: &'a Mutex<T>) -> Result<MutexGuard<'a, T>, ApiError> {
    mutex.lock().map_err(|_| ApiError::Status {
        status: 500,
        body: "in-memory api lock poisoned".into(),
    })
}

fn not_found(what: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        body: format!("{what} not found"),
    }
}

impl InMemoryApi {
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Arc::default(),
            credentials: Arc::default(),
            next_user_id: Arc::new(AtomicU64::new(1)),
            cuisines: Arc::default(),
            skills: Arc::default(),
            lessons: Arc::default(),
            bundles: Arc::default(),
            progress: Arc::default(),
            favorites: Arc::default(),
            achievements: Arc::default(),
            unlocks: Arc::default(),
            calls: Arc::default(),
            offline: Arc::default(),
            fail_submit: Arc::default(),
            fail_progress_fetch: Arc::default(),
            fail_lessons: Arc::default(),
            reject_user_refresh: Arc::default(),
            progress_gates: Arc::default(),
        }
    }

    /// Number of trait calls observed. Lets tests assert that client-side
    /// validation short-circuits before any request.
    #[must_use]
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes every call fail with [`ApiError::Offline`] until unset, as if
    /// the backend were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Makes `submit_progress` answer with a 500 until unset.
    pub fn set_fail_submit(&self, fail: bool) {
        self.fail_submit.store(fail, Ordering::SeqCst);
    }

    /// Makes `list_progress` answer with a 500 until unset.
    pub fn set_fail_progress_fetch(&self, fail: bool) {
        self.fail_progress_fetch.store(fail, Ordering::SeqCst);
    }

    /// Makes `list_lessons` answer with a 500 for one skill, leaving the
    /// others intact.
    pub fn set_fail_lessons(&self, skill_id: SkillId) {
        if let Ok(mut failing) = self.fail_lessons.lock() {
            failing.insert(skill_id);
        }
    }

    /// Makes `get_user` answer with a 401, simulating an expired identity.
    pub fn set_reject_user_refresh(&self, reject: bool) {
        self.reject_user_refresh.store(reject, Ordering::SeqCst);
    }

    /// Queues a gate for the next `list_progress` call. The call reads its
    /// records, then parks until the returned sender fires (or is dropped),
    /// so a test can decide the order in which in-flight fetches complete.
    #[must_use]
    pub fn gate_next_progress_fetch(&self) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        if let Ok(mut gates) = self.progress_gates.lock() {
            gates.push_back(gate);
        }
        release
    }

    pub fn seed_user(&self, user: User, password: &str) {
        let id = user.id;
        let email = user.email.clone();
        if let Ok(mut users) = self.users.lock() {
            users.insert(id, user);
        }
        if let Ok(mut credentials) = self.credentials.lock() {
            credentials.insert(email, (password.to_string(), id));
        }
        // Keep auto-assigned signup ids clear of seeded ones.
        let floor = u64::try_from(id.value().max(0)).unwrap_or(0) + 1;
        self.next_user_id.fetch_max(floor, Ordering::SeqCst);
    }

    pub fn seed_cuisine(&self, cuisine: Cuisine) {
        if let Ok(mut cuisines) = self.cuisines.lock() {
            cuisines.push(cuisine);
        }
    }

    pub fn seed_skill(&self, skill: Skill) {
        if let Ok(mut skills) = self.skills.lock() {
            skills.push(skill);
        }
    }

    pub fn seed_lesson(&self, lesson: Lesson) {
        if let Ok(mut lessons) = self.lessons.lock() {
            lessons.push(lesson);
        }
    }

    pub fn seed_bundle(&self, bundle: LessonBundle) {
        if let Ok(mut bundles) = self.bundles.lock() {
            bundles.insert(bundle.lesson.id, bundle);
        }
    }

    pub fn seed_progress(&self, record: ProgressRecord) {
        if let Ok(mut progress) = self.progress.lock() {
            progress.insert((record.user_id, record.lesson_id), record);
        }
    }

    pub fn seed_achievement(&self, achievement: Achievement) {
        if let Ok(mut achievements) = self.achievements.lock() {
            achievements.push(achievement);
        }
    }

    pub fn seed_unlock(&self, user_id: UserId, achievement_id: AchievementId) {
        if let Ok(mut unlocks) = self.unlocks.lock() {
            unlocks.entry(user_id).or_default().push(achievement_id);
        }
    }

    fn record_call(&self) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Offline);
        }
        Ok(())
    }
}

#[async_trait]
impl ChefsApi for InMemoryApi {
    async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        self.record_call()?;
        let credentials = lock(&self.credentials)?;
        let Some((stored, id)) = credentials.get(email) else {
            return Err(ApiError::Status {
                status: 401,
                body: "Invalid credentials".into(),
            });
        };
        if stored != password {
            return Err(ApiError::Status {
                status: 401,
                body: "Invalid credentials".into(),
            });
        }
        let users = lock(&self.users)?;
        users.get(id).cloned().ok_or_else(|| not_found("user"))
    }

    async fn signup(&self, payload: &SignupPayload) -> Result<User, ApiError> {
        self.record_call()?;
        let mut credentials = lock(&self.credentials)?;
        if credentials.contains_key(&payload.email) {
            return Err(ApiError::Status {
                status: 409,
                body: "Email already registered".into(),
            });
        }
        let raw_id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        let id = UserId::new(i64::try_from(raw_id).unwrap_or(i64::MAX));
        let user = User {
            id,
            name: payload.name.clone(),
            username: payload.username.clone(),
            email: payload.email.clone(),
            is_admin: false,
            xp: 0,
            profile_image: None,
        };
        credentials.insert(payload.email.clone(), (payload.pwd.clone(), id));
        lock(&self.users)?.insert(id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        self.record_call()?;
        if self.reject_user_refresh.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 401,
                body: "Unauthorized".into(),
            });
        }
        lock(&self.users)?
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("user"))
    }

    async fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError> {
        self.record_call()?;
        let mut users = lock(&self.users)?;
        let current = users.get(&id).ok_or_else(|| not_found("user"))?;
        let updated = current.merge(patch);
        users.insert(id, updated.clone());
        Ok(updated)
    }

    async fn update_profile_image(
        &self,
        id: UserId,
        image: Option<&str>,
    ) -> Result<User, ApiError> {
        self.record_call()?;
        let mut users = lock(&self.users)?;
        let current = users.get_mut(&id).ok_or_else(|| not_found("user"))?;
        current.profile_image = image.map(str::to_owned);
        Ok(current.clone())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.record_call()?;
        let removed = lock(&self.users)?.remove(&id);
        if removed.is_none() {
            return Err(not_found("user"));
        }
        lock(&self.credentials)?.retain(|_, (_, user_id)| *user_id != id);
        lock(&self.progress)?.retain(|(user_id, _), _| *user_id != id);
        lock(&self.favorites)?.remove(&id);
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.record_call()?;
        let mut users: Vec<User> = lock(&self.users)?.values().cloned().collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn list_cuisines(&self) -> Result<Vec<Cuisine>, ApiError> {
        self.record_call()?;
        Ok(lock(&self.cuisines)?.clone())
    }

    async fn list_skills(&self, cuisine_id: CuisineId) -> Result<Vec<Skill>, ApiError> {
        self.record_call()?;
        let mut skills: Vec<Skill> = lock(&self.skills)?
            .iter()
            .filter(|skill| skill.cuisine_id == cuisine_id)
            .cloned()
            .collect();
        skills.sort_by_key(|skill| skill.order_index);
        Ok(skills)
    }

    async fn list_lessons(&self, skill_id: SkillId) -> Result<Vec<Lesson>, ApiError> {
        self.record_call()?;
        if lock(&self.fail_lessons)?.contains(&skill_id) {
            return Err(ApiError::Status {
                status: 500,
                body: "lesson list failed".into(),
            });
        }
        let mut lessons: Vec<Lesson> = lock(&self.lessons)?
            .iter()
            .filter(|lesson| lesson.skill_id == skill_id)
            .cloned()
            .collect();
        lessons.sort_by_key(|lesson| lesson.order_index);
        Ok(lessons)
    }

    async fn get_lesson_bundle(&self, lesson_id: LessonId) -> Result<LessonBundle, ApiError> {
        self.record_call()?;
        lock(&self.bundles)?
            .get(&lesson_id)
            .cloned()
            .ok_or_else(|| not_found("lesson"))
    }

    async fn list_progress(&self, user_id: UserId) -> Result<Vec<ProgressRecord>, ApiError> {
        self.record_call()?;
        let mut records: Vec<ProgressRecord> = lock(&self.progress)?
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.lesson_id);
        let gate = lock(&self.progress_gates)?.pop_front();
        if let Some(gate) = gate {
            // Records are captured before parking; only the response is
            // delayed, so a gated call answers with what it saw at request
            // time.
            let _ = gate.await;
        }
        // Checked after the gate so a parked call can be failed while it
        // waits.
        if self.fail_progress_fetch.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                body: "progress fetch failed".into(),
            });
        }
        Ok(records)
    }

    async fn submit_progress(&self, record: &ProgressRecord) -> Result<(), ApiError> {
        self.record_call()?;
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                body: "progress update failed".into(),
            });
        }
        lock(&self.progress)?.insert((record.user_id, record.lesson_id), record.clone());
        Ok(())
    }

    async fn list_favorite_cuisines(&self, user_id: UserId) -> Result<Vec<Cuisine>, ApiError> {
        self.record_call()?;
        let favorites = lock(&self.favorites)?;
        let Some(ids) = favorites.get(&user_id) else {
            return Ok(Vec::new());
        };
        let cuisines = lock(&self.cuisines)?;
        Ok(cuisines
            .iter()
            .filter(|cuisine| ids.contains(&cuisine.id))
            .cloned()
            .collect())
    }

    async fn add_favorite_cuisine(
        &self,
        user_id: UserId,
        cuisine_id: CuisineId,
    ) -> Result<(), ApiError> {
        self.record_call()?;
        lock(&self.favorites)?
            .entry(user_id)
            .or_default()
            .insert(cuisine_id);
        Ok(())
    }

    async fn remove_favorite_cuisine(
        &self,
        user_id: UserId,
        cuisine_id: CuisineId,
    ) -> Result<(), ApiError> {
        self.record_call()?;
        if let Some(set) = lock(&self.favorites)?.get_mut(&user_id) {
            set.remove(&cuisine_id);
        }
        Ok(())
    }

    async fn list_achievements(&self) -> Result<Vec<Achievement>, ApiError> {
        self.record_call()?;
        Ok(lock(&self.achievements)?.clone())
    }

    async fn list_user_achievements(&self, user_id: UserId) -> Result<Vec<Achievement>, ApiError> {
        self.record_call()?;
        let unlocks = lock(&self.unlocks)?;
        let Some(ids) = unlocks.get(&user_id) else {
            return Ok(Vec::new());
        };
        let achievements = lock(&self.achievements)?;
        Ok(achievements
            .iter()
            .filter(|achievement| ids.contains(&achievement.id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, email: &str) -> User {
        User {
            id: UserId::new(id),
            name: "Test".into(),
            username: "test".into(),
            email: email.into(),
            is_admin: false,
            xp: 0,
            profile_image: None,
        }
    }

    #[tokio::test]
    async fn login_checks_password() {
        let api = InMemoryApi::new();
        api.seed_user(user(1, "a@b.com"), "secret1");

        assert!(api.login("a@b.com", "secret1").await.is_ok());
        let err = api.login("a@b.com", "wrong").await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_email_with_text_body() {
        let api = InMemoryApi::new();
        api.seed_user(user(1, "a@b.com"), "secret1");

        let payload = SignupPayload {
            name: "Dup".into(),
            username: "dup".into(),
            email: "a@b.com".into(),
            pwd: "secret1".into(),
        };
        let err = api.signup(&payload).await.unwrap_err();
        assert_eq!(err.message(), "Email already registered");
    }

    #[tokio::test]
    async fn signup_assigns_ids_above_seeded_users() {
        let api = InMemoryApi::new();
        api.seed_user(user(10, "a@b.com"), "secret1");

        let payload = SignupPayload {
            name: "New".into(),
            username: "new".into(),
            email: "new@b.com".into(),
            pwd: "secret1".into(),
        };
        let created = api.signup(&payload).await.unwrap();
        assert!(created.id.value() > 10);
    }

    #[tokio::test]
    async fn submit_progress_is_last_write_wins() {
        let api = InMemoryApi::new();
        let first = ProgressRecord::completion(UserId::new(1), LessonId::new(2), 80);
        let second = ProgressRecord::completion(UserId::new(1), LessonId::new(2), 100);
        api.submit_progress(&first).await.unwrap();
        api.submit_progress(&second).await.unwrap();

        let records = api.list_progress(UserId::new(1)).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].score, Some(100));
    }
}
