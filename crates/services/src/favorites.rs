use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use api::{ApiError, ChefsApi};
use chefs_core::model::{Cuisine, CuisineId, UserId};

#[derive(Debug, Default)]
struct FavoritesState {
    cuisines: Vec<Cuisine>,
    ids: HashSet<CuisineId>,
    error: Option<String>,
}

/// The user's favorite cuisines: fetch, membership checks, add/remove/
/// toggle. Mutations go through the backend first, then re-fetch.
#[derive(Clone)]
pub struct FavoritesService {
    api: Arc<dyn ChefsApi>,
    state: Arc<Mutex<FavoritesState>>,
}

impl FavoritesService {
    #[must_use]
    pub fn new(api: Arc<dyn ChefsApi>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(FavoritesState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FavoritesState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Refreshes the favorites list. Failures land in the error field.
    pub async fn fetch(&self, user_id: UserId) {
        match self.api.list_favorite_cuisines(user_id).await {
            Ok(cuisines) => {
                let mut state = self.lock();
                state.ids = cuisines.iter().map(|cuisine| cuisine.id).collect();
                state.cuisines = cuisines;
                state.error = None;
            }
            Err(err) => {
                warn!(%err, "failed to fetch favorite cuisines");
                self.lock().error = Some(err.message());
            }
        }
    }

    #[must_use]
    pub fn is_favorite(&self, cuisine_id: CuisineId) -> bool {
        self.lock().ids.contains(&cuisine_id)
    }

    #[must_use]
    pub fn favorites(&self) -> Vec<Cuisine> {
        self.lock().cuisines.clone()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the backend rejects the mutation.
    pub async fn add(&self, user_id: UserId, cuisine_id: CuisineId) -> Result<(), ApiError> {
        self.api.add_favorite_cuisine(user_id, cuisine_id).await?;
        self.lock().ids.insert(cuisine_id);
        self.fetch(user_id).await;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the backend rejects the mutation.
    pub async fn remove(&self, user_id: UserId, cuisine_id: CuisineId) -> Result<(), ApiError> {
        self.api
            .remove_favorite_cuisine(user_id, cuisine_id)
            .await?;
        self.lock().ids.remove(&cuisine_id);
        self.fetch(user_id).await;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the backend rejects the mutation.
    pub async fn toggle(&self, user_id: UserId, cuisine_id: CuisineId) -> Result<bool, ApiError> {
        if self.is_favorite(cuisine_id) {
            self.remove(user_id, cuisine_id).await?;
            Ok(false)
        } else {
            self.add(user_id, cuisine_id).await?;
            Ok(true)
        }
    }

    /// Drops cached favorites (used on logout).
    pub fn reset(&self) {
        *self.lock() = FavoritesState::default();
    }
}
