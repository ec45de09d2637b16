use std::sync::Arc;

use services::{
    AchievementsService, CatalogService, FavoritesService, ProgressTracker, SessionStore,
};

/// What the composition root must provide to the UI.
pub trait UiApp: Send + Sync {
    fn session(&self) -> Arc<SessionStore>;
    fn progress(&self) -> Arc<ProgressTracker>;
    fn catalog(&self) -> CatalogService;
    fn favorites(&self) -> FavoritesService;
    fn achievements(&self) -> AchievementsService;
}

/// Cloneable handle the views pull from Dioxus context. Holds `Arc`s only,
/// so cloning per view is cheap.
#[derive(Clone)]
pub struct AppContext {
    session: Arc<SessionStore>,
    progress: Arc<ProgressTracker>,
    catalog: CatalogService,
    favorites: FavoritesService,
    achievements: AchievementsService,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            progress: app.progress(),
            catalog: app.catalog(),
            favorites: app.favorites(),
            achievements: app.achievements(),
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn catalog(&self) -> CatalogService {
        self.catalog.clone()
    }

    #[must_use]
    pub fn favorites(&self) -> FavoritesService {
        self.favorites.clone()
    }

    #[must_use]
    pub fn achievements(&self) -> AchievementsService {
        self.achievements.clone()
    }
}

// This context is provided by the application composition root (crates/app).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
