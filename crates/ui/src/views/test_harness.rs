use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use tempfile::TempDir;

use api::{ChefsApi, InMemoryApi, SessionVault};
use chefs_core::model::User;
use chefs_core::time::fixed_clock;
use services::{
    AchievementsService, CatalogService, FavoritesService, ProgressTracker, SessionStore,
};

use crate::context::{UiApp, build_app_context};
use crate::views::{AchievementsView, CuisinesView, HomeView, LoginView, SkillView};

#[derive(Clone)]
struct TestApp {
    session: Arc<SessionStore>,
    progress: Arc<ProgressTracker>,
    catalog: CatalogService,
    favorites: FavoritesService,
    achievements: AchievementsService,
}

impl UiApp for TestApp {
    fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    fn progress(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.progress)
    }

    fn catalog(&self) -> CatalogService {
        self.catalog.clone()
    }

    fn favorites(&self) -> FavoritesService {
        self.favorites.clone()
    }

    fn achievements(&self) -> AchievementsService {
        self.achievements.clone()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Home,
    Cuisines,
    Skill(i64),
    Achievements,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Cuisines => rsx! { CuisinesView {} },
        ViewKind::Skill(id) => rsx! { SkillView { id } },
        ViewKind::Achievements => rsx! { AchievementsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub api: Arc<InMemoryApi>,
    // Holds the vault directory alive for the harness lifetime.
    _dir: TempDir,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Lets spawned resources make progress, then flushes the result.
    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn seeded_user(id: i64, name: &str) -> User {
    User {
        id: chefs_core::model::UserId::new(id),
        name: name.to_string(),
        username: name.to_lowercase(),
        email: format!("{}@example.com", name.to_lowercase()),
        is_admin: false,
        xp: 0,
        profile_image: None,
    }
}

/// Builds a harness over an in-memory backend. When `signed_in` names a
/// seeded user, the store is logged in before the first render.
pub async fn setup_view_harness(
    view: ViewKind,
    api: Arc<InMemoryApi>,
    signed_in: Option<(&str, &str)>,
) -> ViewHarness {
    let dir = tempfile::tempdir().expect("temp dir");
    let vault = SessionVault::in_dir(dir.path());
    let api_dyn: Arc<dyn ChefsApi> = Arc::clone(&api) as Arc<dyn ChefsApi>;

    let session = Arc::new(SessionStore::new(Arc::clone(&api_dyn), vault));
    if let Some((email, password)) = signed_in {
        session.login(email, password).await.expect("login");
    }

    let app = Arc::new(TestApp {
        session,
        progress: Arc::new(ProgressTracker::new(Arc::clone(&api_dyn), fixed_clock())),
        catalog: CatalogService::new(Arc::clone(&api_dyn)),
        favorites: FavoritesService::new(Arc::clone(&api_dyn)),
        achievements: AchievementsService::new(api_dyn),
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        api,
        _dir: dir,
    }
}
