use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use crate::context::AppContext;
use crate::views::{
    AchievementsView, AdminView, CuisineView, CuisinesView, HomeView, LessonView, LoginView,
    ProfileView, QuizView, SignupView, SkillView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login", LoginView)] Login {},
    #[route("/signup", SignupView)] Signup {},
    #[layout(Protected)]
        #[route("/", HomeView)] Home {},
        #[route("/cuisines", CuisinesView)] Cuisines {},
        #[route("/cuisines/:id", CuisineView)] Cuisine { id: i64 },
        #[route("/skills/:id", SkillView)] Skill { id: i64 },
        #[route("/lessons/:id", LessonView)] Lesson { id: i64 },
        #[route("/lessons/:lesson_id/quiz", QuizView)] Quiz { lesson_id: i64 },
        #[route("/profile", ProfileView)] Profile {},
        #[route("/achievements", AchievementsView)] Achievements {},
        #[route("/admin", AdminView)] Admin {},
}

/// Route guard: everything under this layout requires an authenticated
/// session. Unauthenticated visits are redirected to the login page before
/// any protected view renders.
#[component]
fn Protected() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    if !ctx.session().is_authenticated() {
        navigator.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let user = ctx.session().current_user();
    let is_admin = user.as_ref().is_some_and(|user| user.is_admin);
    let display_name = user.map_or_else(String::new, |user| user.name);

    rsx! {
        nav { class: "sidebar",
            h1 { "Chef's Circle" }
            p { class: "sidebar-user", "{display_name}" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::Cuisines {}, "Cuisines" } }
                li { Link { to: Route::Achievements {}, "Achievements" } }
                li { Link { to: Route::Profile {}, "Profile" } }
                if is_admin {
                    li { Link { to: Route::Admin {}, "Admin" } }
                }
            }
            button {
                class: "btn btn-secondary sidebar-logout",
                r#type: "button",
                onclick: move |_| {
                    ctx.session().logout();
                    ctx.progress().reset();
                    ctx.favorites().reset();
                    navigator.replace(Route::Login {});
                },
                "Log out"
            }
        }
    }
}
