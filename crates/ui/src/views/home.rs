use dioxus::prelude::*;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CuisineCardVm, map_cuisine_card};

#[derive(Clone, Debug, PartialEq)]
struct HomeData {
    completed_lessons: usize,
    favorites: Vec<CuisineCardVm>,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let user = ctx.session().current_user();
    let (greeting, xp_label) = match user {
        Some(user) => (format!("Welcome back, {}!", user.name), format!("{} XP", user.xp)),
        None => ("Welcome back!".to_string(), String::new()),
    };

    let resource_ctx = ctx.clone();
    let resource = use_resource(move || {
        let ctx = resource_ctx.clone();
        async move {
            let Some(user_id) = ctx.session().user_id() else {
                return Ok(HomeData {
                    completed_lessons: 0,
                    favorites: Vec::new(),
                });
            };
            ctx.progress().fetch(user_id).await;
            ctx.favorites().fetch(user_id).await;
            let favorites = ctx
                .favorites()
                .favorites()
                .iter()
                .map(|cuisine| map_cuisine_card(cuisine, None, true))
                .collect();
            Ok::<_, ViewError>(HomeData {
                completed_lessons: ctx.progress().completed_set().len(),
                favorites,
            })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page home-page",
            header { class: "view-header",
                h2 { class: "view-title", "{greeting}" }
                if !xp_label.is_empty() {
                    p { class: "view-subtitle", "{xp_label}" }
                }
            }
            div { class: "view-divider" }
            match state {
                ViewState::Idle => rsx! { p { "Idle" } },
                ViewState::Loading => rsx! { p { "Loading..." } },
                ViewState::Error(err) => rsx! { p { class: "form-error", "{err.message()}" } },
                ViewState::Ready(data) => rsx! {
                    p { class: "home-stat",
                        "Lessons completed: {data.completed_lessons}"
                    }
                    h3 { class: "home-section-title", "Favorite cuisines" }
                    if data.favorites.is_empty() {
                        p { class: "home-empty",
                            "No favorites yet. "
                            dioxus_router::Link { to: Route::Cuisines {}, "Browse cuisines" }
                            " to pick some."
                        }
                    } else {
                        div { class: "cuisine-grid",
                            for card in data.favorites.iter() {
                                {
                                    let id = card.id;
                                    let name = card.name.clone();
                                    let description = card.description.clone();
                                    rsx! {
                                        dioxus_router::Link {
                                            class: "cuisine-card",
                                            to: Route::Cuisine { id: id.value() },
                                            h4 { "{name}" }
                                            p { "{description}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
