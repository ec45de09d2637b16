use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AchievementVm, map_achievements};

#[component]
pub fn AchievementsView() -> Element {
    let ctx = use_context::<AppContext>();

    let resource_ctx = ctx.clone();
    let resource = use_resource(move || {
        let ctx = resource_ctx.clone();
        async move {
            let Some(user_id) = ctx.session().user_id() else {
                return Ok(Vec::new());
            };
            let statuses = ctx
                .achievements()
                .for_user(user_id)
                .await
                .map_err(|err| ViewError::new(err.message()))?;
            Ok::<Vec<AchievementVm>, ViewError>(map_achievements(&statuses))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page achievements-page",
            header { class: "view-header",
                h2 { class: "view-title", "Achievements" }
                p { class: "view-subtitle", "Badges you have earned on your cooking journey." }
            }
            div { class: "view-divider" }
            match state {
                ViewState::Idle => rsx! { p { "Idle" } },
                ViewState::Loading => rsx! { p { "Loading..." } },
                ViewState::Error(err) => rsx! {
                    p { class: "form-error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(badges) => rsx! {
                    if badges.is_empty() {
                        p { class: "achievements-empty", "No achievements defined yet." }
                    } else {
                        div { class: "achievement-grid",
                            for badge in badges.iter() {
                                {
                                    let class = if badge.unlocked {
                                        "achievement-card achievement-card--unlocked"
                                    } else {
                                        "achievement-card achievement-card--locked"
                                    };
                                    let icon = badge.icon.clone();
                                    let title = badge.title.clone();
                                    let description = badge.description.clone();
                                    let state_label = badge.state_label.clone();
                                    rsx! {
                                        div { class: "{class}",
                                            span { class: "achievement-icon", "{icon}" }
                                            h4 { class: "achievement-title", "{title}" }
                                            if !description.is_empty() {
                                                p { class: "achievement-description", "{description}" }
                                            }
                                            span { class: "achievement-state", "{state_label}" }
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
