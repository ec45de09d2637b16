use chefs_core::model::CuisineId;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{SkillCardVm, map_skill_card};

#[derive(Clone, Debug, PartialEq)]
struct CuisineData {
    name: String,
    description: String,
    skills: Vec<SkillCardVm>,
}

#[component]
pub fn CuisineView(id: i64) -> Element {
    let ctx = use_context::<AppContext>();
    let cuisine_id = CuisineId::new(id);

    let resource_ctx = ctx.clone();
    let resource = use_resource(move || {
        let ctx = resource_ctx.clone();
        async move {
            let cuisines = ctx
                .catalog()
                .cuisines()
                .await
                .map_err(|err| ViewError::new(err.message()))?;
            let cuisine = cuisines
                .into_iter()
                .find(|cuisine| cuisine.id == cuisine_id)
                .ok_or_else(|| ViewError::new("Cuisine not found"))?;

            let skills = ctx
                .catalog()
                .skills(cuisine_id)
                .await
                .map_err(|err| ViewError::new(err.message()))?;

            if let Some(user_id) = ctx.session().user_id() {
                ctx.progress().fetch(user_id).await;
            }
            let completed = ctx.progress().completed_set();

            let mut cards = Vec::with_capacity(skills.len());
            for skill in &skills {
                let summary = ctx
                    .catalog()
                    .skill_progress(skill.id, &completed)
                    .await
                    .ok();
                cards.push(map_skill_card(skill, summary));
            }

            Ok::<_, ViewError>(CuisineData {
                name: cuisine.name,
                description: cuisine.description.unwrap_or_default(),
                skills: cards,
            })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page cuisine-page",
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
                ViewState::Ready(data) => rsx! {
                    header { class: "view-header",
                        h2 { class: "view-title", "{data.name}" }
                        if !data.description.is_empty() {
                            p { class: "view-subtitle", "{data.description}" }
                        }
                    }
                    div { class: "view-divider" }
                    if data.skills.is_empty() {
                        p { class: "cuisine-empty", "No skills in this cuisine yet." }
                    } else {
                        div { class: "skill-list",
                            for card in data.skills.iter() {
                                {
                                    let skill_id = card.id;
                                    let name = card.name.clone();
                                    let description = card.description.clone();
                                    let progress_label = card.progress_label.clone();
                                    rsx! {
                                        dioxus_router::Link {
                                            class: "skill-card",
                                            to: Route::Skill { id: skill_id.value() },
                                            h4 { class: "skill-name", "{name}" }
                                            if !description.is_empty() {
                                                p { class: "skill-description", "{description}" }
                                            }
                                            if let Some(label) = progress_label.as_ref() {
                                                span { class: "skill-progress", "{label}" }
                                            }
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
