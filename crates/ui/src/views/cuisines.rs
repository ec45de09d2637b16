use chefs_core::model::CuisineId;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CuisineCardVm, map_cuisine_card};

#[component]
pub fn CuisinesView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut search = use_signal(String::new);
    let mut toggle_error = use_signal(|| None::<String>);

    let resource_ctx = ctx.clone();
    let resource = use_resource(move || {
        let ctx = resource_ctx.clone();
        async move {
            let cuisines = ctx
                .catalog()
                .cuisines()
                .await
                .map_err(|err| ViewError::new(err.message()))?;

            if let Some(user_id) = ctx.session().user_id() {
                ctx.progress().fetch(user_id).await;
                ctx.favorites().fetch(user_id).await;
            }
            let completed = ctx.progress().completed_set();
            let favorites = ctx.favorites();

            // One rollup fetch per cuisine. The catalog is small enough that
            // the extra round trips stay cheap.
            let mut cards = Vec::with_capacity(cuisines.len());
            for cuisine in &cuisines {
                let summary = ctx
                    .catalog()
                    .cuisine_progress(cuisine.id, &completed)
                    .await
                    .ok();
                cards.push(map_cuisine_card(
                    cuisine,
                    summary,
                    favorites.is_favorite(cuisine.id),
                ));
            }
            Ok::<_, ViewError>(cards)
        }
    });
    let state = view_state_from_resource(&resource);
    let query = search().trim().to_lowercase();

    rsx! {
        div { class: "page cuisines-page",
            header { class: "view-header",
                h2 { class: "view-title", "Cuisines" }
                p { class: "view-subtitle", "Pick a cuisine to explore its skills." }
            }
            div { class: "view-divider" }
            input {
                class: "form-input search-input",
                r#type: "text",
                placeholder: "Search cuisines...",
                value: "{search()}",
                oninput: move |evt| search.set(evt.value()),
            }
            if let Some(message) = toggle_error() {
                p { class: "form-error", "{message}" }
            }
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
                ViewState::Ready(cards) => {
                    let visible = cards
                        .iter()
                        .filter(|card| card.matches_query(&query))
                        .cloned()
                        .collect::<Vec<_>>();
                    let empty_message = if cards.is_empty() {
                        "No cuisines available yet."
                    } else {
                        "No cuisines match that search."
                    };
                    rsx! {
                        if visible.is_empty() {
                            p { class: "cuisines-empty", "{empty_message}" }
                        } else {
                            div { class: "cuisine-grid",
                                for card in visible.iter() {
                                    CuisineCard {
                                        card: card.clone(),
                                        on_toggle: {
                                            let ctx = ctx.clone();
                                            move |cuisine_id: CuisineId| {
                                                let ctx = ctx.clone();
                                                let mut toggle_error = toggle_error;
                                                let mut resource = resource;
                                                spawn(async move {
                                                    let Some(user_id) = ctx.session().user_id() else {
                                                        return;
                                                    };
                                                    match ctx.favorites().toggle(user_id, cuisine_id).await {
                                                        Ok(_) => {
                                                            toggle_error.set(None);
                                                            resource.restart();
                                                        }
                                                        Err(err) => {
                                                            toggle_error.set(Some(err.message()));
                                                        }
                                                    }
                                                });
                                            }
                                        },
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CuisineCard(card: CuisineCardVm, on_toggle: EventHandler<CuisineId>) -> Element {
    let star_class = if card.is_favorite {
        "favorite-toggle favorite-toggle--on"
    } else {
        "favorite-toggle"
    };
    let star_glyph = if card.is_favorite { "★" } else { "☆" };
    let cuisine_id = card.id;

    rsx! {
        div { class: "cuisine-card",
            div { class: "cuisine-card-header",
                span { class: "cuisine-avatar", "{card.avatar}" }
                h4 { class: "cuisine-name", "{card.name}" }
                button {
                    class: "{star_class}",
                    r#type: "button",
                    onclick: move |_| on_toggle.call(cuisine_id),
                    "{star_glyph}"
                }
            }
            p { class: "cuisine-description", "{card.description}" }
            if let Some(label) = card.progress_label.as_ref() {
                p { class: "cuisine-progress", "{label}" }
            }
            dioxus_router::Link {
                class: "btn btn-primary cuisine-open",
                to: Route::Cuisine { id: cuisine_id.value() },
                "Explore"
            }
        }
    }
}
