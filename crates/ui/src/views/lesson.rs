use chefs_core::model::LessonId;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LessonPageVm, map_lesson_page};

#[component]
pub fn LessonView(id: i64) -> Element {
    let ctx = use_context::<AppContext>();
    let lesson_id = LessonId::new(id);

    let resource_ctx = ctx.clone();
    let resource = use_resource(move || {
        let ctx = resource_ctx.clone();
        async move {
            let bundle = ctx
                .catalog()
                .lesson_bundle(lesson_id)
                .await
                .map_err(|err| ViewError::new(err.message()))?;
            let completed = ctx.progress().is_completed(lesson_id);
            Ok::<LessonPageVm, ViewError>(map_lesson_page(&bundle, completed))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page lesson-page",
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
                ViewState::Ready(page) => rsx! {
                    header { class: "view-header",
                        h2 { class: "view-title", "{page.name}" }
                        if page.completed {
                            span { class: "lesson-badge", "Completed" }
                        }
                        if !page.description.is_empty() {
                            p { class: "view-subtitle", "{page.description}" }
                        }
                    }
                    div { class: "view-divider" }
                    for part in page.sections.iter() {
                        section { class: "lesson-section",
                            if let Some(title) = part.title.as_ref() {
                                h3 { class: "lesson-section-title", "{title}" }
                            }
                            p { class: "lesson-section-body", "{part.body}" }
                            if let Some(url) = part.picture_url.as_ref() {
                                img { class: "lesson-section-image", src: "{url}" }
                            }
                        }
                    }
                    if page.quiz_count > 0 {
                        div { class: "lesson-quiz-cta",
                            dioxus_router::Link {
                                class: "btn btn-primary",
                                to: Route::Quiz { lesson_id: lesson_id.value() },
                                "{page.quiz_cta}"
                            }
                        }
                    }
                },
            }
        }
    }
}
