use chefs_core::model::SkillId;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LessonRowVm, map_lesson_row};

#[derive(Clone, Debug, PartialEq)]
struct SkillData {
    lessons: Vec<LessonRowVm>,
}

#[component]
pub fn SkillView(id: i64) -> Element {
    let ctx = use_context::<AppContext>();
    let skill_id = SkillId::new(id);

    let resource_ctx = ctx.clone();
    let resource = use_resource(move || {
        let ctx = resource_ctx.clone();
        async move {
            let lessons = ctx
                .catalog()
                .lessons(skill_id)
                .await
                .map_err(|err| ViewError::new(err.message()))?;

            if let Some(user_id) = ctx.session().user_id() {
                ctx.progress().fetch(user_id).await;
            }
            let tracker = ctx.progress();

            let rows = lessons
                .iter()
                .map(|lesson| {
                    map_lesson_row(
                        lesson,
                        tracker.record_for(lesson.id).as_ref(),
                        tracker.is_completed(lesson.id),
                    )
                })
                .collect();
            Ok::<_, ViewError>(SkillData { lessons: rows })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page skill-page",
            header { class: "view-header",
                h2 { class: "view-title", "Lessons" }
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
                ViewState::Ready(data) => rsx! {
                    if data.lessons.is_empty() {
                        p { class: "skill-empty", "No lessons in this skill yet." }
                    } else {
                        ul { class: "lesson-list",
                            for row in data.lessons.iter() {
                                {
                                    let lesson_id = row.id;
                                    let name = row.name.clone();
                                    let status_label = row.status_label.clone();
                                    let xp_label = row.xp_label.clone();
                                    let row_class = if row.completed {
                                        "lesson-row lesson-row--completed"
                                    } else {
                                        "lesson-row"
                                    };
                                    rsx! {
                                        li { class: "{row_class}",
                                            dioxus_router::Link {
                                                class: "lesson-link",
                                                to: Route::Lesson { id: lesson_id.value() },
                                                span { class: "lesson-name", "{name}" }
                                                span { class: "lesson-xp", "{xp_label}" }
                                                span { class: "lesson-status", "{status_label}" }
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
