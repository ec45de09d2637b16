use chefs_core::model::LessonId;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::{QuizOutcome, QuizPhase, QuizSession, finish_quiz};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{map_quiz_question, quiz_result_message};

#[component]
pub fn QuizView(lesson_id: i64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let lesson_id = LessonId::new(lesson_id);

    // The attempt lives only on this page. Navigating away drops it; coming
    // back restarts at question zero.
    let mut session = use_signal(|| None::<QuizSession>);
    let mut outcome = use_signal(|| None::<QuizOutcome>);
    let mut saving = use_signal(|| false);

    let resource_ctx = ctx.clone();
    let resource = use_resource(move || {
        let ctx = resource_ctx.clone();
        let mut session = session;
        let mut outcome = outcome;
        async move {
            let bundle = ctx
                .catalog()
                .lesson_bundle(lesson_id)
                .await
                .map_err(|err| ViewError::new(err.message()))?;
            let attempt =
                QuizSession::new(&bundle).map_err(|err| ViewError::new(err.to_string()))?;
            outcome.set(None);
            session.set(Some(attempt));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let finish = move || {
        let ctx = ctx.clone();
        let session = session;
        let mut outcome = outcome;
        let mut saving = saving;
        spawn(async move {
            let Some(attempt) = session() else {
                return;
            };
            let Some(user_id) = ctx.session().user_id() else {
                return;
            };
            saving.set(true);
            let result = finish_quiz(&attempt, ctx.progress().as_ref(), user_id).await;
            outcome.set(Some(result));
            saving.set(false);
        });
    };

    rsx! {
        div { class: "page quiz-page",
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
                ViewState::Ready(()) => match session() {
                    None => rsx! { p { "Loading..." } },
                    Some(attempt) => match (attempt.phase(), attempt.current_question()) {
                        (QuizPhase::Answering | QuizPhase::Answered, None) => {
                            rsx! { p { "Loading..." } }
                        }
                        (QuizPhase::Answering | QuizPhase::Answered, Some(question)) => {
                            let vm = map_quiz_question(
                                question,
                                attempt.current_index(),
                                attempt.total(),
                            );
                            let answered = attempt.phase() == QuizPhase::Answered;
                            let selected = attempt.selected_answer();
                            let correct = attempt.last_answer_correct();
                            let is_last = attempt.current_index() + 1 == attempt.total();
                            let explanation = question.explanation.clone();
                            rsx! {
                                header { class: "view-header",
                                    h2 { class: "view-title", "{vm.index_label}" }
                                }
                                p { class: "quiz-question", "{vm.question}" }
                                div { class: "quiz-options",
                                    for (index, option) in vm.options.iter().enumerate() {
                                        {
                                            let option = option.clone();
                                            let class = if answered && selected == Some(index) {
                                                if correct == Some(true) {
                                                    "quiz-option quiz-option--correct"
                                                } else {
                                                    "quiz-option quiz-option--wrong"
                                                }
                                            } else {
                                                "quiz-option"
                                            };
                                            rsx! {
                                                button {
                                                    class: "{class}",
                                                    r#type: "button",
                                                    disabled: answered,
                                                    onclick: move |_| {
                                                        session.with_mut(|attempt| {
                                                            if let Some(attempt) = attempt.as_mut() {
                                                                let _ = attempt.select(index);
                                                            }
                                                        });
                                                    },
                                                    "{option}"
                                                }
                                            }
                                        }
                                    }
                                }
                                if answered {
                                    p { class: "quiz-feedback",
                                        if correct == Some(true) { "Correct!" } else { "Not quite." }
                                    }
                                    if let Some(text) = explanation {
                                        p { class: "quiz-explanation", "{text}" }
                                    }
                                    button {
                                        class: "btn btn-primary quiz-next",
                                        r#type: "button",
                                        onclick: move |_| {
                                            let mut reached_results = false;
                                            session.with_mut(|attempt| {
                                                if let Some(attempt) = attempt.as_mut() {
                                                    if attempt.advance() == Ok(QuizPhase::Results) {
                                                        reached_results = true;
                                                    }
                                                }
                                            });
                                            if reached_results {
                                                finish();
                                            }
                                        },
                                        if is_last { "See results" } else { "Next question" }
                                    }
                                }
                            }
                        }
                        (QuizPhase::Results, _) => {
                            let score = attempt.score();
                            let total = attempt.total();
                            let message = quiz_result_message(score, total);
                            rsx! {
                                header { class: "view-header",
                                    h2 { class: "view-title", "Quiz results" }
                                }
                                p { class: "quiz-score", "Score: {score} / {total}" }
                                p { class: "quiz-result-message", "{message}" }
                                if saving() {
                                    p { class: "quiz-saving", "Saving your progress..." }
                                }
                                if let Some(result) = outcome() {
                                    if result.passed && !result.saved && !saving() {
                                        p { class: "form-error",
                                            "Your completion could not be saved. It will retry next time you finish this quiz."
                                        }
                                    }
                                }
                                div { class: "quiz-result-actions",
                                    if outcome().is_some_and(|result| !result.passed) {
                                        button {
                                            class: "btn btn-primary",
                                            r#type: "button",
                                            onclick: move |_| {
                                                outcome.set(None);
                                                let mut resource = resource;
                                                resource.restart();
                                            },
                                            "Try again"
                                        }
                                    }
                                    button {
                                        class: "btn btn-secondary",
                                        r#type: "button",
                                        onclick: move |_| {
                                            navigator.replace(Route::Lesson { id: lesson_id.value() });
                                        },
                                        "Back to lesson"
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
