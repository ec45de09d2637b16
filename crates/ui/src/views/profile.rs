use chefs_core::model::UserPatch;
use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let user = ctx.session().current_user();

    let mut name = use_signal(|| {
        user.as_ref()
            .map_or_else(String::new, |user| user.name.clone())
    });
    let mut image = use_signal(|| {
        user.as_ref()
            .and_then(|user| user.profile_image.clone())
            .unwrap_or_default()
    });
    let mut status = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);

    let (username, email, xp_label) = match user.as_ref() {
        Some(user) => (
            user.username.clone(),
            user.email.clone(),
            format!("{} XP", user.xp),
        ),
        None => (String::new(), String::new(), String::new()),
    };

    let save = {
        let ctx = ctx.clone();
        move |_| {
            if saving() {
                return;
            }
            let ctx = ctx.clone();
            let name = name();
            let image = image();
            let mut status = status;
            let mut error = error;
            let mut saving = saving;
            spawn(async move {
                saving.set(true);
                status.set(None);
                error.set(None);

                let session = ctx.session();
                let before = session.current_user();
                let patch = UserPatch {
                    name: Some(name.trim().to_string()),
                    ..UserPatch::default()
                };
                let mut result = session.update_profile(&patch).await.map(|_| ());

                // The image has its own endpoint on the backend; only touch
                // it when the field actually changed.
                if result.is_ok() {
                    let trimmed = image.trim();
                    let new_image = (!trimmed.is_empty()).then(|| trimmed.to_string());
                    let old_image = before.and_then(|user| user.profile_image);
                    if new_image != old_image {
                        result = session
                            .set_profile_image(new_image.as_deref())
                            .await
                            .map(|_| ());
                    }
                }

                match result {
                    Ok(()) => status.set(Some("Profile updated".to_string())),
                    Err(err) => error.set(Some(err.message())),
                }
                saving.set(false);
            });
        }
    };

    let delete = {
        let ctx = ctx.clone();
        move |_| {
            let ctx = ctx.clone();
            let mut error = error;
            let mut confirm_delete = confirm_delete;
            let navigator = navigator;
            spawn(async move {
                match ctx.session().delete_account().await {
                    Ok(()) => {
                        ctx.progress().reset();
                        ctx.favorites().reset();
                        navigator.replace(Route::Login {});
                    }
                    Err(err) => {
                        confirm_delete.set(false);
                        error.set(Some(err.message()));
                    }
                }
            });
        }
    };

    rsx! {
        div { class: "page profile-page",
            header { class: "view-header",
                h2 { class: "view-title", "Profile" }
                p { class: "view-subtitle", "{username} · {email} · {xp_label}" }
            }
            div { class: "view-divider" }
            if let Some(message) = status() {
                p { class: "form-success", "{message}" }
            }
            if let Some(message) = error() {
                p { class: "form-error", "{message}" }
            }
            label { class: "form-label", "Display name" }
            input {
                class: "form-input",
                r#type: "text",
                value: "{name()}",
                oninput: move |evt| name.set(evt.value()),
            }
            label { class: "form-label", "Profile image URL" }
            input {
                class: "form-input",
                r#type: "text",
                placeholder: "https://...",
                value: "{image()}",
                oninput: move |evt| image.set(evt.value()),
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: saving(),
                onclick: save,
                if saving() { "Saving..." } else { "Save changes" }
            }
            div { class: "profile-danger",
                h3 { "Delete account" }
                p { "This removes your account and all progress. There is no undo." }
                if confirm_delete() {
                    p { class: "form-error", "Are you sure?" }
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: delete,
                        "Yes, delete my account"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| confirm_delete.set(false),
                        "Cancel"
                    }
                } else {
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: move |_| confirm_delete.set(true),
                        "Delete account"
                    }
                }
            }
        }
    }
}
