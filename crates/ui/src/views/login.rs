use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let submit = move |_| {
        if submitting() {
            return;
        }
        let ctx = ctx.clone();
        let email = email();
        let password = password();
        let mut submitting = submitting;
        let mut error = error;
        let navigator = navigator;
        spawn(async move {
            submitting.set(true);
            error.set(None);
            match ctx.session().login(&email, &password).await {
                Ok(user) => {
                    ctx.progress().fetch(user.id).await;
                    ctx.favorites().fetch(user.id).await;
                    navigator.replace(Route::Home {});
                }
                Err(err) => {
                    error.set(Some(err.message()));
                    submitting.set(false);
                }
            }
        });
    };

    rsx! {
        div { class: "page auth-page",
            div { class: "auth-card",
                h2 { class: "auth-title", "Welcome back" }
                p { class: "auth-subtitle", "Log in to keep cooking." }
                if let Some(message) = error() {
                    p { class: "form-error", "{message}" }
                }
                label { class: "form-label", "Email" }
                input {
                    class: "form-input",
                    r#type: "email",
                    placeholder: "you@example.com",
                    value: "{email()}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { class: "form-label", "Password" }
                input {
                    class: "form-input",
                    r#type: "password",
                    value: "{password()}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button {
                    class: "btn btn-primary auth-submit",
                    r#type: "button",
                    disabled: submitting(),
                    onclick: submit,
                    if submitting() { "Logging in..." } else { "Log in" }
                }
                p { class: "auth-switch",
                    "New here? "
                    dioxus_router::Link { to: Route::Signup {}, "Create an account" }
                }
            }
        }
    }
}
