use chefs_core::validate::{SignupField, SignupForm};
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::AuthError;

use crate::context::AppContext;
use crate::routes::Route;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct FieldErrors {
    name: Option<String>,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    confirm_password: Option<String>,
    general: Option<String>,
}

fn field_errors_from(err: &AuthError) -> FieldErrors {
    match err {
        AuthError::Validation(validation) => FieldErrors {
            name: validation
                .message_for(SignupField::Name)
                .map(str::to_string),
            username: validation
                .message_for(SignupField::Username)
                .map(str::to_string),
            email: validation
                .message_for(SignupField::Email)
                .map(str::to_string),
            password: validation
                .message_for(SignupField::Password)
                .map(str::to_string),
            confirm_password: validation
                .message_for(SignupField::ConfirmPassword)
                .map(str::to_string),
            general: None,
        },
        other => FieldErrors {
            general: Some(other.message()),
            ..FieldErrors::default()
        },
    }
}

#[component]
pub fn SignupView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut name = use_signal(String::new);
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut submitting = use_signal(|| false);
    let mut errors = use_signal(FieldErrors::default);

    let submit = move |_| {
        if submitting() {
            return;
        }
        let ctx = ctx.clone();
        let form = SignupForm {
            name: name(),
            username: username(),
            email: email(),
            password: password(),
            confirm_password: confirm(),
        };
        let mut submitting = submitting;
        let mut errors = errors;
        let navigator = navigator;
        spawn(async move {
            submitting.set(true);
            errors.set(FieldErrors::default());
            match ctx.session().signup(&form).await {
                Ok(user) => {
                    ctx.progress().fetch(user.id).await;
                    ctx.favorites().fetch(user.id).await;
                    navigator.replace(Route::Home {});
                }
                Err(err) => {
                    errors.set(field_errors_from(&err));
                    submitting.set(false);
                }
            }
        });
    };

    let current = errors();
    rsx! {
        div { class: "page auth-page",
            div { class: "auth-card",
                h2 { class: "auth-title", "Join Chef's Circle" }
                p { class: "auth-subtitle", "Make an account to track your cooking journey." }
                if let Some(message) = current.general.as_ref() {
                    p { class: "form-error", "{message}" }
                }
                label { class: "form-label", "Name" }
                input {
                    class: "form-input",
                    r#type: "text",
                    value: "{name()}",
                    oninput: move |evt| name.set(evt.value()),
                }
                if let Some(message) = current.name.as_ref() {
                    p { class: "form-error", "{message}" }
                }
                label { class: "form-label", "Username" }
                input {
                    class: "form-input",
                    r#type: "text",
                    value: "{username()}",
                    oninput: move |evt| username.set(evt.value()),
                }
                if let Some(message) = current.username.as_ref() {
                    p { class: "form-error", "{message}" }
                }
                label { class: "form-label", "Email" }
                input {
                    class: "form-input",
                    r#type: "email",
                    value: "{email()}",
                    oninput: move |evt| email.set(evt.value()),
                }
                if let Some(message) = current.email.as_ref() {
                    p { class: "form-error", "{message}" }
                }
                label { class: "form-label", "Password" }
                input {
                    class: "form-input",
                    r#type: "password",
                    value: "{password()}",
                    oninput: move |evt| password.set(evt.value()),
                }
                if let Some(message) = current.password.as_ref() {
                    p { class: "form-error", "{message}" }
                }
                label { class: "form-label", "Confirm password" }
                input {
                    class: "form-input",
                    r#type: "password",
                    value: "{confirm()}",
                    oninput: move |evt| confirm.set(evt.value()),
                }
                if let Some(message) = current.confirm_password.as_ref() {
                    p { class: "form-error", "{message}" }
                }
                button {
                    class: "btn btn-primary auth-submit",
                    r#type: "button",
                    disabled: submitting(),
                    onclick: submit,
                    if submitting() { "Creating account..." } else { "Sign up" }
                }
                p { class: "auth-switch",
                    "Already a member? "
                    dioxus_router::Link { to: Route::Login {}, "Log in" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chefs_core::validate::SignupForm;
    use services::AuthError;

    use super::field_errors_from;

    #[test]
    fn validation_errors_land_on_their_fields() {
        let form = SignupForm {
            name: String::new(),
            username: "ab".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            confirm_password: "other".to_string(),
        };
        let err = AuthError::Validation(form.validate().unwrap_err());
        let errors = field_errors_from(&err);
        assert_eq!(errors.name.as_deref(), Some("Name is required"));
        assert_eq!(
            errors.username.as_deref(),
            Some("Username must be at least 3 characters")
        );
        assert_eq!(
            errors.email.as_deref(),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            errors.password.as_deref(),
            Some("Password must be at least 6 characters")
        );
        assert!(errors.general.is_none());
    }

    #[test]
    fn rejection_becomes_a_general_error() {
        let err = AuthError::Rejected("Email already registered".to_string());
        let errors = field_errors_from(&err);
        assert_eq!(errors.general.as_deref(), Some("Email already registered"));
        assert!(errors.email.is_none());
    }
}
