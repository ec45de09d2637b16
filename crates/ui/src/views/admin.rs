use chefs_core::model::UserId;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{UserRowVm, map_user_rows};

#[component]
pub fn AdminView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut action_error = use_signal(|| None::<String>);
    let mut confirm_target = use_signal(|| None::<UserId>);

    let is_admin = ctx
        .session()
        .current_user()
        .is_some_and(|user| user.is_admin);

    let resource_ctx = ctx.clone();
    let resource = use_resource(move || {
        let ctx = resource_ctx.clone();
        async move {
            let users = ctx
                .catalog()
                .users()
                .await
                .map_err(|err| ViewError::new(err.message()))?;
            Ok::<Vec<UserRowVm>, ViewError>(map_user_rows(&users, ctx.session().user_id()))
        }
    });
    let state = view_state_from_resource(&resource);

    if !is_admin {
        return rsx! {
            div { class: "page admin-page",
                p { class: "form-error", "You need administrator access to view this page." }
            }
        };
    }

    rsx! {
        div { class: "page admin-page",
            header { class: "view-header",
                h2 { class: "view-title", "User management" }
                p { class: "view-subtitle", "Every registered member of Chef's Circle." }
            }
            div { class: "view-divider" }
            if let Some(message) = action_error() {
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
                ViewState::Ready(rows) => rsx! {
                    table { class: "admin-table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Username" }
                                th { "Email" }
                                th { "Role" }
                                th { "XP" }
                                th { "" }
                            }
                        }
                        tbody {
                            for row in rows.iter() {
                                {
                                    let user_id = row.id;
                                    let name = row.name.clone();
                                    let username = row.username.clone();
                                    let email = row.email.clone();
                                    let role_label = row.role_label.clone();
                                    let xp_label = row.xp_label.clone();
                                    let is_self = row.is_self;
                                    let pending = confirm_target() == Some(user_id);
                                    let ctx = ctx.clone();
                                    rsx! {
                                        tr {
                                            td { "{name}" }
                                            td { "{username}" }
                                            td { "{email}" }
                                            td { "{role_label}" }
                                            td { "{xp_label}" }
                                            td {
                                                if is_self {
                                                    span { class: "admin-self", "you" }
                                                } else if pending {
                                                    button {
                                                        class: "btn btn-danger btn-small",
                                                        r#type: "button",
                                                        onclick: move |_| {
                                                            let ctx = ctx.clone();
                                                            let mut action_error = action_error;
                                                            let mut confirm_target = confirm_target;
                                                            let mut resource = resource;
                                                            spawn(async move {
                                                                match ctx.catalog().delete_user(user_id).await {
                                                                    Ok(()) => {
                                                                        action_error.set(None);
                                                                        confirm_target.set(None);
                                                                        resource.restart();
                                                                    }
                                                                    Err(err) => {
                                                                        confirm_target.set(None);
                                                                        action_error.set(Some(err.message()));
                                                                    }
                                                                }
                                                            });
                                                        },
                                                        "Confirm"
                                                    }
                                                    button {
                                                        class: "btn btn-secondary btn-small",
                                                        r#type: "button",
                                                        onclick: move |_| confirm_target.set(None),
                                                        "Cancel"
                                                    }
                                                } else {
                                                    button {
                                                        class: "btn btn-danger btn-small",
                                                        r#type: "button",
                                                        onclick: move |_| confirm_target.set(Some(user_id)),
                                                        "Delete"
                                                    }
                                                }
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
