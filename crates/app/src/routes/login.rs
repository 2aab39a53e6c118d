use std::collections::HashMap;

use dioxus::prelude::*;

use crate::api::use_api;
use crate::auth::use_session;
use crate::forms::LoginForm;
use crate::routes::{dashboard_for_role, Route};

const AUTH_CSS: Asset = asset!("/assets/auth.css");

/// Login page with email/password.
///
/// On success the returned token and the role derived from the user's
/// role list are persisted, then the role router picks the dashboard.
/// On failure the prior session (if any) is left untouched.
#[component]
pub fn Login() -> Element {
    let api = use_api();
    let mut session = use_session();
    let mut form = use_signal(LoginForm::default);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    // Forward already-authenticated visitors to their dashboard.
    if session.is_authenticated() {
        navigator().push(dashboard_for_role(session.role()));
    }

    let handle_login = move |evt: FormEvent| {
        let api = api.clone();
        async move {
            evt.prevent_default();
            error_msg.set(None);

            let errors = form.read().validate();
            if !errors.is_empty() {
                field_errors.set(errors);
                return;
            }
            field_errors.set(HashMap::new());
            loading.set(true);

            let req = form.read().to_request();
            match api.login(&req).await {
                Ok(resp) => {
                    let role = resp.user.primary_role();
                    session.sign_in(resp.access_token, role);
                    navigator().push(dashboard_for_role(role));
                }
                Err(err) => {
                    tracing::error!("login failed: {err}");
                    if err.field_errors.is_empty() {
                        error_msg.set(Some(err.message));
                    } else {
                        field_errors.set(err.field_errors);
                    }
                }
            }
            loading.set(false);
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: AUTH_CSS }

        div { class: "auth-page",
            div { class: "auth-card",
                div { class: "auth-card-header",
                    h2 { "Sign In" }
                    p { "Welcome back! Please sign in to your account." }
                }

                if let Some(err) = error_msg() {
                    div { class: "auth-error", "{err}" }
                }

                form { class: "auth-form", onsubmit: handle_login,
                    div { class: "auth-field",
                        label { r#for: "email", "Email" }
                        input {
                            id: "email",
                            r#type: "email",
                            placeholder: "you@example.com",
                            value: form.read().email.clone(),
                            oninput: move |e: FormEvent| form.write().set_field("email", e.value()),
                        }
                        if let Some(err) = field_errors().get("email") {
                            div { class: "auth-field-error", "{err}" }
                        }
                    }
                    div { class: "auth-field",
                        label { r#for: "password", "Password" }
                        input {
                            id: "password",
                            r#type: "password",
                            placeholder: "Your password",
                            value: form.read().password.clone(),
                            oninput: move |e: FormEvent| form.write().set_field("password", e.value()),
                        }
                        if let Some(err) = field_errors().get("password") {
                            div { class: "auth-field-error", "{err}" }
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "auth-submit",
                        disabled: loading(),
                        if loading() { "Signing in..." } else { "Sign In" }
                    }
                }

                p { class: "auth-link",
                    "Don't have an account? "
                    Link { to: Route::Register {}, "Create one" }
                }
            }
        }
    }
}
