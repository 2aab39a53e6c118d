use std::collections::HashMap;

use dioxus::prelude::*;

use crate::api::use_api;
use crate::forms::AccountForm;
use crate::routes::Route;

const AUTH_CSS: Asset = asset!("/assets/auth.css");

/// Registration page. Creating an account does not sign the visitor in;
/// on success they are sent to the login page.
#[component]
pub fn Register() -> Element {
    let api = use_api();
    let mut form = use_signal(AccountForm::default);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut success_msg = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        let api = api.clone();
        async move {
            evt.prevent_default();
            error_msg.set(None);
            success_msg.set(None);

            let errors = form.read().validate();
            if !errors.is_empty() {
                field_errors.set(errors);
                return;
            }
            field_errors.set(HashMap::new());
            loading.set(true);

            let req = form.read().to_request();
            match api.register(&req).await {
                Ok(()) => {
                    success_msg.set(Some("Account created. You can sign in now.".to_string()));
                    form.set(AccountForm::default());
                    navigator().push(Route::Login {});
                }
                Err(err) => {
                    tracing::error!("registration failed: {err}");
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
                    h2 { "Create Account" }
                    p { "Fill in your details to get started." }
                }

                if let Some(err) = error_msg() {
                    div { class: "auth-error", "{err}" }
                }
                if let Some(msg) = success_msg() {
                    div { class: "auth-success", "{msg}" }
                }

                form { class: "auth-form", onsubmit: handle_register,
                    div { class: "auth-field",
                        label { r#for: "name", "Name" }
                        input {
                            id: "name",
                            placeholder: "Your name",
                            value: form.read().name.clone(),
                            oninput: move |e: FormEvent| form.write().set_field("name", e.value()),
                        }
                        if let Some(err) = field_errors().get("name") {
                            div { class: "auth-field-error", "{err}" }
                        }
                    }
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
                            placeholder: "Create a password",
                            value: form.read().password.clone(),
                            oninput: move |e: FormEvent| form.write().set_field("password", e.value()),
                        }
                        if let Some(err) = field_errors().get("password") {
                            div { class: "auth-field-error", "{err}" }
                        }
                    }
                    div { class: "auth-field",
                        label { r#for: "password_confirmation", "Confirm Password" }
                        input {
                            id: "password_confirmation",
                            r#type: "password",
                            placeholder: "Repeat the password",
                            value: form.read().password_confirmation.clone(),
                            oninput: move |e: FormEvent| {
                                form.write().set_field("password_confirmation", e.value())
                            },
                        }
                        if let Some(err) = field_errors().get("password_confirmation") {
                            div { class: "auth-field-error", "{err}" }
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "auth-submit",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Register" }
                    }
                }

                p { class: "auth-link",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
