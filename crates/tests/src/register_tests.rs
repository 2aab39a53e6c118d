use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, CreateAccountRequest};

use crate::common;

fn new_account(name: &str, email: &str) -> CreateAccountRequest {
    CreateAccountRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: common::PASSWORD.to_string(),
        password_confirmation: common::PASSWORD.to_string(),
    }
}

#[tokio::test]
async fn test_register_creates_account() {
    let (base, state) = common::spawn_stub().await;
    let api = common::anon_client(&base);

    api.register(&new_account("Nina", "nina@example.com"))
        .await
        .expect("registration should succeed");

    let data = state.lock().unwrap();
    assert_eq!(data.registered.len(), 1);
    assert_eq!(data.registered[0]["email"], "nina@example.com");
}

#[tokio::test]
async fn test_register_rejects_taken_email_with_field_error() {
    let (base, _state) = common::spawn_stub().await;
    let api = common::anon_client(&base);

    let err = api
        .register(&new_account("Other Alice", "alice@example.com"))
        .await
        .expect_err("duplicate email must fail");

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert_eq!(err.message, "The given data was invalid.");
    assert_eq!(
        err.field_errors.get("email").map(String::as_str),
        Some("The email has already been taken.")
    );
}

#[tokio::test]
async fn test_register_needs_no_bearer_token() {
    let (base, state) = common::spawn_stub().await;
    let api = common::anon_client(&base);

    api.register(&new_account("Omar", "omar@example.com"))
        .await
        .expect("register is a public endpoint");

    assert_eq!(state.lock().unwrap().registered.len(), 1);
}
