use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, LoginRequest, Role};

use crate::common;

fn credentials(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_login_returns_token_and_admin_role() {
    let (base, _state) = common::spawn_stub().await;
    let api = common::anon_client(&base);

    let resp = api
        .login(&credentials("admin@example.com", common::PASSWORD))
        .await
        .expect("login should succeed");

    assert_eq!(resp.access_token, common::TOKEN);
    assert_eq!(resp.user.primary_role(), Role::Admin);
}

#[tokio::test]
async fn test_login_derives_role_from_first_role_entry() {
    let (base, _state) = common::spawn_stub().await;
    let api = common::anon_client(&base);

    let manager = api
        .login(&credentials("manager@example.com", common::PASSWORD))
        .await
        .expect("manager login");
    assert_eq!(manager.user.primary_role(), Role::Manager);

    let user = api
        .login(&credentials("alice@example.com", common::PASSWORD))
        .await
        .expect("user login");
    assert_eq!(user.user.primary_role(), Role::User);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let (base, _state) = common::spawn_stub().await;
    let api = common::anon_client(&base);

    let err = api
        .login(&credentials("admin@example.com", "wrong-password"))
        .await
        .expect_err("wrong password must fail");

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(err.message, "Invalid credentials");
}

#[tokio::test]
async fn test_login_rejects_unknown_account() {
    let (base, _state) = common::spawn_stub().await;
    let api = common::anon_client(&base);

    let err = api
        .login(&credentials("nobody@example.com", common::PASSWORD))
        .await
        .expect_err("unknown account must fail");

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_unreachable_server_maps_to_network_error() {
    // Port 9 (discard) is never bound in the test environment.
    let api = common::anon_client("http://127.0.0.1:9/api");

    let err = api
        .login(&credentials("admin@example.com", common::PASSWORD))
        .await
        .expect_err("connection must fail");

    assert_eq!(err.kind, AppErrorKind::NetworkError);
}
