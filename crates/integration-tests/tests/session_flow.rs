//! Login, logout, and session persistence against the mock backend.

#![allow(clippy::unwrap_used)]

use lumera_client::{ApiError, LoginRequest};
use lumera_integration_tests::TestContext;

#[tokio::test]
async fn login_persists_the_session_for_later_clients() {
    let ctx = TestContext::signed_in().await;

    assert!(ctx.client.session().is_authenticated());
    let admin = ctx.client.session().current_admin().unwrap();
    assert_eq!(admin.username, "admin");

    // A new client over the same storage picks the session up without
    // logging in again.
    let restarted = ctx.reconnect();
    restarted.initialize().unwrap();
    assert!(restarted.session().is_authenticated());
    assert_eq!(
        restarted.session().current_admin().unwrap().id,
        admin.id,
    );
    assert_eq!(ctx.backend.hits("POST /admins/login"), 1);
}

#[tokio::test]
async fn failed_login_leaves_the_session_unauthenticated() {
    let ctx = TestContext::signed_out().await;

    let err = ctx
        .client
        .login(LoginRequest::new("admin", "wrong-password"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(matches!(err, ApiError::Api { .. }));
    assert!(!ctx.client.session().is_authenticated());
    assert!(ctx.client.session().current_admin().is_none());
}

#[tokio::test]
async fn logout_clears_the_session_and_is_idempotent() {
    let ctx = TestContext::signed_in().await;

    ctx.client.logout().await.unwrap();
    assert!(!ctx.client.session().is_authenticated());
    assert!(ctx.client.session().current_admin().is_none());

    // Logging out again is a no-op, not an error.
    ctx.client.logout().await.unwrap();

    // The cleared session stays cleared across a restart.
    let restarted = ctx.reconnect();
    restarted.initialize().unwrap();
    assert!(!restarted.session().is_authenticated());
}
