//! Expired-token recovery: transparent refresh, retry, and forced logout.

#![allow(clippy::unwrap_used)]

use lumera_client::{ApiError, ProductListParams};
use lumera_integration_tests::TestContext;

#[tokio::test]
async fn expired_token_refreshes_and_retries_transparently() {
    let ctx = TestContext::signed_in().await;
    ctx.backend.expire_access_tokens();

    let page = ctx
        .client
        .products()
        .list(ProductListParams::default())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    // One rejected attempt, one refresh, one successful retry. No re-login.
    assert_eq!(ctx.backend.hits("GET /products"), 2);
    assert_eq!(ctx.backend.hits("POST /admins/refresh-token"), 1);
    assert_eq!(ctx.backend.hits("POST /admins/login"), 1);
    assert!(ctx.client.session().is_authenticated());
}

#[tokio::test]
async fn failed_refresh_signs_the_session_out() {
    let ctx = TestContext::signed_in().await;
    ctx.backend.expire_access_tokens();
    ctx.backend.disable_refresh();

    let err = ctx
        .client
        .products()
        .list(ProductListParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::SessionExpired(_)));
    assert_eq!(err.status(), Some(401));
    assert!(!ctx.client.session().is_authenticated());

    // The forced logout also cleared the persisted session.
    let restarted = ctx.reconnect();
    restarted.initialize().unwrap();
    assert!(!restarted.session().is_authenticated());
}

#[tokio::test]
async fn requests_without_a_session_fail_with_401() {
    let ctx = TestContext::signed_out().await;

    let err = ctx
        .client
        .products()
        .list(ProductListParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Api { status: 401, .. }));
    // Without a refresh token there is nothing to refresh.
    assert_eq!(ctx.backend.hits("POST /admins/refresh-token"), 0);
}
