//! Backend error responses mapped into typed client errors.

#![allow(clippy::unwrap_used)]

use lumera_client::{ApiError, ProductId};
use lumera_integration_tests::TestContext;

#[tokio::test]
async fn missing_resources_surface_the_backend_message() {
    let ctx = TestContext::signed_in().await;
    let unknown = ProductId::from("66b2f0c81ab5c2d4e8f0ffff");

    let err = ctx.client.products().get(&unknown).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Product not found");
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_fetches_are_not_cached() {
    let ctx = TestContext::signed_in().await;
    let unknown = ProductId::from("66b2f0c81ab5c2d4e8f0ffff");

    ctx.client.products().get(&unknown).await.unwrap_err();
    ctx.client.products().get(&unknown).await.unwrap_err();

    // Each attempt goes to the backend; errors never poison the cache.
    let endpoint = format!("GET /products/{unknown}");
    assert_eq!(ctx.backend.hits(&endpoint), 2);
}
