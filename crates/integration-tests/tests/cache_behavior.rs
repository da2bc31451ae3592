//! Cache reuse and invalidation observed through backend hit counts.

#![allow(clippy::unwrap_used)]

use lumera_client::{ProductId, ProductListParams};
use lumera_integration_tests::{EARRINGS_ID, RING_ID, TestContext};

#[tokio::test]
async fn repeated_lists_are_served_from_cache() {
    let ctx = TestContext::signed_in().await;

    let first = ctx
        .client
        .products()
        .list(ProductListParams::default())
        .await
        .unwrap();
    let second = ctx
        .client
        .products()
        .list(ProductListParams::default())
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.items.len(), 2);
    assert_eq!(ctx.backend.hits("GET /products"), 1);
}

#[tokio::test]
async fn hiding_a_product_refreshes_lists_and_detail() {
    let ctx = TestContext::signed_in().await;
    let ring = ProductId::from(RING_ID);

    ctx.client
        .products()
        .list(ProductListParams::default())
        .await
        .unwrap();
    ctx.client.products().get(&ring).await.unwrap();

    let hidden = ctx.client.products().hide(&ring).await.unwrap();
    assert!(hidden.is_hidden);
    assert!(ctx.backend.product_hidden(RING_ID));

    // Both the list and the detail were invalidated by the mutation.
    let listed = ctx
        .client
        .products()
        .list(ProductListParams::default())
        .await
        .unwrap();
    let fetched = ctx.client.products().get(&ring).await.unwrap();

    assert_eq!(ctx.backend.hits("GET /products"), 2);
    assert_eq!(ctx.backend.hits(&format!("GET /products/{RING_ID}")), 2);
    assert!(fetched.is_hidden);
    let in_list = listed
        .items
        .iter()
        .find(|product| product.id.as_str() == RING_ID)
        .unwrap();
    assert!(in_list.is_hidden);
}

#[tokio::test]
async fn mutations_leave_other_details_fresh() {
    let ctx = TestContext::signed_in().await;
    let ring = ProductId::from(RING_ID);
    let earrings = ProductId::from(EARRINGS_ID);

    ctx.client.products().get(&ring).await.unwrap();
    ctx.client.products().get(&earrings).await.unwrap();

    ctx.client.products().hide(&ring).await.unwrap();

    // The unrelated detail entry is still served from cache.
    ctx.client.products().get(&earrings).await.unwrap();
    assert_eq!(ctx.backend.hits(&format!("GET /products/{EARRINGS_ID}")), 1);

    ctx.client.products().get(&ring).await.unwrap();
    assert_eq!(ctx.backend.hits(&format!("GET /products/{RING_ID}")), 2);
}
