//! Product catalog commands.

use lumera_client::{ApiClient, ApiResult, Product, ProductListParams};
use lumera_core::ProductId;
use tracing::info;

/// List one page of the catalog, hidden products included.
pub async fn list(client: &ApiClient, page: u32, limit: u32) -> ApiResult<()> {
    let params = ProductListParams {
        page: Some(page),
        limit: Some(limit),
        ..ProductListParams::default()
    };
    let products = client.products().list(params).await?;

    info!(
        "Page {}/{} ({} products)",
        products.page, products.total_pages, products.total
    );
    for product in &products.items {
        let visibility = if product.is_hidden { "hidden" } else { "visible" };
        info!(
            "  {}  {}  {} VND  stock {}  [{}]",
            product.id, product.product_name, product.price, product.stock_quantity, visibility
        );
    }
    Ok(())
}

/// Show one product.
pub async fn show(client: &ApiClient, id: &str) -> ApiResult<()> {
    let product = client.products().get(&ProductId::from(id)).await?;
    print_product(&product);
    Ok(())
}

/// Hide a product from the storefront.
pub async fn hide(client: &ApiClient, id: &str) -> ApiResult<()> {
    let product = client.products().hide(&ProductId::from(id)).await?;
    info!("Product {} is now hidden", product.id);
    Ok(())
}

/// Put a hidden product back on the storefront.
pub async fn unhide(client: &ApiClient, id: &str) -> ApiResult<()> {
    let product = client.products().unhide(&ProductId::from(id)).await?;
    info!("Product {} is now visible", product.id);
    Ok(())
}

fn print_product(product: &Product) {
    info!("{}", product.product_name);
    info!("  ID:       {}", product.id);
    info!("  Price:    {} VND", product.price);
    info!("  Material: {}", product.material);
    info!("  Weight:   {} g", product.weight);
    info!("  Stock:    {}", product.stock_quantity);
    info!("  Category: {}", product.category.category_name);
    info!("  Views:    {}", product.views);
    info!(
        "  Flags:    featured={} hidden={}",
        product.is_featured, product.is_hidden
    );
}
