//! Customer account commands.

use lumera_client::{ApiClient, ApiResult, CustomerListParams};
use lumera_core::CustomerId;
use tracing::info;

/// List one page of customer accounts.
pub async fn list(client: &ApiClient, page: u32, limit: u32) -> ApiResult<()> {
    let params = CustomerListParams {
        page: Some(page),
        limit: Some(limit),
    };
    let customers = client.customers().list(params).await?;

    info!(
        "Page {}/{} ({} customers)",
        customers.page, customers.total_pages, customers.total
    );
    for customer in &customers.items {
        let locked = if customer.is_locked.unwrap_or(false) {
            "  [locked]"
        } else {
            ""
        };
        info!(
            "  {}  {}  <{}>{}",
            customer.id, customer.full_name, customer.email, locked
        );
    }
    Ok(())
}

/// Show one customer account.
pub async fn show(client: &ApiClient, id: &str) -> ApiResult<()> {
    let customer = client.customers().get(&CustomerId::from(id)).await?;

    info!("{}", customer.full_name);
    info!("  ID:      {}", customer.id);
    info!("  Email:   {}", customer.email);
    info!("  Phone:   {}", customer.phone);
    info!("  Address: {}", customer.address);
    info!("  Since:   {}", customer.created_at);
    info!(
        "  Locks:   account={} reviews={}",
        customer.is_locked.unwrap_or(false),
        customer.is_comment_locked.unwrap_or(false)
    );
    Ok(())
}

/// Lock a customer out of their account.
pub async fn lock(client: &ApiClient, id: &str) -> ApiResult<()> {
    let customer = client.customers().lock(&CustomerId::from(id)).await?;
    info!("Customer {} is now locked", customer.id);
    Ok(())
}

/// Lift a customer's account lock.
pub async fn unlock(client: &ApiClient, id: &str) -> ApiResult<()> {
    let customer = client.customers().unlock(&CustomerId::from(id)).await?;
    info!("Customer {} is now unlocked", customer.id);
    Ok(())
}
