//! Order commands.
//!
//! # Usage
//!
//! ```bash
//! lumera orders list --status pending
//! lumera orders set-status 66b2f0c81ab5c2d4e8f01234 shipping -n "Handed to carrier"
//! lumera orders stats
//! ```

use lumera_client::{
    ApiClient, ApiResult, Order, OrderFilters, OrderStatsParams, OrderStatus,
    UpdateOrderStatusRequest,
};
use lumera_core::OrderId;
use tracing::info;

/// List one page of orders, optionally only those in one status.
pub async fn list(
    client: &ApiClient,
    page: u32,
    limit: u32,
    status: Option<OrderStatus>,
) -> ApiResult<()> {
    let filters = OrderFilters {
        page: Some(page),
        limit: Some(limit),
        status,
        ..OrderFilters::default()
    };
    let orders = client.orders().list(filters).await?;

    info!(
        "Page {}/{} ({} orders)",
        orders.page, orders.total_pages, orders.total
    );
    for order in &orders.items {
        info!(
            "  {}  {}  {}  {} VND  {}",
            order.id, order.order_code, order.status, order.final_amount, order.customer.full_name
        );
    }
    Ok(())
}

/// Show one order with its line items.
pub async fn show(client: &ApiClient, id: &str) -> ApiResult<()> {
    let order = client.orders().get(&OrderId::from(id)).await?;
    print_order(&order);
    Ok(())
}

/// Move an order to a new status.
pub async fn set_status(
    client: &ApiClient,
    id: &str,
    status: OrderStatus,
    notes: Option<String>,
) -> ApiResult<()> {
    let request = UpdateOrderStatusRequest { status, notes };
    let order = client
        .orders()
        .update_status(&OrderId::from(id), &request)
        .await?;
    info!("Order {} is now {}", order.order_code, order.status);
    Ok(())
}

/// Revenue totals and a per-status breakdown.
pub async fn stats(client: &ApiClient) -> ApiResult<()> {
    let stats = client.orders().stats(OrderStatsParams::default()).await?;

    info!("Orders:  {}", stats.total_orders);
    info!("Revenue: {} VND", stats.total_revenue);
    for bucket in &stats.status_breakdown {
        info!(
            "  {:<10} {:>6} orders  {} VND",
            bucket.status, bucket.count, bucket.total_amount
        );
    }
    Ok(())
}

fn print_order(order: &Order) {
    info!("Order {} ({})", order.order_code, order.status);
    info!("  ID:        {}", order.id);
    info!(
        "  Customer:  {} <{}>",
        order.customer.full_name, order.customer.email
    );
    info!("  Placed:    {}", order.order_date);
    info!(
        "  Recipient: {} ({})",
        order.recipient_name, order.recipient_phone
    );
    info!("  Address:   {}", order.shipping_address);
    info!("  Items:");
    for line in &order.order_details {
        info!(
            "    {} x{}  at {} VND",
            line.product_id, line.quantity, line.price_at_purchase
        );
    }
    info!(
        "  Totals:    {} VND - {} VND discount + {} VND shipping = {} VND",
        order.total_amount, order.discount_amount, order.shipping_fee, order.final_amount
    );
    if let Some(processor) = &order.processed_by {
        info!("  Processed: {}", processor.username);
    }
}
