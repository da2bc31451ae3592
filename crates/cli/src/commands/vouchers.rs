//! Voucher commands.

use lumera_client::{ApiClient, ApiResult, VoucherFilters};
use lumera_core::VoucherId;
use tracing::info;

/// List one page of vouchers.
pub async fn list(client: &ApiClient, page: u32, limit: u32) -> ApiResult<()> {
    let filters = VoucherFilters {
        page: Some(page),
        limit: Some(limit),
        ..VoucherFilters::default()
    };
    let vouchers = client.vouchers().list(filters).await?;

    info!(
        "Page {}/{} ({} vouchers)",
        vouchers.page, vouchers.total_pages, vouchers.total
    );
    for voucher in &vouchers.items {
        let state = if voucher.is_active { "active" } else { "inactive" };
        info!(
            "  {}  {}  {} {}  used {}  [{}]",
            voucher.id,
            voucher.discount_code,
            voucher.discount_value,
            voucher.discount_type,
            voucher.used_count,
            state
        );
    }
    Ok(())
}

/// Show one voucher.
pub async fn show(client: &ApiClient, id: &str) -> ApiResult<()> {
    let voucher = client.vouchers().get(&VoucherId::from(id)).await?;

    info!("{} ({})", voucher.discount_code, voucher.discount_name);
    info!("  ID:       {}", voucher.id);
    info!(
        "  Discount: {} ({})",
        voucher.discount_value, voucher.discount_type
    );
    info!("  Window:   {} to {}", voucher.start_date, voucher.end_date);
    info!("  Min:      {} VND", voucher.min_order_value);
    if let Some(cap) = voucher.max_discount_amount {
        info!("  Cap:      {} VND", cap);
    }
    match voucher.usage_limit {
        Some(limit) => info!("  Usage:    {}/{}", voucher.used_count, limit),
        None => info!("  Usage:    {} (no limit)", voucher.used_count),
    }
    info!("  Active:   {}", voucher.is_active);
    Ok(())
}

/// Voucher counts and usage totals.
pub async fn stats(client: &ApiClient) -> ApiResult<()> {
    let stats = client.vouchers().stats().await?;

    info!("Vouchers: {}", stats.total_vouchers);
    info!("  Active:  {}", stats.active_vouchers);
    info!("  Expired: {}", stats.expired_vouchers);
    info!("  Used:    {} times", stats.total_used);
    for bucket in &stats.type_breakdown {
        info!(
            "  {}: {} vouchers, used {} times",
            bucket.discount_type, bucket.count, bucket.total_used
        );
    }
    Ok(())
}
