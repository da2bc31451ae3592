//! Cached voucher queries.

use chrono::Utc;
use lumera_core::{Page, VoucherId};
use rust_decimal::Decimal;

use crate::ApiClient;
use crate::api::types::{
    CreateVoucherRequest, DiscountType, UpdateVoucherRequest, ValidateVoucherRequest, Voucher,
    VoucherFilters, VoucherStats, VoucherTypeBreakdown, VoucherValidation,
};
use crate::cache::{STALE_AFTER, STALE_AFTER_STATS};
use crate::error::ApiResult;

const GROUP: &str = "vouchers";

/// Page size used to pull the voucher list the stats are derived from.
const STATS_SAMPLE_LIMIT: u32 = 1000;

fn detail_group(id: &VoucherId) -> String {
    format!("voucher:{id}")
}

/// Voucher queries backed by the query cache.
#[derive(Debug, Clone, Copy)]
pub struct Vouchers<'a> {
    client: &'a ApiClient,
}

impl<'a> Vouchers<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List vouchers matching the filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, filters: VoucherFilters) -> ApiResult<Page<Voucher>> {
        let key = format!("vouchers:list:{filters:?}");
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &[GROUP.to_owned()], || async move {
                self.client.api().vouchers().list(&filters).await
            })
            .await
    }

    /// Fetch one voucher.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, id: &VoucherId) -> ApiResult<Voucher> {
        let key = format!("vouchers:get:{id}");
        let groups = [detail_group(id)];
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &groups, || async move {
                self.client.api().vouchers().get(id).await
            })
            .await
    }

    /// Look a voucher up by its code.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn by_code(&self, code: &str) -> ApiResult<Voucher> {
        let key = format!("vouchers:code:{code}");
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &[GROUP.to_owned()], || async move {
                self.client.api().vouchers().by_code(code).await
            })
            .await
    }

    /// Vouchers currently usable at checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn active(&self) -> ApiResult<Vec<Voucher>> {
        let key = "vouchers:active".to_owned();
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &[GROUP.to_owned()], || async move {
                self.client.api().vouchers().active().await
            })
            .await
    }

    /// Aggregate voucher statistics, cached on the longer stats window.
    ///
    /// The backend has no voucher stats endpoint, so the numbers are derived
    /// from one large page of vouchers. Redeemed discount totals are not
    /// recorded per voucher and report as zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn stats(&self) -> ApiResult<VoucherStats> {
        let key = "vouchers:stats".to_owned();
        self.client
            .cache()
            .fetch(key, STALE_AFTER_STATS, &[GROUP.to_owned()], || async move {
                let filters = VoucherFilters {
                    limit: Some(STATS_SAMPLE_LIMIT),
                    ..VoucherFilters::default()
                };
                let page = self.client.api().vouchers().list(&filters).await?;
                Ok(build_stats(&page.items))
            })
            .await
    }

    /// Check whether a voucher code applies to an order value.
    ///
    /// Never cached. The answer depends on the order value and on usage
    /// counters that move without any mutation from this client.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn validate(&self, request: &ValidateVoucherRequest) -> ApiResult<VoucherValidation> {
        self.client.api().vouchers().validate(request).await
    }

    /// Create a voucher and refresh voucher queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create(&self, voucher: &CreateVoucherRequest) -> ApiResult<Voucher> {
        let created = self.client.api().vouchers().create(voucher).await?;
        self.client.cache().invalidate_group(GROUP);
        Ok(created)
    }

    /// Update a voucher and refresh voucher queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update(
        &self,
        id: &VoucherId,
        voucher: &UpdateVoucherRequest,
    ) -> ApiResult<Voucher> {
        let updated = self.client.api().vouchers().update(id, voucher).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(updated)
    }

    /// Delete a voucher and refresh voucher queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: &VoucherId) -> ApiResult<()> {
        self.client.api().vouchers().delete(id).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(())
    }
}

fn build_stats(vouchers: &[Voucher]) -> VoucherStats {
    let now = Utc::now();
    let type_breakdown = [DiscountType::Percentage, DiscountType::FixedAmount]
        .into_iter()
        .map(|discount_type| {
            let matching = vouchers
                .iter()
                .filter(move |voucher| voucher.discount_type == discount_type);
            VoucherTypeBreakdown {
                discount_type,
                count: matching.clone().count() as u64,
                total_used: matching.map(|voucher| voucher.used_count).sum(),
            }
        })
        .collect();
    VoucherStats {
        total_vouchers: vouchers.len() as u64,
        active_vouchers: vouchers
            .iter()
            .filter(|voucher| voucher.is_currently_active(now))
            .count() as u64,
        expired_vouchers: vouchers
            .iter()
            .filter(|voucher| voucher.end_date <= now)
            .count() as u64,
        total_used: vouchers.iter().map(|voucher| voucher.used_count).sum(),
        total_discount_amount: Decimal::ZERO,
        type_breakdown,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn voucher(code: &str, discount_type: DiscountType, used: u64, expired: bool) -> Voucher {
        let now = Utc::now();
        let end_date = if expired {
            now - Duration::days(1)
        } else {
            now + Duration::days(30)
        };
        serde_json::from_value(serde_json::json!({
            "_id": format!("v-{code}"),
            "discountCode": code,
            "discountName": format!("Voucher {code}"),
            "discountType": discount_type,
            "discountValue": "10",
            "startDate": (now - Duration::days(60)).to_rfc3339(),
            "endDate": end_date.to_rfc3339(),
            "minOrderValue": "0",
            "usedCount": used,
            "isActive": true,
            "createdBy": {"_id": "a1", "username": "root", "email": "root@example.com"},
            "createdAt": now.to_rfc3339(),
            "updatedAt": now.to_rfc3339(),
        }))
        .unwrap()
    }

    #[test]
    fn stats_split_counts_by_type_and_expiry() {
        let vouchers = vec![
            voucher("SPRING10", DiscountType::Percentage, 4, false),
            voucher("SUMMER20", DiscountType::Percentage, 1, true),
            voucher("FLAT50K", DiscountType::FixedAmount, 7, false),
        ];

        let stats = build_stats(&vouchers);

        assert_eq!(stats.total_vouchers, 3);
        assert_eq!(stats.active_vouchers, 2);
        assert_eq!(stats.expired_vouchers, 1);
        assert_eq!(stats.total_used, 12);
        assert_eq!(stats.total_discount_amount, Decimal::ZERO);
        assert_eq!(stats.type_breakdown.len(), 2);
        assert_eq!(stats.type_breakdown[0].discount_type, DiscountType::Percentage);
        assert_eq!(stats.type_breakdown[0].count, 2);
        assert_eq!(stats.type_breakdown[0].total_used, 5);
        assert_eq!(stats.type_breakdown[1].count, 1);
        assert_eq!(stats.type_breakdown[1].total_used, 7);
    }
}
