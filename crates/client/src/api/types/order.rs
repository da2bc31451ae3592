//! Order types.

use chrono::{DateTime, Utc};
use lumera_core::{CustomerId, OrderId, ProductId, SortOrder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle states. Lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipping,
    Success,
    Failed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipping => "shipping",
            Self::Success => "success",
            Self::Failed => "failed",
        };
        write!(f, "{value}")
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "shipping" => Ok(Self::Shipping),
            "success" => Ok(Self::Success),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Payment channel used for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Payos,
    Cash,
}

/// One line item inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price_at_purchase: Decimal,
    pub discount_applied: Decimal,
}

/// A voucher applied to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    pub discount_id: String,
    pub discount_amount: Decimal,
}

/// Customer summary populated inline on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomer {
    #[serde(rename = "_id")]
    pub id: CustomerId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Admin summary populated inline on orders they processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderProcessor {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
}

/// An order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub order_code: String,
    /// Populated customer summary (the raw id lives inside it).
    #[serde(rename = "customerId")]
    pub customer: OrderCustomer,
    pub order_date: DateTime<Utc>,
    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
    pub shipping_fee: Decimal,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub order_details: Vec<OrderDetail>,
    pub applied_discounts: Vec<AppliedDiscount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "processedBy", skip_serializing_if = "Option::is_none")]
    pub processed_by: Option<OrderProcessor>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for `GET /orders`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Inclusive date-range bounds, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Payload for `PATCH /orders/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for `PATCH /orders/{id}/cancel`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CancelOrderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Date-range bounds accepted by `GET /orders/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Aggregate order statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: u64,
    pub total_revenue: Decimal,
    pub status_breakdown: Vec<OrderStatusBreakdown>,
}

/// Per-status slice of the order statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusBreakdown {
    /// Status name; the aggregation pipeline surfaces it as `_id`.
    #[serde(rename = "_id")]
    pub status: String,
    pub count: u64,
    pub total_amount: Decimal,
}

/// Time bucket size for `GET /orders/timeseries`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

/// Query parameters for `GET /orders/timeseries`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTimeSeriesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<Granularity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_success_rate: Option<bool>,
}

/// One bucket of the order time series.
///
/// The optional fields only appear when `include_success_rate` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTimeSeriesPoint {
    /// Bucket label, e.g. `2024-02-01` or `2024-W05` depending on
    /// granularity.
    pub date: String,
    pub order_count: u64,
    pub revenue: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_revenue: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_revenue: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_rate: Option<f64>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn order_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Shipping).unwrap(),
            "\"shipping\""
        );
        assert_eq!(OrderStatus::Success.to_string(), "success");
    }

    #[test]
    fn filters_skip_unset_fields() {
        let filters = OrderFilters {
            page: Some(2),
            status: Some(OrderStatus::Pending),
            ..OrderFilters::default()
        };
        let value = serde_json::to_value(&filters).unwrap();
        assert_eq!(value, serde_json::json!({"page": 2, "status": "pending"}));
    }

    #[test]
    fn stats_breakdown_reads_underscore_id() {
        let stats: OrderStats = serde_json::from_value(serde_json::json!({
            "totalOrders": 7,
            "totalRevenue": 12_500_000,
            "statusBreakdown": [
                {"_id": "success", "count": 5, "totalAmount": 11_000_000},
                {"_id": "failed", "count": 2, "totalAmount": 1_500_000}
            ]
        }))
        .unwrap();

        assert_eq!(stats.status_breakdown.len(), 2);
        assert_eq!(stats.status_breakdown.first().unwrap().status, "success");
    }
}
