//! Voucher types.

use chrono::{DateTime, Utc};
use lumera_core::{SortOrder, VoucherId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a voucher discounts an order. PascalCase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountType {
    Percentage,
    FixedAmount,
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Self::Percentage => "Percentage",
            Self::FixedAmount => "FixedAmount",
        };
        write!(f, "{value}")
    }
}

/// Admin summary populated inline on vouchers they created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherCreator {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
}

/// A discount voucher as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    #[serde(rename = "_id")]
    pub id: VoucherId,
    pub discount_code: String,
    pub discount_name: String,
    pub discount_type: DiscountType,
    /// Percent for `Percentage` vouchers, an absolute amount otherwise.
    pub discount_value: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub min_order_value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_discount_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u64>,
    pub used_count: u64,
    pub is_active: bool,
    #[serde(rename = "createdBy")]
    pub created_by: VoucherCreator,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Voucher {
    /// Whether the voucher is active and not past its end date.
    #[must_use]
    pub fn is_currently_active(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.end_date > now
    }
}

/// Query parameters for `GET /vouchers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Payload for `POST /vouchers`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoucherRequest {
    pub discount_code: String,
    pub discount_name: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_order_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_discount_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for `PATCH /vouchers/{id}`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVoucherRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_order_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_discount_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for `POST /vouchers/validate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateVoucherRequest {
    pub voucher_code: String,
    pub order_value: Decimal,
}

/// Outcome of a voucher validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherValidation {
    pub is_valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher: Option<Voucher>,
}

/// Aggregate voucher statistics, derived from the full voucher list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherStats {
    pub total_vouchers: u64,
    pub active_vouchers: u64,
    pub expired_vouchers: u64,
    pub total_used: u64,
    pub total_discount_amount: Decimal,
    pub type_breakdown: Vec<VoucherTypeBreakdown>,
}

/// Per-type slice of the voucher statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherTypeBreakdown {
    #[serde(rename = "_id")]
    pub discount_type: DiscountType,
    pub count: u64,
    pub total_used: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn discount_type_keeps_pascal_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&DiscountType::FixedAmount).unwrap(),
            "\"FixedAmount\""
        );
        let parsed: DiscountType = serde_json::from_str("\"Percentage\"").unwrap();
        assert_eq!(parsed, DiscountType::Percentage);
    }

    #[test]
    fn currently_active_requires_flag_and_future_end_date() {
        let voucher: Voucher = serde_json::from_value(serde_json::json!({
            "_id": "v1",
            "discountCode": "SUMMER10",
            "discountName": "Summer sale",
            "discountType": "Percentage",
            "discountValue": 10,
            "startDate": "2024-06-01T00:00:00.000Z",
            "endDate": "2024-06-30T23:59:59.000Z",
            "minOrderValue": 0,
            "usedCount": 3,
            "isActive": true,
            "createdBy": {"_id": "a1", "username": "root", "email": "root@example.com"},
            "createdAt": "2024-05-20T08:00:00.000Z",
            "updatedAt": "2024-05-20T08:00:00.000Z"
        }))
        .unwrap();

        let before_end = "2024-06-15T00:00:00Z".parse().unwrap();
        let after_end = "2024-07-01T00:00:00Z".parse().unwrap();
        assert!(voucher.is_currently_active(before_end));
        assert!(!voucher.is_currently_active(after_end));
    }
}
