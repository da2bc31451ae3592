//! Review types.

use chrono::{DateTime, Utc};
use lumera_core::{CustomerId, OrderId, ProductId, ReviewId, SortOrder};
use serde::{Deserialize, Serialize};

/// Moderation state of a review. Lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        };
        write!(f, "{value}")
    }
}

/// Customer summary populated inline on a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCustomer {
    #[serde(rename = "_id")]
    pub id: CustomerId,
    pub full_name: String,
    pub email: String,
}

/// Product summary populated inline on a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewProduct {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub product_name: String,
    pub images: Vec<String>,
}

/// A product review as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ReviewId,
    pub product_id: ProductId,
    pub customer_id: CustomerId,
    pub order_id: OrderId,
    /// Star rating, 1 through 5.
    pub rating: u8,
    pub title: String,
    pub comment: String,
    pub review_date: DateTime<Utc>,
    pub status: ReviewStatus,
    #[serde(rename = "approvedBy", skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// Moderator response shown alongside the review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_date: Option<DateTime<Utc>>,
    pub helpful_count: u64,
    pub is_verified_purchase: bool,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<ReviewCustomer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ReviewProduct>,
}

/// Query parameters for `GET /reviews`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReviewStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Payload for `PATCH /reviews/{id}/approve`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveReviewRequest {
    pub is_approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

/// Payload for `PATCH /reviews/{id}/reject`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectReviewRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn review_parses_populated_summaries() {
        let review: Review = serde_json::from_value(serde_json::json!({
            "_id": "r1",
            "productId": "p1",
            "customerId": "c1",
            "orderId": "o1",
            "rating": 5,
            "title": "Gorgeous ring",
            "comment": "Exactly as pictured.",
            "reviewDate": "2024-03-01T10:00:00.000Z",
            "status": "pending",
            "helpfulCount": 0,
            "isVerifiedPurchase": true,
            "images": [],
            "createdAt": "2024-03-01T10:00:00.000Z",
            "updatedAt": "2024-03-01T10:00:00.000Z",
            "customer": {"_id": "c1", "fullName": "An Tran", "email": "an@example.com"},
            "product": {"_id": "p1", "productName": "Gold Band", "images": ["a.jpg"]}
        }))
        .unwrap();

        assert_eq!(review.status, ReviewStatus::Pending);
        assert_eq!(review.customer.unwrap().full_name, "An Tran");
        assert!(review.approved_by.is_none());
    }

    #[test]
    fn filters_serialize_only_set_fields() {
        let filters = ReviewFilters {
            status: Some(ReviewStatus::Approved),
            rating: Some(4),
            ..ReviewFilters::default()
        };
        let value = serde_json::to_value(&filters).unwrap();
        assert_eq!(value, serde_json::json!({"status": "approved", "rating": 4}));
    }
}
