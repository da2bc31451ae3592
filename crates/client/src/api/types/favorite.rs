//! Favorite (wishlist) types.

use chrono::{DateTime, Utc};
use lumera_core::{CategoryId, CustomerId, FavoriteId, ProductId, SortOrder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category summary nested inside a favorited product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCategory {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    pub category_name: String,
}

/// Product summary populated inline on a favorite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteProduct {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub product_name: String,
    pub images: Vec<String>,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<Decimal>,
    #[serde(rename = "categoryId", default)]
    pub category: Option<FavoriteCategory>,
}

/// Customer summary populated inline on a favorite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCustomer {
    #[serde(rename = "_id")]
    pub id: CustomerId,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A wishlist entry as returned by the backend.
///
/// The wire keeps the raw reference names `productId` and `customerId`
/// even though both arrive populated with full summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItem {
    pub id: FavoriteId,
    #[serde(rename = "productId")]
    pub product: FavoriteProduct,
    #[serde(rename = "customerId")]
    pub customer: FavoriteCustomer,
    pub added_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for `GET /favorites/customer/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Payload for `DELETE /favorites`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFavoriteRequest {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
}

/// Aggregate wishlist statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStats {
    pub total_favorites: u64,
    pub unique_customers: u64,
    pub unique_products: u64,
    pub total_value: Decimal,
    pub most_popular_products: Vec<PopularProduct>,
}

/// One row of the most-favorited product ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularProduct {
    pub product_id: ProductId,
    pub product_name: String,
    pub favorite_count: u64,
    pub total_value: Decimal,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn favorite_parses_populated_references() {
        let item: FavoriteItem = serde_json::from_value(serde_json::json!({
            "id": "f1",
            "productId": {
                "_id": "p1",
                "productName": "Silver Pendant",
                "images": ["pendant.jpg"],
                "price": 590_000,
                "categoryId": {"_id": "cat1", "categoryName": "Necklaces"}
            },
            "customerId": {"_id": "c1", "fullName": "An Tran", "email": "an@example.com"},
            "addedAt": "2024-04-02T09:30:00.000Z",
            "isActive": true,
            "createdAt": "2024-04-02T09:30:00.000Z",
            "updatedAt": "2024-04-02T09:30:00.000Z"
        }))
        .unwrap();

        assert_eq!(item.product.id.as_str(), "p1");
        assert_eq!(item.customer.full_name, "An Tran");
        assert!(item.product.discounted_price.is_none());
    }

    #[test]
    fn favorite_tolerates_null_category() {
        let product: FavoriteProduct = serde_json::from_value(serde_json::json!({
            "_id": "p2",
            "productName": "Loose Stone",
            "images": [],
            "price": 120_000,
            "categoryId": null
        }))
        .unwrap();

        assert!(product.category.is_none());
    }
}
