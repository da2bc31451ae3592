//! Product catalog types.

use chrono::{DateTime, Utc};
use lumera_core::{CategoryId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// A jewelry product as returned by the backend.
///
/// Keyed `id` on the wire (not `_id`), with its category populated inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    pub description: String,
    /// Unit price in VND.
    pub price: Decimal,
    /// Weight in grams.
    pub weight: Decimal,
    /// Material description, e.g. "18k gold".
    pub material: String,
    pub stock_quantity: i64,
    pub category_id: CategoryId,
    pub category: Category,
    pub is_featured: bool,
    /// Hidden products stay out of the storefront; admin reads include them.
    pub is_hidden: bool,
    pub views: u64,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial product payload for `POST /products` and `PATCH /products/{id}`.
///
/// Every field is optional; create calls are expected to fill the ones the
/// backend requires and the backend validates the rest.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

/// Query parameters for `GET /products`.
///
/// `include_hidden` defaults to `true` when unset: the admin catalog always
/// wants hidden products listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_hidden: Option<bool>,
}

impl ProductListParams {
    /// Parameters as sent on the wire, with the admin default applied.
    #[must_use]
    pub fn with_admin_defaults(self) -> Self {
        Self {
            include_hidden: Some(self.include_hidden.unwrap_or(true)),
            ..self
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn admin_defaults_force_include_hidden() {
        let params = ProductListParams {
            page: Some(1),
            limit: Some(10),
            include_hidden: None,
        }
        .with_admin_defaults();
        assert_eq!(params.include_hidden, Some(true));
    }

    #[test]
    fn explicit_include_hidden_wins_over_default() {
        let params = ProductListParams {
            include_hidden: Some(false),
            ..ProductListParams::default()
        }
        .with_admin_defaults();
        assert_eq!(params.include_hidden, Some(false));
    }

    #[test]
    fn product_parses_wire_shape() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "productName": "Moonstone Ring",
            "description": "Hand-set moonstone on a silver band",
            "price": 1_590_000,
            "weight": 3.2,
            "material": "925 silver",
            "stockQuantity": 12,
            "categoryId": "c1",
            "category": {"id": "c1", "categoryName": "Rings", "description": "Rings"},
            "isFeatured": true,
            "isHidden": false,
            "views": 42,
            "images": ["https://cdn.lumera.example/p1.jpg"],
            "createdAt": "2024-01-10T08:30:00.000Z",
            "updatedAt": "2024-02-01T12:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.category.category_name, "Rings");
        assert_eq!(product.price, Decimal::from(1_590_000_u64));
    }
}
