//! Raw resource endpoints.
//!
//! One module per backend resource, each a thin one-to-one mapping from a
//! domain operation to an HTTP call. No caching, no retries beyond the
//! client's own 401 handling; any non-2xx propagates as an error.
//!
//! The backend grew three incompatible list envelopes: `{data: {items, ...}}`
//! for admins, customers, products, and categories; bare `{orders, total,
//! ...}` style objects for orders, vouchers, and reviews; and a
//! `{favorites, ..., currentPage}` shape for wishlists. Each module
//! normalizes its own wire shape into [`Page`] here at the boundary so
//! nothing above it has to care.

use serde::Deserialize;

use lumera_core::Page;

use crate::ApiClient;

pub mod types;

mod admins;
mod auth;
mod categories;
mod contacts;
mod customers;
mod favorites;
mod orders;
mod products;
mod reviews;
mod vouchers;

pub use admins::AdminsApi;
pub use auth::AuthApi;
pub use categories::CategoriesApi;
pub use contacts::ContactsApi;
pub use customers::CustomersApi;
pub use favorites::FavoritesApi;
pub use orders::OrdersApi;
pub use products::ProductsApi;
pub use reviews::ReviewsApi;
pub use vouchers::VouchersApi;

/// Entry point for the raw endpoints, obtained via [`ApiClient::api`].
#[derive(Debug, Clone, Copy)]
pub struct Api<'a> {
    client: &'a ApiClient,
}

impl<'a> Api<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn auth(&self) -> AuthApi<'a> {
        AuthApi::new(self.client)
    }

    #[must_use]
    pub fn admins(&self) -> AdminsApi<'a> {
        AdminsApi::new(self.client)
    }

    #[must_use]
    pub fn customers(&self) -> CustomersApi<'a> {
        CustomersApi::new(self.client)
    }

    #[must_use]
    pub fn products(&self) -> ProductsApi<'a> {
        ProductsApi::new(self.client)
    }

    #[must_use]
    pub fn categories(&self) -> CategoriesApi<'a> {
        CategoriesApi::new(self.client)
    }

    #[must_use]
    pub fn orders(&self) -> OrdersApi<'a> {
        OrdersApi::new(self.client)
    }

    #[must_use]
    pub fn vouchers(&self) -> VouchersApi<'a> {
        VouchersApi::new(self.client)
    }

    #[must_use]
    pub fn reviews(&self) -> ReviewsApi<'a> {
        ReviewsApi::new(self.client)
    }

    #[must_use]
    pub fn favorites(&self) -> FavoritesApi<'a> {
        FavoritesApi::new(self.client)
    }

    #[must_use]
    pub fn contacts(&self) -> ContactsApi<'a> {
        ContactsApi::new(self.client)
    }
}

// ===== Wire Envelopes =====

/// The backend's `{data: ...}` wrapper.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Enveloped paginated payload: `{items, total, page, limit, totalPages,
/// hasNextPage?, hasPrevPage?}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginatedData<T> {
    items: Vec<T>,
    total: u64,
    page: u32,
    limit: u32,
    total_pages: u32,
    has_next_page: Option<bool>,
    has_prev_page: Option<bool>,
}

impl<T> PaginatedData<T> {
    /// Normalize into a [`Page`], deriving the next/prev flags when the
    /// endpoint omitted them.
    pub(crate) fn into_page(self) -> Page<T> {
        let mut page = Page::new(self.items, self.total, self.page, self.limit, self.total_pages);
        if let Some(has_next) = self.has_next_page {
            page.has_next_page = has_next;
        }
        if let Some(has_prev) = self.has_prev_page {
            page.has_prev_page = has_prev;
        }
        page
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn paginated_data_derives_missing_flags() {
        let data: PaginatedData<u32> = serde_json::from_value(serde_json::json!({
            "items": [1, 2, 3],
            "total": 23,
            "page": 2,
            "limit": 10,
            "totalPages": 3
        }))
        .unwrap();

        let page = data.into_page();
        assert!(page.has_next_page);
        assert!(page.has_prev_page);
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn paginated_data_prefers_explicit_flags() {
        let data: PaginatedData<u32> = serde_json::from_value(serde_json::json!({
            "items": [],
            "total": 0,
            "page": 1,
            "limit": 10,
            "totalPages": 0,
            "hasNextPage": true,
            "hasPrevPage": false
        }))
        .unwrap();

        let page = data.into_page();
        assert!(page.has_next_page);
        assert!(!page.has_prev_page);
    }

    #[test]
    fn envelope_unwraps_data() {
        let envelope: Envelope<String> =
            serde_json::from_value(serde_json::json!({"data": "ok"})).unwrap();
        assert_eq!(envelope.data, "ok");
    }
}
