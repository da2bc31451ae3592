//! Wishlist endpoints.

use lumera_core::{CustomerId, Page};
use serde::Deserialize;

use crate::ApiClient;
use crate::api::types::{FavoriteItem, FavoriteStats, FavoritesListParams, RemoveFavoriteRequest};
use crate::error::ApiResult;

/// Bare list shape used by `GET /favorites/customer/{id}`.
///
/// Unlike the other list endpoints this one reports `currentPage` and no
/// page size, so the requested limit fills the gap.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FavoritesWire {
    favorites: Vec<FavoriteItem>,
    total: u64,
    total_pages: u32,
    current_page: u32,
}

/// Default page size assumed when the caller did not pick one.
const DEFAULT_LIMIT: u32 = 10;

/// `GET|DELETE /favorites` wishlist surface.
#[derive(Debug, Clone, Copy)]
pub struct FavoritesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FavoritesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List one customer's wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn customer_favorites(
        &self,
        customer_id: &CustomerId,
        params: &FavoritesListParams,
    ) -> ApiResult<Page<FavoriteItem>> {
        let wire: FavoritesWire = self
            .client
            .get_query(&format!("/favorites/customer/{customer_id}"), params)
            .await?;
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
        Ok(Page::new(
            wire.favorites,
            wire.total,
            wire.current_page,
            limit,
            wire.total_pages,
        ))
    }

    /// Aggregate wishlist statistics across all customers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn stats(&self) -> ApiResult<FavoriteStats> {
        self.client.get("/favorites/stats").await
    }

    /// Take a product off a customer's wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn remove(&self, request: &RemoveFavoriteRequest) -> ApiResult<()> {
        self.client.delete_with_body("/favorites", request).await
    }
}
