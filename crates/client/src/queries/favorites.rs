//! Cached wishlist queries.

use lumera_core::{CustomerId, Page};

use crate::ApiClient;
use crate::api::types::{FavoriteItem, FavoriteStats, FavoritesListParams, RemoveFavoriteRequest};
use crate::cache::{STALE_AFTER, STALE_AFTER_STATS};
use crate::error::ApiResult;

const GROUP: &str = "favorites";

/// Wishlist queries backed by the query cache.
#[derive(Debug, Clone, Copy)]
pub struct Favorites<'a> {
    client: &'a ApiClient,
}

impl<'a> Favorites<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// One customer's wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn for_customer(
        &self,
        customer_id: &CustomerId,
        params: FavoritesListParams,
    ) -> ApiResult<Page<FavoriteItem>> {
        let key = format!("favorites:customer:{customer_id}:{params:?}");
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &[GROUP.to_owned()], || async move {
                self.client
                    .api()
                    .favorites()
                    .customer_favorites(customer_id, &params)
                    .await
            })
            .await
    }

    /// Wishlist totals across all customers, cached on the longer stats
    /// window.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn stats(&self) -> ApiResult<FavoriteStats> {
        let key = "favorites:stats".to_owned();
        self.client
            .cache()
            .fetch(key, STALE_AFTER_STATS, &[GROUP.to_owned()], || async move {
                self.client.api().favorites().stats().await
            })
            .await
    }

    /// Take a product off a customer's wishlist and refresh wishlist queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn remove(&self, request: &RemoveFavoriteRequest) -> ApiResult<()> {
        self.client.api().favorites().remove(request).await?;
        self.client.cache().invalidate_group(GROUP);
        Ok(())
    }
}
