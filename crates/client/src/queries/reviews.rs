//! Cached review queries.

use lumera_core::{Page, ProductId, ReviewId};

use crate::ApiClient;
use crate::api::types::{ApproveReviewRequest, RejectReviewRequest, Review, ReviewFilters};
use crate::cache::{STALE_AFTER, STALE_AFTER_STATS};
use crate::error::ApiResult;

const GROUP: &str = "reviews";

fn detail_group(id: &ReviewId) -> String {
    format!("review:{id}")
}

fn detail_key(id: &ReviewId) -> String {
    format!("reviews:get:{id}")
}

/// Review moderation queries backed by the query cache.
#[derive(Debug, Clone, Copy)]
pub struct Reviews<'a> {
    client: &'a ApiClient,
}

impl<'a> Reviews<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List reviews matching the filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, filters: ReviewFilters) -> ApiResult<Page<Review>> {
        let key = format!("reviews:list:{filters:?}");
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &[GROUP.to_owned()], || async move {
                self.client.api().reviews().list(&filters).await
            })
            .await
    }

    /// Fetch one review.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, id: &ReviewId) -> ApiResult<Review> {
        let groups = [detail_group(id)];
        self.client
            .cache()
            .fetch(detail_key(id), STALE_AFTER, &groups, || async move {
                self.client.api().reviews().get(id).await
            })
            .await
    }

    /// Rating distribution for one product, cached on the longer stats
    /// window.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn product_stats(&self, product_id: &ProductId) -> ApiResult<serde_json::Value> {
        let key = format!("reviews:product-stats:{product_id}");
        self.client
            .cache()
            .fetch(key, STALE_AFTER_STATS, &[GROUP.to_owned()], || async move {
                self.client.api().reviews().product_stats(product_id).await
            })
            .await
    }

    /// Approve a review, refresh review queries, and seed the detail entry
    /// with the moderated review.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn approve(
        &self,
        id: &ReviewId,
        request: &ApproveReviewRequest,
    ) -> ApiResult<Review> {
        let approved = self.client.api().reviews().approve(id, request).await?;
        self.refresh_detail(id, approved.clone()).await;
        Ok(approved)
    }

    /// Reject a review, refresh review queries, and seed the detail entry
    /// with the moderated review.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn reject(&self, id: &ReviewId, request: &RejectReviewRequest) -> ApiResult<Review> {
        let rejected = self.client.api().reviews().reject(id, request).await?;
        self.refresh_detail(id, rejected.clone()).await;
        Ok(rejected)
    }

    /// Bump a review's helpful counter and refresh review queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn mark_helpful(&self, id: &ReviewId) -> ApiResult<Review> {
        let review = self.client.api().reviews().mark_helpful(id).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(review)
    }

    /// Delete a review and refresh review queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: &ReviewId) -> ApiResult<()> {
        self.client.api().reviews().delete(id).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(())
    }

    /// Invalidate review queries and store the fresh moderation result under
    /// the detail key, so the next detail read skips the network.
    async fn refresh_detail(&self, id: &ReviewId, review: Review) {
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        cache.put(detail_key(id), &[detail_group(id)], review).await;
    }
}
