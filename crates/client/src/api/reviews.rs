//! Review moderation endpoints.

use lumera_core::{Page, ProductId, ReviewId};
use serde::Deserialize;

use crate::ApiClient;
use crate::api::types::{ApproveReviewRequest, RejectReviewRequest, Review, ReviewFilters};
use crate::error::ApiResult;

/// Bare list shape used by `GET /reviews`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewsWire {
    reviews: Vec<Review>,
    total: u64,
    page: u32,
    limit: u32,
    total_pages: u32,
}

/// `GET|PATCH|DELETE /reviews` moderation surface.
#[derive(Debug, Clone, Copy)]
pub struct ReviewsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ReviewsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List reviews with filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, filters: &ReviewFilters) -> ApiResult<Page<Review>> {
        let wire: ReviewsWire = self.client.get_query("/reviews", filters).await?;
        Ok(Page::new(
            wire.reviews,
            wire.total,
            wire.page,
            wire.limit,
            wire.total_pages,
        ))
    }

    /// Fetch one review by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, id: &ReviewId) -> ApiResult<Review> {
        self.client.get(&format!("/reviews/{id}")).await
    }

    /// Approve (or re-moderate) a review, optionally attaching a response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn approve(
        &self,
        id: &ReviewId,
        request: &ApproveReviewRequest,
    ) -> ApiResult<Review> {
        self.client
            .patch(&format!("/reviews/{id}/approve"), request)
            .await
    }

    /// Reject a review, optionally attaching a response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn reject(&self, id: &ReviewId, request: &RejectReviewRequest) -> ApiResult<Review> {
        self.client
            .patch(&format!("/reviews/{id}/reject"), request)
            .await
    }

    /// Delete a review through the moderation path.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: &ReviewId) -> ApiResult<()> {
        self.client.delete(&format!("/reviews/{id}/admin")).await
    }

    /// Rating aggregates for one product's reviews.
    ///
    /// The backend's aggregation shape is passed through untyped.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn product_stats(&self, product_id: &ProductId) -> ApiResult<serde_json::Value> {
        self.client
            .get(&format!("/reviews/product/{product_id}/stats"))
            .await
    }

    /// Bump a review's helpful counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn mark_helpful(&self, id: &ReviewId) -> ApiResult<Review> {
        self.client
            .patch_empty(&format!("/reviews/{id}/helpful"))
            .await
    }
}
