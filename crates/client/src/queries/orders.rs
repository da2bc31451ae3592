//! Cached order queries.

use lumera_core::{OrderId, Page};

use crate::ApiClient;
use crate::api::types::{
    CancelOrderRequest, Order, OrderFilters, OrderStats, OrderStatsParams, OrderTimeSeriesParams,
    OrderTimeSeriesPoint, UpdateOrderStatusRequest,
};
use crate::cache::{STALE_AFTER, STALE_AFTER_STATS};
use crate::error::ApiResult;

const GROUP: &str = "orders";

fn detail_group(id: &OrderId) -> String {
    format!("order:{id}")
}

/// Order queries backed by the query cache.
#[derive(Debug, Clone, Copy)]
pub struct Orders<'a> {
    client: &'a ApiClient,
}

impl<'a> Orders<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List orders matching the filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, filters: OrderFilters) -> ApiResult<Page<Order>> {
        let key = format!("orders:list:{filters:?}");
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &[GROUP.to_owned()], || async move {
                self.client.api().orders().list(&filters).await
            })
            .await
    }

    /// Fetch one order with its line items.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, id: &OrderId) -> ApiResult<Order> {
        let key = format!("orders:get:{id}");
        let groups = [detail_group(id)];
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &groups, || async move {
                self.client.api().orders().get(id).await
            })
            .await
    }

    /// Order totals and a per-status breakdown, cached on the longer stats
    /// window.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn stats(&self, params: OrderStatsParams) -> ApiResult<OrderStats> {
        let key = format!("orders:stats:{params:?}");
        self.client
            .cache()
            .fetch(key, STALE_AFTER_STATS, &[GROUP.to_owned()], || async move {
                self.client.api().orders().stats(&params).await
            })
            .await
    }

    /// Revenue and order counts bucketed over time.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn timeseries(
        &self,
        params: OrderTimeSeriesParams,
    ) -> ApiResult<Vec<OrderTimeSeriesPoint>> {
        let key = format!("orders:timeseries:{params:?}");
        self.client
            .cache()
            .fetch(key, STALE_AFTER_STATS, &[GROUP.to_owned()], || async move {
                self.client.api().orders().timeseries(&params).await
            })
            .await
    }

    /// Payment attempts recorded for an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn payments(&self, id: &OrderId) -> ApiResult<Vec<serde_json::Value>> {
        let key = format!("orders:payments:{id}");
        let groups = [detail_group(id)];
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &groups, || async move {
                self.client.api().orders().payments(id).await
            })
            .await
    }

    /// Move an order to a new fulfillment status and refresh order queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, including when the backend
    /// rejects the status transition.
    pub async fn update_status(
        &self,
        id: &OrderId,
        request: &UpdateOrderStatusRequest,
    ) -> ApiResult<Order> {
        let updated = self.client.api().orders().update_status(id, request).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(updated)
    }

    /// Cancel an order and refresh order queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn cancel(&self, id: &OrderId, request: &CancelOrderRequest) -> ApiResult<Order> {
        let cancelled = self.client.api().orders().cancel(id, request).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(cancelled)
    }

    /// Delete an order and refresh order queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: &OrderId) -> ApiResult<()> {
        self.client.api().orders().delete(id).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(())
    }
}
