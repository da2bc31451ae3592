//! Order endpoints.

use lumera_core::{OrderId, Page};
use serde::Deserialize;

use crate::ApiClient;
use crate::api::types::{
    CancelOrderRequest, Order, OrderFilters, OrderStats, OrderStatsParams,
    OrderTimeSeriesParams, OrderTimeSeriesPoint, UpdateOrderStatusRequest,
};
use crate::error::ApiResult;

/// Bare list shape used by `GET /orders`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrdersWire {
    orders: Vec<Order>,
    total: u64,
    page: u32,
    limit: u32,
    total_pages: u32,
}

/// `GET|PATCH|DELETE /orders` plus stats and time series.
#[derive(Debug, Clone, Copy)]
pub struct OrdersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> OrdersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List orders with filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, filters: &OrderFilters) -> ApiResult<Page<Order>> {
        let wire: OrdersWire = self.client.get_query("/orders", filters).await?;
        Ok(Page::new(
            wire.orders,
            wire.total,
            wire.page,
            wire.limit,
            wire.total_pages,
        ))
    }

    /// Fetch one order by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, id: &OrderId) -> ApiResult<Order> {
        self.client.get(&format!("/orders/{id}")).await
    }

    /// Move an order to a new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, including invalid status
    /// transitions rejected by the backend.
    pub async fn update_status(
        &self,
        id: &OrderId,
        request: &UpdateOrderStatusRequest,
    ) -> ApiResult<Order> {
        self.client.patch(&format!("/orders/{id}"), request).await
    }

    /// Cancel an order, optionally recording a reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn cancel(&self, id: &OrderId, request: &CancelOrderRequest) -> ApiResult<Order> {
        self.client
            .patch(&format!("/orders/{id}/cancel"), request)
            .await
    }

    /// Aggregate statistics over an optional date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn stats(&self, params: &OrderStatsParams) -> ApiResult<OrderStats> {
        self.client.get_query("/orders/stats", params).await
    }

    /// Revenue and order-count buckets over time.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn timeseries(
        &self,
        params: &OrderTimeSeriesParams,
    ) -> ApiResult<Vec<OrderTimeSeriesPoint>> {
        self.client.get_query("/orders/timeseries", params).await
    }

    /// Raw payment records attached to an order.
    ///
    /// The payment gateway's shape is passed through untyped.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn payments(&self, id: &OrderId) -> ApiResult<Vec<serde_json::Value>> {
        self.client.get(&format!("/orders/{id}/payments")).await
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: &OrderId) -> ApiResult<()> {
        self.client.delete(&format!("/orders/{id}")).await
    }
}
