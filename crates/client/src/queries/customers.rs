//! Cached customer queries.

use lumera_core::{CustomerId, Page};

use crate::ApiClient;
use crate::api::types::{
    CreateCustomerRequest, Customer, CustomerListParams, UpdateCustomerRequest,
};
use crate::cache::STALE_AFTER;
use crate::error::ApiResult;

const GROUP: &str = "customers";

fn detail_group(id: &CustomerId) -> String {
    format!("customer:{id}")
}

/// Customer queries backed by the query cache.
#[derive(Debug, Clone, Copy)]
pub struct Customers<'a> {
    client: &'a ApiClient,
}

impl<'a> Customers<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List customer accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, params: CustomerListParams) -> ApiResult<Page<Customer>> {
        let key = format!("customers:list:{params:?}");
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &[GROUP.to_owned()], || async move {
                self.client.api().customers().list(&params).await
            })
            .await
    }

    /// Fetch one customer account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, id: &CustomerId) -> ApiResult<Customer> {
        let key = format!("customers:get:{id}");
        let groups = [detail_group(id)];
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &groups, || async move {
                self.client.api().customers().get(id).await
            })
            .await
    }

    /// Register a customer account and refresh customer queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create(&self, customer: &CreateCustomerRequest) -> ApiResult<Customer> {
        let created = self.client.api().customers().create(customer).await?;
        self.client.cache().invalidate_group(GROUP);
        Ok(created)
    }

    /// Update a customer's profile and refresh customer queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update(
        &self,
        id: &CustomerId,
        customer: &UpdateCustomerRequest,
    ) -> ApiResult<Customer> {
        let updated = self.client.api().customers().update(id, customer).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(updated)
    }

    /// Delete a customer account and refresh customer queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: &CustomerId) -> ApiResult<()> {
        self.client.api().customers().delete(id).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(())
    }

    /// Lock a customer out of their account and refresh customer queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn lock(&self, id: &CustomerId) -> ApiResult<Customer> {
        let locked = self.client.api().customers().lock(id).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(locked)
    }

    /// Lift a customer's lock and refresh customer queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn unlock(&self, id: &CustomerId) -> ApiResult<Customer> {
        let unlocked = self.client.api().customers().unlock(id).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(unlocked)
    }
}
