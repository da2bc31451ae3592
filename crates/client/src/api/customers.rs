//! Customer endpoints.

use lumera_core::{CustomerId, Page};

use crate::ApiClient;
use crate::api::types::{
    CreateCustomerRequest, Customer, CustomerListParams, UpdateCustomerRequest,
};
use crate::api::{Envelope, PaginatedData};
use crate::error::ApiResult;

/// `GET|POST|PATCH|DELETE /customers` plus the lock toggles.
#[derive(Debug, Clone, Copy)]
pub struct CustomersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CustomersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List customers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, params: &CustomerListParams) -> ApiResult<Page<Customer>> {
        let envelope: Envelope<PaginatedData<Customer>> =
            self.client.get_query("/customers", params).await?;
        Ok(envelope.data.into_page())
    }

    /// Fetch one customer by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, id: &CustomerId) -> ApiResult<Customer> {
        let envelope: Envelope<Customer> = self.client.get(&format!("/customers/{id}")).await?;
        Ok(envelope.data)
    }

    /// Register a customer on their behalf.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create(&self, customer: &CreateCustomerRequest) -> ApiResult<Customer> {
        let envelope: Envelope<Customer> =
            self.client.post("/customers/register", customer).await?;
        Ok(envelope.data)
    }

    /// Update a customer's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update(
        &self,
        id: &CustomerId,
        customer: &UpdateCustomerRequest,
    ) -> ApiResult<Customer> {
        let envelope: Envelope<Customer> = self
            .client
            .patch(&format!("/customers/{id}"), customer)
            .await?;
        Ok(envelope.data)
    }

    /// Delete a customer account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: &CustomerId) -> ApiResult<()> {
        self.client.delete(&format!("/customers/{id}")).await
    }

    /// Lock a customer out of their account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn lock(&self, id: &CustomerId) -> ApiResult<Customer> {
        let envelope: Envelope<Customer> = self
            .client
            .patch_empty(&format!("/customers/{id}/lock"))
            .await?;
        Ok(envelope.data)
    }

    /// Lift a customer's account lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn unlock(&self, id: &CustomerId) -> ApiResult<Customer> {
        let envelope: Envelope<Customer> = self
            .client
            .patch_empty(&format!("/customers/{id}/unlock"))
            .await?;
        Ok(envelope.data)
    }
}
