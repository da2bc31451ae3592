//! Product catalog endpoints.

use lumera_core::{Page, ProductId};

use crate::ApiClient;
use crate::api::types::{Product, ProductInput, ProductListParams};
use crate::api::{Envelope, PaginatedData};
use crate::error::ApiResult;

/// `GET|POST|PATCH /products` plus the hide toggles.
///
/// Products are never deleted; hiding removes them from the storefront
/// while keeping order history intact.
#[derive(Debug, Clone, Copy)]
pub struct ProductsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProductsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List products.
    ///
    /// Unless the caller says otherwise, hidden products are included; the
    /// dashboard manages the full catalog, not the public storefront view.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, params: &ProductListParams) -> ApiResult<Page<Product>> {
        let params = params.with_admin_defaults();
        let envelope: Envelope<PaginatedData<Product>> =
            self.client.get_query("/products", &params).await?;
        Ok(envelope.data.into_page())
    }

    /// Fetch one product by id. Returned bare, without the `{data}` wrapper.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, id: &ProductId) -> ApiResult<Product> {
        self.client.get(&format!("/products/{id}")).await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create(&self, product: &ProductInput) -> ApiResult<Product> {
        let envelope: Envelope<Product> = self.client.post("/products", product).await?;
        Ok(envelope.data)
    }

    /// Update a product; unset fields are left as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update(&self, id: &ProductId, product: &ProductInput) -> ApiResult<Product> {
        let envelope: Envelope<Product> = self
            .client
            .patch(&format!("/products/{id}"), product)
            .await?;
        Ok(envelope.data)
    }

    /// Hide a product from the storefront.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn hide(&self, id: &ProductId) -> ApiResult<Product> {
        let envelope: Envelope<Product> = self
            .client
            .patch_empty(&format!("/products/{id}/hide"))
            .await?;
        Ok(envelope.data)
    }

    /// Put a hidden product back on the storefront.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn unhide(&self, id: &ProductId) -> ApiResult<Product> {
        let envelope: Envelope<Product> = self
            .client
            .patch_empty(&format!("/products/{id}/unhide"))
            .await?;
        Ok(envelope.data)
    }
}
