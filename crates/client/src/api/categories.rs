//! Category endpoints.

use lumera_core::{CategoryId, Page};

use crate::ApiClient;
use crate::api::types::{Category, CategoryInput, CategoryListParams};
use crate::api::{Envelope, PaginatedData};
use crate::error::ApiResult;

/// `GET|POST|PATCH|DELETE /categories` plus the active toggle.
#[derive(Debug, Clone, Copy)]
pub struct CategoriesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoriesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, params: &CategoryListParams) -> ApiResult<Page<Category>> {
        let envelope: Envelope<PaginatedData<Category>> =
            self.client.get_query("/categories", params).await?;
        Ok(envelope.data.into_page())
    }

    /// Fetch one category by id. Returned bare, without the `{data}` wrapper.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, id: &CategoryId) -> ApiResult<Category> {
        self.client.get(&format!("/categories/{id}")).await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create(&self, category: &CategoryInput) -> ApiResult<Category> {
        let envelope: Envelope<Category> = self.client.post("/categories", category).await?;
        Ok(envelope.data)
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update(&self, id: &CategoryId, category: &CategoryInput) -> ApiResult<Category> {
        let envelope: Envelope<Category> = self
            .client
            .patch(&format!("/categories/{id}"), category)
            .await?;
        Ok(envelope.data)
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, e.g. when products still
    /// reference the category.
    pub async fn delete(&self, id: &CategoryId) -> ApiResult<()> {
        self.client.delete(&format!("/categories/{id}")).await
    }

    /// Flip a category between active and inactive.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn toggle_active(&self, id: &CategoryId) -> ApiResult<Category> {
        let envelope: Envelope<Category> = self
            .client
            .patch_empty(&format!("/categories/{id}/toggle-active"))
            .await?;
        Ok(envelope.data)
    }
}
