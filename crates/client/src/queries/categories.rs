//! Cached category queries.

use lumera_core::{CategoryId, Page};

use crate::ApiClient;
use crate::api::types::{Category, CategoryInput, CategoryListParams};
use crate::cache::STALE_AFTER;
use crate::error::ApiResult;

const GROUP: &str = "categories";

fn detail_group(id: &CategoryId) -> String {
    format!("category:{id}")
}

/// Category queries backed by the query cache.
#[derive(Debug, Clone, Copy)]
pub struct Categories<'a> {
    client: &'a ApiClient,
}

impl<'a> Categories<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, params: CategoryListParams) -> ApiResult<Page<Category>> {
        let key = format!("categories:list:{params:?}");
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &[GROUP.to_owned()], || async move {
                self.client.api().categories().list(&params).await
            })
            .await
    }

    /// Fetch one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, id: &CategoryId) -> ApiResult<Category> {
        let key = format!("categories:get:{id}");
        let groups = [detail_group(id)];
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &groups, || async move {
                self.client.api().categories().get(id).await
            })
            .await
    }

    /// Create a category and refresh category queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create(&self, category: &CategoryInput) -> ApiResult<Category> {
        let created = self.client.api().categories().create(category).await?;
        self.client.cache().invalidate_group(GROUP);
        Ok(created)
    }

    /// Update a category and refresh category queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update(&self, id: &CategoryId, category: &CategoryInput) -> ApiResult<Category> {
        let updated = self.client.api().categories().update(id, category).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(updated)
    }

    /// Delete a category and refresh category queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, including when the category
    /// still has products assigned.
    pub async fn delete(&self, id: &CategoryId) -> ApiResult<()> {
        self.client.api().categories().delete(id).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(())
    }

    /// Flip a category between active and inactive and refresh category
    /// queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn toggle_active(&self, id: &CategoryId) -> ApiResult<Category> {
        let toggled = self.client.api().categories().toggle_active(id).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(toggled)
    }
}
