//! Cached product queries.

use lumera_core::{Page, ProductId};

use crate::ApiClient;
use crate::api::types::{Product, ProductInput, ProductListParams};
use crate::cache::STALE_AFTER;
use crate::error::ApiResult;

const GROUP: &str = "products";

fn detail_group(id: &ProductId) -> String {
    format!("product:{id}")
}

/// Product catalog queries backed by the query cache.
#[derive(Debug, Clone, Copy)]
pub struct Products<'a> {
    client: &'a ApiClient,
}

impl<'a> Products<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List products, hidden ones included unless the filters opt out.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, params: ProductListParams) -> ApiResult<Page<Product>> {
        let key = format!("products:list:{params:?}");
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &[GROUP.to_owned()], || async move {
                self.client.api().products().list(&params).await
            })
            .await
    }

    /// Fetch one product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, id: &ProductId) -> ApiResult<Product> {
        let key = format!("products:get:{id}");
        let groups = [detail_group(id)];
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &groups, || async move {
                self.client.api().products().get(id).await
            })
            .await
    }

    /// Create a product and refresh product queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create(&self, product: &ProductInput) -> ApiResult<Product> {
        let created = self.client.api().products().create(product).await?;
        self.client.cache().invalidate_group(GROUP);
        Ok(created)
    }

    /// Update a product and refresh product queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update(&self, id: &ProductId, product: &ProductInput) -> ApiResult<Product> {
        let updated = self.client.api().products().update(id, product).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(updated)
    }

    /// Hide a product from the storefront and refresh product queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn hide(&self, id: &ProductId) -> ApiResult<Product> {
        let hidden = self.client.api().products().hide(id).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(hidden)
    }

    /// Put a hidden product back on the storefront and refresh product
    /// queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn unhide(&self, id: &ProductId) -> ApiResult<Product> {
        let unhidden = self.client.api().products().unhide(id).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(unhidden)
    }
}
