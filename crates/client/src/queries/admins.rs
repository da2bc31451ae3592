//! Cached admin account queries.

use lumera_core::{AdminId, Page};

use crate::ApiClient;
use crate::api::types::{
    Admin, AdminListParams, ChangePasswordRequest, CreateAdminRequest, UpdateAdminRequest,
};
use crate::cache::STALE_AFTER;
use crate::error::ApiResult;

const GROUP: &str = "admins";

fn detail_group(id: &AdminId) -> String {
    format!("admin:{id}")
}

/// Admin account queries backed by the query cache.
#[derive(Debug, Clone, Copy)]
pub struct Admins<'a> {
    client: &'a ApiClient,
}

impl<'a> Admins<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List admin accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, params: AdminListParams) -> ApiResult<Page<Admin>> {
        let key = format!("admins:list:{params:?}");
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &[GROUP.to_owned()], || async move {
                self.client.api().admins().list(&params).await
            })
            .await
    }

    /// Fetch one admin account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, id: &AdminId) -> ApiResult<Admin> {
        let key = format!("admins:get:{id}");
        let groups = [detail_group(id)];
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &groups, || async move {
                self.client.api().admins().get(id).await
            })
            .await
    }

    /// Register an admin account and refresh admin queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create(&self, admin: &CreateAdminRequest) -> ApiResult<Admin> {
        let created = self.client.api().admins().create(admin).await?;
        self.client.cache().invalidate_group(GROUP);
        Ok(created)
    }

    /// Update an admin account and refresh admin queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update(&self, id: &AdminId, admin: &UpdateAdminRequest) -> ApiResult<Admin> {
        let updated = self.client.api().admins().update(id, admin).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(updated)
    }

    /// Delete an admin account and refresh admin queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: &AdminId) -> ApiResult<()> {
        self.client.api().admins().delete(id).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(())
    }

    /// Change an admin's password.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, including when the current
    /// password does not match.
    pub async fn change_password(
        &self,
        id: &AdminId,
        request: &ChangePasswordRequest,
    ) -> ApiResult<()> {
        self.client.api().admins().change_password(id, request).await?;
        let cache = self.client.cache();
        cache.invalidate_group(GROUP);
        cache.invalidate_group(&detail_group(id));
        Ok(())
    }
}
