//! Admin account endpoints.

use lumera_core::{AdminId, Page};

use crate::ApiClient;
use crate::api::types::{
    Admin, AdminListParams, ChangePasswordRequest, CreateAdminRequest, UpdateAdminRequest,
};
use crate::api::{Envelope, PaginatedData};
use crate::error::ApiResult;

/// `GET|POST|PATCH|DELETE /admins`.
#[derive(Debug, Clone, Copy)]
pub struct AdminsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List admin accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, params: &AdminListParams) -> ApiResult<Page<Admin>> {
        let envelope: Envelope<PaginatedData<Admin>> =
            self.client.get_query("/admins", params).await?;
        Ok(envelope.data.into_page())
    }

    /// Fetch one admin by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, id: &AdminId) -> ApiResult<Admin> {
        let envelope: Envelope<Admin> = self.client.get(&format!("/admins/{id}")).await?;
        Ok(envelope.data)
    }

    /// Register a new admin account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create(&self, admin: &CreateAdminRequest) -> ApiResult<Admin> {
        let envelope: Envelope<Admin> = self.client.post("/admins/register", admin).await?;
        Ok(envelope.data)
    }

    /// Update an admin account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update(&self, id: &AdminId, admin: &UpdateAdminRequest) -> ApiResult<Admin> {
        let envelope: Envelope<Admin> =
            self.client.patch(&format!("/admins/{id}"), admin).await?;
        Ok(envelope.data)
    }

    /// Delete an admin account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: &AdminId) -> ApiResult<()> {
        self.client.delete(&format!("/admins/{id}")).await
    }

    /// Change an admin's password.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, including validation failures
    /// such as a wrong current password.
    pub async fn change_password(
        &self,
        id: &AdminId,
        request: &ChangePasswordRequest,
    ) -> ApiResult<()> {
        let _ack: Envelope<serde_json::Value> = self
            .client
            .patch(&format!("/admins/{id}/change-password"), request)
            .await?;
        Ok(())
    }
}
