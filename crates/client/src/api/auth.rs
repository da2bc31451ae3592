//! Authentication endpoints.

use crate::ApiClient;
use crate::api::Envelope;
use crate::api::types::{LoginGrant, LoginRequest};
use crate::error::ApiResult;

/// `POST /admins/login` and `POST /admins/logout`.
///
/// The refresh endpoint is not exposed here: the client drives it directly
/// as part of its 401 handling.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a session grant.
    ///
    /// # Errors
    ///
    /// Returns the backend's error for rejected credentials.
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginGrant> {
        let envelope: Envelope<LoginGrant> =
            self.client.post("/admins/login", credentials).await?;
        Ok(envelope.data)
    }

    /// Invalidate the session server-side.
    ///
    /// # Errors
    ///
    /// Returns the backend's error; callers that only care about the local
    /// session may ignore it.
    pub async fn logout(&self) -> ApiResult<()> {
        self.client.post_unit("/admins/logout").await
    }
}
