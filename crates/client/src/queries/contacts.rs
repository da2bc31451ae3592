//! Cached contact inbox queries.

use lumera_core::ContactId;

use crate::ApiClient;
use crate::api::types::{ContactMessage, ContactStatus, UnreadContactCount};
use crate::cache::STALE_AFTER;
use crate::error::ApiResult;

const GROUP: &str = "contacts";

/// Contact inbox queries backed by the query cache.
#[derive(Debug, Clone, Copy)]
pub struct Contacts<'a> {
    client: &'a ApiClient,
}

impl<'a> Contacts<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List contact messages, optionally only those in one status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, status: Option<ContactStatus>) -> ApiResult<Vec<ContactMessage>> {
        let key = format!("contacts:list:{status:?}");
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &[GROUP.to_owned()], || async move {
                self.client.api().contacts().list(status).await
            })
            .await
    }

    /// Number of unread contact messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn unread_count(&self) -> ApiResult<UnreadContactCount> {
        let key = "contacts:unread-count".to_owned();
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &[GROUP.to_owned()], || async move {
                self.client.api().contacts().unread_count().await
            })
            .await
    }

    /// The most recent contact messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn recent(&self, limit: u32) -> ApiResult<Vec<ContactMessage>> {
        let key = format!("contacts:recent:{limit}");
        self.client
            .cache()
            .fetch(key, STALE_AFTER, &[GROUP.to_owned()], || async move {
                self.client.api().contacts().recent(limit).await
            })
            .await
    }

    /// Send a reply to a contact message and refresh contact queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn reply(&self, id: &ContactId, reply: &str) -> ApiResult<ContactMessage> {
        let replied = self.client.api().contacts().reply(id, reply).await?;
        self.client.cache().invalidate_group(GROUP);
        Ok(replied)
    }

    /// Mark a contact message as read and refresh contact queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn mark_read(&self, id: &ContactId) -> ApiResult<ContactMessage> {
        let marked = self.client.api().contacts().mark_read(id).await?;
        self.client.cache().invalidate_group(GROUP);
        Ok(marked)
    }
}
