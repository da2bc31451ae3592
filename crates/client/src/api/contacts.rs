//! Contact inbox endpoints.
//!
//! These live under `/admin/contacts` rather than a bare resource path, and
//! the two counters hang off dashed sibling routes. Lists come back as bare
//! arrays with no pagination.

use lumera_core::ContactId;
use serde::Serialize;

use crate::ApiClient;
use crate::api::types::{ContactMessage, ContactStatus, ReplyContactRequest, UnreadContactCount};
use crate::error::ApiResult;

#[derive(Debug, Serialize)]
struct ContactListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<ContactStatus>,
}

#[derive(Debug, Serialize)]
struct RecentQuery {
    limit: u32,
}

/// `GET|POST /admin/contacts` inbox surface.
#[derive(Debug, Clone, Copy)]
pub struct ContactsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ContactsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List contact messages, optionally filtered by reply status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, status: Option<ContactStatus>) -> ApiResult<Vec<ContactMessage>> {
        self.client
            .get_query("/admin/contacts", &ContactListQuery { status })
            .await
    }

    /// Reply to a contact message; marks it answered.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn reply(&self, id: &ContactId, reply: &str) -> ApiResult<ContactMessage> {
        let request = ReplyContactRequest {
            reply: reply.to_owned(),
        };
        self.client
            .post(&format!("/admin/contacts/{id}/reply"), &request)
            .await
    }

    /// Number of messages nobody has opened yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn unread_count(&self) -> ApiResult<UnreadContactCount> {
        self.client.get("/admin/contacts-unread-count").await
    }

    /// The latest messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn recent(&self, limit: u32) -> ApiResult<Vec<ContactMessage>> {
        self.client
            .get_query("/admin/contacts-recent", &RecentQuery { limit })
            .await
    }

    /// Mark a message as read.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn mark_read(&self, id: &ContactId) -> ApiResult<ContactMessage> {
        self.client
            .post_empty(&format!("/admin/contacts/{id}/mark-read"))
            .await
    }
}
