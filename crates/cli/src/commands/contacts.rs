//! Contact inbox commands.
//!
//! # Usage
//!
//! ```bash
//! lumera contacts list --status pending
//! lumera contacts reply 66b2f0c81ab5c2d4e8f09999 "Thanks, it ships Monday."
//! ```

use lumera_client::{ApiClient, ApiResult, ContactStatus};
use lumera_core::ContactId;
use tracing::info;

/// List contact messages, optionally only those in one status.
pub async fn list(client: &ApiClient, status: Option<ContactStatus>) -> ApiResult<()> {
    let messages = client.contacts().list(status).await?;

    info!("{} messages", messages.len());
    for message in &messages {
        let read = if message.is_read.unwrap_or(false) {
            ""
        } else {
            "  [unread]"
        };
        info!(
            "  {}  {}  <{}>  {}  about: {}{}",
            message.id, message.status, message.email, message.name, message.product, read
        );
    }
    Ok(())
}

/// Show the unread message count.
pub async fn unread(client: &ApiClient) -> ApiResult<()> {
    let unread = client.contacts().unread_count().await?;
    info!("{} unread messages", unread.count);
    Ok(())
}

/// Reply to a contact message.
pub async fn reply(client: &ApiClient, id: &str, message: &str) -> ApiResult<()> {
    let replied = client.contacts().reply(&ContactId::from(id), message).await?;
    info!("Replied to {} ({})", replied.name, replied.status);
    Ok(())
}

/// Mark a contact message as read.
pub async fn mark_read(client: &ApiClient, id: &str) -> ApiResult<()> {
    let marked = client.contacts().mark_read(&ContactId::from(id)).await?;
    info!("Marked message {} as read", marked.id);
    Ok(())
}
