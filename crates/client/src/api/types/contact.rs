//! Contact message types.

use chrono::{DateTime, Utc};
use lumera_core::ContactId;
use serde::{Deserialize, Serialize};

/// Reply state of a contact message. Lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Pending,
    Answered,
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Self::Pending => "pending",
            Self::Answered => "answered",
        };
        write!(f, "{value}")
    }
}

impl std::str::FromStr for ContactStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "answered" => Ok(Self::Answered),
            _ => Err(format!("invalid contact status: {s}")),
        }
    }
}

/// A customer contact message as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(rename = "_id")]
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub address: String,
    /// Product the customer is asking about, free text.
    pub product: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: ContactStatus,
    #[serde(rename = "adminReply", skip_serializing_if = "Option::is_none")]
    pub admin_reply: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replied_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

/// Payload for `POST /admin/contacts/{id}/reply`.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyContactRequest {
    pub reply: String,
}

/// Response of `GET /admin/contacts-unread-count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadContactCount {
    pub count: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn contact_tolerates_null_replied_at() {
        let message: ContactMessage = serde_json::from_value(serde_json::json!({
            "_id": "m1",
            "name": "Binh Le",
            "email": "binh@example.com",
            "address": "Da Nang",
            "product": "Pearl earrings",
            "status": "pending",
            "createdAt": "2024-05-10T14:00:00.000Z",
            "repliedAt": null
        }))
        .unwrap();

        assert_eq!(message.status, ContactStatus::Pending);
        assert!(message.replied_at.is_none());
        assert!(message.is_read.is_none());
    }

    #[test]
    fn answered_contact_carries_reply() {
        let message: ContactMessage = serde_json::from_value(serde_json::json!({
            "_id": "m2",
            "name": "Chi Pham",
            "email": "chi@example.com",
            "address": "Hue",
            "product": "Wedding bands",
            "status": "answered",
            "adminReply": "We restock next week.",
            "createdAt": "2024-05-11T09:00:00.000Z",
            "repliedAt": "2024-05-11T10:15:00.000Z",
            "isRead": true
        }))
        .unwrap();

        assert_eq!(message.admin_reply.as_deref(), Some("We restock next week."));
        assert_eq!(message.is_read, Some(true));
    }
}
