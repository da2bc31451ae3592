//! Admin account types.

use chrono::{DateTime, Utc};
use lumera_core::AdminId;
use serde::{Deserialize, Serialize};

/// Role of an admin account.
///
/// Wire values are the exact variant names (`SuperAdmin`, `Staff`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminRole {
    SuperAdmin,
    Staff,
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "SuperAdmin"),
            Self::Staff => write!(f, "Staff"),
        }
    }
}

/// An administrator account as returned by the backend.
///
/// Also the shape persisted under the `admin_data` storage entry, so it
/// serializes back to the exact wire form (including the `_id` key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(rename = "_id")]
    pub id: AdminId,
    pub username: String,
    pub email: String,
    pub role: AdminRole,
    /// Last successful login; null for accounts that never logged in.
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /admins/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: AdminRole,
}

/// Payload for `PATCH /admins/{id}`. Only the username is editable.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Payload for `PATCH /admins/{id}/change-password`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Query parameters for `GET /admins`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn admin_round_trips_wire_shape() {
        let json = serde_json::json!({
            "_id": "665f1c2ab1e4d20012345678",
            "username": "admin",
            "email": "admin@lumera.example",
            "role": "SuperAdmin",
            "lastLogin": null,
            "createdAt": "2024-01-10T08:30:00.000Z",
            "updatedAt": "2024-02-01T12:00:00.000Z"
        });

        let admin: Admin = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(admin.id.as_str(), "665f1c2ab1e4d20012345678");
        assert_eq!(admin.role, AdminRole::SuperAdmin);
        assert!(admin.last_login.is_none());

        let back = serde_json::to_value(&admin).unwrap();
        assert_eq!(back.get("_id"), json.get("_id"));
        assert_eq!(back.get("role"), json.get("role"));
    }

    #[test]
    fn update_request_skips_unset_fields() {
        let body = serde_json::to_value(UpdateAdminRequest::default()).unwrap();
        assert_eq!(body, serde_json::json!({}));
    }
}
