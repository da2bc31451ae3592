//! Authentication request and response types.

use serde::{Deserialize, Serialize};

use super::admin::Admin;

/// Credentials for `POST /admins/login`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

impl LoginRequest {
    /// Convenience constructor for callers holding plain strings.
    #[must_use]
    pub fn new(username_or_email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username_or_email: username_or_email.into(),
            password: password.into(),
        }
    }
}

/// Successful login payload: the admin identity plus both tokens.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginGrant {
    pub admin: Admin,
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token lifetime in seconds, advisory only. The client reacts
    /// to 401 responses rather than scheduling proactive refreshes.
    pub expires_in: i64,
}

/// Successful refresh payload.
///
/// The refresh endpoint re-sends the admin identity with the new access
/// token; the refresh token itself is not rotated.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshGrant {
    pub admin: Admin,
    pub access_token: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn login_request_uses_camel_case_keys() {
        let body = serde_json::to_value(LoginRequest::new("admin", "secret")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"usernameOrEmail": "admin", "password": "secret"})
        );
    }

    #[test]
    fn refresh_grant_ignores_extra_fields() {
        // The backend replies with the full login shape; only the admin and
        // access token matter here.
        let grant: RefreshGrant = serde_json::from_value(serde_json::json!({
            "admin": {
                "_id": "1",
                "username": "admin",
                "email": "admin@lumera.example",
                "role": "Staff",
                "lastLogin": "2024-02-01T12:00:00.000Z",
                "createdAt": "2024-01-10T08:30:00.000Z",
                "updatedAt": "2024-02-01T12:00:00.000Z"
            },
            "accessToken": "tok2",
            "refreshToken": "ref1",
            "expiresIn": 3600
        }))
        .unwrap();

        assert_eq!(grant.access_token, "tok2");
        assert_eq!(grant.admin.username, "admin");
    }
}
