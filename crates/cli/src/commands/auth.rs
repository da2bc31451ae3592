//! Session commands.
//!
//! # Usage
//!
//! ```bash
//! lumera login -u admin -p secret
//! lumera whoami
//! lumera logout
//! ```

use lumera_client::{ApiClient, ApiResult, LoginRequest};
use tracing::info;

/// Sign in and persist the session for later invocations.
pub async fn login(client: &ApiClient, username: &str, password: &str) -> ApiResult<()> {
    let admin = client.login(LoginRequest::new(username, password)).await?;
    info!("Signed in as {} ({})", admin.username, admin.role);
    Ok(())
}

/// Sign out and clear the persisted session.
pub async fn logout(client: &ApiClient) -> ApiResult<()> {
    client.logout().await?;
    info!("Signed out");
    Ok(())
}

/// Show who the persisted session belongs to.
pub fn whoami(client: &ApiClient) {
    match client.session().current_admin() {
        Some(admin) => info!("{} <{}> ({})", admin.username, admin.email, admin.role),
        None => info!("Not signed in"),
    }
}
