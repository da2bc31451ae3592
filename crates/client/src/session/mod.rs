//! Admin session lifecycle.
//!
//! [`SessionStore`] owns the in-memory authentication state and keeps it in
//! lockstep with a [`Storage`] backend. Writes always hit storage before
//! memory, so an observer never sees an authenticated session that would not
//! survive a restart.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use secrecy::SecretString;
use tracing::{debug, warn};

use crate::api::types::{Admin, LoginGrant};
use crate::error::ApiResult;

pub mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, keys};

/// Shared handle to the current admin session.
///
/// Cheap to clone; all clones observe the same state. Token values are held
/// as [`SecretString`] so they stay out of debug output.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    storage: Box<dyn Storage>,
    state: RwLock<SessionState>,
    /// Serializes token refresh so concurrent 401s produce one refresh call.
    refresh_lock: tokio::sync::Mutex<()>,
}

struct SessionState {
    admin: Option<Admin>,
    access_token: Option<SecretString>,
    refresh_token: Option<SecretString>,
    is_loading: bool,
    /// Bumped on every token change. Lets a retry detect that another task
    /// already replaced the token it failed with.
    token_version: u64,
}

impl SessionState {
    fn fresh() -> Self {
        Self {
            admin: None,
            access_token: None,
            refresh_token: None,
            is_loading: true,
            token_version: 0,
        }
    }
}

/// Session data recovered from storage on startup.
struct PersistedSession {
    admin: Admin,
    access_token: SecretString,
    refresh_token: Option<SecretString>,
}

impl SessionStore {
    /// Create a session backed by the given storage.
    ///
    /// The session starts unauthenticated and loading; call
    /// [`SessionStore::initialize`] to restore any persisted state.
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                storage: Box::new(storage),
                state: RwLock::new(SessionState::fresh()),
                refresh_lock: tokio::sync::Mutex::new(()),
            }),
        }
    }

    // ===== Lifecycle =====

    /// Restore a persisted session, if one exists.
    ///
    /// A session is restored only when both the access token and the admin
    /// identity are present. Corrupt admin data is treated as no session:
    /// the persisted entries are cleared and the store stays unauthenticated.
    /// The loading flag drops on every path, including errors.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` when the backing store cannot be read.
    pub fn initialize(&self) -> ApiResult<()> {
        let loaded = self.load_persisted();
        let mut state = self.write_state();
        state.is_loading = false;
        match loaded {
            Ok(Some(persisted)) => {
                debug!(admin = %persisted.admin.username, "restored persisted session");
                state.admin = Some(persisted.admin);
                state.access_token = Some(persisted.access_token);
                state.refresh_token = persisted.refresh_token;
                state.token_version = state.token_version.wrapping_add(1);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(err) => Err(err),
        }
    }

    fn load_persisted(&self) -> ApiResult<Option<PersistedSession>> {
        let storage = &self.inner.storage;
        let access_token = storage.load(keys::ACCESS_TOKEN)?;
        let admin_json = storage.load(keys::ADMIN_DATA)?;
        let (Some(access_token), Some(admin_json)) = (access_token, admin_json) else {
            return Ok(None);
        };

        let admin: Admin = match serde_json::from_str(&admin_json) {
            Ok(admin) => admin,
            Err(err) => {
                warn!(error = %err, "persisted admin data is corrupt, clearing session");
                if let Err(err) = self.clear_persisted() {
                    warn!(error = %err, "failed to clear corrupt session entries");
                }
                return Ok(None);
            }
        };

        let refresh_token = storage.load(keys::REFRESH_TOKEN)?;
        Ok(Some(PersistedSession {
            admin,
            access_token: SecretString::from(access_token),
            refresh_token: refresh_token.map(SecretString::from),
        }))
    }

    /// Persist a successful login and switch the in-memory state over.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` when persisting fails; in that case the
    /// in-memory state is left untouched.
    pub(crate) fn complete_login(&self, grant: LoginGrant) -> ApiResult<()> {
        let admin_json = serde_json::to_string(&grant.admin)?;
        let storage = &self.inner.storage;
        storage.store(keys::ACCESS_TOKEN, &grant.access_token)?;
        storage.store(keys::REFRESH_TOKEN, &grant.refresh_token)?;
        storage.store(keys::ADMIN_DATA, &admin_json)?;

        let mut state = self.write_state();
        state.admin = Some(grant.admin);
        state.access_token = Some(SecretString::from(grant.access_token));
        state.refresh_token = Some(SecretString::from(grant.refresh_token));
        state.is_loading = false;
        state.token_version = state.token_version.wrapping_add(1);
        Ok(())
    }

    /// Install a freshly refreshed access token.
    ///
    /// The refresh token is not rotated by the backend, so only the access
    /// token and admin identity are rewritten.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` when persisting fails.
    pub(crate) fn apply_refresh(&self, admin: Admin, access_token: String) -> ApiResult<()> {
        let admin_json = serde_json::to_string(&admin)?;
        let storage = &self.inner.storage;
        storage.store(keys::ACCESS_TOKEN, &access_token)?;
        storage.store(keys::ADMIN_DATA, &admin_json)?;

        let mut state = self.write_state();
        state.admin = Some(admin);
        state.access_token = Some(SecretString::from(access_token));
        state.token_version = state.token_version.wrapping_add(1);
        Ok(())
    }

    /// Drop the session, in memory and in storage.
    ///
    /// Memory clears first so the session reads as logged out even when
    /// removing the persisted entries fails. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Storage` when a persisted entry cannot be removed.
    pub fn logout(&self) -> ApiResult<()> {
        {
            let mut state = self.write_state();
            state.admin = None;
            state.access_token = None;
            state.refresh_token = None;
            state.token_version = state.token_version.wrapping_add(1);
        }
        self.clear_persisted()?;
        Ok(())
    }

    fn clear_persisted(&self) -> Result<(), StorageError> {
        let storage = &self.inner.storage;
        [
            storage.remove(keys::ACCESS_TOKEN),
            storage.remove(keys::REFRESH_TOKEN),
            storage.remove(keys::ADMIN_DATA),
        ]
        .into_iter()
        .collect()
    }

    // ===== Accessors =====

    /// Whether an admin identity and an access token are both present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let state = self.read_state();
        state.admin.is_some() && state.access_token.is_some()
    }

    /// Whether the session has not finished initializing yet.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read_state().is_loading
    }

    /// The signed-in admin, if any.
    #[must_use]
    pub fn current_admin(&self) -> Option<Admin> {
        self.read_state().admin.clone()
    }

    /// Current bearer token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<SecretString> {
        self.read_state().access_token.clone()
    }

    pub(crate) fn refresh_token(&self) -> Option<SecretString> {
        self.read_state().refresh_token.clone()
    }

    pub(crate) fn token_version(&self) -> u64 {
        self.read_state().token_version
    }

    pub(crate) fn refresh_lock(&self) -> &tokio::sync::Mutex<()> {
        &self.inner.refresh_lock
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read_state();
        f.debug_struct("SessionStore")
            .field("admin", &state.admin.as_ref().map(|admin| &admin.username))
            .field(
                "access_token",
                &state.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "refresh_token",
                &state.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("is_loading", &state.is_loading)
            .field("token_version", &state.token_version)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn sample_admin() -> Admin {
        serde_json::from_value(serde_json::json!({
            "_id": "a1",
            "username": "root",
            "email": "root@lumera.example",
            "role": "SuperAdmin",
            "lastLogin": null,
            "createdAt": "2024-01-10T08:30:00.000Z",
            "updatedAt": "2024-01-10T08:30:00.000Z"
        }))
        .unwrap()
    }

    fn sample_grant() -> LoginGrant {
        LoginGrant {
            admin: sample_admin(),
            access_token: "tok-access".into(),
            refresh_token: "tok-refresh".into(),
            expires_in: 900,
        }
    }

    #[test]
    fn starts_loading_and_unauthenticated() {
        let session = SessionStore::new(MemoryStorage::new());
        assert!(session.is_loading());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn initialize_without_persisted_state_clears_loading() {
        let session = SessionStore::new(MemoryStorage::new());
        session.initialize().unwrap();
        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn initialize_restores_persisted_session() {
        let storage = MemoryStorage::new();
        storage.store(keys::ACCESS_TOKEN, "tok-access").unwrap();
        storage.store(keys::REFRESH_TOKEN, "tok-refresh").unwrap();
        storage
            .store(
                keys::ADMIN_DATA,
                &serde_json::to_string(&sample_admin()).unwrap(),
            )
            .unwrap();

        let session = SessionStore::new(storage);
        session.initialize().unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.current_admin().unwrap().username, "root");
        assert_eq!(
            session.access_token().unwrap().expose_secret(),
            "tok-access"
        );
        assert_eq!(
            session.refresh_token().unwrap().expose_secret(),
            "tok-refresh"
        );
    }

    #[test]
    fn initialize_requires_both_token_and_admin() {
        let storage = MemoryStorage::new();
        storage.store(keys::ACCESS_TOKEN, "tok-access").unwrap();

        let session = SessionStore::new(storage);
        session.initialize().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn initialize_clears_corrupt_admin_data() {
        let storage = MemoryStorage::new();
        storage.store(keys::ACCESS_TOKEN, "tok-access").unwrap();
        storage.store(keys::ADMIN_DATA, "not json").unwrap();

        let session = SessionStore::new(storage.clone());
        session.initialize().unwrap();

        assert!(!session.is_authenticated());
        assert!(!session.is_loading());
        assert!(storage.is_empty());
    }

    #[test]
    fn login_persists_before_memory() {
        let storage = MemoryStorage::new();
        let session = SessionStore::new(storage.clone());

        let version_before = session.token_version();
        session.complete_login(sample_grant()).unwrap();

        assert!(session.is_authenticated());
        assert!(!session.is_loading());
        assert!(session.token_version() > version_before);
        assert_eq!(
            storage.load(keys::ACCESS_TOKEN).unwrap().as_deref(),
            Some("tok-access")
        );
        assert_eq!(
            storage.load(keys::REFRESH_TOKEN).unwrap().as_deref(),
            Some("tok-refresh")
        );
        let stored: Admin =
            serde_json::from_str(&storage.load(keys::ADMIN_DATA).unwrap().unwrap()).unwrap();
        assert_eq!(stored.username, "root");
    }

    #[test]
    fn refresh_replaces_access_token_only() {
        let storage = MemoryStorage::new();
        let session = SessionStore::new(storage.clone());
        session.complete_login(sample_grant()).unwrap();

        let version_before = session.token_version();
        session
            .apply_refresh(sample_admin(), "tok-access-2".into())
            .unwrap();

        assert_eq!(
            session.access_token().unwrap().expose_secret(),
            "tok-access-2"
        );
        assert_eq!(
            session.refresh_token().unwrap().expose_secret(),
            "tok-refresh"
        );
        assert!(session.token_version() > version_before);
        assert_eq!(
            storage.load(keys::ACCESS_TOKEN).unwrap().as_deref(),
            Some("tok-access-2")
        );
    }

    #[test]
    fn logout_clears_memory_and_storage_and_is_idempotent() {
        let storage = MemoryStorage::new();
        let session = SessionStore::new(storage.clone());
        session.complete_login(sample_grant()).unwrap();

        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert!(session.current_admin().is_none());
        assert!(session.access_token().is_none());
        assert!(storage.is_empty());

        session.logout().unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn debug_output_redacts_tokens() {
        let session = SessionStore::new(MemoryStorage::new());
        session.complete_login(sample_grant()).unwrap();

        let rendered = format!("{session:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("tok-access"));
        assert!(!rendered.contains("tok-refresh"));
    }
}
