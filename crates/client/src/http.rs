//! HTTP client for the admin backend.
//!
//! [`ApiClient`] owns the transport, the [`SessionStore`], and the
//! [`QueryCache`]. Every authenticated request carries the current bearer
//! token; a 401 response triggers a single token refresh followed by one
//! retry of the original request. The refresh itself is single-flight:
//! concurrent 401s share one refresh call instead of issuing duplicates.

use std::sync::Arc;

use reqwest::Method;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::types::{Admin, LoginRequest, RefreshGrant};
use crate::api::{Api, Envelope};
use crate::cache::QueryCache;
use crate::config::ApiConfig;
use crate::error::{self, ApiError, ApiResult};
use crate::queries::{
    Admins, Categories, Contacts, Customers, Favorites, Orders, Products, Reviews, Vouchers,
};
use crate::session::{FileStorage, SessionStore, Storage};

/// Client for the jewelry-store admin backend.
///
/// Cheap to clone; clones share the transport, session, and cache.
///
/// # Example
///
/// ```no_run
/// use lumera_client::{ApiClient, ApiConfig, LoginRequest};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ApiConfig::from_env()?;
/// let client = ApiClient::new(&config)?;
/// client.initialize()?;
///
/// if !client.session().is_authenticated() {
///     client
///         .login(LoginRequest::new("admin", "secret"))
///         .await?;
/// }
///
/// let products = client.products().list(Default::default()).await?;
/// println!("{} products", products.total);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
    cache: QueryCache,
}

/// A request the client can replay after a token refresh.
///
/// Query and body are kept as pre-serialized JSON values so the retry
/// rebuilds an identical request with the new token.
pub(crate) struct ApiRequest {
    method: Method,
    path: String,
    query: Option<serde_json::Value>,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_owned(),
            query: None,
            body: None,
        }
    }

    fn query<Q: Serialize>(mut self, query: &Q) -> ApiResult<Self> {
        self.query = Some(serde_json::to_value(query)?);
        Ok(self)
    }

    fn body<B: Serialize>(mut self, body: &B) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

impl ApiClient {
    /// Create a client with file-backed session storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be created or the
    /// HTTP transport fails to build.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let storage = FileStorage::new(&config.data_dir)?;
        Self::with_storage(config, storage)
    }

    /// Create a client with a caller-supplied storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport fails to build.
    pub fn with_storage(config: &ApiConfig, storage: impl Storage + 'static) -> ApiResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        let base_url = config.base_url.as_str().trim_end_matches('/').to_owned();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url,
                session: SessionStore::new(storage),
                cache: QueryCache::new(),
            }),
        })
    }

    /// The session this client authenticates with.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// The shared query cache.
    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.inner.cache
    }

    /// Raw resource endpoints, uncached.
    #[must_use]
    pub fn api(&self) -> Api<'_> {
        Api::new(self)
    }

    // ===== Cached Resource Queries =====

    /// Admin account queries and mutations.
    #[must_use]
    pub fn admins(&self) -> Admins<'_> {
        Admins::new(self)
    }

    /// Customer queries and mutations.
    #[must_use]
    pub fn customers(&self) -> Customers<'_> {
        Customers::new(self)
    }

    /// Product catalog queries and mutations.
    #[must_use]
    pub fn products(&self) -> Products<'_> {
        Products::new(self)
    }

    /// Category queries and mutations.
    #[must_use]
    pub fn categories(&self) -> Categories<'_> {
        Categories::new(self)
    }

    /// Order queries and mutations.
    #[must_use]
    pub fn orders(&self) -> Orders<'_> {
        Orders::new(self)
    }

    /// Voucher queries and mutations.
    #[must_use]
    pub fn vouchers(&self) -> Vouchers<'_> {
        Vouchers::new(self)
    }

    /// Review moderation queries and mutations.
    #[must_use]
    pub fn reviews(&self) -> Reviews<'_> {
        Reviews::new(self)
    }

    /// Wishlist queries and mutations.
    #[must_use]
    pub fn favorites(&self) -> Favorites<'_> {
        Favorites::new(self)
    }

    /// Contact inbox queries and mutations.
    #[must_use]
    pub fn contacts(&self) -> Contacts<'_> {
        Contacts::new(self)
    }

    // ===== Session Lifecycle =====

    /// Restore a persisted session from storage.
    ///
    /// # Errors
    ///
    /// Returns an error when session storage cannot be read.
    pub fn initialize(&self) -> ApiResult<()> {
        self.inner.session.initialize()
    }

    /// Authenticate and persist the resulting session.
    ///
    /// # Errors
    ///
    /// Returns the backend's error for rejected credentials, or a storage
    /// error if the session cannot be persisted.
    pub async fn login(&self, credentials: LoginRequest) -> ApiResult<Admin> {
        let grant = self.api().auth().login(&credentials).await?;
        let admin = grant.admin.clone();
        self.inner.session.complete_login(grant)?;
        debug!(admin = %admin.username, "logged in");
        Ok(admin)
    }

    /// End the session locally and notify the backend.
    ///
    /// The server call is best-effort: its failure is logged and ignored so
    /// logout always succeeds locally.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the persisted session cannot be removed.
    pub async fn logout(&self) -> ApiResult<()> {
        if let Err(err) = self.api().auth().logout().await {
            debug!(error = %err, "server-side logout failed, clearing session anyway");
        }
        self.inner.session.logout()?;
        self.inner.cache.clear().await;
        Ok(())
    }

    // ===== Request Helpers =====

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(ApiRequest::new(Method::GET, path)).await
    }

    pub(crate) async fn get_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + Sync,
    {
        self.execute(ApiRequest::new(Method::GET, path).query(query)?)
            .await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        self.execute(ApiRequest::new(Method::POST, path).body(body)?)
            .await
    }

    /// POST without a body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(ApiRequest::new(Method::POST, path)).await
    }

    /// POST without a body, discarding whatever the server sends back.
    pub(crate) async fn post_unit(&self, path: &str) -> ApiResult<()> {
        self.execute_discard(ApiRequest::new(Method::POST, path))
            .await
    }

    pub(crate) async fn patch<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        self.execute(ApiRequest::new(Method::PATCH, path).body(body)?)
            .await
    }

    /// PATCH without a body; used by the toggle-style endpoints.
    pub(crate) async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(ApiRequest::new(Method::PATCH, path)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute_discard(ApiRequest::new(Method::DELETE, path))
            .await
    }

    pub(crate) async fn delete_with_body<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<()> {
        self.execute_discard(ApiRequest::new(Method::DELETE, path).body(body)?)
            .await
    }

    // ===== Request Execution =====

    async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let response = self.send_with_refresh(&request).await?;
        Self::handle_response(response).await
    }

    async fn execute_discard(&self, request: ApiRequest) -> ApiResult<()> {
        let response = self.send_with_refresh(&request).await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(error::from_response(response).await)
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        if response.status().is_success() {
            return Ok(response.json().await?);
        }
        Err(error::from_response(response).await)
    }

    /// Send a request, refreshing the session and retrying once on 401.
    ///
    /// The retry's outcome is returned as-is: a second 401 surfaces as a
    /// normal API error rather than triggering another refresh.
    async fn send_with_refresh(&self, request: &ApiRequest) -> ApiResult<reqwest::Response> {
        let token_version = self.inner.session.token_version();
        let response = self.send(request).await?;
        if response.status().as_u16() != 401 {
            return Ok(response);
        }

        debug!(path = %request.path, "received 401, attempting token refresh");
        let original = error::from_response(response).await;
        self.refresh_session(token_version, original).await?;
        self.send(request).await
    }

    async fn send(&self, request: &ApiRequest) -> ApiResult<reqwest::Response> {
        let url = format!("{}{}", self.inner.base_url, request.path);
        let mut builder = self.inner.http.request(request.method.clone(), &url);
        if let Some(query) = &request.query {
            builder = builder.query(query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = self.inner.session.access_token() {
            builder = builder.bearer_auth(token.expose_secret());
        }
        Ok(builder.send().await?)
    }

    /// Run the single-flight refresh protocol.
    ///
    /// Whoever holds the refresh lock first performs the refresh; callers
    /// that arrive after the token already changed just retry with it.
    /// Without a refresh token the original 401 is surfaced untouched and
    /// the session is left alone.
    async fn refresh_session(&self, seen_version: u64, original: ApiError) -> ApiResult<()> {
        let session = &self.inner.session;
        let _guard = session.refresh_lock().lock().await;

        if session.token_version() != seen_version {
            debug!("token already refreshed by a concurrent request");
            return Ok(());
        }

        let Some(refresh_token) = session.refresh_token() else {
            return Err(original);
        };

        match self.request_refresh(&refresh_token).await {
            Ok(grant) => {
                session.apply_refresh(grant.admin, grant.access_token)?;
                debug!("session refreshed");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed, logging out");
                if let Err(logout_err) = session.logout() {
                    warn!(error = %logout_err, "failed to clear session after refresh failure");
                }
                self.inner.cache.clear().await;
                Err(ApiError::SessionExpired(Box::new(err)))
            }
        }
    }

    /// The refresh call itself: plain POST, no bearer token, no retry.
    async fn request_refresh(
        &self,
        refresh_token: &secrecy::SecretString,
    ) -> ApiResult<RefreshGrant> {
        let url = format!("{}/admins/refresh-token", self.inner.base_url);
        let body = serde_json::json!({ "refreshToken": refresh_token.expose_secret() });
        let response = self.inner.http.post(&url).json(&body).send().await?;
        let envelope: Envelope<RefreshGrant> = Self::handle_response(response).await?;
        Ok(envelope.data)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_query_and_body_once() {
        let request = ApiRequest::new(Method::GET, "/products")
            .query(&serde_json::json!({"page": 1, "limit": 10}))
            .unwrap();
        assert_eq!(
            request.query.unwrap(),
            serde_json::json!({"page": 1, "limit": 10})
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn base_url_is_trimmed_of_trailing_slash() {
        let config = ApiConfig::new("http://localhost:3000/api/".parse().unwrap());
        let client =
            ApiClient::with_storage(&config, crate::session::MemoryStorage::new()).unwrap();
        assert_eq!(client.inner.base_url, "http://localhost:3000/api");
    }
}
