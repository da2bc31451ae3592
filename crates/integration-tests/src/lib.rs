//! Integration test harness for the Lumera API client.
//!
//! [`MockBackend`] is an in-process stand-in for the admin backend: it issues
//! and validates bearer tokens, serves a small product catalog, and counts
//! every request so tests can assert what actually went over the wire. Tests
//! can expire access tokens or break the refresh endpoint mid-flight to
//! exercise the 401 recovery path.
//!
//! [`TestContext`] wires a real [`ApiClient`] to a fresh backend over
//! in-memory session storage. Each test gets its own backend on an ephemeral
//! port, so tests never share state.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]
#![allow(clippy::unused_async)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Json;
use axum::routing::{get, patch, post};
use lumera_client::session::MemoryStorage;
use lumera_client::{ApiClient, ApiConfig, LoginRequest};
use serde_json::{Value, json};
use url::Url;

const USERNAME: &str = "admin";
const PASSWORD: &str = "secret";
const REFRESH_TOKEN: &str = "refresh-token-1";

/// Id of the seeded "Gold Band Ring" product.
pub const RING_ID: &str = "66b2f0c81ab5c2d4e8f00001";
/// Id of the seeded "Pearl Drop Earrings" product.
pub const EARRINGS_ID: &str = "66b2f0c81ab5c2d4e8f00002";

// ============================================================================
// Mock state
// ============================================================================

struct MockState {
    admin: Value,
    products: Vec<Value>,
    access_tokens: HashSet<String>,
    refresh_enabled: bool,
    token_seq: u32,
    hits: HashMap<String, u32>,
}

impl MockState {
    fn new() -> Self {
        Self {
            admin: admin_json(),
            products: vec![
                product_json(RING_ID, "Gold Band Ring", 4_800_000),
                product_json(EARRINGS_ID, "Pearl Drop Earrings", 2_350_000),
            ],
            access_tokens: HashSet::new(),
            refresh_enabled: true,
            token_seq: 0,
            hits: HashMap::new(),
        }
    }

    fn hit(&mut self, endpoint: &str) {
        *self.hits.entry(endpoint.to_owned()).or_insert(0) += 1;
    }

    fn issue_access_token(&mut self) -> String {
        self.token_seq += 1;
        let token = format!("access-token-{}", self.token_seq);
        self.access_tokens.insert(token.clone());
        token
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .is_some_and(|token| self.access_tokens.contains(token))
    }

    fn product_mut(&mut self, id: &str) -> Option<&mut Value> {
        self.products
            .iter_mut()
            .find(|product| product.get("id").and_then(Value::as_str) == Some(id))
    }
}

fn admin_json() -> Value {
    json!({
        "_id": "64f1aa10c2d3e4f5a6b7c8d9",
        "username": USERNAME,
        "email": "admin@lumera.example",
        "role": "SuperAdmin",
        "lastLogin": "2024-03-01T09:00:00.000Z",
        "createdAt": "2023-11-05T08:30:00.000Z",
        "updatedAt": "2024-03-01T09:00:00.000Z"
    })
}

fn product_json(id: &str, name: &str, price: u64) -> Value {
    json!({
        "id": id,
        "productName": name,
        "description": "Handmade in the Lumera atelier.",
        "price": price,
        "weight": 3.2,
        "material": "18k gold",
        "stockQuantity": 12,
        "categoryId": "66b2f0c81ab5c2d4e8f000c1",
        "category": {
            "id": "66b2f0c81ab5c2d4e8f000c1",
            "categoryName": "Rings",
            "description": "Rings and bands"
        },
        "isFeatured": false,
        "isHidden": false,
        "views": 40,
        "images": [],
        "createdAt": "2024-01-15T10:00:00.000Z",
        "updatedAt": "2024-01-15T10:00:00.000Z"
    })
}

// ============================================================================
// Handlers
// ============================================================================

type Shared = Arc<Mutex<MockState>>;

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "jwt expired"})),
    )
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.hit("POST /admins/login");

    let username = body
        .get("usernameOrEmail")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let password = body
        .get("password")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if username != USERNAME || password != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        );
    }

    let access_token = state.issue_access_token();
    let body = json!({
        "data": {
            "admin": state.admin.clone(),
            "accessToken": access_token,
            "refreshToken": REFRESH_TOKEN,
            "expiresIn": 3600,
        }
    });
    (StatusCode::OK, Json(body))
}

async fn refresh(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.hit("POST /admins/refresh-token");

    let token = body
        .get("refreshToken")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if !state.refresh_enabled || token != REFRESH_TOKEN {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid refresh token"})),
        );
    }

    let access_token = state.issue_access_token();
    let body = json!({
        "data": {
            "admin": state.admin.clone(),
            "accessToken": access_token,
        }
    });
    (StatusCode::OK, Json(body))
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.hit("POST /admins/logout");
    if !state.authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({"message": "Logged out"})))
}

async fn list_products(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.hit("GET /products");
    if !state.authorized(&headers) {
        return unauthorized();
    }

    let include_hidden = params
        .get("includeHidden")
        .is_some_and(|value| value == "true");
    let items: Vec<Value> = state
        .products
        .iter()
        .filter(|product| {
            include_hidden
                || !product
                    .get("isHidden")
                    .and_then(Value::as_bool)
                    .unwrap_or(false)
        })
        .cloned()
        .collect();
    let total = items.len();
    let body = json!({
        "data": {
            "items": items,
            "total": total,
            "page": 1,
            "limit": 10,
            "totalPages": 1,
        }
    });
    (StatusCode::OK, Json(body))
}

async fn get_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.hit(&format!("GET /products/{id}"));
    if !state.authorized(&headers) {
        return unauthorized();
    }

    match state.product_mut(&id) {
        Some(product) => (StatusCode::OK, Json(product.clone())),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Product not found"})),
        ),
    }
}

fn set_product_hidden(
    state: &Shared,
    headers: &HeaderMap,
    id: &str,
    hidden: bool,
) -> (StatusCode, Json<Value>) {
    let verb = if hidden { "hide" } else { "unhide" };
    let mut state = state.lock().unwrap();
    state.hit(&format!("PATCH /products/{id}/{verb}"));
    if !state.authorized(headers) {
        return unauthorized();
    }

    match state.product_mut(id) {
        Some(product) => {
            if let Some(fields) = product.as_object_mut() {
                fields.insert("isHidden".to_owned(), json!(hidden));
            }
            (StatusCode::OK, Json(json!({"data": product.clone()})))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Product not found"})),
        ),
    }
}

async fn hide_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    set_product_hidden(&state, &headers, &id, true)
}

async fn unhide_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    set_product_hidden(&state, &headers, &id, false)
}

// ============================================================================
// Backend handle
// ============================================================================

/// In-process mock of the admin backend.
pub struct MockBackend {
    state: Shared,
    addr: SocketAddr,
}

impl MockBackend {
    /// Start the backend on an ephemeral localhost port.
    pub async fn spawn() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState::new()));
        let app = Router::new()
            .route("/admins/login", post(login))
            .route("/admins/refresh-token", post(refresh))
            .route("/admins/logout", post(logout))
            .route("/products", get(list_products))
            .route("/products/{id}", get(get_product))
            .route("/products/{id}/hide", patch(hide_product))
            .route("/products/{id}/unhide", patch(unhide_product))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                panic!("mock backend stopped: {err}");
            }
        });

        Self { state, addr }
    }

    /// Base URL to point an [`ApiClient`] at.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// How often an endpoint was called, e.g. `hits("GET /products")`.
    /// Per-entity endpoints include the id, e.g.
    /// `hits("PATCH /products/<id>/hide")`.
    #[must_use]
    pub fn hits(&self, endpoint: &str) -> u32 {
        let state = self.state.lock().unwrap();
        state.hits.get(endpoint).copied().unwrap_or(0)
    }

    /// Invalidate every issued access token. The next authenticated request
    /// gets a 401; refresh tokens stay valid.
    pub fn expire_access_tokens(&self) {
        let mut state = self.state.lock().unwrap();
        state.access_tokens.clear();
    }

    /// Make the refresh endpoint reject all requests.
    pub fn disable_refresh(&self) {
        let mut state = self.state.lock().unwrap();
        state.refresh_enabled = false;
    }

    /// Whether a product is currently hidden in the backend's state.
    #[must_use]
    pub fn product_hidden(&self, id: &str) -> bool {
        let mut state = self.state.lock().unwrap();
        state
            .product_mut(id)
            .and_then(|product| product.get("isHidden"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

// ============================================================================
// Test context
// ============================================================================

/// A real client wired to a fresh mock backend.
pub struct TestContext {
    pub client: ApiClient,
    pub backend: MockBackend,
    storage: MemoryStorage,
}

impl TestContext {
    /// Backend plus an initialized, signed-out client.
    pub async fn signed_out() -> Self {
        let backend = MockBackend::spawn().await;
        let storage = MemoryStorage::new();
        let client = build_client(&backend, &storage);
        client.initialize().expect("session initialize");
        Self {
            client,
            backend,
            storage,
        }
    }

    /// Backend plus a signed-in client.
    pub async fn signed_in() -> Self {
        let ctx = Self::signed_out().await;
        ctx.client
            .login(LoginRequest::new(USERNAME, PASSWORD))
            .await
            .expect("login against mock backend");
        ctx
    }

    /// A second client over the same persisted session, as after a process
    /// restart. Not yet initialized.
    #[must_use]
    pub fn reconnect(&self) -> ApiClient {
        build_client(&self.backend, &self.storage)
    }
}

fn build_client(backend: &MockBackend, storage: &MemoryStorage) -> ApiClient {
    let url = Url::parse(&backend.url()).expect("mock backend url");
    let config = ApiConfig::new(url);
    ApiClient::with_storage(&config, storage.clone()).expect("client construction")
}
