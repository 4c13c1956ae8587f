//! In-process catalog API used by the client_core tests.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use shared::{
    domain::{Product, ProductId},
    protocol::SigninRequest,
};
use tokio::{net::TcpListener, sync::Mutex};

pub(crate) const ADMIN_USERNAME: &str = "admin@example.com";
pub(crate) const ADMIN_PASSWORD: &str = "correct-horse";
pub(crate) const ISSUED_TOKEN: &str = "token-abc";
pub(crate) const API_PATH: &str = "shop";

#[derive(Clone)]
pub(crate) struct MockApiState {
    pub expected_authorization: Arc<Mutex<String>>,
    pub products: Arc<Mutex<Vec<Product>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub submitted: Arc<Mutex<Vec<Value>>>,
    pub reject_with: Arc<Mutex<Option<Vec<String>>>>,
    pub expires_in_ms: Arc<Mutex<i64>>,
    /// Answer create/update/delete with a 500.
    pub fail_mutations: Arc<Mutex<bool>>,
    /// Answer the product listing with a 500.
    pub fail_listing: Arc<Mutex<bool>>,
}

impl MockApiState {
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    pub async fn count(&self, call: &str) -> usize {
        self.calls.lock().await.iter().filter(|c| *c == call).count()
    }

    pub async fn last_submitted(&self) -> Option<Value> {
        self.submitted.lock().await.last().cloned()
    }
}

pub(crate) fn sample_product(id: &str, title: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        category: "tea".into(),
        unit: "box".into(),
        description: "loose leaf".into(),
        content: "100g".into(),
        origin_price: 1200.0,
        price: 980.5,
        is_enabled: true,
        image_url: "https://img.example.com/main.png".into(),
        images_url: vec![
            "https://img.example.com/1.png".into(),
            "https://img.example.com/2.png".into(),
        ],
    }
}

type Reply = (StatusCode, Json<Value>);

fn unauthorized() -> Reply {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"success": false, "message": "please sign in"})),
    )
}

fn server_error() -> Reply {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"success": false, "message": "upstream unavailable"})),
    )
}

async fn record(state: &MockApiState, call: String) {
    state.calls.lock().await.push(call);
}

async fn is_authorized(state: &MockApiState, headers: &HeaderMap) -> bool {
    let expected = state.expected_authorization.lock().await.clone();
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected)
}

async fn rejection(state: &MockApiState) -> Option<Reply> {
    if *state.fail_mutations.lock().await {
        return Some(server_error());
    }
    state.reject_with.lock().await.clone().map(|messages| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": messages})),
        )
    })
}

async fn signin(State(state): State<MockApiState>, Json(req): Json<SigninRequest>) -> Reply {
    record(&state, "POST /admin/signin".into()).await;
    if req.username != ADMIN_USERNAME || req.password != ADMIN_PASSWORD {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "Invalid username or password"})),
        );
    }
    let expired = Utc::now().timestamp_millis() + *state.expires_in_ms.lock().await;
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Signed in",
            "token": ISSUED_TOKEN,
            "expired": expired,
        })),
    )
}

async fn check(State(state): State<MockApiState>, headers: HeaderMap) -> Reply {
    record(&state, "POST /api/user/check".into()).await;
    if !is_authorized(&state, &headers).await {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({"success": true})))
}

async fn list_products(State(state): State<MockApiState>, headers: HeaderMap) -> Reply {
    record(&state, "GET /admin/products".into()).await;
    if !is_authorized(&state, &headers).await {
        return unauthorized();
    }
    if *state.fail_listing.lock().await {
        return server_error();
    }
    let products = state.products.lock().await.clone();
    (
        StatusCode::OK,
        Json(json!({"success": true, "products": products})),
    )
}

async fn create_product(
    State(state): State<MockApiState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    record(&state, "POST /admin/product".into()).await;
    if !is_authorized(&state, &headers).await {
        return unauthorized();
    }
    state.submitted.lock().await.push(body);
    if let Some(reply) = rejection(&state).await {
        return reply;
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": "created"})),
    )
}

async fn update_product(
    State(state): State<MockApiState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    record(&state, format!("PUT /admin/product/{id}")).await;
    if !is_authorized(&state, &headers).await {
        return unauthorized();
    }
    state.submitted.lock().await.push(body);
    if let Some(reply) = rejection(&state).await {
        return reply;
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": "updated"})),
    )
}

async fn delete_product(
    State(state): State<MockApiState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Reply {
    record(&state, format!("DELETE /admin/product/{id}")).await;
    if !is_authorized(&state, &headers).await {
        return unauthorized();
    }
    if let Some(reply) = rejection(&state).await {
        return reply;
    }
    state
        .products
        .lock()
        .await
        .retain(|product| product.id.as_str() != id);
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": "deleted"})),
    )
}

pub(crate) async fn spawn_mock_api() -> (String, MockApiState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = MockApiState {
        expected_authorization: Arc::new(Mutex::new(ISSUED_TOKEN.to_string())),
        products: Arc::new(Mutex::new(Vec::new())),
        calls: Arc::new(Mutex::new(Vec::new())),
        submitted: Arc::new(Mutex::new(Vec::new())),
        reject_with: Arc::new(Mutex::new(None)),
        expires_in_ms: Arc::new(Mutex::new(3_600_000)),
        fail_mutations: Arc::new(Mutex::new(false)),
        fail_listing: Arc::new(Mutex::new(false)),
    };
    let app = Router::new()
        .route("/admin/signin", post(signin))
        .route("/api/user/check", post(check))
        .route(&format!("/api/{API_PATH}/admin/products"), get(list_products))
        .route(&format!("/api/{API_PATH}/admin/product"), post(create_product))
        .route(
            &format!("/api/{API_PATH}/admin/product/:id"),
            put(update_product).delete(delete_product),
        )
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}
