//! Shared stub backend for the orchestration tests.
//!
//! Stands up an axum router on an ephemeral port that imitates the
//! LuxStay backend: cookie-less by design (the client under test keeps
//! its own cookie jar; these tests care about orchestration, not
//! transport auth), with switches to simulate outages and rejected
//! credentials, and counters to assert which endpoints were reached.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tempfile::TempDir;

use luxstay_app::SessionStore;
use luxstay_remote::ApiClient;
use luxstay_store::LocalStore;

/// Mutable behavior and observations of the stub backend.
#[derive(Default)]
pub struct StubState {
    /// When set, every endpoint answers 500.
    pub down: AtomicBool,
    /// When set, `/login` and `/me` answer 401.
    pub auth_rejected: AtomicBool,
    pub register_hits: AtomicUsize,
    pub login_hits: AtomicUsize,
    pub cancel_hits: AtomicUsize,
    /// Favorites of the one stub user.
    pub favorites: Mutex<Vec<String>>,
    /// Bookings the "server" has persisted.
    pub bookings: Mutex<Vec<Value>>,
}

impl StubState {
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn set_auth_rejected(&self, rejected: bool) {
        self.auth_rejected.store(rejected, Ordering::SeqCst);
    }

    fn user_json(&self) -> Value {
        json!({
            "_id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "role": "user",
            "favorites": *self.favorites.lock().unwrap(),
        })
    }
}

fn unavailable() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "message": "Service unavailable" })),
    )
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "message": "Invalid email or password" })),
    )
}

async fn register(State(s): State<Arc<StubState>>) -> impl IntoResponse {
    s.register_hits.fetch_add(1, Ordering::SeqCst);
    if s.down.load(Ordering::SeqCst) {
        return unavailable();
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "user": s.user_json() })),
    )
}

async fn login(State(s): State<Arc<StubState>>) -> impl IntoResponse {
    s.login_hits.fetch_add(1, Ordering::SeqCst);
    if s.down.load(Ordering::SeqCst) {
        return unavailable();
    }
    if s.auth_rejected.load(Ordering::SeqCst) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "token": "tok-1", "user": s.user_json() })),
    )
}

async fn logout(State(s): State<Arc<StubState>>) -> impl IntoResponse {
    if s.down.load(Ordering::SeqCst) {
        return unavailable();
    }
    (StatusCode::OK, Json(json!({ "success": true })))
}

async fn me(State(s): State<Arc<StubState>>) -> impl IntoResponse {
    if s.down.load(Ordering::SeqCst) {
        return unavailable();
    }
    if s.auth_rejected.load(Ordering::SeqCst) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Session expired" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "user": s.user_json() })),
    )
}

async fn password_update(State(s): State<Arc<StubState>>) -> impl IntoResponse {
    if s.down.load(Ordering::SeqCst) {
        return unavailable();
    }
    (StatusCode::OK, Json(json!({ "success": true })))
}

async fn booking_new(
    State(s): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if s.down.load(Ordering::SeqCst) {
        return unavailable();
    }
    let mut record = body;
    let id = format!("srv-{}", s.bookings.lock().unwrap().len() + 1);
    let hotel_id = record["hotel"].clone();
    record["_id"] = json!(id);
    record["hotel"] = json!({ "_id": hotel_id, "name": "Luxury Hotel" });
    record["bookingStatus"] = json!("confirmed");
    record["createdAt"] = json!("2024-05-20T12:00:00Z");
    s.bookings.lock().unwrap().push(record.clone());
    (
        StatusCode::OK,
        Json(json!({ "success": true, "booking": record })),
    )
}

async fn bookings_me(State(s): State<Arc<StubState>>) -> impl IntoResponse {
    if s.down.load(Ordering::SeqCst) {
        return unavailable();
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "bookings": *s.bookings.lock().unwrap() })),
    )
}

async fn booking_cancel(
    State(s): State<Arc<StubState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    s.cancel_hits.fetch_add(1, Ordering::SeqCst);
    if s.down.load(Ordering::SeqCst) {
        return unavailable();
    }
    for booking in s.bookings.lock().unwrap().iter_mut() {
        if booking["_id"] == json!(id) {
            booking["bookingStatus"] = json!("cancelled");
        }
    }
    (StatusCode::OK, Json(json!({ "success": true })))
}

async fn favorite(State(s): State<Arc<StubState>>, Path(id): Path<String>) -> impl IntoResponse {
    if s.down.load(Ordering::SeqCst) {
        return unavailable();
    }
    let mut favorites = s.favorites.lock().unwrap();
    if !favorites.contains(&id) {
        favorites.push(id);
    }
    (StatusCode::OK, Json(json!({ "success": true })))
}

async fn unfavorite(State(s): State<Arc<StubState>>, Path(id): Path<String>) -> impl IntoResponse {
    if s.down.load(Ordering::SeqCst) {
        return unavailable();
    }
    s.favorites.lock().unwrap().retain(|h| h != &id);
    (StatusCode::OK, Json(json!({ "success": true })))
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/api/v1/register", post(register))
        .route("/api/v1/login", post(login))
        .route("/api/v1/logout", get(logout))
        .route("/api/v1/me", get(me))
        .route("/api/v1/password/update", put(password_update))
        .route("/api/v1/booking/new", post(booking_new))
        .route("/api/v1/bookings/me", get(bookings_me))
        .route("/api/v1/booking/cancel/{id}", put(booking_cancel))
        .route("/api/v1/hotel/favorite/{id}", post(favorite))
        .route("/api/v1/hotel/unfavorite/{id}", delete(unfavorite))
        .with_state(state)
}

/// A running stub backend plus the client-side pieces under test.
pub struct Harness {
    pub stub: Arc<StubState>,
    pub remote: Arc<ApiClient>,
    pub local: Arc<LocalStore>,
    pub session: Arc<SessionStore>,
    // Held for its Drop: removes the store file.
    _dir: TempDir,
}

/// Spawn the stub backend and build a fresh client stack against it.
pub async fn harness() -> Harness {
    let stub = Arc::new(StubState::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = router(stub.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let dir = TempDir::new().unwrap();
    let remote = Arc::new(
        ApiClient::new(format!("http://{addr}/api/v1"), Duration::from_secs(5)).unwrap(),
    );
    let local = Arc::new(LocalStore::new(dir.path().join("store.json")));
    let session = Arc::new(SessionStore::new());

    Harness {
        stub,
        remote,
        local,
        session,
        _dir: dir,
    }
}
