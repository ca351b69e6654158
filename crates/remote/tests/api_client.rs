//! Integration tests for [`ApiClient`] against a stub backend.
//!
//! Each test stands up a minimal axum router on an ephemeral port and
//! points a real client at it, so cookie handling, envelope parsing,
//! and error mapping are exercised over actual HTTP.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use luxstay_core::error::CoreError;
use luxstay_core::validation::LoginInput;
use luxstay_remote::{ApiClient, BookingPayload, RemoteError, SearchFilters};

const SESSION_COOKIE: &str = "luxstay_session=tok-1";

/// Shared stub state: request counters and the last booking payload.
#[derive(Default)]
struct Stub {
    login_hits: AtomicUsize,
    booking_body: std::sync::Mutex<Option<Value>>,
    search_query: std::sync::Mutex<Option<Vec<(String, String)>>>,
}

fn user_json() -> Value {
    json!({
        "_id": "u1",
        "name": "Ada",
        "email": "ada@example.com",
        "role": "user",
        "favorites": ["h1"]
    })
}

fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|c| c.contains(SESSION_COOKIE))
}

async fn login_handler(State(stub): State<Arc<Stub>>) -> impl IntoResponse {
    stub.login_hits.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::OK,
        [("set-cookie", format!("{SESSION_COOKIE}; Path=/; HttpOnly"))],
        Json(json!({ "success": true, "token": "tok-1", "user": user_json() })),
    )
}

async fn me_handler(headers: HeaderMap) -> impl IntoResponse {
    if has_session(&headers) {
        (StatusCode::OK, Json(json!({ "success": true, "user": user_json() })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Please login to continue" })),
        )
    }
}

async fn hotel_handler(Path(id): Path<String>) -> impl IntoResponse {
    if id == "h1" {
        (
            StatusCode::OK,
            Json(json!({ "success": true, "hotel": {
                "_id": "h1",
                "name": "Luxury Hotel",
                "roomTypes": [{ "name": "Deluxe Room", "price": 200.0 }]
            }})),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Hotel not found" })),
        )
    }
}

async fn search_handler(
    State(stub): State<Arc<Stub>>,
    Query(params): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    *stub.search_query.lock().unwrap() = Some(params);
    Json(json!({ "success": true, "hotels": [] }))
}

async fn booking_new_handler(
    State(stub): State<Arc<Stub>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut record = body.clone();
    *stub.booking_body.lock().unwrap() = Some(body);
    record["_id"] = json!("srv-1");
    record["hotel"] = json!({ "_id": "h1", "name": "Luxury Hotel" });
    record["bookingStatus"] = json!("confirmed");
    record["createdAt"] = json!("2024-05-20T12:00:00Z");
    Json(json!({ "success": true, "booking": record }))
}

async fn cancel_handler(Path(_id): Path<String>) -> impl IntoResponse {
    Json(json!({ "success": false, "message": "Booking already checked in" }))
}

fn router(stub: Arc<Stub>) -> Router {
    Router::new()
        .route("/api/v1/login", post(login_handler))
        .route("/api/v1/me", get(me_handler))
        .route("/api/v1/hotel/{id}", get(hotel_handler))
        .route("/api/v1/hotels/search", get(search_handler))
        .route("/api/v1/booking/new", post(booking_new_handler))
        .route("/api/v1/booking/cancel/{id}", put(cancel_handler))
        .with_state(stub)
}

/// Bind the stub on an ephemeral port and return a client against it.
async fn spawn_stub(stub: Arc<Stub>) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(stub)).await.unwrap();
    });
    ApiClient::new(format!("http://{addr}/api/v1"), Duration::from_secs(5)).unwrap()
}

fn login_input() -> LoginInput {
    LoginInput {
        email: "ada@example.com".into(),
        password: "secret1".into(),
    }
}

// ---------------------------------------------------------------------------
// Cookie-based session flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_cookie_rides_on_subsequent_requests() {
    let stub = Arc::new(Stub::default());
    let client = spawn_stub(stub.clone()).await;

    let user = client.login(&login_input()).await.unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(stub.login_hits.load(Ordering::SeqCst), 1);

    // /me only answers when the login cookie is presented.
    let me = client.me().await.unwrap();
    assert_eq!(me.email, "ada@example.com");
}

#[tokio::test]
async fn me_without_session_is_an_auth_error() {
    let client = spawn_stub(Arc::new(Stub::default())).await;

    let err = client.me().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_matches!(CoreError::from(err), CoreError::Auth(msg) => {
        assert_eq!(msg, "Please login to continue");
    });
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_hotel_maps_to_not_found() {
    let client = spawn_stub(Arc::new(Stub::default())).await;

    let err = client.hotel("h9").await.unwrap_err();
    assert_matches!(
        err.into_core_for("Hotel", "h9"),
        CoreError::NotFound { entity: "Hotel", .. }
    );
}

#[tokio::test]
async fn rejected_envelope_surfaces_server_message() {
    let client = spawn_stub(Arc::new(Stub::default())).await;

    let err = client.cancel_booking("b1").await.unwrap_err();
    assert_matches!(err, RemoteError::Rejected(msg) => {
        assert_eq!(msg, "Booking already checked in");
    });
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Nothing listens on this port.
    let client =
        ApiClient::new("http://127.0.0.1:1/api/v1", Duration::from_millis(200)).unwrap();

    let err = client.my_bookings().await.unwrap_err();
    assert_matches!(err, RemoteError::Request(_));
    assert_matches!(CoreError::from(err), CoreError::RemoteUnavailable(_));
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn booking_payload_uses_original_field_names() {
    let stub = Arc::new(Stub::default());
    let client = spawn_stub(stub.clone()).await;

    let payload = BookingPayload {
        hotel: "h1".into(),
        room_type: "Deluxe Room".into(),
        check_in_date: "2024-06-01".parse().unwrap(),
        check_out_date: "2024-06-04".parse().unwrap(),
        guests: Default::default(),
        total_price: 672.0,
        special_requests: "Late arrival".into(),
        payment_info: luxstay_core::booking::PaymentInfo {
            id: "payment_id_1".into(),
            status: "confirmed".into(),
        },
    };

    let booking = client.create_booking(&payload).await.unwrap();
    assert_eq!(booking.id, "srv-1");
    assert_eq!(booking.total_price, 672.0);

    let sent = stub.booking_body.lock().unwrap().clone().unwrap();
    assert_eq!(sent["hotel"], "h1");
    assert_eq!(sent["roomType"], "Deluxe Room");
    assert_eq!(sent["checkInDate"], "2024-06-01");
    assert_eq!(sent["totalPrice"], 672.0);
    assert_eq!(sent["paymentInfo"]["status"], "confirmed");
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// `MakeWriter` collecting formatted log lines into a shared buffer.
#[derive(Clone, Default)]
struct LogCapture(Arc<std::sync::Mutex<Vec<u8>>>);

impl LogCapture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn non_2xx_responses_are_logged_with_their_status() {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let client = spawn_stub(Arc::new(Stub::default())).await;
    client.hotel("h9").await.unwrap_err();

    let logs = capture.contents();
    assert!(logs.contains("404"), "missing status in: {logs}");
    assert!(logs.contains("Hotel not found"), "missing message in: {logs}");
}

#[tokio::test]
async fn search_sends_only_set_filters() {
    let stub = Arc::new(Stub::default());
    let client = spawn_stub(stub.clone()).await;

    let filters = SearchFilters {
        location: Some("Boston".into()),
        max_price: Some(300.0),
        ..Default::default()
    };
    client.search_hotels(&filters).await.unwrap();

    let query = stub.search_query.lock().unwrap().clone().unwrap();
    assert_eq!(
        query,
        vec![
            ("location".to_string(), "Boston".to_string()),
            ("maxPrice".to_string(), "300".to_string()),
        ]
    );
}
