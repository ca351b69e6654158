//! `luxstay` -- diagnostic client for the LuxStay backend.
//!
//! Restores a persisted session, fetches the bookings view (remote
//! merged with the local fallback cache), and logs the bucket counts.
//! Useful for checking connectivity and the state of the local cache
//! without a browser.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                        |
//! |------------------------|----------|--------------------------------|
//! | `LUXSTAY_API_URL`      | no       | `http://localhost:5000/api/v1` |
//! | `LUXSTAY_STORE_PATH`   | no       | `luxstay-store.json`           |
//! | `LUXSTAY_TIMEOUT_SECS` | no       | `30`                           |

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use luxstay_app::{AppConfig, AuthSessionManager, BookingLifecycle, SessionStore};
use luxstay_remote::ApiClient;
use luxstay_store::LocalStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "luxstay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    tracing::info!(api_url = %config.api_url, store = %config.store_path.display(), "Starting luxstay client");

    let remote = match ApiClient::new(config.api_url.clone(), config.request_timeout) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(error = %e, "Could not build HTTP client");
            std::process::exit(1);
        }
    };
    let local = Arc::new(LocalStore::new(config.store_path.clone()));
    let session = Arc::new(SessionStore::new());

    let auth = AuthSessionManager::new(remote.clone(), session.clone(), local.clone());
    match auth.restore_session().await {
        Ok(Some(user)) => tracing::info!(user_id = %user.id, name = %user.name, "Session restored"),
        Ok(None) => tracing::info!("No session to restore; continuing unauthenticated"),
        Err(e) => {
            tracing::error!(error = %e, "Session restore failed");
            std::process::exit(1);
        }
    }

    let bookings = BookingLifecycle::new(remote, local);
    let today = chrono::Utc::now().date_naive();
    match bookings.buckets(today).await {
        Ok(buckets) => {
            tracing::info!(
                upcoming = buckets.upcoming.len(),
                current = buckets.current.len(),
                past = buckets.past.len(),
                cancelled = buckets.cancelled.len(),
                "Bookings view"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Could not load bookings");
            std::process::exit(1);
        }
    }
}
