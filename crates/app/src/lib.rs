//! `luxstay-app` -- orchestration layer of the LuxStay booking client.
//!
//! Wires the pure domain (`luxstay-core`), the local durable cache
//! (`luxstay-store`), and the backend clients (`luxstay-remote`) into
//! the managers the UI talks to: [`SessionStore`] +
//! [`AuthSessionManager`] for identity, [`BookingLifecycle`] for the
//! multi-step booking flow with its offline fallback, and
//! [`FavoritesManager`] for profile favorites.

pub mod auth;
pub mod booking;
pub mod config;
pub mod favorites;
pub mod session;

pub use auth::AuthSessionManager;
pub use booking::{BookingFlow, BookingLifecycle};
pub use config::AppConfig;
pub use favorites::FavoritesManager;
pub use session::{SessionSnapshot, SessionStore};
