//! `luxstay-remote` -- HTTP clients for the LuxStay backend services.
//!
//! One [`ApiClient`] carries a shared `reqwest::Client` with an enabled
//! cookie store (the backend issues cookie-based session credentials)
//! and exposes the four collaborator surfaces as method groups:
//! identity, hotel catalog, bookings, and favorites.
//!
//! Every transport failure, timeout, and unexpected status is treated
//! uniformly as "remote unavailable"; distinguishing them is the
//! caller's UI concern, not this layer's.

mod booking;
mod catalog;
mod client;
mod error;
mod identity;

pub use booking::BookingPayload;
pub use catalog::SearchFilters;
pub use client::ApiClient;
pub use error::RemoteError;
pub use identity::ProfileUpdate;
