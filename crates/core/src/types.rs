//! Shared identifier and timestamp aliases.

/// Backend identifiers are Mongo-style `_id` strings.
pub type UserId = String;
/// Hotel identifier as issued by the catalog service.
pub type HotelId = String;
/// Booking identifier; server-assigned, or `BOOK-<uuid>` when
/// synthesized locally during a remote outage.
pub type BookingId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
