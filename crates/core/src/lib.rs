//! `luxstay-core` -- pure domain logic for the LuxStay booking client.
//!
//! Data model, error taxonomy, pricing, booking draft validation, status
//! bucketing, and route access decisions -- all without I/O. Remote
//! services and the local cache live in `luxstay-remote` and
//! `luxstay-store`.

pub mod access;
pub mod booking;
pub mod error;
pub mod hotel;
pub mod pricing;
pub mod types;
pub mod user;
pub mod validation;
