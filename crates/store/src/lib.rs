//! `luxstay-store` -- the local durable cache.
//!
//! A single JSON file holding the persisted session marker and the
//! fallback booking list, read and written wholesale. This is the
//! durable half of the "try remote, fall back to local" policy: when
//! the booking service is unreachable, confirmed bookings land here and
//! are merged back into views once fetched.

mod local_store;

pub use local_store::{CancelOutcome, LocalStore, StoreError};
