//! File-backed key-value store for the session marker and the fallback
//! booking cache.
//!
//! The file is read-all / mutate / write-all; every read-modify-write
//! runs under one async mutex so a concurrent cancel + create cannot
//! lose updates. There is no multi-process access to guard against.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use luxstay_core::booking::{Booking, BookingStatus};
use luxstay_core::error::CoreError;
use luxstay_core::user::User;

/// Errors from the local durable cache.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The store file exists but does not parse. Surfaced rather than
    /// silently discarded; the caller decides whether to reset.
    #[error("Store file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Storage(err.to_string())
    }
}

/// Outcome of a local cancellation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The entry was confirmed and is now cancelled.
    Cancelled,
    /// The entry was already cancelled; nothing changed.
    AlreadyCancelled,
    /// No entry with that id exists in the cache.
    NotFound,
}

/// On-disk shape: one fixed document with both keys.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    bookings: Vec<Booking>,
}

/// The local durable cache.
///
/// Cheap to share behind an `Arc`; all operations serialize through the
/// internal mutex.
pub struct LocalStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LocalStore {
    /// Open a store at `path`. The file is created lazily on first
    /// write; a missing file reads as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<StoreFile, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(StoreFile::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the whole document atomically: temp file + rename, so a
    /// crash mid-write never leaves a truncated store behind.
    async fn write(&self, file: &StoreFile) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(file)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    // -- Session marker ----------------------------------------------------

    /// The persisted user snapshot, if a session marker exists.
    pub async fn session(&self) -> Result<Option<User>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.user)
    }

    /// Persist the session marker so later app starts can restore
    /// identity without re-authenticating.
    pub async fn set_session(&self, user: &User) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;
        file.user = Some(user.clone());
        self.write(&file).await
    }

    /// Drop the session marker. Fallback bookings are kept.
    pub async fn clear_session(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;
        if file.user.is_none() {
            return Ok(());
        }
        file.user = None;
        self.write(&file).await
    }

    // -- Fallback bookings -------------------------------------------------

    /// All locally cached bookings, in insertion order.
    pub async fn bookings(&self) -> Result<Vec<Booking>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.bookings)
    }

    /// Append a booking synthesized while the booking service was
    /// unreachable.
    pub async fn append_booking(&self, booking: &Booking) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;
        file.bookings.push(booking.clone());
        self.write(&file).await?;
        tracing::info!(booking_id = %booking.id, "Cached booking locally");
        Ok(())
    }

    /// Mark a cached booking cancelled. Cancelling an entry that is
    /// already cancelled is a no-op.
    pub async fn cancel_booking(&self, booking_id: &str) -> Result<CancelOutcome, StoreError> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;

        let Some(entry) = file.bookings.iter_mut().find(|b| b.id == booking_id) else {
            return Ok(CancelOutcome::NotFound);
        };
        if entry.booking_status == BookingStatus::Cancelled {
            return Ok(CancelOutcome::AlreadyCancelled);
        }

        entry.booking_status = BookingStatus::Cancelled;
        self.write(&file).await?;
        tracing::info!(booking_id, "Cancelled booking in local cache");
        Ok(CancelOutcome::Cancelled)
    }
}
