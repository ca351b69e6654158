//! The booking flow: step machine, submission with offline fallback,
//! cancellation, and the merged bookings view.
//!
//! The "try remote, fall back to the local cache" policy lives here and
//! only here; pages consume the outcome, never the policy.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use luxstay_core::booking::{
    self, Booking, BookingDraft, BookingStatus, BookingStep, BucketedBookings, PaymentInfo,
};
use luxstay_core::error::{CoreError, CoreResult};
use luxstay_core::hotel::{Hotel, HotelSummary};
use luxstay_remote::{ApiClient, BookingPayload};
use luxstay_store::{CancelOutcome, LocalStore};

/// One in-progress booking: the draft plus its position in the linear
/// step machine. Client-local; dropped on completion or navigation
/// away.
#[derive(Debug)]
pub struct BookingFlow {
    draft: BookingDraft,
    step: BookingStep,
}

impl BookingFlow {
    /// Start a flow for a hotel, optionally with a room preselected
    /// (the hotel page links straight into a room type).
    pub fn new(hotel_id: impl Into<String>, room_type: Option<String>) -> Self {
        Self {
            draft: BookingDraft {
                hotel_id: hotel_id.into(),
                room_type: room_type.unwrap_or_default(),
                ..Default::default()
            },
            step: BookingStep::RoomAndDates,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Mutable access for form inputs. Editing does not move the step;
    /// guards run on [`advance`](Self::advance).
    pub fn draft_mut(&mut self) -> &mut BookingDraft {
        &mut self.draft
    }

    /// Move forward one step if the current step's guard passes.
    /// Returns the new step; a guard failure leaves the step in place.
    pub fn advance(&mut self, hotel: &Hotel) -> CoreResult<BookingStep> {
        self.step = match self.step {
            BookingStep::RoomAndDates => {
                self.draft.validate_room_and_dates(hotel)?;
                BookingStep::GuestInfo
            }
            BookingStep::GuestInfo => {
                self.draft.validate_guests()?;
                BookingStep::Payment
            }
            other => other,
        };
        Ok(self.step)
    }

    /// Step backward. Allowed from the two middle steps only.
    pub fn back(&mut self) -> BookingStep {
        self.step = match self.step {
            BookingStep::GuestInfo => BookingStep::RoomAndDates,
            BookingStep::Payment => BookingStep::GuestInfo,
            other => other,
        };
        self.step
    }
}

/// Booking operations against the remote service with the local cache
/// as the durable fallback.
pub struct BookingLifecycle {
    remote: Arc<ApiClient>,
    local: Arc<LocalStore>,
}

impl BookingLifecycle {
    pub fn new(remote: Arc<ApiClient>, local: Arc<LocalStore>) -> Self {
        Self { remote, local }
    }

    /// Submit a flow that has reached the payment step.
    ///
    /// All guards re-run here (dates may have gone stale since step 1).
    /// On remote failure, the booking is synthesized locally and cached;
    /// only a failure of *both* the remote call and the local write
    /// reaches the caller as an error. A `Confirmed` flow therefore
    /// always corresponds to a record somewhere durable.
    pub async fn submit(
        &self,
        flow: &mut BookingFlow,
        hotel: &Hotel,
        today: NaiveDate,
    ) -> CoreResult<Booking> {
        // 1. Re-validate the whole draft at the step boundary.
        flow.draft.validate_room_and_dates(hotel)?;
        flow.draft.validate_guests()?;
        flow.draft.validate_payment(today)?;

        let (Some(check_in), Some(check_out)) = (flow.draft.check_in_date, flow.draft.check_out_date)
        else {
            return Err(CoreError::Validation(
                "Please select check-in and check-out dates.".into(),
            ));
        };

        let quote = flow.draft.quote(hotel);
        let now = Utc::now();
        flow.step = BookingStep::Submitting;

        // 2. Price is computed once, here, and never recomputed.
        let payload = BookingPayload {
            hotel: flow.draft.hotel_id.clone(),
            room_type: flow.draft.room_type.clone(),
            check_in_date: check_in,
            check_out_date: check_out,
            guests: flow.draft.guests,
            total_price: quote.total,
            special_requests: flow.draft.special_requests.clone(),
            payment_info: PaymentInfo::simulated(now),
        };

        // 3. Remote first.
        let remote_err = match self.remote.create_booking(&payload).await {
            Ok(created) => {
                flow.step = BookingStep::Confirmed;
                tracing::info!(booking_id = %created.id, "Booking confirmed remotely");
                return Ok(created);
            }
            Err(err) => err,
        };
        tracing::warn!(error = %remote_err, "Booking service unreachable; falling back to local cache");

        // 4. Synthesize the record locally.
        let fallback = Booking {
            id: booking::fallback_booking_id(),
            hotel: HotelSummary::from(hotel),
            room_type: payload.room_type,
            check_in_date: payload.check_in_date,
            check_out_date: payload.check_out_date,
            guests: payload.guests,
            total_price: payload.total_price,
            special_requests: payload.special_requests,
            payment_info: payload.payment_info,
            booking_status: BookingStatus::Confirmed,
            created_at: now,
        };

        match self.local.append_booking(&fallback).await {
            Ok(()) => {
                flow.step = BookingStep::Confirmed;
                Ok(fallback)
            }
            Err(store_err) => {
                flow.step = BookingStep::Failed;
                tracing::error!(error = %store_err, "Local fallback write failed");
                Err(CoreError::RemoteUnavailable(format!(
                    "Failed to save booking: {remote_err}; local fallback: {store_err}"
                )))
            }
        }
    }

    /// The user's bookings: the remote list merged with local-only
    /// fallback entries (matched by id). If the remote fetch fails, the
    /// cache alone is returned.
    pub async fn my_bookings(&self) -> CoreResult<Vec<Booking>> {
        let cached = self.local.bookings().await?;

        match self.remote.my_bookings().await {
            Ok(mut remote_list) => {
                let known: Vec<_> = remote_list.iter().map(|b| b.id.clone()).collect();
                remote_list.extend(
                    cached
                        .into_iter()
                        .filter(|b| !known.contains(&b.id)),
                );
                Ok(remote_list)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Booking list fetch failed; serving local cache");
                Ok(cached)
            }
        }
    }

    /// Cancel a booking. Remote first; on remote failure the cached
    /// entry is marked cancelled instead. Cancelling an
    /// already-cancelled booking is a no-op success.
    pub async fn cancel(&self, booking_id: &str) -> CoreResult<()> {
        // Already cancelled locally: nothing to do, no remote call.
        let cached = self.local.bookings().await?;
        if cached
            .iter()
            .any(|b| b.id == booking_id && b.booking_status == BookingStatus::Cancelled)
        {
            return Ok(());
        }

        match self.remote.cancel_booking(booking_id).await {
            Ok(()) => {
                // Keep a cached copy (if any) in step with the server.
                self.local.cancel_booking(booking_id).await?;
                tracing::info!(booking_id, "Booking cancelled remotely");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, booking_id, "Remote cancel failed; trying local cache");
                match self.local.cancel_booking(booking_id).await? {
                    CancelOutcome::Cancelled | CancelOutcome::AlreadyCancelled => Ok(()),
                    // Neither side knows this booking; reporting success
                    // would claim a cancellation nobody recorded.
                    CancelOutcome::NotFound => Err(err.into_core_for("Booking", booking_id)),
                }
            }
        }
    }

    /// The merged bookings view partitioned into display buckets.
    pub async fn buckets(&self, today: NaiveDate) -> CoreResult<BucketedBookings> {
        let bookings = self.my_bookings().await?;
        Ok(booking::bucket_bookings(bookings, today))
    }
}
