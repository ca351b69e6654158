//! Booking records, the multi-step draft, and status bucketing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::hotel::{Hotel, HotelSummary};
use crate::pricing::{self, Quote};
use crate::types::{BookingId, HotelId, Timestamp};

/// Minimum digit count for a card number (whitespace ignored).
pub const MIN_CARD_DIGITS: usize = 16;
/// Minimum digit count for a CVV.
pub const MIN_CVV_DIGITS: usize = 3;

// ---------------------------------------------------------------------------
// Persisted booking
// ---------------------------------------------------------------------------

/// Lifecycle state of a persisted booking. The client only ever
/// transitions `Confirmed -> Cancelled`; `Completed` is set server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

/// Simulated payment artifact attached to a booking at submit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub id: String,
    pub status: String,
}

impl PaymentInfo {
    /// Simulated gateway confirmation, `payment_id_<unix-millis>`.
    pub fn simulated(now: Timestamp) -> Self {
        Self {
            id: format!("payment_id_{}", now.timestamp_millis()),
            status: "confirmed".to_string(),
        }
    }
}

/// Guest counts for a stay.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Guests {
    pub adults: u32,
    pub children: u32,
}

impl Default for Guests {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
        }
    }
}

/// A persisted booking, either server-assigned or synthesized locally
/// while the booking service is unreachable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: BookingId,
    pub hotel: HotelSummary,
    pub room_type: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guests: Guests,
    pub total_price: f64,
    #[serde(default)]
    pub special_requests: String,
    pub payment_info: PaymentInfo,
    pub booking_status: BookingStatus,
    pub created_at: Timestamp,
}

/// Generate a client-side booking id for the offline fallback path.
///
/// No server authority is reachable when these are minted, so the id
/// only has to be collision-resistant enough to coexist with other
/// local entries. Reconciliation with a later server-assigned id is
/// deliberately not attempted.
pub fn fallback_booking_id() -> BookingId {
    format!("BOOK-{}", Uuid::new_v4())
}

// ---------------------------------------------------------------------------
// Draft and step machine
// ---------------------------------------------------------------------------

/// How the guest pays. Card payments require full card details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "credit-card")]
    CreditCard,
    #[serde(rename = "paypal")]
    PayPal,
}

/// Card fields collected on the payment step. Only checked for
/// presence and digit counts; this client never charges anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub card_number: String,
    pub card_name: String,
    pub expiry_date: String,
    pub cvv: String,
}

/// An in-progress booking, held only in client memory during the
/// multi-step flow and discarded on submit or navigation away.
#[derive(Debug, Clone, Default)]
pub struct BookingDraft {
    pub hotel_id: HotelId,
    pub room_type: String,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    pub guests: Guests,
    pub special_requests: String,
    pub payment_method: PaymentMethod,
    pub card: CardDetails,
}

/// Steps of the booking flow. Linear; only an explicit "back" moves
/// against the arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    RoomAndDates,
    GuestInfo,
    Payment,
    Submitting,
    Confirmed,
    Failed,
}

fn digit_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_ascii_digit()).count()
}

impl BookingDraft {
    /// Price the draft against a hotel's room list.
    pub fn quote(&self, hotel: &Hotel) -> Quote {
        pricing::quote(
            hotel,
            &self.room_type,
            self.check_in_date,
            self.check_out_date,
        )
    }

    /// Guard for `RoomAndDates -> GuestInfo`: a room is selected, both
    /// dates are present, and the stay is quotable.
    pub fn validate_room_and_dates(&self, hotel: &Hotel) -> CoreResult<()> {
        if self.check_in_date.is_none() || self.check_out_date.is_none() {
            return Err(CoreError::Validation(
                "Please select check-in and check-out dates.".into(),
            ));
        }
        if self.room_type.is_empty() {
            return Err(CoreError::Validation("Please select a room type.".into()));
        }
        if self.quote(hotel).is_zero() {
            return Err(CoreError::Validation(
                "Check-out date must be after check-in date".into(),
            ));
        }
        Ok(())
    }

    /// Guard for `GuestInfo -> Payment`.
    pub fn validate_guests(&self) -> CoreResult<()> {
        if self.guests.adults < 1 {
            return Err(CoreError::Validation(
                "At least one adult is required.".into(),
            ));
        }
        Ok(())
    }

    /// Guard for `Payment -> Submitting`: card fields (for card
    /// payments) plus a submit-time re-check of the dates, which may
    /// have gone stale since the first step.
    pub fn validate_payment(&self, today: NaiveDate) -> CoreResult<()> {
        if self.payment_method == PaymentMethod::CreditCard {
            let card = &self.card;
            if card.card_number.is_empty()
                || card.card_name.is_empty()
                || card.expiry_date.is_empty()
                || card.cvv.is_empty()
            {
                return Err(CoreError::Validation(
                    "Please fill in all card details.".into(),
                ));
            }
            if digit_count(&card.card_number) < MIN_CARD_DIGITS {
                return Err(CoreError::Validation(
                    "Please enter a valid card number.".into(),
                ));
            }
            if digit_count(&card.cvv) < MIN_CVV_DIGITS {
                return Err(CoreError::Validation("Please enter a valid CVV.".into()));
            }
        }

        let (Some(check_in), Some(check_out)) = (self.check_in_date, self.check_out_date) else {
            return Err(CoreError::Validation(
                "Please select check-in and check-out dates.".into(),
            ));
        };
        if check_in < today {
            return Err(CoreError::Validation(
                "Check-in date cannot be in the past".into(),
            ));
        }
        if check_out <= check_in {
            return Err(CoreError::Validation(
                "Check-out date must be after check-in date".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Status buckets
// ---------------------------------------------------------------------------

/// Display category for a stored booking, derived from status and
/// dates relative to "today". Never stored; recomputed per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Upcoming,
    Current,
    Past,
    Cancelled,
}

/// Classify one booking. The four buckets partition the status/date
/// space: every booking lands in exactly one.
pub fn bucket_of(booking: &Booking, today: NaiveDate) -> Bucket {
    match booking.booking_status {
        BookingStatus::Cancelled => Bucket::Cancelled,
        BookingStatus::Completed => Bucket::Past,
        BookingStatus::Confirmed => {
            if booking.check_in_date > today {
                Bucket::Upcoming
            } else if booking.check_out_date < today {
                Bucket::Past
            } else {
                Bucket::Current
            }
        }
    }
}

/// Bookings grouped into the four display buckets.
#[derive(Debug, Default)]
pub struct BucketedBookings {
    pub upcoming: Vec<Booking>,
    pub current: Vec<Booking>,
    pub past: Vec<Booking>,
    pub cancelled: Vec<Booking>,
}

impl BucketedBookings {
    /// First tab worth showing: upcoming, then current, then past.
    pub fn default_tab(&self) -> Bucket {
        if !self.upcoming.is_empty() {
            Bucket::Upcoming
        } else if !self.current.is_empty() {
            Bucket::Current
        } else {
            Bucket::Past
        }
    }
}

/// Partition bookings into display buckets relative to `today`.
pub fn bucket_bookings(bookings: Vec<Booking>, today: NaiveDate) -> BucketedBookings {
    let mut out = BucketedBookings::default();
    for booking in bookings {
        match bucket_of(&booking, today) {
            Bucket::Upcoming => out.upcoming.push(booking),
            Bucket::Current => out.current.push(booking),
            Bucket::Past => out.past.push(booking),
            Bucket::Cancelled => out.cancelled.push(booking),
        }
    }
    out
}
