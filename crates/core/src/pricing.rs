//! Stay pricing: nightly rate x nights, taxes, and total.
//!
//! All amounts are whole currency units. Rounding is applied once, at
//! quote time, never accumulated incrementally.

use chrono::NaiveDate;

use crate::hotel::Hotel;

/// Tax rate applied to the room subtotal.
pub const TAX_RATE: f64 = 0.12;

/// Price breakdown for a prospective stay.
///
/// A zero quote (all fields 0) means the stay is not quotable: unknown
/// room type, missing dates, or a non-positive night count. Callers
/// must treat a zero quote as a validation failure, never as a free
/// stay.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Quote {
    pub nights: i64,
    pub price_per_night: f64,
    pub subtotal: f64,
    pub taxes: f64,
    pub total: f64,
}

impl Quote {
    /// The "not quotable" sentinel.
    pub fn zero() -> Self {
        Self {
            nights: 0,
            price_per_night: 0.0,
            subtotal: 0.0,
            taxes: 0.0,
            total: 0.0,
        }
    }

    /// True when this stay cannot be booked at this price.
    pub fn is_zero(&self) -> bool {
        self.nights == 0
    }
}

/// Round half-up to the nearest currency unit.
///
/// For the non-negative amounts produced here this matches
/// `f64::round`, which rounds half away from zero.
fn round_half_up(amount: f64) -> f64 {
    amount.round()
}

/// Number of nights between two dates. Non-positive for same-day or
/// inverted ranges.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Compute the price breakdown for a stay.
///
/// Returns [`Quote::zero`] if the room type is unknown to the hotel,
/// either date is missing, or the range yields no nights -- same-day
/// and inverted ranges never produce a positive quote.
pub fn quote(
    hotel: &Hotel,
    room_type_name: &str,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
) -> Quote {
    let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
        return Quote::zero();
    };

    let Some(room) = hotel.room_type(room_type_name) else {
        return Quote::zero();
    };

    let nights = nights_between(check_in, check_out);
    if nights <= 0 {
        return Quote::zero();
    }

    let subtotal = room.price * nights as f64;
    Quote {
        nights,
        price_per_night: room.price,
        subtotal,
        taxes: round_half_up(subtotal * TAX_RATE),
        total: round_half_up(subtotal * (1.0 + TAX_RATE)),
    }
}
