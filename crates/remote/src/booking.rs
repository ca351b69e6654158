//! Booking service endpoints, plus the favorites toggles (they live on
//! the same backend).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use luxstay_core::booking::{Booking, Guests, PaymentInfo};

use crate::client::ApiClient;
use crate::error::RemoteError;

/// Request body for `POST /booking/new`. The hotel rides as a bare id;
/// the service denormalizes its own snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub hotel: String,
    pub room_type: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guests: Guests,
    pub total_price: f64,
    pub special_requests: String,
    pub payment_info: PaymentInfo,
}

#[derive(Debug, Deserialize)]
struct BookingEnvelope {
    booking: Option<Booking>,
}

#[derive(Debug, Deserialize)]
struct BookingListEnvelope {
    #[serde(default)]
    bookings: Vec<Booking>,
}

#[derive(Debug, Deserialize)]
struct AckEnvelope {
    #[serde(default = "default_true")]
    success: bool,
    message: Option<String>,
}

fn default_true() -> bool {
    true
}

impl ApiClient {
    /// `POST /booking/new` -- create a booking, returning the persisted
    /// record with its server-assigned id.
    pub async fn create_booking(&self, payload: &BookingPayload) -> Result<Booking, RemoteError> {
        let response = self
            .http()
            .post(self.url("/booking/new"))
            .json(payload)
            .send()
            .await?;
        let envelope: BookingEnvelope = Self::parse(response).await?;
        envelope
            .booking
            .ok_or_else(|| RemoteError::Rejected("Booking response carried no record".into()))
    }

    /// `GET /booking/:id`.
    pub async fn booking(&self, id: &str) -> Result<Booking, RemoteError> {
        let response = self
            .http()
            .get(self.url(&format!("/booking/{id}")))
            .send()
            .await?;
        let envelope: BookingEnvelope = Self::parse(response).await?;
        envelope
            .booking
            .ok_or_else(|| RemoteError::Rejected(format!("Booking {id} not in response")))
    }

    /// `GET /bookings/me` -- all bookings for the current session.
    pub async fn my_bookings(&self) -> Result<Vec<Booking>, RemoteError> {
        let response = self.http().get(self.url("/bookings/me")).send().await?;
        let envelope: BookingListEnvelope = Self::parse(response).await?;
        Ok(envelope.bookings)
    }

    /// `PUT /booking/cancel/:id`.
    pub async fn cancel_booking(&self, id: &str) -> Result<(), RemoteError> {
        let response = self
            .http()
            .put(self.url(&format!("/booking/cancel/{id}")))
            .send()
            .await?;
        let envelope: AckEnvelope = Self::parse(response).await?;
        if envelope.success {
            Ok(())
        } else {
            Err(RemoteError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "Cancellation failed".into()),
            ))
        }
    }

    /// `POST /hotel/favorite/:id` -- add to the profile's favorites.
    pub async fn add_favorite(&self, hotel_id: &str) -> Result<(), RemoteError> {
        let response = self
            .http()
            .post(self.url(&format!("/hotel/favorite/{hotel_id}")))
            .send()
            .await?;
        let envelope: AckEnvelope = Self::parse(response).await?;
        if envelope.success {
            Ok(())
        } else {
            Err(RemoteError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "Could not add favorite".into()),
            ))
        }
    }

    /// `DELETE /hotel/unfavorite/:id` -- remove from favorites.
    pub async fn remove_favorite(&self, hotel_id: &str) -> Result<(), RemoteError> {
        let response = self
            .http()
            .delete(self.url(&format!("/hotel/unfavorite/{hotel_id}")))
            .send()
            .await?;
        let envelope: AckEnvelope = Self::parse(response).await?;
        if envelope.success {
            Ok(())
        } else {
            Err(RemoteError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "Could not remove favorite".into()),
            ))
        }
    }
}
