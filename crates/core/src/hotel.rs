//! Hotel catalog models.
//!
//! Read-only from the client's perspective; the catalog service is the
//! source of truth. The original payloads are loosely shaped (missing
//! `images`, `address`, sometimes `description`), so every optional
//! field declares its default here instead of being patched up at
//! render time.

use serde::{Deserialize, Serialize};

use crate::types::HotelId;

/// A bookable room category within a hotel. `name` is unique per hotel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub name: String,
    /// Nightly price in whole currency units; never negative.
    pub price: f64,
    /// Maximum number of guests.
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
}

fn default_capacity() -> u32 {
    2
}

fn default_available() -> bool {
    true
}

/// A hotel as returned by the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[serde(rename = "_id")]
    pub id: HotelId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub description: String,
    /// Ordered gallery; first image is the card thumbnail.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub room_types: Vec<RoomType>,
}

impl Hotel {
    /// Look up a room type by its (hotel-unique) name.
    pub fn room_type(&self, name: &str) -> Option<&RoomType> {
        self.room_types.iter().find(|room| room.name == name)
    }
}

/// Denormalized hotel snapshot embedded in a booking record, so the
/// booking stays displayable even if the hotel is later delisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSummary {
    #[serde(rename = "_id")]
    pub id: HotelId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub rating: f64,
}

impl From<&Hotel> for HotelSummary {
    fn from(hotel: &Hotel) -> Self {
        Self {
            id: hotel.id.clone(),
            name: hotel.name.clone(),
            location: hotel.location.clone(),
            images: hotel.images.clone(),
            rating: hotel.rating,
        }
    }
}
