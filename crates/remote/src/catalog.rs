//! Hotel catalog endpoints. Read-only; the catalog service owns the
//! data.

use serde::Deserialize;

use luxstay_core::hotel::Hotel;

use crate::client::ApiClient;
use crate::error::RemoteError;

#[derive(Debug, Deserialize)]
struct HotelEnvelope {
    hotel: Option<Hotel>,
}

#[derive(Debug, Deserialize)]
struct HotelListEnvelope {
    #[serde(default)]
    hotels: Vec<Hotel>,
}

/// Filters for `GET /hotels/search`. `None` fields are left out of the
/// query string entirely.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub guests: Option<u32>,
    pub rating: Option<f64>,
    pub featured: Option<bool>,
}

impl SearchFilters {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(location) = &self.location {
            params.push(("location", location.clone()));
        }
        if let Some(min_price) = self.min_price {
            params.push(("minPrice", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            params.push(("maxPrice", max_price.to_string()));
        }
        if let Some(guests) = self.guests {
            params.push(("guests", guests.to_string()));
        }
        if let Some(rating) = self.rating {
            params.push(("rating", rating.to_string()));
        }
        if let Some(featured) = self.featured {
            params.push(("featured", featured.to_string()));
        }
        params
    }
}

impl ApiClient {
    /// `GET /hotels` -- the full catalog.
    pub async fn hotels(&self) -> Result<Vec<Hotel>, RemoteError> {
        let response = self.http().get(self.url("/hotels")).send().await?;
        let envelope: HotelListEnvelope = Self::parse(response).await?;
        Ok(envelope.hotels)
    }

    /// `GET /hotel/:id` -- one hotel with its room types.
    pub async fn hotel(&self, id: &str) -> Result<Hotel, RemoteError> {
        let response = self
            .http()
            .get(self.url(&format!("/hotel/{id}")))
            .send()
            .await?;
        let envelope: HotelEnvelope = Self::parse(response).await?;
        envelope
            .hotel
            .ok_or_else(|| RemoteError::Rejected(format!("Hotel {id} not in response")))
    }

    /// `GET /hotels/search?...` with the given filters.
    pub async fn search_hotels(&self, filters: &SearchFilters) -> Result<Vec<Hotel>, RemoteError> {
        let response = self
            .http()
            .get(self.url("/hotels/search"))
            .query(&filters.query())
            .send()
            .await?;
        let envelope: HotelListEnvelope = Self::parse(response).await?;
        Ok(envelope.hotels)
    }

    /// `GET /hotels/search?featured=true`, the homepage strip.
    pub async fn featured_hotels(&self) -> Result<Vec<Hotel>, RemoteError> {
        self.search_hotels(&SearchFilters {
            featured: Some(true),
            ..Default::default()
        })
        .await
    }
}
