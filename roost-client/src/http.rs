use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use roost_core::gateway::{BookingGateway, StatusAction};
use roost_shared::models::booking::Booking;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Booking service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Booking service returned status {status}")]
    UnexpectedStatus { status: u16 },
}

#[derive(Debug, Serialize)]
struct StatusActionRequest {
    action: StatusAction,
}

/// HTTP implementation of the booking gateway against the external
/// booking service REST API.
#[derive(Clone)]
pub struct HttpBookingGateway {
    client: Client,
    base_url: String,
}

impl HttpBookingGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &crate::app_config::Config) -> Self {
        Self::new(config.booking_api.base_url.clone())
    }

    fn ensure_success(response: &reqwest::Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::UnexpectedStatus {
                status: response.status().as_u16(),
            })
        }
    }
}

/// Pull the booking list out of a response body, coercing anything
/// unexpected to the empty collection instead of failing the fetch.
/// Individual entries that don't decode are skipped.
fn parse_bookings(body: serde_json::Value) -> Vec<Booking> {
    let Some(items) = body.get("bookings").and_then(|v| v.as_array()) else {
        tracing::warn!("booking listing had no bookings array, treating as empty");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<Booking>(item.clone()) {
            Ok(booking) => Some(booking),
            Err(e) => {
                tracing::warn!(error = %e, "skipping undecodable booking entry");
                None
            }
        })
        .collect()
}

#[async_trait]
impl BookingGateway for HttpBookingGateway {
    async fn bookings_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}/api/bookings/user", self.base_url);
        tracing::debug!(user_id, "fetching bookings");

        let response = self
            .client
            .get(&url)
            .query(&[("userId", user_id)])
            .send()
            .await
            .map_err(ApiError::Http)?;
        Self::ensure_success(&response)?;

        let body: serde_json::Value = response.json().await.map_err(ApiError::Http)?;
        Ok(parse_bookings(body))
    }

    async fn submit_status_action(
        &self,
        booking_id: &str,
        action: StatusAction,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}/api/bookings/{}/status", self.base_url, booking_id);
        tracing::debug!(booking_id, ?action, "submitting status action");

        let response = self
            .client
            .post(&url)
            .json(&StatusActionRequest { action })
            .send()
            .await
            .map_err(ApiError::Http)?;
        Self::ensure_success(&response)?;
        Ok(())
    }

    async fn cancel_booking(
        &self,
        booking_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}/api/bookings/{}", self.base_url, booking_id);
        tracing::debug!(booking_id, "cancelling booking");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(ApiError::Http)?;
        Self::ensure_success(&response)?;
        Ok(())
    }
}
