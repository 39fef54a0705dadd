use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use roost_shared::models::booking::{Booking, BookingStatus};

use crate::CoreError;

/// Owner decision sent to the booking service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusAction {
    Approve,
    Reject,
}

/// Gateway trait for the external booking service. The service is the
/// sole writer of booking state; this side only reads and issues
/// approve/reject/cancel commands.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn bookings_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>>;

    async fn submit_status_action(
        &self,
        booking_id: &str,
        action: StatusAction,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn cancel_booking(
        &self,
        booking_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// In-memory gateway used by tests and local demos. Commands mutate the
/// held bookings the way the real service would.
pub struct MockBookingGateway {
    bookings: Mutex<Vec<Booking>>,
    failure: Mutex<Option<String>>,
    listing_calls: AtomicUsize,
    actions: Mutex<Vec<(String, StatusAction)>>,
}

impl MockBookingGateway {
    pub fn new() -> Self {
        Self::with_bookings(Vec::new())
    }

    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: Mutex::new(bookings),
            failure: Mutex::new(None),
            listing_calls: AtomicUsize::new(0),
            actions: Mutex::new(Vec::new()),
        }
    }

    pub fn set_bookings(&self, bookings: Vec<Booking>) {
        *self.bookings.lock().unwrap_or_else(|p| p.into_inner()) = bookings;
    }

    /// Every call fails with this message until cleared
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap_or_else(|p| p.into_inner()) = Some(message.into());
    }

    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap_or_else(|p| p.into_inner()) = None;
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    pub fn submitted_actions(&self) -> Vec<(String, StatusAction)> {
        self.actions.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn check_failure(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(message) = self.failure.lock().unwrap_or_else(|p| p.into_inner()).clone() {
            return Err(CoreError::InternalError(message).into());
        }
        Ok(())
    }

    fn apply_status(&self, booking_id: &str, status: BookingStatus) {
        let mut bookings = self.bookings.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(booking) = bookings.iter_mut().find(|b| b.id == booking_id) {
            booking.status = status;
            booking.updated_at = chrono::Utc::now();
        }
    }
}

impl Default for MockBookingGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingGateway for MockBookingGateway {
    async fn bookings_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let bookings = self.bookings.lock().unwrap_or_else(|p| p.into_inner());
        Ok(bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn submit_status_action(
        &self,
        booking_id: &str,
        action: StatusAction,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.check_failure()?;
        tracing::debug!(booking_id, ?action, "mock gateway recording status action");

        self.actions
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push((booking_id.to_string(), action));

        let next = match action {
            StatusAction::Approve => BookingStatus::Confirmed,
            StatusAction::Reject => BookingStatus::Rejected,
        };
        self.apply_status(booking_id, next);
        Ok(())
    }

    async fn cancel_booking(
        &self,
        booking_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.check_failure()?;
        tracing::debug!(booking_id, "mock gateway cancelling booking");
        self.apply_status(booking_id, BookingStatus::Cancelled);
        Ok(())
    }
}
