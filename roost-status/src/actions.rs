use std::sync::Arc;

use roost_core::gateway::{BookingGateway, StatusAction};
use roost_shared::models::events::StatusChangeKind;

use crate::bus::StatusBus;

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Booking id is empty")]
    EmptyBookingId,

    #[error("Booking command failed: {0}")]
    CommandFailed(String),
}

/// Booking commands issued by the surrounding UI. Each forwards to the
/// booking service and, on success, notifies the rest of the process.
/// Nothing is published when the command fails.
pub struct BookingActions {
    gateway: Arc<dyn BookingGateway>,
    bus: Arc<StatusBus>,
}

impl BookingActions {
    pub fn new(gateway: Arc<dyn BookingGateway>, bus: Arc<StatusBus>) -> Self {
        Self { gateway, bus }
    }

    pub async fn approve(&self, booking_id: &str) -> Result<(), ActionError> {
        self.submit(booking_id, StatusAction::Approve, StatusChangeKind::Approved)
            .await
    }

    pub async fn reject(&self, booking_id: &str) -> Result<(), ActionError> {
        self.submit(booking_id, StatusAction::Reject, StatusChangeKind::Generic)
            .await
    }

    pub async fn cancel(&self, booking_id: &str) -> Result<(), ActionError> {
        Self::validate_id(booking_id)?;

        self.gateway
            .cancel_booking(booking_id)
            .await
            .map_err(|e| ActionError::CommandFailed(e.to_string()))?;

        self.bus
            .publish(StatusChangeKind::Cancelled, Some(booking_id.to_string()));
        Ok(())
    }

    async fn submit(
        &self,
        booking_id: &str,
        action: StatusAction,
        kind: StatusChangeKind,
    ) -> Result<(), ActionError> {
        Self::validate_id(booking_id)?;

        self.gateway
            .submit_status_action(booking_id, action)
            .await
            .map_err(|e| ActionError::CommandFailed(e.to_string()))?;

        self.bus.publish(kind, Some(booking_id.to_string()));
        Ok(())
    }

    fn validate_id(booking_id: &str) -> Result<(), ActionError> {
        if booking_id.trim().is_empty() {
            return Err(ActionError::EmptyBookingId);
        }
        Ok(())
    }
}
