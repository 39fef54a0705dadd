use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, Instant, MissedTickBehavior};

use roost_core::gateway::BookingGateway;
use roost_shared::models::booking::{Booking, BookingStatus, PaymentStatus};
use roost_shared::models::events::StatusChangeKind;

use crate::bus::StatusBus;

/// Approval polling timings. Fed from configuration; the defaults match
/// the legacy behavior of one poll every 10 seconds for at most 5
/// minutes.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub poll_interval: Duration,
    pub max_wait: Duration,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            max_wait: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    Confirmed,
    Rejected,
    Cancelled,
    TimedOut,
}

/// Polls the booking service after a payment, waiting for the owner's
/// decision. Idle -> Polling -> Idle: polling starts only for a paid
/// booking still awaiting approval, and ends on a terminal status or
/// the wait ceiling, whichever comes first.
pub struct ApprovalWatcher {
    gateway: Arc<dyn BookingGateway>,
    bus: Arc<StatusBus>,
    config: WatchConfig,
}

impl ApprovalWatcher {
    pub fn new(gateway: Arc<dyn BookingGateway>, bus: Arc<StatusBus>, config: WatchConfig) -> Self {
        Self {
            gateway,
            bus,
            config,
        }
    }

    /// Idle -> Polling guard: the viewer has paid and the owner has not
    /// decided yet. Anything else has nothing to wait for.
    pub fn should_watch(booking: &Booking) -> bool {
        booking.status == BookingStatus::PendingApproval
            && booking.payment.payment_status == PaymentStatus::Completed
    }

    /// Poll until the watched booking reaches a terminal status or the
    /// ceiling passes. Fetch errors are logged and swallowed; polling
    /// continues.
    pub async fn watch(&self, user_id: &str, booking_id: &str) -> WatchOutcome {
        let deadline = Instant::now() + self.config.max_wait;
        let mut ticker = interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if Instant::now() >= deadline {
                tracing::info!(booking_id, "approval watch hit the wait ceiling");
                return WatchOutcome::TimedOut;
            }

            let bookings = match self.gateway.bookings_for_user(user_id).await {
                Ok(bookings) => bookings,
                Err(e) => {
                    tracing::warn!(error = %e, booking_id, "status poll failed, retrying");
                    continue;
                }
            };

            let Some(booking) = bookings.into_iter().find(|b| b.id == booking_id) else {
                tracing::warn!(booking_id, "watched booking missing from listing");
                continue;
            };

            match booking.status {
                BookingStatus::Confirmed => {
                    self.bus
                        .publish(StatusChangeKind::Approved, Some(booking_id.to_string()));
                    return WatchOutcome::Confirmed;
                }
                BookingStatus::Rejected => {
                    self.bus
                        .publish(StatusChangeKind::Generic, Some(booking_id.to_string()));
                    return WatchOutcome::Rejected;
                }
                BookingStatus::Cancelled => {
                    self.bus
                        .publish(StatusChangeKind::Cancelled, Some(booking_id.to_string()));
                    return WatchOutcome::Cancelled;
                }
                _ => {
                    tracing::debug!(booking_id, status = ?booking.status, "still waiting on owner");
                }
            }
        }
    }
}
