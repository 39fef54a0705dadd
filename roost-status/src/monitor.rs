use std::sync::Arc;
use std::sync::RwLock;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use roost_core::gateway::BookingGateway;
use roost_core::session::SessionStore;

use crate::bus::StatusBus;
use crate::snapshot::{has_confirmed_booking, StatusSnapshot};

/// Fetches and holds the current booking status for the signed-in user.
///
/// Concurrent refreshes race last-write-wins; there is no request
/// fencing. Acceptable here: the worst case is briefly showing the
/// fail-safe "no confirmed booking" state.
pub struct StatusMonitor {
    gateway: Arc<dyn BookingGateway>,
    session: Arc<dyn SessionStore>,
    snapshot: RwLock<StatusSnapshot>,
}

impl StatusMonitor {
    pub fn new(gateway: Arc<dyn BookingGateway>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            gateway,
            session,
            snapshot: RwLock::new(StatusSnapshot::signed_out()),
        }
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    fn store(&self, snapshot: StatusSnapshot) {
        *self.snapshot.write().unwrap_or_else(|p| p.into_inner()) = snapshot;
    }

    /// Re-query the booking service and recompute the snapshot.
    ///
    /// With nobody signed in this resolves immediately without a network
    /// call. Any fetch failure collapses to the fail-closed snapshot.
    pub async fn refresh(&self) -> StatusSnapshot {
        let Some(user_id) = self.session.current_user_id() else {
            let snapshot = StatusSnapshot::signed_out();
            self.store(snapshot.clone());
            return snapshot;
        };

        self.snapshot
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .loading = true;

        let next = match self.gateway.bookings_for_user(&user_id).await {
            Ok(bookings) => StatusSnapshot::settled(has_confirmed_booking(&bookings)),
            Err(e) => {
                tracing::warn!(error = %e, "booking status fetch failed, treating as unconfirmed");
                StatusSnapshot::failed(e.to_string())
            }
        };

        self.store(next.clone());
        next
    }

    /// Re-query on every status-change notification. Returns the task
    /// handle; dropping or aborting it is the unsubscribe.
    pub fn listen(self: &Arc<Self>, bus: &StatusBus) -> JoinHandle<()> {
        let mut rx = bus.subscribe_status_changed();
        let monitor = Arc::clone(self);

        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        tracing::debug!(kind = ?event.kind, booking_id = ?event.booking_id, "status change received, refreshing");
                        monitor.refresh().await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        // Missed events still mean "something changed"
                        tracing::warn!(skipped, "status listener lagged, refreshing anyway");
                        monitor.refresh().await;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use roost_core::gateway::MockBookingGateway;
    use roost_core::session::MemorySession;
    use roost_shared::models::booking::{Booking, BookingStatus, Payment, PaymentStatus};
    use roost_shared::models::events::StatusChangeKind;
    use std::time::Duration;

    fn booking(id: &str, status: BookingStatus, payment_status: PaymentStatus) -> Booking {
        let now = Utc::now();
        Booking {
            id: id.to_string(),
            user_id: "u1".to_string(),
            room_id: "r1".to_string(),
            status,
            payment: Payment {
                payment_status,
                amount: 6500,
                currency: "INR".to_string(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_signed_out_skips_network() {
        let gateway = Arc::new(MockBookingGateway::with_bookings(vec![booking(
            "b1",
            BookingStatus::Confirmed,
            PaymentStatus::Completed,
        )]));
        let session = Arc::new(MemorySession::new());
        let monitor = StatusMonitor::new(gateway.clone(), session);

        let snapshot = monitor.refresh().await;
        assert_eq!(snapshot, StatusSnapshot::signed_out());
        assert_eq!(gateway.listing_calls(), 0);
    }

    #[tokio::test]
    async fn test_refresh_reduces_listing() {
        let gateway = Arc::new(MockBookingGateway::with_bookings(vec![
            booking("b1", BookingStatus::Confirmed, PaymentStatus::Completed),
            booking("b2", BookingStatus::PendingApproval, PaymentStatus::Pending),
        ]));
        let session = Arc::new(MemorySession::signed_in("u1"));
        let monitor = StatusMonitor::new(gateway, session);

        let snapshot = monitor.refresh().await;
        assert!(snapshot.has_confirmed_booking);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.error, None);
    }

    #[tokio::test]
    async fn test_refresh_fails_closed() {
        let gateway = Arc::new(MockBookingGateway::new());
        gateway.fail_with("connection refused");
        let session = Arc::new(MemorySession::signed_in("u1"));
        let monitor = StatusMonitor::new(gateway, session);

        let snapshot = monitor.refresh().await;
        assert!(!snapshot.has_confirmed_booking);
        assert!(snapshot.error.is_some());
    }

    #[tokio::test]
    async fn test_listen_refreshes_on_publish() {
        let gateway = Arc::new(MockBookingGateway::with_bookings(vec![booking(
            "b1",
            BookingStatus::PendingApproval,
            PaymentStatus::Completed,
        )]));
        let session = Arc::new(MemorySession::signed_in("u1"));
        let monitor = Arc::new(StatusMonitor::new(gateway.clone(), session));
        let bus = StatusBus::default();

        let handle = monitor.listen(&bus);
        assert!(!monitor.snapshot().has_confirmed_booking);

        // Owner approves; a consumer publishes the change
        gateway.set_bookings(vec![booking(
            "b1",
            BookingStatus::Confirmed,
            PaymentStatus::Completed,
        )]);
        bus.publish(StatusChangeKind::Approved, Some("b1".to_string()));

        // Listener runs on the same runtime; give it a few polls
        for _ in 0..50 {
            if monitor.snapshot().has_confirmed_booking {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(monitor.snapshot().has_confirmed_booking);

        handle.abort();
    }
}
