use chrono::Utc;
use tokio::sync::broadcast;

use roost_shared::models::events::{StatusChangeEvent, StatusChangeKind};

const CHANNEL_CAPACITY: usize = 100;

/// In-process publish/subscribe channel for booking status changes.
/// Fire-and-forget: no replay, no delivery to late subscribers, lagging
/// receivers drop the oldest events.
pub struct StatusBus {
    status_changed: broadcast::Sender<StatusChangeEvent>,
    approved: broadcast::Sender<StatusChangeEvent>,
    cancelled: broadcast::Sender<StatusChangeEvent>,
}

impl StatusBus {
    pub fn new(capacity: usize) -> Self {
        let (status_changed, _) = broadcast::channel(capacity);
        let (approved, _) = broadcast::channel(capacity);
        let (cancelled, _) = broadcast::channel(capacity);
        Self {
            status_changed,
            approved,
            cancelled,
        }
    }

    /// Emit one generic notification and, for the recognized kinds, an
    /// additional specific one. Nobody listening is fine.
    pub fn publish(&self, kind: StatusChangeKind, booking_id: Option<String>) -> StatusChangeEvent {
        let event = StatusChangeEvent {
            kind,
            booking_id,
            occurred_at: Utc::now().timestamp(),
        };
        tracing::debug!(channel = kind.channel(), booking_id = ?event.booking_id, "publishing status change");

        let _ = self.status_changed.send(event.clone());
        match kind {
            StatusChangeKind::Approved => {
                let _ = self.approved.send(event.clone());
            }
            StatusChangeKind::Cancelled => {
                let _ = self.cancelled.send(event.clone());
            }
            StatusChangeKind::Generic => {}
        }
        event
    }

    pub fn subscribe_status_changed(&self) -> broadcast::Receiver<StatusChangeEvent> {
        self.status_changed.subscribe()
    }

    pub fn subscribe_approved(&self) -> broadcast::Receiver<StatusChangeEvent> {
        self.approved.subscribe()
    }

    pub fn subscribe_cancelled(&self) -> broadcast::Receiver<StatusChangeEvent> {
        self.cancelled.subscribe()
    }
}

impl Default for StatusBus {
    fn default() -> Self {
        Self::new(CHANNEL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[tokio::test]
    async fn test_approved_reaches_generic_and_specific() {
        let bus = StatusBus::default();
        let mut generic = bus.subscribe_status_changed();
        let mut approved = bus.subscribe_approved();
        let mut cancelled = bus.subscribe_cancelled();

        bus.publish(StatusChangeKind::Approved, Some("b1".to_string()));

        let event = generic.try_recv().unwrap();
        assert_eq!(event.kind, StatusChangeKind::Approved);
        assert_eq!(event.booking_id.as_deref(), Some("b1"));

        let event = approved.try_recv().unwrap();
        assert_eq!(event.booking_id.as_deref(), Some("b1"));

        assert_eq!(cancelled.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn test_cancelled_does_not_reach_approved() {
        let bus = StatusBus::default();
        let mut generic = bus.subscribe_status_changed();
        let mut approved = bus.subscribe_approved();
        let mut cancelled = bus.subscribe_cancelled();

        bus.publish(StatusChangeKind::Cancelled, Some("b2".to_string()));

        assert_eq!(generic.try_recv().unwrap().kind, StatusChangeKind::Cancelled);
        assert_eq!(
            cancelled.try_recv().unwrap().booking_id.as_deref(),
            Some("b2")
        );
        assert_eq!(approved.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn test_generic_only_hits_generic_channel() {
        let bus = StatusBus::default();
        let mut generic = bus.subscribe_status_changed();
        let mut approved = bus.subscribe_approved();

        bus.publish(StatusChangeKind::Generic, None);

        let event = generic.try_recv().unwrap();
        assert_eq!(event.kind, StatusChangeKind::Generic);
        assert_eq!(event.booking_id, None);
        assert_eq!(approved.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_fine() {
        let bus = StatusBus::default();
        // No receivers registered; send errors are swallowed
        bus.publish(StatusChangeKind::Approved, Some("b3".to_string()));
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let bus = StatusBus::default();
        bus.publish(StatusChangeKind::Approved, Some("b4".to_string()));

        let mut late = bus.subscribe_status_changed();
        assert_eq!(late.try_recv().unwrap_err(), TryRecvError::Empty);
    }
}
