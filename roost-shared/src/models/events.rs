use serde::{Deserialize, Serialize};

/// Channel names are a public contract; other tooling keys off them.
pub const STATUS_CHANGED_CHANNEL: &str = "booking-status-changed";
pub const APPROVED_CHANNEL: &str = "booking-approved";
pub const CANCELLED_CHANNEL: &str = "booking-cancelled";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusChangeKind {
    Approved,
    Cancelled,
    Generic,
}

impl StatusChangeKind {
    pub fn channel(&self) -> &'static str {
        match self {
            StatusChangeKind::Approved => APPROVED_CHANNEL,
            StatusChangeKind::Cancelled => CANCELLED_CHANNEL,
            StatusChangeKind::Generic => STATUS_CHANGED_CHANNEL,
        }
    }
}

/// Fire-and-forget notification that a booking's status changed.
/// Exists only for the duration of dispatch; never persisted or replayed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusChangeEvent {
    pub kind: StatusChangeKind,
    pub booking_id: Option<String>,
    pub occurred_at: i64,
}
