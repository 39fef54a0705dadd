use serde::{Deserialize, Serialize};

use roost_shared::models::booking::Booking;

/// Derived view of a user's booking state. Lives only for the current
/// process; recomputed on refresh or on a status-change event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub has_confirmed_booking: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl StatusSnapshot {
    /// Unknown users never have a confirmed booking
    pub fn signed_out() -> Self {
        Self {
            has_confirmed_booking: false,
            loading: false,
            error: None,
        }
    }

    pub fn settled(has_confirmed_booking: bool) -> Self {
        Self {
            has_confirmed_booking,
            loading: false,
            error: None,
        }
    }

    /// Fail closed: uncertain status is "no confirmed booking"
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            has_confirmed_booking: false,
            loading: false,
            error: Some(message.into()),
        }
    }
}

/// True iff at least one booking is confirmed with a completed payment.
pub fn has_confirmed_booking(bookings: &[Booking]) -> bool {
    bookings.iter().any(|b| b.is_confirmed_and_paid())
}
