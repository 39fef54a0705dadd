use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Booking lifecycle status as the booking service reports it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    PendingApproval,
    PaymentPending,
    Confirmed,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    /// Terminal statuses end any approval polling
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Confirmed | BookingStatus::Rejected | BookingStatus::Cancelled
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

/// Payment record nested inside a booking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub amount: i32,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

/// A booking as read from the booking service. The backend is the sole
/// writer; ids are opaque strings assigned by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub room_id: String,
    pub status: BookingStatus,
    pub payment: Payment,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// A booking counts as settled only when the owner confirmed it AND
    /// the payment went through. A confirmed booking with a pending
    /// payment does not count.
    pub fn is_confirmed_and_paid(&self) -> bool {
        self.status == BookingStatus::Confirmed
            && self.payment.payment_status == PaymentStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(status: BookingStatus, payment_status: PaymentStatus) -> Booking {
        let now = Utc::now();
        Booking {
            id: "b1".to_string(),
            user_id: "u1".to_string(),
            room_id: "r1".to_string(),
            status,
            payment: Payment {
                payment_status,
                amount: 9500,
                currency: "INR".to_string(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_confirmed_and_paid_predicate() {
        assert!(booking(BookingStatus::Confirmed, PaymentStatus::Completed).is_confirmed_and_paid());

        // Confirmed but payment still pending does not count
        assert!(!booking(BookingStatus::Confirmed, PaymentStatus::Pending).is_confirmed_and_paid());
        assert!(!booking(BookingStatus::PendingApproval, PaymentStatus::Completed)
            .is_confirmed_and_paid());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(BookingStatus::Confirmed.is_terminal());
        assert!(BookingStatus::Rejected.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::PendingApproval.is_terminal());
        assert!(!BookingStatus::PaymentPending.is_terminal());
    }

    #[test]
    fn test_booking_wire_format() {
        let json = serde_json::json!({
            "id": "6617f2",
            "userId": "u42",
            "roomId": "r7",
            "status": "pending_approval",
            "payment": { "paymentStatus": "pending" },
            "createdAt": "2026-01-10T10:00:00Z",
            "updatedAt": "2026-01-12T08:30:00Z"
        });

        let parsed: Booking = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.status, BookingStatus::PendingApproval);
        assert_eq!(parsed.payment.payment_status, PaymentStatus::Pending);
        // Omitted payment fields fall back to defaults
        assert_eq!(parsed.payment.amount, 0);
        assert_eq!(parsed.payment.currency, "INR");
    }
}
