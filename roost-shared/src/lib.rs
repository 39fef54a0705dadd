pub mod models;

pub use models::booking::{Booking, BookingStatus, Payment, PaymentStatus};
pub use models::events::{StatusChangeEvent, StatusChangeKind};
