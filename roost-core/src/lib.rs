pub mod gateway;
pub mod session;

pub use gateway::{BookingGateway, MockBookingGateway, StatusAction};
pub use session::{MemorySession, SessionStore};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
