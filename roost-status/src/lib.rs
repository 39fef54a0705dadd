pub mod actions;
pub mod bus;
pub mod monitor;
pub mod snapshot;
pub mod watch;

pub use actions::{ActionError, BookingActions};
pub use bus::StatusBus;
pub use monitor::StatusMonitor;
pub use snapshot::StatusSnapshot;
pub use watch::{ApprovalWatcher, WatchConfig, WatchOutcome};
