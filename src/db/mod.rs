//! Local persistence (key-value store).

pub mod local;
pub mod store;

pub use local::LocalDb;
pub use store::{FileStore, StorageError};

/// Storage keys.
pub mod keys {
    pub const REMINDER_TIMES: &str = "reminder_times";
    pub const HISTORY: &str = "plantar_history";
    pub const PAIN_LOG: &str = "pain_log";
    pub const CUSTOM_CYCLES: &str = "custom_cycles";
}
