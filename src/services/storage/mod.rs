pub mod manager;
pub mod quota;

#[cfg(feature = "app")]
pub mod commands;

pub use manager::{StorageLocation, StorageManager};
pub use quota::{is_admissible, CapacityGuard, CapacityReport, StorageProbe, StorageQuota};
