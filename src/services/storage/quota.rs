use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StartupError;
use crate::services::policy::UNRESOLVED_CAPACITY;

pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Minimum addressable capacity (recordings already on disk plus free space)
/// required before recording is admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageQuota {
    bytes: u64,
}

impl StorageQuota {
    pub fn from_bytes(bytes: u64) -> Self {
        Self { bytes }
    }

    pub fn from_mb(mb: u64) -> Self {
        Self {
            bytes: mb.saturating_mul(BYTES_PER_MB),
        }
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn mb(&self) -> u64 {
        self.bytes / BYTES_PER_MB
    }
}

/// Capacity measured at check time. Never stored; free space is too volatile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityReport {
    pub directory: PathBuf,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub quota: StorageQuota,
}

impl CapacityReport {
    /// Old recordings count as reclaimable: space is freed elsewhere by rotation.
    pub fn addressable_bytes(&self) -> u64 {
        self.used_bytes.saturating_add(self.free_bytes)
    }

    pub fn is_admissible(&self) -> bool {
        is_admissible(self.used_bytes, self.free_bytes, self.quota)
    }
}

/// `used + free >= quota`; equality admits.
pub fn is_admissible(used_bytes: u64, free_bytes: u64, quota: StorageQuota) -> bool {
    used_bytes.saturating_add(free_bytes) >= quota.bytes()
}

/// Filesystem statistics needed by the guard.
pub trait StorageProbe {
    /// `None` when the recordings directory cannot be resolved on this device.
    fn recordings_dir(&self) -> Option<PathBuf>;

    /// Recursive size of everything under `dir`.
    fn directory_size(&self, dir: &Path) -> std::io::Result<u64>;

    /// Free bytes on the volume holding `dir`.
    fn free_space(&self, dir: &Path) -> std::io::Result<u64>;
}

/// Admission check over the recordings volume.
pub struct CapacityGuard<F> {
    probe: F,
    quota: StorageQuota,
}

impl<F: StorageProbe> CapacityGuard<F> {
    pub fn new(probe: F, quota: StorageQuota) -> Self {
        Self { probe, quota }
    }

    pub fn quota(&self) -> StorageQuota {
        self.quota
    }

    pub fn probe(&self) -> &F {
        &self.probe
    }

    /// Measure the recordings volume.
    pub fn measure(&self) -> Result<CapacityReport, StartupError> {
        let directory = self.probe.recordings_dir().ok_or_else(|| {
            StartupError::StorageError("recordings directory could not be resolved".into())
        })?;
        let used_bytes = self.probe.directory_size(&directory)?;
        let free_bytes = self.probe.free_space(&directory)?;

        Ok(CapacityReport {
            directory,
            used_bytes,
            free_bytes,
            quota: self.quota,
        })
    }

    /// Whether recording may be admitted. Any measurement failure is a refusal.
    pub fn is_admissible(&self) -> bool {
        let answer = match self.measure() {
            Ok(report) => {
                log::info!(
                    "Capacity at {}: {} used + {} free against quota {} bytes",
                    report.directory.display(),
                    report.used_bytes,
                    report.free_bytes,
                    report.quota.bytes()
                );
                Some(report.is_admissible())
            }
            Err(e) => {
                log::warn!("Capacity check could not be completed: {}", e);
                None
            }
        };
        UNRESOLVED_CAPACITY.resolve(answer)
    }
}
