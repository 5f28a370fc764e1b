use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::services::storage::quota::StorageProbe;

/// Folder name used under the platform's video directory
pub const RECORDINGS_FOLDER: &str = "OpenDashCam";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageLocation {
    Default,
    Custom { path: String },
}

/// Resolves the recordings directory and measures the volume it lives on.
pub struct StorageManager {
    pub location: StorageLocation,
}

impl StorageManager {
    pub fn new(location: StorageLocation) -> Self {
        Self { location }
    }

    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(StorageLocation::Custom {
            path: dir.as_ref().to_string_lossy().into_owned(),
        })
    }

    /// Get the recordings directory path, if the platform exposes one
    pub fn resolve_dir(&self) -> Option<PathBuf> {
        match &self.location {
            StorageLocation::Default => dirs::video_dir().map(|p| p.join(RECORDINGS_FOLDER)),
            StorageLocation::Custom { path } if path.is_empty() => None,
            StorageLocation::Custom { path } => Some(PathBuf::from(path)),
        }
    }
}

impl StorageProbe for StorageManager {
    fn recordings_dir(&self) -> Option<PathBuf> {
        self.resolve_dir()
    }

    fn directory_size(&self, dir: &Path) -> std::io::Result<u64> {
        // Nothing recorded yet
        if !dir.exists() {
            return Ok(0);
        }

        let mut total = 0u64;
        for entry in WalkDir::new(dir).follow_links(false) {
            let entry = entry?;
            if entry.file_type().is_file() {
                total = total.saturating_add(entry.metadata()?.len());
            }
        }
        Ok(total)
    }

    fn free_space(&self, dir: &Path) -> std::io::Result<u64> {
        // The directory may not be created until the first recording.
        let existing = dir.ancestors().find(|p| p.exists()).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no existing volume for {}", dir.display()),
            )
        })?;
        fs2::available_space(existing)
    }
}
