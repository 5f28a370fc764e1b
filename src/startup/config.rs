use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StartupError;
use crate::services::permissions::{BundleOutcomePolicy, RuntimePermission};
use crate::services::storage::StorageQuota;

pub const DEFAULT_QUOTA_MB: u64 = 1000;
pub const DEFAULT_NAVIGATION_PACKAGE: &str = "com.google.android.apps.maps";
pub const DEFAULT_NAVIGATION_URI: &str = "google.navigation:/?free=1&mode=d&entry=fnls";

/// External app opened in driving mode before recording starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTarget {
    pub package: String,
    pub uri: String,
}

impl NavigationTarget {
    /// The hand-off addresses one app by package; a blank package or URI
    /// cannot be launched.
    pub fn validate(&self) -> Result<(), StartupError> {
        if self.package.trim().is_empty() {
            return Err(StartupError::HandoffFailed("no navigation package".into()));
        }
        if self.uri.trim().is_empty() {
            return Err(StartupError::HandoffFailed(format!(
                "no navigation uri for {}",
                self.package
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// Required used + free capacity, in MiB
    pub quota_mb: u64,
    /// Runtime permission bundle, in request order
    pub required_permissions: Vec<RuntimePermission>,
    pub bundle_outcome: BundleOutcomePolicy,
    pub navigation_package: String,
    pub navigation_uri: String,
    /// Overrides the platform video directory
    pub recordings_dir: Option<PathBuf>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            quota_mb: DEFAULT_QUOTA_MB,
            required_permissions: RuntimePermission::default_bundle(),
            bundle_outcome: BundleOutcomePolicy::All,
            navigation_package: DEFAULT_NAVIGATION_PACKAGE.to_string(),
            navigation_uri: DEFAULT_NAVIGATION_URI.to_string(),
            recordings_dir: None,
        }
    }
}

impl StartupConfig {
    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        if !path.exists() {
            log::debug!("No startup config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: StartupConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StartupError> {
        if self.quota_mb == 0 {
            return Err(StartupError::InvalidConfig("quota_mb must be positive".into()));
        }
        let mut seen = HashSet::new();
        for permission in &self.required_permissions {
            if !seen.insert(permission) {
                return Err(StartupError::InvalidConfig(format!(
                    "permission {:?} listed twice",
                    permission
                )));
            }
        }
        if self.navigation_package.trim().is_empty() {
            return Err(StartupError::InvalidConfig("navigation_package is empty".into()));
        }
        if self.navigation_uri.trim().is_empty() {
            return Err(StartupError::InvalidConfig("navigation_uri is empty".into()));
        }
        Ok(())
    }

    pub fn quota(&self) -> StorageQuota {
        StorageQuota::from_mb(self.quota_mb)
    }

    pub fn navigation_target(&self) -> NavigationTarget {
        NavigationTarget {
            package: self.navigation_package.clone(),
            uri: self.navigation_uri.clone(),
        }
    }
}
