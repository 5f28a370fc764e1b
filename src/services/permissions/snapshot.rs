use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use super::ledger::{PlatformGrants, RuntimePermission};

/// Authorization state as last reported by the platform side of the app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantSnapshot {
    pub sdk_level: u32,
    pub can_draw_overlays: bool,
    #[serde(default)]
    pub notification_policy_access: Option<bool>,
    #[serde(default)]
    pub granted_permissions: Vec<RuntimePermission>,
}

impl PlatformGrants for GrantSnapshot {
    fn sdk_level(&self) -> u32 {
        self.sdk_level
    }

    fn can_draw_overlays(&self) -> bool {
        self.can_draw_overlays
    }

    fn notification_policy_access(&self) -> Option<bool> {
        self.notification_policy_access
    }

    fn permission_granted(&self, permission: RuntimePermission) -> bool {
        self.granted_permissions.contains(&permission)
    }
}

/// Shared slot the platform bridge overwrites whenever grants change.
///
/// Every query reads the latest report; nothing is copied out. Until the first
/// report arrives the slot is empty and nothing counts as granted.
#[derive(Debug, Clone, Default)]
pub struct SharedGrants {
    inner: Arc<Mutex<Option<GrantSnapshot>>>,
}

impl SharedGrants {
    pub fn new(snapshot: GrantSnapshot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(snapshot))),
        }
    }

    pub fn replace(&self, snapshot: GrantSnapshot) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }

    fn with<R: Default>(&self, f: impl FnOnce(&GrantSnapshot) -> R) -> R {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(f)
            .unwrap_or_default()
    }
}

impl PlatformGrants for SharedGrants {
    fn is_reported(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn sdk_level(&self) -> u32 {
        self.with(|s| s.sdk_level)
    }

    fn can_draw_overlays(&self) -> bool {
        self.with(|s| s.can_draw_overlays)
    }

    fn notification_policy_access(&self) -> Option<bool> {
        self.with(|s| s.notification_policy_access)
    }

    fn permission_granted(&self, permission: RuntimePermission) -> bool {
        self.with(|s| s.permission_granted(permission))
    }
}
