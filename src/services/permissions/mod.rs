pub mod ledger;
pub mod snapshot;

#[cfg(feature = "app")]
pub mod commands;

pub use ledger::{
    AuthorizationKind, AuthorizationLedger, BundleOutcomePolicy, PermissionResult,
    PlatformGrants, RuntimePermission, DND_PROTECTION_SDK, OVERLAY_CONTROL_SDK,
};
pub use snapshot::{GrantSnapshot, SharedGrants};
