use serde::{Deserialize, Serialize};

use crate::services::policy::UNAVAILABLE_AUTHORIZATION;

/// First platform level where drawing over other apps needs an explicit grant.
pub const OVERLAY_CONTROL_SDK: u32 = 23;

/// First platform level where changing stream volume needs Do Not Disturb access.
pub const DND_PROTECTION_SDK: u32 = 24;

/// A gate the user has to pass before recording may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorizationKind {
    OverlayDraw,
    MuteSystemSound,
    RuntimeBundle,
}

impl AuthorizationKind {
    /// Gate evaluation order.
    pub const ORDER: [AuthorizationKind; 3] = [
        AuthorizationKind::OverlayDraw,
        AuthorizationKind::MuteSystemSound,
        AuthorizationKind::RuntimeBundle,
    ];
}

/// Capability permissions that make up the runtime bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuntimePermission {
    Camera,
    Microphone,
    WriteStorage,
    ReadStorage,
}

impl RuntimePermission {
    pub fn manifest_name(&self) -> &'static str {
        match self {
            RuntimePermission::Camera => "android.permission.CAMERA",
            RuntimePermission::Microphone => "android.permission.RECORD_AUDIO",
            RuntimePermission::WriteStorage => "android.permission.WRITE_EXTERNAL_STORAGE",
            RuntimePermission::ReadStorage => "android.permission.READ_EXTERNAL_STORAGE",
        }
    }

    /// Default bundle, in request order
    pub fn default_bundle() -> Vec<RuntimePermission> {
        vec![
            RuntimePermission::Camera,
            RuntimePermission::Microphone,
            RuntimePermission::WriteStorage,
            RuntimePermission::ReadStorage,
        ]
    }
}

/// One entry of a batch permission response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionResult {
    pub permission: RuntimePermission,
    pub granted: bool,
}

/// How a batch response is collapsed into a single bundle verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleOutcomePolicy {
    /// Every listed permission must be granted.
    #[default]
    All,
    /// Only the first listed result is inspected.
    FirstListed,
}

impl BundleOutcomePolicy {
    /// An empty response (interrupted request) is a denial under either policy.
    pub fn evaluate(self, results: &[PermissionResult]) -> bool {
        match self {
            BundleOutcomePolicy::All => {
                !results.is_empty() && results.iter().all(|r| r.granted)
            }
            BundleOutcomePolicy::FirstListed => results.first().is_some_and(|r| r.granted),
        }
    }
}

/// Raw, live answers from the host platform.
///
/// Implementations must not cache: grants change out-of-process while the
/// startup flow is suspended.
pub trait PlatformGrants {
    /// False until the platform has answered at all. Unknown is not granted.
    fn is_reported(&self) -> bool {
        true
    }

    /// Platform API level of the running device.
    fn sdk_level(&self) -> u32;

    fn can_draw_overlays(&self) -> bool;

    /// `None` when the notification policy service is unavailable.
    fn notification_policy_access(&self) -> Option<bool>;

    fn permission_granted(&self, permission: RuntimePermission) -> bool;
}

impl<P: PlatformGrants + ?Sized> PlatformGrants for &P {
    fn is_reported(&self) -> bool {
        (**self).is_reported()
    }

    fn sdk_level(&self) -> u32 {
        (**self).sdk_level()
    }

    fn can_draw_overlays(&self) -> bool {
        (**self).can_draw_overlays()
    }

    fn notification_policy_access(&self) -> Option<bool> {
        (**self).notification_policy_access()
    }

    fn permission_granted(&self, permission: RuntimePermission) -> bool {
        (**self).permission_granted(permission)
    }
}

/// Read-only gate queries over the platform's authorization state.
pub struct AuthorizationLedger<P> {
    platform: P,
    required: Vec<RuntimePermission>,
}

impl<P: PlatformGrants> AuthorizationLedger<P> {
    pub fn new(platform: P, required: Vec<RuntimePermission>) -> Self {
        Self { platform, required }
    }

    /// Live check of a single gate.
    pub fn is_granted(&self, kind: AuthorizationKind) -> bool {
        if !self.platform.is_reported() {
            return false;
        }
        let sdk = self.platform.sdk_level();
        match kind {
            AuthorizationKind::OverlayDraw => {
                let answer =
                    (sdk >= OVERLAY_CONTROL_SDK).then(|| self.platform.can_draw_overlays());
                UNAVAILABLE_AUTHORIZATION.resolve(answer)
            }
            AuthorizationKind::MuteSystemSound => {
                let answer = if sdk >= DND_PROTECTION_SDK {
                    self.platform.notification_policy_access()
                } else {
                    None
                };
                UNAVAILABLE_AUTHORIZATION.resolve(answer)
            }
            // All-or-nothing: a partial grant gates like no grant.
            AuthorizationKind::RuntimeBundle => self.missing_permissions().is_empty(),
        }
    }

    /// Required permissions not currently granted, in request order.
    pub fn missing_permissions(&self) -> Vec<RuntimePermission> {
        self.required
            .iter()
            .copied()
            .filter(|p| !self.platform.permission_granted(*p))
            .collect()
    }

    pub fn required_permissions(&self) -> &[RuntimePermission] {
        &self.required
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashSet;

    struct FakePlatform {
        sdk: u32,
        overlay: bool,
        dnd: Option<bool>,
        granted: HashSet<RuntimePermission>,
        overlay_queries: Cell<u32>,
    }

    impl FakePlatform {
        fn new(sdk: u32) -> Self {
            Self {
                sdk,
                overlay: false,
                dnd: Some(false),
                granted: HashSet::new(),
                overlay_queries: Cell::new(0),
            }
        }
    }

    impl PlatformGrants for FakePlatform {
        fn sdk_level(&self) -> u32 {
            self.sdk
        }

        fn can_draw_overlays(&self) -> bool {
            self.overlay_queries.set(self.overlay_queries.get() + 1);
            self.overlay
        }

        fn notification_policy_access(&self) -> Option<bool> {
            self.dnd
        }

        fn permission_granted(&self, permission: RuntimePermission) -> bool {
            self.granted.contains(&permission)
        }
    }

    fn ledger(platform: &FakePlatform) -> AuthorizationLedger<&FakePlatform> {
        AuthorizationLedger::new(platform, RuntimePermission::default_bundle())
    }

    #[test]
    fn overlay_is_vacuous_before_the_grant_existed() {
        let platform = FakePlatform::new(OVERLAY_CONTROL_SDK - 1);
        assert!(ledger(&platform).is_granted(AuthorizationKind::OverlayDraw));
        assert_eq!(platform.overlay_queries.get(), 0);
    }

    #[test]
    fn overlay_is_queried_live_on_controlled_platforms() {
        let mut platform = FakePlatform::new(OVERLAY_CONTROL_SDK);
        assert!(!ledger(&platform).is_granted(AuthorizationKind::OverlayDraw));
        platform.overlay = true;
        assert!(ledger(&platform).is_granted(AuthorizationKind::OverlayDraw));
        assert_eq!(platform.overlay_queries.get(), 2);
    }

    #[test]
    fn mute_fails_open_below_dnd_and_without_a_policy_service() {
        let platform = FakePlatform::new(DND_PROTECTION_SDK - 1);
        assert!(ledger(&platform).is_granted(AuthorizationKind::MuteSystemSound));

        let mut platform = FakePlatform::new(DND_PROTECTION_SDK);
        assert!(!ledger(&platform).is_granted(AuthorizationKind::MuteSystemSound));
        platform.dnd = None;
        assert!(ledger(&platform).is_granted(AuthorizationKind::MuteSystemSound));
        platform.dnd = Some(true);
        assert!(ledger(&platform).is_granted(AuthorizationKind::MuteSystemSound));
    }

    #[test]
    fn partial_bundle_counts_as_ungranted() {
        let mut platform = FakePlatform::new(30);
        platform.granted.insert(RuntimePermission::Microphone);
        platform.granted.insert(RuntimePermission::WriteStorage);
        platform.granted.insert(RuntimePermission::ReadStorage);

        let ledger = ledger(&platform);
        assert!(!ledger.is_granted(AuthorizationKind::RuntimeBundle));
        assert_eq!(ledger.missing_permissions(), vec![RuntimePermission::Camera]);
    }

    #[test]
    fn full_bundle_is_granted() {
        let mut platform = FakePlatform::new(30);
        platform.granted.extend(RuntimePermission::default_bundle());
        assert!(ledger(&platform).is_granted(AuthorizationKind::RuntimeBundle));
    }

    #[test]
    fn bundle_policies_disagree_only_past_the_first_entry() {
        let results = [
            PermissionResult {
                permission: RuntimePermission::Camera,
                granted: true,
            },
            PermissionResult {
                permission: RuntimePermission::Microphone,
                granted: false,
            },
        ];
        assert!(!BundleOutcomePolicy::All.evaluate(&results));
        assert!(BundleOutcomePolicy::FirstListed.evaluate(&results));

        assert!(!BundleOutcomePolicy::All.evaluate(&[]));
        assert!(!BundleOutcomePolicy::FirstListed.evaluate(&[]));
    }
}
