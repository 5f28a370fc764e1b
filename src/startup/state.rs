use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::permissions::{AuthorizationKind, PermissionResult, RuntimePermission};

/// Pairs a request to the authorization surface with its callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationToken(pub u32);

impl CorrelationToken {
    pub const RUNTIME_BUNDLE: CorrelationToken = CorrelationToken(10);
    pub const MUTE_SYSTEM_SOUND: CorrelationToken = CorrelationToken(10001);
    pub const OVERLAY_DRAW: CorrelationToken = CorrelationToken(10002);

    pub fn for_kind(kind: AuthorizationKind) -> Self {
        match kind {
            AuthorizationKind::OverlayDraw => Self::OVERLAY_DRAW,
            AuthorizationKind::MuteSystemSound => Self::MUTE_SYSTEM_SOUND,
            AuthorizationKind::RuntimeBundle => Self::RUNTIME_BUNDLE,
        }
    }
}

/// What the orchestrator asks the external authorization surface to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRequest {
    pub kind: AuthorizationKind,
    pub token: CorrelationToken,
    /// Missing permissions for a bundle request; empty otherwise.
    pub permissions: Vec<RuntimePermission>,
}

/// The single outstanding delegation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingRequest {
    pub kind: AuthorizationKind,
    pub token: CorrelationToken,
    pub requested_at: DateTime<Utc>,
}

/// Result reported by the authorization surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "results", rename_all = "kebab-case")]
pub enum AuthorizationOutcome {
    Granted,
    Denied,
    /// The surface closed without a verdict; the ledger decides.
    Returned,
    /// Per-permission results of a bundle request, in request order.
    Batch(Vec<PermissionResult>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum TerminationReason {
    /// Recording and overlay services were started.
    Admitted,
    AuthorizationDenied { kind: AuthorizationKind },
    InsufficientCapacity,
    /// Diverted to the first-run tutorial; admission waits for the next launch.
    TutorialPending,
}

/// What the app shell does with itself once startup has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishAction {
    /// Services run on; the launcher window goes away.
    HideWindow,
    /// Another screen (the tutorial) has taken over the window.
    KeepWindow,
    Exit,
}

impl TerminationReason {
    pub fn finish_action(&self) -> FinishAction {
        match self {
            TerminationReason::Admitted => FinishAction::HideWindow,
            TerminationReason::TutorialPending => FinishAction::KeepWindow,
            TerminationReason::AuthorizationDenied { .. }
            | TerminationReason::InsufficientCapacity => FinishAction::Exit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum StartupState {
    Idle,
    CheckingOverlay,
    CheckingMute,
    CheckingRuntimeBundle,
    CheckingCapacity,
    CheckingFirstLaunch,
    Admitting,
    AwaitingExternalAuthorization { kind: AuthorizationKind },
    Terminated { reason: TerminationReason },
}

impl StartupState {
    pub fn checking(kind: AuthorizationKind) -> Self {
        match kind {
            AuthorizationKind::OverlayDraw => StartupState::CheckingOverlay,
            AuthorizationKind::MuteSystemSound => StartupState::CheckingMute,
            AuthorizationKind::RuntimeBundle => StartupState::CheckingRuntimeBundle,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, StartupState::Terminated { .. })
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self, StartupState::AwaitingExternalAuthorization { .. })
    }
}

/// How a resumption callback was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResumeDisposition {
    /// Token did not match the open request; nothing changed.
    Ignored,
    /// Grant confirmed; the flow ran again from the first gate.
    Restarted,
    /// Grant refused; the flow terminated.
    Denied,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_wire_format() {
        let granted: AuthorizationOutcome =
            serde_json::from_str(r#"{ "outcome": "granted" }"#).unwrap();
        assert_eq!(granted, AuthorizationOutcome::Granted);

        let batch: AuthorizationOutcome = serde_json::from_str(
            r#"{ "outcome": "batch", "results": [{ "permission": "camera", "granted": false }] }"#,
        )
        .unwrap();
        assert_eq!(
            batch,
            AuthorizationOutcome::Batch(vec![PermissionResult {
                permission: RuntimePermission::Camera,
                granted: false,
            }])
        );
    }

    #[test]
    fn only_refusals_exit_the_app() {
        assert_eq!(TerminationReason::Admitted.finish_action(), FinishAction::HideWindow);
        assert_eq!(
            TerminationReason::TutorialPending.finish_action(),
            FinishAction::KeepWindow
        );
        assert_eq!(
            TerminationReason::InsufficientCapacity.finish_action(),
            FinishAction::Exit
        );
        for kind in AuthorizationKind::ORDER {
            let reason = TerminationReason::AuthorizationDenied { kind };
            assert_eq!(reason.finish_action(), FinishAction::Exit);
        }
    }

    #[test]
    fn tokens_are_distinct_per_kind() {
        let tokens: Vec<_> = AuthorizationKind::ORDER
            .iter()
            .map(|k| CorrelationToken::for_kind(*k))
            .collect();
        assert_eq!(
            tokens,
            vec![CorrelationToken(10002), CorrelationToken(10001), CorrelationToken(10)]
        );
    }
}
