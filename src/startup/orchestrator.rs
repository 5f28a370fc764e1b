//! The startup state machine.
//!
//! Gates run in a fixed order on every entry. The first ungranted gate hands
//! off to the external authorization surface and the flow suspends; the
//! resumption callback restarts the flow from the first gate instead of
//! continuing where it left off, so no grant is trusted across a suspension.

use chrono::Utc;
use uuid::Uuid;

use crate::services::permissions::{AuthorizationKind, AuthorizationLedger, PlatformGrants};
use crate::services::settings::SettingsSource;
use crate::services::storage::{CapacityGuard, StorageProbe};
use crate::startup::config::StartupConfig;
use crate::startup::first_run::FirstRunGate;
use crate::startup::host::StartupHost;
use crate::startup::notice::Notice;
use crate::startup::state::{
    AuthorizationOutcome, AuthorizationRequest, CorrelationToken, PendingRequest,
    ResumeDisposition, StartupState, TerminationReason,
};

/// One orchestrator per launch. Owns the only pending-request slot.
pub struct Orchestrator<P, F, S, H> {
    config: StartupConfig,
    ledger: AuthorizationLedger<P>,
    guard: CapacityGuard<F>,
    settings: S,
    host: H,
    state: StartupState,
    pending: Option<PendingRequest>,
    attempt: Uuid,
}

impl<P, F, S, H> Orchestrator<P, F, S, H>
where
    P: PlatformGrants,
    F: StorageProbe,
    S: SettingsSource,
    H: StartupHost,
{
    pub fn new(config: StartupConfig, platform: P, probe: F, settings: S, host: H) -> Self {
        let ledger = AuthorizationLedger::new(platform, config.required_permissions.clone());
        let guard = CapacityGuard::new(probe, config.quota());
        Self {
            config,
            ledger,
            guard,
            settings,
            host,
            state: StartupState::Idle,
            pending: None,
            attempt: Uuid::new_v4(),
        }
    }

    pub fn state(&self) -> StartupState {
        self.state
    }

    pub fn pending(&self) -> Option<&PendingRequest> {
        self.pending.as_ref()
    }

    pub fn config(&self) -> &StartupConfig {
        &self.config
    }

    pub fn ledger(&self) -> &AuthorizationLedger<P> {
        &self.ledger
    }

    pub fn guard(&self) -> &CapacityGuard<F> {
        &self.guard
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Entry point. Runs every gate from the top and either suspends on the
    /// first ungranted one or reaches a terminal state.
    pub fn init(&mut self) -> StartupState {
        if let Some(stale) = self.pending.take() {
            log::info!(
                "[{}] Superseding pending {:?} request (token {})",
                self.attempt,
                stale.kind,
                stale.token.0
            );
        }
        self.attempt = Uuid::new_v4();
        log::info!("[{}] Startup checks begin", self.attempt);

        for kind in AuthorizationKind::ORDER {
            self.transition(StartupState::checking(kind));
            if self.ledger.is_granted(kind) {
                log::debug!("[{}] {:?} granted", self.attempt, kind);
                continue;
            }
            self.suspend(kind);
            return self.state;
        }

        self.admit();
        self.state
    }

    /// Resumption entry point for the authorization surface.
    ///
    /// A token that does not match the open request is ignored without any
    /// state change.
    pub fn on_authorization_result(
        &mut self,
        token: CorrelationToken,
        outcome: AuthorizationOutcome,
    ) -> ResumeDisposition {
        if self.pending.as_ref().map(|p| p.token) != Some(token) {
            log::warn!(
                "[{}] Ignoring authorization result for token {} (pending: {:?})",
                self.attempt,
                token.0,
                self.pending.as_ref().map(|p| p.token.0)
            );
            return ResumeDisposition::Ignored;
        }
        let Some(pending) = self.pending.take() else {
            return ResumeDisposition::Ignored;
        };

        let waited = Utc::now().signed_duration_since(pending.requested_at);
        let granted = self.resolve_outcome(pending.kind, &outcome);
        log::info!(
            "[{}] {:?} {} after {}s",
            self.attempt,
            pending.kind,
            if granted { "granted" } else { "denied" },
            waited.num_seconds()
        );

        if granted {
            self.init();
            ResumeDisposition::Restarted
        } else {
            self.host.notify(&Notice::on_denial(pending.kind));
            self.terminate(TerminationReason::AuthorizationDenied { kind: pending.kind });
            ResumeDisposition::Denied
        }
    }

    /// Only an explicit denial is taken at its word. Any other verdict is
    /// checked against the live platform state, so a surface that claims a
    /// grant the platform does not show cannot re-prompt forever.
    fn resolve_outcome(&self, kind: AuthorizationKind, outcome: &AuthorizationOutcome) -> bool {
        match outcome {
            AuthorizationOutcome::Denied => false,
            AuthorizationOutcome::Batch(results) if kind == AuthorizationKind::RuntimeBundle => {
                self.config.bundle_outcome.evaluate(results)
            }
            AuthorizationOutcome::Granted
            | AuthorizationOutcome::Returned
            | AuthorizationOutcome::Batch(_) => self.ledger.is_granted(kind),
        }
    }

    fn suspend(&mut self, kind: AuthorizationKind) {
        let permissions = match kind {
            AuthorizationKind::RuntimeBundle => self.ledger.missing_permissions(),
            _ => Vec::new(),
        };
        let request = AuthorizationRequest {
            kind,
            token: CorrelationToken::for_kind(kind),
            permissions,
        };
        log::info!(
            "[{}] {:?} missing, delegating to authorization surface (token {})",
            self.attempt,
            kind,
            request.token.0
        );

        self.pending = Some(PendingRequest {
            kind,
            token: request.token,
            requested_at: Utc::now(),
        });
        self.host.request_authorization(&request);
        if let Some(notice) = Notice::on_request(kind) {
            self.host.notify(&notice);
        }
        self.transition(StartupState::AwaitingExternalAuthorization { kind });
    }

    fn admit(&mut self) {
        self.transition(StartupState::CheckingCapacity);
        if !self.guard.is_admissible() {
            self.host.notify(&Notice::InsufficientStorage {
                quota_mb: self.guard.quota().mb(),
            });
            self.terminate(TerminationReason::InsufficientCapacity);
            return;
        }

        self.transition(StartupState::CheckingFirstLaunch);
        if FirstRunGate::new(&self.settings).should_show_tutorial() {
            log::info!("[{}] First launch, handing off to tutorial", self.attempt);
            self.host.start_tutorial();
            self.terminate(TerminationReason::TutorialPending);
            return;
        }

        self.transition(StartupState::Admitting);
        if self.settings.start_navigation_in_background() {
            let target = self.config.navigation_target();
            if let Err(e) = self.host.launch_navigation(&target) {
                log::debug!("[{}] Navigation hand-off skipped: {}", self.attempt, e);
            }
        }
        self.host.start_recording_service();
        self.host.start_overlay_service();
        self.terminate(TerminationReason::Admitted);
    }

    fn terminate(&mut self, reason: TerminationReason) {
        log::info!("[{}] Startup finished: {:?}", self.attempt, reason);
        self.transition(StartupState::Terminated { reason });
        self.host.finish();
    }

    fn transition(&mut self, next: StartupState) {
        log::trace!("[{}] {:?} -> {:?}", self.attempt, self.state, next);
        self.state = next;
        self.host.state_changed(&self.state);
    }
}
