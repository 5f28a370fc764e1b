use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager};
use tauri_plugin_notification::NotificationExt;

use crate::error::StartupError;
use crate::events;
use crate::startup::{
    AuthorizationRequest, FinishAction, NavigationTarget, Notice, StartupHost, StartupState,
};

/// Startup host backed by the running Tauri app.
///
/// The recording and overlay services, the tutorial and the authorization
/// surface all live on the platform side; they are started by events.
pub struct TauriHost {
    app: AppHandle,
    last_state: StartupState,
}

impl TauriHost {
    pub fn new(app: AppHandle) -> Self {
        Self {
            app,
            last_state: StartupState::Idle,
        }
    }

    fn emit<S: Serialize + Clone>(&self, event: &str, payload: S) {
        if let Err(e) = self.app.emit(event, payload) {
            log::warn!("Failed to emit {}: {}", event, e);
        }
    }
}

impl StartupHost for TauriHost {
    fn request_authorization(&mut self, request: &AuthorizationRequest) {
        self.emit(events::AUTHORIZATION_REQUESTED, request.clone());
    }

    fn notify(&mut self, notice: &Notice) {
        self.emit(events::STARTUP_NOTICE, notice.clone());
        for line in notice.lines() {
            if let Err(e) = self
                .app
                .notification()
                .builder()
                .title("Open Dash Cam")
                .body(line)
                .show()
            {
                log::warn!("Failed to show notice: {}", e);
            }
        }
    }

    fn start_tutorial(&mut self) {
        self.emit(events::TUTORIAL_START, ());
    }

    /// The platform bridge starts `target.package` with the URI; the event
    /// is the launch attempt.
    fn launch_navigation(&mut self, target: &NavigationTarget) -> Result<(), StartupError> {
        target.validate()?;
        self.app
            .emit(events::NAVIGATION_LAUNCH, target.clone())
            .map_err(|e| StartupError::HandoffFailed(format!("{}: {}", target.package, e)))
    }

    fn start_recording_service(&mut self) {
        self.emit(events::RECORDING_SERVICE_START, ());
    }

    fn start_overlay_service(&mut self) {
        self.emit(events::OVERLAY_SERVICE_START, ());
    }

    fn finish(&mut self) {
        let action = match self.last_state {
            StartupState::Terminated { reason } => reason.finish_action(),
            _ => FinishAction::KeepWindow,
        };
        match action {
            FinishAction::HideWindow => {
                if let Some(window) = self.app.get_webview_window("main") {
                    if let Err(e) = window.hide() {
                        log::warn!("Failed to hide main window: {}", e);
                    }
                }
            }
            FinishAction::KeepWindow => {}
            FinishAction::Exit => self.app.exit(0),
        }
    }

    fn state_changed(&mut self, state: &StartupState) {
        self.last_state = *state;
        self.emit(events::STARTUP_STATE_CHANGED, *state);
    }
}
