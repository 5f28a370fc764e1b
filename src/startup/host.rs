use crate::error::StartupError;
use crate::startup::config::NavigationTarget;
use crate::startup::notice::Notice;
use crate::startup::state::{AuthorizationRequest, StartupState};

/// Outbound side of the startup flow: everything the orchestrator asks the
/// host to do. All calls are fire-and-forget; none of them may block waiting
/// on the user.
pub trait StartupHost {
    /// Open the external authorization surface. The answer arrives later
    /// through `Orchestrator::on_authorization_result`.
    fn request_authorization(&mut self, request: &AuthorizationRequest);

    fn notify(&mut self, notice: &Notice);

    fn start_tutorial(&mut self);

    /// Best effort; the orchestrator discards any error.
    fn launch_navigation(&mut self, target: &NavigationTarget) -> Result<(), StartupError>;

    fn start_recording_service(&mut self);

    fn start_overlay_service(&mut self);

    /// Drop the foreground presence. Called exactly once per terminal state.
    fn finish(&mut self);

    /// Observe transitions (UI state, logs).
    fn state_changed(&mut self, _state: &StartupState) {}
}
