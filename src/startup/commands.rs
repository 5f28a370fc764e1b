use crate::error::StartupError;
use crate::startup::{AuthorizationOutcome, CorrelationToken, ResumeDisposition, StartupState};
use crate::state::app_state::AppState;

/// Run the startup checks from the top
#[tauri::command]
pub fn start_startup(state: tauri::State<'_, AppState>) -> StartupState {
    state.orchestrator.lock().unwrap().init()
}

/// Resumption callback from the authorization surface
#[tauri::command]
pub fn authorization_result(
    token: CorrelationToken,
    outcome: AuthorizationOutcome,
    state: tauri::State<'_, AppState>,
) -> ResumeDisposition {
    state
        .orchestrator
        .lock()
        .unwrap()
        .on_authorization_result(token, outcome)
}

#[tauri::command]
pub fn get_startup_state(state: tauri::State<'_, AppState>) -> StartupState {
    state.orchestrator.lock().unwrap().state()
}

/// Written by the tutorial once the user finishes it
#[tauri::command]
pub fn complete_tutorial(state: tauri::State<'_, AppState>) -> Result<(), StartupError> {
    state.settings.mark_first_launch_complete()
}

#[tauri::command]
pub fn set_start_navigation_in_background(
    enabled: bool,
    state: tauri::State<'_, AppState>,
) -> Result<(), StartupError> {
    state.settings.set_start_navigation_in_background(enabled)
}
