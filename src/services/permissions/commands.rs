use crate::services::permissions::{GrantSnapshot, RuntimePermission};
use crate::state::app_state::AppState;

/// Called by the platform bridge whenever grants may have changed
#[tauri::command]
pub fn report_platform_grants(snapshot: GrantSnapshot, state: tauri::State<'_, AppState>) {
    log::debug!("Platform grants reported: {:?}", snapshot);
    state.grants.replace(snapshot);
}

#[tauri::command]
pub fn get_missing_permissions(state: tauri::State<'_, AppState>) -> Vec<RuntimePermission> {
    state.orchestrator.lock().unwrap().ledger().missing_permissions()
}
