use crate::error::StartupError;
use crate::services::storage::quota::CapacityReport;
use crate::state::app_state::AppState;

#[tauri::command]
pub fn get_capacity_report(
    state: tauri::State<'_, AppState>,
) -> Result<CapacityReport, StartupError> {
    state.orchestrator.lock().unwrap().guard().measure()
}
