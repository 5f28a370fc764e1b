use std::sync::Mutex;

use tauri::{AppHandle, Manager};

use crate::error::StartupError;
use crate::services::permissions::SharedGrants;
use crate::services::storage::manager::{StorageLocation, StorageManager, RECORDINGS_FOLDER};
use crate::startup::{Orchestrator, StartupConfig};
use crate::state::host::TauriHost;
use crate::state::settings_store::StoreSettings;

pub type AppOrchestrator = Orchestrator<SharedGrants, StorageManager, StoreSettings, TauriHost>;

/// Global application state managed by Tauri
pub struct AppState {
    /// Latest grants reported by the platform bridge
    pub grants: SharedGrants,
    pub settings: StoreSettings,
    pub orchestrator: Mutex<AppOrchestrator>,
}

impl AppState {
    pub fn new(app: &AppHandle) -> Result<Self, StartupError> {
        let config_dir = app
            .path()
            .app_config_dir()
            .map_err(|e| {
                StartupError::InvalidConfig(format!("Failed to get app config dir: {}", e))
            })?;
        let config = StartupConfig::load(&config_dir.join("startup.json"))?;
        let settings = StoreSettings::new(app.clone());

        // dirs::video_dir() is None on Android, so prefer Tauri's resolver
        let location = match &config.recordings_dir {
            Some(dir) => StorageLocation::Custom {
                path: dir.to_string_lossy().into_owned(),
            },
            None => match app.path().video_dir() {
                Ok(dir) => StorageLocation::Custom {
                    path: dir.join(RECORDINGS_FOLDER).to_string_lossy().into_owned(),
                },
                Err(_) => StorageLocation::Default,
            },
        };

        // Empty until the platform bridge reports
        let grants = SharedGrants::default();
        let orchestrator = Orchestrator::new(
            config,
            grants.clone(),
            StorageManager::new(location),
            settings.clone(),
            TauriHost::new(app.clone()),
        );

        Ok(Self {
            grants,
            settings,
            orchestrator: Mutex::new(orchestrator),
        })
    }
}
