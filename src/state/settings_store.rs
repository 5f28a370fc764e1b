use serde_json::Value;
use tauri::AppHandle;
use tauri_plugin_store::StoreExt;

use crate::error::StartupError;
use crate::services::settings::{
    self, SettingsSource, FIRST_LAUNCH_COMPLETE_FLAG, SETTINGS_STORE, START_MAPS_IN_BACKGROUND,
};

/// Settings backed by the app's `settings.json` store.
#[derive(Clone)]
pub struct StoreSettings {
    app: AppHandle,
}

impl StoreSettings {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn get(&self, key: &str) -> Option<Value> {
        match self.app.store(SETTINGS_STORE) {
            Ok(store) => store.get(key),
            Err(e) => {
                log::warn!("Failed to open settings store: {}", e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StartupError> {
        let store = self
            .app
            .store(SETTINGS_STORE)
            .map_err(|e| StartupError::SettingsError(e.to_string()))?;
        store.set(key, value);
        store
            .save()
            .map_err(|e| StartupError::SettingsError(e.to_string()))
    }

    /// Called by the tutorial flow when it finishes.
    pub fn mark_first_launch_complete(&self) -> Result<(), StartupError> {
        self.set(FIRST_LAUNCH_COMPLETE_FLAG, settings::first_launch_complete_value())
    }

    pub fn set_start_navigation_in_background(&self, enabled: bool) -> Result<(), StartupError> {
        self.set(START_MAPS_IN_BACKGROUND, Value::Bool(enabled))
    }
}

impl SettingsSource for StoreSettings {
    fn start_navigation_in_background(&self) -> bool {
        settings::navigation_preference(self.get(START_MAPS_IN_BACKGROUND).as_ref())
    }

    fn first_launch_flag(&self) -> Option<String> {
        settings::first_launch_flag(self.get(FIRST_LAUNCH_COMPLETE_FLAG).as_ref())
    }
}
