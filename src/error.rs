use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Settings error: {0}")]
    SettingsError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Hand-off failed: {0}")]
    HandoffFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Serialize for StartupError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
