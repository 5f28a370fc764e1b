/// Event name constants for Tauri backend -> frontend communication
pub const STARTUP_STATE_CHANGED: &str = "startup:state-changed";
pub const STARTUP_NOTICE: &str = "startup:notice";
pub const AUTHORIZATION_REQUESTED: &str = "authorization:requested";
pub const RECORDING_SERVICE_START: &str = "recording:start";
pub const OVERLAY_SERVICE_START: &str = "overlay:start";
pub const TUTORIAL_START: &str = "tutorial:start";
pub const NAVIGATION_LAUNCH: &str = "navigation:launch";
