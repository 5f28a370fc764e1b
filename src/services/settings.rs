//! Persistent key-value settings shared with the tutorial and preferences screens.
//!
//! The store itself lives in the app shell; this module owns the keys and how
//! their raw JSON values are read.

use serde_json::Value;

pub const SETTINGS_STORE: &str = "settings.json";
pub const START_MAPS_IN_BACKGROUND: &str = "start_maps_in_background";
pub const FIRST_LAUNCH_COMPLETE_FLAG: &str = "first_launch_complete_flag";

/// Settings read during startup. Every call is a fresh read.
pub trait SettingsSource {
    /// Whether to open the navigation app before recording starts (default true)
    fn start_navigation_in_background(&self) -> bool;

    /// Marker written once the tutorial has been completed.
    fn first_launch_flag(&self) -> Option<String>;
}

/// Anything but an explicit boolean keeps the default.
pub fn navigation_preference(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or(true)
}

pub fn first_launch_flag(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

/// Value stored under [`FIRST_LAUNCH_COMPLETE_FLAG`]: the completion time.
pub fn first_launch_complete_value() -> Value {
    Value::String(chrono::Utc::now().to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn navigation_defaults_to_on() {
        assert!(navigation_preference(None));
        assert!(navigation_preference(Some(&json!("false"))));
        assert!(!navigation_preference(Some(&json!(false))));
    }

    #[test]
    fn flag_must_be_a_string() {
        assert_eq!(first_launch_flag(None), None);
        assert_eq!(first_launch_flag(Some(&json!(true))), None);
        assert_eq!(first_launch_flag(Some(&json!("done"))), Some("done".to_string()));
    }

    #[test]
    fn completion_value_is_a_nonempty_timestamp() {
        let value = first_launch_complete_value();
        let flag = first_launch_flag(Some(&value)).unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&flag).is_ok());
    }
}
