pub mod app_state;
pub mod host;
pub mod settings_store;
