pub mod error;
pub mod events;
pub mod services;
pub mod startup;
#[cfg(feature = "app")]
pub mod state;

pub use error::StartupError;
pub use startup::{Orchestrator, StartupConfig, StartupHost, StartupState};

/// Install the `env_logger` backend (`RUST_LOG`, default `info`). Safe to call twice.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(feature = "app")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    init_logging();

    tauri::Builder::default()
        .plugin(tauri_plugin_notification::init())
        .plugin(tauri_plugin_store::Builder::default().build())
        .setup(|app| {
            // Startup waits for the platform bridge to report grants and
            // call start_startup.
            let state = state::app_state::AppState::new(app.handle())?;
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            startup::commands::start_startup,
            startup::commands::authorization_result,
            startup::commands::get_startup_state,
            startup::commands::complete_tutorial,
            startup::commands::set_start_navigation_in_background,
            services::permissions::commands::report_platform_grants,
            services::permissions::commands::get_missing_permissions,
            services::storage::commands::get_capacity_report,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
