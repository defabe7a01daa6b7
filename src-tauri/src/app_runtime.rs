use katatsumuri_launch::{
    launch_channel, run_session, JsonFileStore, LaunchError, LaunchEvent, LaunchOrchestrator,
    TokioTimers,
};
use tauri::{webview::PageLoadEvent, AppHandle, Manager, RunEvent, WindowEvent};

use crate::{
    app_updater::AppUpdater, append_desktop_log, append_launch_log, append_startup_log,
    desktop_host::DesktopHost, runtime_paths, LaunchBridgeState, DESKTOP_LOG_FILE,
    MAIN_WINDOW_LABEL, SPLASH_WINDOW_LABEL,
};

fn log_version_banner(app_handle: &AppHandle) {
    let webview_version =
        tauri::webview_version().unwrap_or_else(|error| format!("unknown ({error})"));
    append_startup_log(&format!(
        "{} v{}\n    - Tauri {}\n    - WebView {}",
        app_handle.package_info().name,
        app_handle.package_info().version,
        tauri::VERSION,
        webview_version
    ));
}

/// The rejected process is terminated inside the plugin before any of our
/// code runs, so the surviving instance writes the violation line for it.
fn second_instance_log_line(argv: &[String], cwd: &str) -> String {
    format!(
        "{}: rejected launch {argv:?} from {cwd}",
        LaunchError::SingleInstanceViolation
    )
}

pub(crate) fn run() {
    append_startup_log("desktop process starting");
    append_startup_log(&format!(
        "desktop log path: {}",
        crate::logging::resolve_desktop_log_path(
            runtime_paths::default_data_dir(),
            DESKTOP_LOG_FILE,
        )
        .display()
    ));

    let (events, receiver) = launch_channel();

    tauri::Builder::default()
        // Must be registered first so a second process exits before doing work.
        .plugin(tauri_plugin_single_instance::init(|app, argv, cwd| {
            append_launch_log(&second_instance_log_line(&argv, &cwd));
            if let Some(state) = app.try_state::<LaunchBridgeState>() {
                state.send(LaunchEvent::SecondInstance);
            }
        }))
        .plugin(tauri_plugin_updater::Builder::new().build())
        .manage(LaunchBridgeState::new(events.clone()))
        .invoke_handler(tauri::generate_handler![
            crate::desktop_bridge_commands::get_app_version,
            crate::desktop_bridge_commands::bound_shortcuts,
            crate::desktop_bridge_commands::shortcut_triggered,
        ])
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }

            if let WindowEvent::CloseRequested { api, .. } = event {
                let state = window.app_handle().state::<LaunchBridgeState>();
                // The session captures window state, then destroys the window.
                if state.send(LaunchEvent::MainCloseRequested) {
                    api.prevent_close();
                }
            }
        })
        .on_page_load(|webview, payload| match payload.event() {
            PageLoadEvent::Started => {
                append_desktop_log(&format!("page-load started: {}", payload.url()));
            }
            PageLoadEvent::Finished => {
                append_desktop_log(&format!("page-load finished: {}", payload.url()));
                let state = webview.app_handle().state::<LaunchBridgeState>();
                let ready_event = match webview.window().label() {
                    SPLASH_WINDOW_LABEL => LaunchEvent::SplashReady,
                    MAIN_WINDOW_LABEL => LaunchEvent::MainReady,
                    _ => return,
                };
                state.send(ready_event);
            }
        })
        .setup(move |app| {
            let app_handle = app.handle().clone();
            log_version_banner(&app_handle);

            let store = JsonFileStore::open(runtime_paths::settings_path(), append_desktop_log);
            append_startup_log(&format!("settings path: {}", store.path().display()));

            let orchestrator = LaunchOrchestrator::new(
                DesktopHost::new(app_handle.clone()),
                AppUpdater::new(app_handle.clone(), events.clone()),
                store,
                TokioTimers::new(events),
                append_launch_log,
            );
            tauri::async_runtime::spawn(async move {
                let phase = run_session(orchestrator, receiver).await;
                append_launch_log(&format!("launch session ended: {phase:?}"));
            });

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|_app_handle, event| {
            if let RunEvent::Exit = event {
                append_desktop_log("desktop process exiting");
            }
        });
}

#[cfg(test)]
mod tests {
    use super::second_instance_log_line;

    #[test]
    fn second_instance_line_names_the_violation_and_the_rejected_launch() {
        let line = second_instance_log_line(
            &["katatsumuri".to_string(), "--hidden".to_string()],
            "/home/player",
        );

        assert_eq!(
            line,
            r#"another instance is already running: rejected launch ["katatsumuri", "--hidden"] from /home/player"#
        );
    }
}
