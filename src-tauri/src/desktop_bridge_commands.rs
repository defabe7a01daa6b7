use katatsumuri_launch::{splash_presenter, LaunchEvent};
use tauri::{AppHandle, Manager, Window};

use crate::{append_desktop_log, LaunchBridgeState, MAIN_WINDOW_LABEL};

#[tauri::command]
pub(crate) fn get_app_version(app_handle: AppHandle) -> String {
    splash_presenter::version_label(&app_handle.package_info().version.to_string())
}

#[tauri::command]
pub(crate) fn bound_shortcuts(app_handle: AppHandle) -> Vec<String> {
    app_handle.state::<LaunchBridgeState>().bound_shortcuts()
}

#[tauri::command]
pub(crate) fn shortcut_triggered(app_handle: AppHandle, window: Window, chord: String) {
    if window.label() != MAIN_WINDOW_LABEL {
        append_desktop_log(&format!(
            "ignoring shortcut {chord} from window {}",
            window.label()
        ));
        return;
    }

    let state = app_handle.state::<LaunchBridgeState>();
    if !state.send(LaunchEvent::Shortcut(chord)) {
        append_desktop_log("shortcut dropped: launch session has ended");
    }
}
