use katatsumuri_launch::{browser_flags, MainSurface};
use tauri::{
    webview::NewWindowResponse, AppHandle, Manager, WebviewUrl, WebviewWindow,
    WebviewWindowBuilder,
};
use url::Url;

use crate::{
    append_desktop_log, external_links, shortcut_bridge, LaunchBridgeState, APP_NAME,
    CONTENT_URL, MAIN_WINDOW_HEIGHT, MAIN_WINDOW_LABEL, MAIN_WINDOW_WIDTH,
};

// The game registers beforeunload handlers; closing and F5 must never be
// held up by a "leave site?" prompt.
const ALLOW_UNLOAD_SCRIPT: &str = r#"(() => {
  Object.defineProperty(window, 'onbeforeunload', {
    configurable: false,
    get: () => null,
    set: () => {},
  });
  window.addEventListener('beforeunload', (event) => event.stopImmediatePropagation(), true);
})();"#;

pub(crate) struct MainWindow {
    app_handle: AppHandle,
    window: WebviewWindow,
}

pub(crate) fn build_main_window(app_handle: &AppHandle) -> Result<MainWindow, String> {
    let content_url =
        Url::parse(CONTENT_URL).map_err(|error| format!("Invalid content URL: {error}"))?;

    // The window title is fixed; page title changes are not mirrored.
    let window = WebviewWindowBuilder::new(
        app_handle,
        MAIN_WINDOW_LABEL,
        WebviewUrl::External(content_url),
    )
    .title(APP_NAME)
    .inner_size(MAIN_WINDOW_WIDTH, MAIN_WINDOW_HEIGHT)
    .visible(false)
    .additional_browser_args(&browser_flags::browser_args(std::env::consts::OS))
    .initialization_script(ALLOW_UNLOAD_SCRIPT)
    .initialization_script(&shortcut_bridge::shortcut_listener_script())
    .on_new_window(|url, _features| {
        external_links::open_external(url.as_str(), append_desktop_log);
        NewWindowResponse::Deny
    })
    .build()
    .map_err(|error| format!("Failed to create main window: {error}"))?;

    Ok(MainWindow {
        app_handle: app_handle.clone(),
        window,
    })
}

fn window_error(action: &'static str) -> impl Fn(tauri::Error) -> String {
    move |error| format!("Failed to {action}: {error}")
}

impl MainSurface for MainWindow {
    fn bind_shortcuts(&mut self, chords: &[String]) -> Result<(), String> {
        self.app_handle
            .state::<LaunchBridgeState>()
            .set_bound_shortcuts(chords.to_vec());
        // Pages that load later fetch the list themselves.
        self.window
            .eval(shortcut_bridge::refresh_shortcuts_script())
            .map_err(window_error("refresh main window shortcuts"))
    }

    fn maximize(&mut self) -> Result<(), String> {
        self.window
            .maximize()
            .map_err(window_error("maximize main window"))
    }

    fn set_fullscreen(&mut self, full_screen: bool) -> Result<(), String> {
        self.window
            .set_fullscreen(full_screen)
            .map_err(window_error("change main window fullscreen"))
    }

    fn is_maximized(&self) -> Result<bool, String> {
        self.window
            .is_maximized()
            .map_err(window_error("read main window maximized state"))
    }

    fn is_fullscreen(&self) -> Result<bool, String> {
        self.window
            .is_fullscreen()
            .map_err(window_error("read main window fullscreen state"))
    }

    fn show(&mut self) -> Result<(), String> {
        self.window.show().map_err(window_error("show main window"))?;
        self.window
            .set_focus()
            .map_err(window_error("focus main window"))
    }

    fn focus(&mut self) -> Result<(), String> {
        if let Ok(true) = self.window.is_minimized() {
            self.window
                .unminimize()
                .map_err(window_error("restore main window"))?;
        }
        self.window
            .set_focus()
            .map_err(window_error("focus main window"))
    }

    fn reload(&mut self) -> Result<(), String> {
        self.window
            .eval("window.location.reload()")
            .map_err(window_error("reload main window"))
    }

    fn open_devtools(&mut self) -> Result<(), String> {
        self.window.open_devtools();
        Ok(())
    }

    fn send_escape(&mut self) -> Result<(), String> {
        self.window
            .eval(&shortcut_bridge::escape_signal_script())
            .map_err(window_error("send escape to main window"))
    }

    fn destroy(self) -> Result<(), String> {
        self.window
            .destroy()
            .map_err(window_error("destroy main window"))
    }
}
