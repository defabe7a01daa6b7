use katatsumuri_launch::{browser_flags, SplashSurface};
use tauri::{AppHandle, Emitter, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::{
    APP_NAME, SPLASH_PAGE, SPLASH_STATUS_EVENT, SPLASH_WINDOW_HEIGHT, SPLASH_WINDOW_LABEL,
    SPLASH_WINDOW_WIDTH,
};

pub(crate) struct SplashWindow {
    window: WebviewWindow,
}

pub(crate) fn build_splash_window(app_handle: &AppHandle) -> Result<SplashWindow, String> {
    let window = WebviewWindowBuilder::new(
        app_handle,
        SPLASH_WINDOW_LABEL,
        WebviewUrl::App(SPLASH_PAGE.into()),
    )
    .title(APP_NAME)
    .inner_size(SPLASH_WINDOW_WIDTH, SPLASH_WINDOW_HEIGHT)
    .decorations(false)
    .resizable(false)
    .center()
    .always_on_top(true)
    .visible(false)
    .additional_browser_args(&browser_flags::browser_args(std::env::consts::OS))
    .build()
    .map_err(|error| format!("Failed to create splash window: {error}"))?;

    Ok(SplashWindow { window })
}

impl SplashSurface for SplashWindow {
    fn show(&mut self) -> Result<(), String> {
        self.window
            .show()
            .map_err(|error| format!("Failed to show splash window: {error}"))
    }

    fn push_status(&mut self, text: &str) -> Result<(), String> {
        self.window
            .emit_to(SPLASH_WINDOW_LABEL, SPLASH_STATUS_EVENT, text.to_string())
            .map_err(|error| format!("Failed to emit splash status: {error}"))
    }

    fn focus(&mut self) -> Result<(), String> {
        self.window
            .set_focus()
            .map_err(|error| format!("Failed to focus splash window: {error}"))
    }

    fn destroy(self) -> Result<(), String> {
        self.window
            .destroy()
            .map_err(|error| format!("Failed to destroy splash window: {error}"))
    }
}
