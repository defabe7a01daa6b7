pub const APP_NAME: &str = "Katatsumuri";
pub const CONTENT_URL: &str = "https://voxiom.io";

pub const SPLASH_WINDOW_LABEL: &str = "splash";
pub const MAIN_WINDOW_LABEL: &str = "main";

pub const SPLASH_WINDOW_WIDTH: f64 = 640.0;
pub const SPLASH_WINDOW_HEIGHT: f64 = 320.0;
pub const MAIN_WINDOW_WIDTH: f64 = 900.0;
pub const MAIN_WINDOW_HEIGHT: f64 = 600.0;

pub const UPDATE_CHECK_TIMEOUT_MS: u64 = 15_000;
pub const TIMEOUT_FALLBACK_DISPLAY_MS: u64 = 1_000;
pub const TERMINAL_STATUS_DISPLAY_MS: u64 = 2_000;

pub const MAXIMIZED_KEY: &str = "isMaximized";
pub const FULLSCREEN_KEY: &str = "isFullScreen";
// Written by the F11 shortcut only; never read back at window creation.
pub const FULLSCREEN_TOGGLE_KEY: &str = "Fullscreen";

pub const SPLASH_STATUS_EVENT: &str = "status";
pub const MAIN_ESCAPE_EVENT: &str = "ESC";
