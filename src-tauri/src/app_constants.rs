pub(crate) use katatsumuri_launch::{
    APP_NAME, CONTENT_URL, MAIN_ESCAPE_EVENT, MAIN_WINDOW_HEIGHT, MAIN_WINDOW_LABEL,
    MAIN_WINDOW_WIDTH, SPLASH_STATUS_EVENT, SPLASH_WINDOW_HEIGHT, SPLASH_WINDOW_LABEL,
    SPLASH_WINDOW_WIDTH,
};

pub(crate) const ROOT_DIR_ENV: &str = "KATATSUMURI_ROOT";
pub(crate) const DEFAULT_ROOT_DIR_NAME: &str = ".katatsumuri";
pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";
pub(crate) const SETTINGS_FILE: &str = "config.json";
pub(crate) const SPLASH_PAGE: &str = "splash.html";
