use katatsumuri_launch::WindowHost;
use tauri::AppHandle;

use crate::{
    append_desktop_log,
    main_window::{self, MainWindow},
    splash_window::{self, SplashWindow},
};

pub(crate) struct DesktopHost {
    app_handle: AppHandle,
}

impl DesktopHost {
    pub(crate) fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

impl WindowHost for DesktopHost {
    type Splash = SplashWindow;
    type Main = MainWindow;

    fn create_splash(&mut self) -> Result<SplashWindow, String> {
        splash_window::build_splash_window(&self.app_handle)
    }

    fn create_main(&mut self) -> Result<MainWindow, String> {
        main_window::build_main_window(&self.app_handle)
    }

    fn relaunch(&mut self) {
        append_desktop_log("relaunching desktop process");
        self.app_handle.request_restart();
    }
}
