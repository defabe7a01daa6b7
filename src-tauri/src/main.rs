#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_runtime;
mod app_types;
mod app_updater;
mod desktop_bridge_commands;
mod desktop_host;
mod external_links;
mod logging;
mod main_window;
mod runtime_paths;
mod shortcut_bridge;
mod splash_window;

pub(crate) use app_constants::*;
pub(crate) use app_types::LaunchBridgeState;
pub(crate) use logging::{
    append_desktop_log, append_launch_log, append_startup_log, append_update_log,
};

fn main() {
    app_runtime::run();
}
