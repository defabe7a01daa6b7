use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use chrono::{Local, SecondsFormat};

use crate::{runtime_paths, DESKTOP_LOG_FILE};

pub(crate) fn resolve_desktop_log_path(data_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    match data_dir {
        Some(dir) => dir.join("logs").join(file_name),
        None => std::env::temp_dir().join("katatsumuri").join(file_name),
    }
}

fn format_log_line(category: &str, message: &str) -> String {
    format!(
        "[{}] [{}] {}\n",
        Local::now().to_rfc3339_opts(SecondsFormat::Millis, false),
        category,
        message
    )
}

fn append_log(category: &str, message: &str) {
    let line = format_log_line(category, message);
    if cfg!(debug_assertions) {
        eprint!("{line}");
    }

    let path = resolve_desktop_log_path(runtime_paths::default_data_dir(), DESKTOP_LOG_FILE);
    if let Some(parent_dir) = path.parent() {
        if fs::create_dir_all(parent_dir).is_err() {
            return;
        }
    }
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&path) {
        let _ = file.write_all(line.as_bytes());
    }
}

pub(crate) fn append_desktop_log(message: &str) {
    append_log("desktop", message);
}

pub(crate) fn append_startup_log(message: &str) {
    append_log("startup", message);
}

pub(crate) fn append_update_log(message: &str) {
    append_log("update", message);
}

pub(crate) fn append_launch_log(message: &str) {
    append_log("launch", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_lives_under_data_dir() {
        assert_eq!(
            resolve_desktop_log_path(Some(PathBuf::from("/data")), "desktop.log"),
            PathBuf::from("/data/logs/desktop.log")
        );
    }

    #[test]
    fn log_line_carries_category_and_newline() {
        let line = format_log_line("update", "checking");
        assert!(line.ends_with("] [update] checking\n"));
        assert!(line.starts_with('['));
    }
}
