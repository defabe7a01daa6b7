use std::{env, path::PathBuf};

use crate::{DEFAULT_ROOT_DIR_NAME, ROOT_DIR_ENV, SETTINGS_FILE};

pub(crate) fn default_data_dir() -> Option<PathBuf> {
    data_dir_from(env::var(ROOT_DIR_ENV).ok(), home::home_dir())
}

fn data_dir_from(root_override: Option<String>, home_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(root) = root_override {
        let path = PathBuf::from(root.trim());
        if !path.as_os_str().is_empty() {
            return Some(path);
        }
    }

    home_dir.map(|home| home.join(DEFAULT_ROOT_DIR_NAME))
}

pub(crate) fn settings_path() -> PathBuf {
    default_data_dir()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT_DIR_NAME))
        .join(SETTINGS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_override_wins_over_home() {
        assert_eq!(
            data_dir_from(
                Some(" /opt/katatsumuri ".to_string()),
                Some(PathBuf::from("/home/player"))
            ),
            Some(PathBuf::from("/opt/katatsumuri"))
        );
    }

    #[test]
    fn blank_override_falls_back_to_home() {
        assert_eq!(
            data_dir_from(Some("   ".to_string()), Some(PathBuf::from("/home/player"))),
            Some(PathBuf::from("/home/player/.katatsumuri"))
        );
    }

    #[test]
    fn no_home_and_no_override_yields_none() {
        assert_eq!(data_dir_from(None, None), None);
    }
}
