use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::KeyValueStore;

/// Settings kept as a single JSON object on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
    log: fn(&str),
}

impl JsonFileStore {
    /// Opens the store, treating a missing or unreadable file as empty.
    pub fn open(path: impl Into<PathBuf>, log: fn(&str)) -> Self {
        let path = path.into();
        let values = read_object(&path, log);
        Self { path, values, log }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), String> {
        if let Some(parent_dir) = self.path.parent() {
            fs::create_dir_all(parent_dir).map_err(|error| {
                format!(
                    "Failed to create settings directory {}: {}",
                    parent_dir.display(),
                    error
                )
            })?;
        }

        let serialized = serde_json::to_string_pretty(&self.values)
            .map_err(|error| format!("Failed to serialize settings: {error}"))?;
        fs::write(&self.path, serialized).map_err(|error| {
            format!(
                "Failed to write settings {}: {}",
                self.path.display(),
                error
            )
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), String> {
        self.values.insert(key.to_string(), value);
        let result = self.persist();
        if let Err(error) = &result {
            (self.log)(error);
        }
        result
    }
}

fn read_object(path: &Path, log: fn(&str)) -> Map<String, Value> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Map::new(),
        Err(error) => {
            log(&format!(
                "failed to read settings {}: {}. using defaults",
                path.display(),
                error
            ));
            return Map::new();
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            log(&format!(
                "settings {} has non-object root; resetting on next write",
                path.display()
            ));
            Map::new()
        }
        Err(error) => {
            log(&format!(
                "failed to parse settings {}: {}. resetting on next write",
                path.display(),
                error
            ));
            Map::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn quiet(_: &str) {}

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path().join("config.json"), quiet);
        assert_eq!(store.get("isMaximized"), None);
    }

    #[test]
    fn set_persists_and_reopens() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.json");

        let mut store = JsonFileStore::open(&path, quiet);
        store.set("isMaximized", json!(true)).expect("write settings");

        let reopened = JsonFileStore::open(&path, quiet);
        assert_eq!(reopened.get("isMaximized"), Some(json!(true)));
    }

    #[test]
    fn corrupt_file_is_replaced_on_write() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").expect("seed corrupt file");

        let mut store = JsonFileStore::open(&path, quiet);
        assert_eq!(store.get("isFullScreen"), None);
        store.set("isFullScreen", json!(false)).expect("write settings");

        let raw = fs::read_to_string(&path).expect("read settings");
        let parsed: Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(parsed, json!({ "isFullScreen": false }));
    }

    #[test]
    fn non_object_root_is_treated_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, "[true, false]").expect("seed array file");

        let store = JsonFileStore::open(&path, quiet);
        assert_eq!(store.get("isMaximized"), None);
    }

    #[test]
    fn unrelated_keys_survive_writes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"volume": 0.4}"#).expect("seed settings");

        let mut store = JsonFileStore::open(&path, quiet);
        store.set("Fullscreen", json!(true)).expect("write settings");

        let reopened = JsonFileStore::open(&path, quiet);
        assert_eq!(reopened.get("volume"), Some(json!(0.4)));
        assert_eq!(reopened.get("Fullscreen"), Some(json!(true)));
    }
}
