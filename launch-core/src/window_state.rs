use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{LaunchError, FULLSCREEN_KEY, FULLSCREEN_TOGGLE_KEY, MAXIMIZED_KEY};

/// External persistent settings. Values are JSON so that entries written by
/// other versions of the shell can be read without failing.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), String>;
}

/// Field names double as the store keys (`isMaximized`, `isFullScreen`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedWindowState {
    pub is_maximized: bool,
    pub is_full_screen: bool,
}

/// Main-window geometry flags, read once at creation and written once at
/// close.
#[derive(Debug)]
pub struct WindowLifecycleStore<K> {
    store: K,
}

impl<K: KeyValueStore> WindowLifecycleStore<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// Entries that are missing or not booleans read as `false`.
    pub fn load(&self) -> PersistedWindowState {
        let flags: Map<String, Value> = WINDOW_STATE_KEYS
            .iter()
            .filter_map(|key| match self.store.get(key) {
                Some(Value::Bool(flag)) => Some((key.to_string(), Value::Bool(flag))),
                _ => None,
            })
            .collect();
        serde_json::from_value(Value::Object(flags)).unwrap_or_default()
    }

    /// Writes every flag even if an earlier write fails; the first failure
    /// is reported.
    pub fn save(&mut self, state: PersistedWindowState) -> Result<(), LaunchError> {
        let Value::Object(flags) = serde_json::to_value(state)
            .map_err(|error| LaunchError::Store(format!("failed to encode window state: {error}")))?
        else {
            return Err(LaunchError::Store(
                "window state did not encode as an object".to_string(),
            ));
        };

        let mut result = Ok(());
        for (key, value) in flags {
            let written = self.store.set(&key, value);
            result = result.and(written);
        }
        result.map_err(LaunchError::Store)
    }

    /// Written immediately by the fullscreen shortcut. This key is not the
    /// one `load` reads; the close-time capture is what restores fullscreen.
    pub fn record_fullscreen_toggle(&mut self, full_screen: bool) -> Result<(), LaunchError> {
        self.store
            .set(FULLSCREEN_TOGGLE_KEY, Value::Bool(full_screen))
            .map_err(LaunchError::Store)
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &K {
        &self.store
    }
}

const WINDOW_STATE_KEYS: [&str; 2] = [MAXIMIZED_KEY, FULLSCREEN_KEY];
