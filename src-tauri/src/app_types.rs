use std::sync::Mutex;

use katatsumuri_launch::{LaunchEvent, LaunchEventSender};

/// Managed state that lets Tauri callbacks reach the launch session.
#[derive(Debug)]
pub(crate) struct LaunchBridgeState {
    events: LaunchEventSender,
    bound_shortcuts: Mutex<Vec<String>>,
}

impl LaunchBridgeState {
    pub(crate) fn new(events: LaunchEventSender) -> Self {
        Self {
            events,
            bound_shortcuts: Mutex::new(Vec::new()),
        }
    }

    /// Returns false once the session has ended and nobody is listening.
    pub(crate) fn send(&self, event: LaunchEvent) -> bool {
        self.events.send(event).is_ok()
    }

    pub(crate) fn set_bound_shortcuts(&self, chords: Vec<String>) {
        match self.bound_shortcuts.lock() {
            Ok(mut guard) => *guard = chords,
            Err(poisoned) => *poisoned.into_inner() = chords,
        }
    }

    pub(crate) fn bound_shortcuts(&self) -> Vec<String> {
        self.bound_shortcuts
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}
