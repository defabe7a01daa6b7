//! Launch sequencing for the Katatsumuri desktop shell: splash window,
//! update check with a fallback timeout, and hand-off to the main window.
//!
//! Everything here talks to the outside world through the traits in
//! [`window_host`], [`updater`] and [`window_state`], so the whole sequence
//! runs under test without a windowing system.

mod app_constants;
pub mod browser_flags;
mod json_store;
mod launch_error;
mod launch_orchestrator;
mod launch_session;
pub mod shortcuts;
pub mod splash_presenter;
mod update_flow;
mod update_status;
pub mod updater;
pub mod window_host;
pub mod window_state;

#[cfg(test)]
mod test_support;

pub use app_constants::*;
pub use json_store::JsonFileStore;
pub use launch_error::LaunchError;
pub use launch_orchestrator::{LaunchControl, LaunchEvent, LaunchOrchestrator, SessionPhase};
pub use launch_session::{
    launch_channel, run_session, LaunchEventReceiver, LaunchEventSender, TokioTimers,
};
pub use shortcuts::{normalize_chord, ShortcutAction, ShortcutBinding, ShortcutTable};
pub use update_flow::{FlowEffect, FlowPhase, TerminalSignal, UpdateFlow};
pub use update_status::{TerminalOutcome, UpdateStatus};
pub use updater::{
    accepts_release, DownloadProgress, ProgressMeter, UpdatePolicy, Updater, UpdaterEvent,
    LAUNCH_UPDATE_POLICY,
};
pub use window_host::{LaunchTimer, MainSurface, SplashSurface, Timers, WindowHost};
pub use window_state::{KeyValueStore, PersistedWindowState, WindowLifecycleStore};
