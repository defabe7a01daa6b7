use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    KeyValueStore, LaunchEvent, LaunchTimer, MainSurface, SplashSurface, Timers, UpdatePolicy,
    Updater, UpdaterEvent, WindowHost,
};

pub(crate) fn quiet(_: &str) {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HostCall {
    SplashCreated,
    SplashShown,
    SplashStatus(String),
    SplashFocused,
    SplashDestroyed,
    MainCreated,
    ShortcutsBound(Vec<String>),
    MainMaximized,
    MainFullscreen(bool),
    MainShown,
    MainFocused,
    MainReloaded,
    DevToolsOpened,
    EscapeSent,
    MainDestroyed,
    Relaunched,
    PolicyApplied(UpdatePolicy),
    UpdateCheckStarted,
    QuitAndInstall,
}

#[derive(Debug, Default)]
struct JournalState {
    calls: Vec<HostCall>,
    maximized: bool,
    full_screen: bool,
}

/// Shared record of everything the fakes were asked to do.
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal {
    state: Arc<Mutex<JournalState>>,
}

impl Journal {
    fn record(&self, call: HostCall) {
        self.state.lock().expect("journal lock").calls.push(call);
    }

    pub(crate) fn calls(&self) -> Vec<HostCall> {
        self.state.lock().expect("journal lock").calls.clone()
    }

    pub(crate) fn count(&self, call: &HostCall) -> usize {
        self.calls().iter().filter(|recorded| *recorded == call).count()
    }

    pub(crate) fn statuses(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::SplashStatus(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn count_status(&self, text: &str) -> usize {
        self.statuses().iter().filter(|status| *status == text).count()
    }

    /// Simulates the user resizing the main window directly.
    pub(crate) fn set_live_window(&self, maximized: bool, full_screen: bool) {
        let mut state = self.state.lock().expect("journal lock");
        state.maximized = maximized;
        state.full_screen = full_screen;
    }
}

pub(crate) struct FakeHost {
    journal: Journal,
    main_failure: Option<String>,
}

impl FakeHost {
    pub(crate) fn new(journal: Journal) -> Self {
        Self {
            journal,
            main_failure: None,
        }
    }

    pub(crate) fn fail_main(&mut self, reason: &str) {
        self.main_failure = Some(reason.to_string());
    }
}

impl WindowHost for FakeHost {
    type Splash = FakeSplash;
    type Main = FakeMain;

    fn create_splash(&mut self) -> Result<FakeSplash, String> {
        self.journal.record(HostCall::SplashCreated);
        Ok(FakeSplash {
            journal: self.journal.clone(),
        })
    }

    fn create_main(&mut self) -> Result<FakeMain, String> {
        if let Some(reason) = &self.main_failure {
            return Err(reason.clone());
        }
        self.journal.record(HostCall::MainCreated);
        Ok(FakeMain {
            journal: self.journal.clone(),
        })
    }

    fn relaunch(&mut self) {
        self.journal.record(HostCall::Relaunched);
    }
}

pub(crate) struct FakeSplash {
    journal: Journal,
}

impl SplashSurface for FakeSplash {
    fn show(&mut self) -> Result<(), String> {
        self.journal.record(HostCall::SplashShown);
        Ok(())
    }

    fn push_status(&mut self, text: &str) -> Result<(), String> {
        self.journal.record(HostCall::SplashStatus(text.to_string()));
        Ok(())
    }

    fn focus(&mut self) -> Result<(), String> {
        self.journal.record(HostCall::SplashFocused);
        Ok(())
    }

    fn destroy(self) -> Result<(), String> {
        self.journal.record(HostCall::SplashDestroyed);
        Ok(())
    }
}

pub(crate) struct FakeMain {
    journal: Journal,
}

impl MainSurface for FakeMain {
    fn bind_shortcuts(&mut self, chords: &[String]) -> Result<(), String> {
        self.journal.record(HostCall::ShortcutsBound(chords.to_vec()));
        Ok(())
    }

    fn maximize(&mut self) -> Result<(), String> {
        self.journal.state.lock().expect("journal lock").maximized = true;
        self.journal.record(HostCall::MainMaximized);
        Ok(())
    }

    fn set_fullscreen(&mut self, full_screen: bool) -> Result<(), String> {
        self.journal.state.lock().expect("journal lock").full_screen = full_screen;
        self.journal.record(HostCall::MainFullscreen(full_screen));
        Ok(())
    }

    fn is_maximized(&self) -> Result<bool, String> {
        Ok(self.journal.state.lock().expect("journal lock").maximized)
    }

    fn is_fullscreen(&self) -> Result<bool, String> {
        Ok(self.journal.state.lock().expect("journal lock").full_screen)
    }

    fn show(&mut self) -> Result<(), String> {
        self.journal.record(HostCall::MainShown);
        Ok(())
    }

    fn focus(&mut self) -> Result<(), String> {
        self.journal.record(HostCall::MainFocused);
        Ok(())
    }

    fn reload(&mut self) -> Result<(), String> {
        self.journal.record(HostCall::MainReloaded);
        Ok(())
    }

    fn open_devtools(&mut self) -> Result<(), String> {
        self.journal.record(HostCall::DevToolsOpened);
        Ok(())
    }

    fn send_escape(&mut self) -> Result<(), String> {
        self.journal.record(HostCall::EscapeSent);
        Ok(())
    }

    fn destroy(self) -> Result<(), String> {
        self.journal.record(HostCall::MainDestroyed);
        Ok(())
    }
}

/// Replays a scripted list of updater events when a check starts.
pub(crate) struct FakeUpdater {
    journal: Journal,
    events: Option<UnboundedSender<LaunchEvent>>,
    on_check: Vec<UpdaterEvent>,
    install_failure: Option<String>,
}

impl FakeUpdater {
    pub(crate) fn new(journal: Journal) -> Self {
        Self {
            journal,
            events: None,
            on_check: Vec::new(),
            install_failure: None,
        }
    }

    pub(crate) fn scripted(
        journal: Journal,
        events: UnboundedSender<LaunchEvent>,
        on_check: Vec<UpdaterEvent>,
    ) -> Self {
        Self {
            journal,
            events: Some(events),
            on_check,
            install_failure: None,
        }
    }

    pub(crate) fn fail_install(&mut self, reason: &str) {
        self.install_failure = Some(reason.to_string());
    }
}

impl Updater for FakeUpdater {
    fn apply_policy(&mut self, policy: UpdatePolicy) {
        self.journal.record(HostCall::PolicyApplied(policy));
    }

    fn check_for_updates(&mut self) {
        self.journal.record(HostCall::UpdateCheckStarted);
        let Some(events) = &self.events else {
            return;
        };
        for event in self.on_check.drain(..) {
            let _ = events.send(LaunchEvent::Updater(event));
        }
    }

    fn quit_and_install(&mut self) -> Result<(), String> {
        self.journal.record(HostCall::QuitAndInstall);
        match &self.install_failure {
            Some(reason) => Err(reason.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
struct ManualTimersState {
    pending: HashMap<LaunchTimer, Duration>,
    schedules: Vec<LaunchTimer>,
}

/// Timers that only fire when a test says so.
#[derive(Debug, Clone, Default)]
pub(crate) struct ManualTimers {
    state: Arc<Mutex<ManualTimersState>>,
}

impl ManualTimers {
    pub(crate) fn pending(&self, timer: LaunchTimer) -> Option<Duration> {
        self.state
            .lock()
            .expect("timers lock")
            .pending
            .get(&timer)
            .copied()
    }

    pub(crate) fn take(&self, timer: LaunchTimer) -> Option<Duration> {
        self.state.lock().expect("timers lock").pending.remove(&timer)
    }

    pub(crate) fn schedule_count(&self, timer: LaunchTimer) -> usize {
        self.state
            .lock()
            .expect("timers lock")
            .schedules
            .iter()
            .filter(|scheduled| **scheduled == timer)
            .count()
    }
}

impl Timers for ManualTimers {
    fn schedule(&mut self, timer: LaunchTimer, delay: Duration) {
        let mut state = self.state.lock().expect("timers lock");
        state.pending.insert(timer, delay);
        state.schedules.push(timer);
    }

    fn cancel(&mut self, timer: LaunchTimer) {
        self.state.lock().expect("timers lock").pending.remove(&timer);
    }
}

#[derive(Debug, Default)]
struct MemoryStoreState {
    values: HashMap<String, Value>,
    failure: Option<String>,
}

/// In-memory settings shared between a test and the code under test.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    state: Arc<Mutex<MemoryStoreState>>,
}

impl MemoryStore {
    pub(crate) fn failing(reason: &str) -> Self {
        let store = Self::default();
        store.state.lock().expect("store lock").failure = Some(reason.to_string());
        store
    }

    pub(crate) fn insert(&self, key: &str, value: Value) {
        self.state
            .lock()
            .expect("store lock")
            .values
            .insert(key.to_string(), value);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.state
            .lock()
            .expect("store lock")
            .values
            .get(key)
            .cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), String> {
        let mut state = self.state.lock().expect("store lock");
        if let Some(reason) = &state.failure {
            return Err(reason.clone());
        }
        state.values.insert(key.to_string(), value);
        Ok(())
    }
}
