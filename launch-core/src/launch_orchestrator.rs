use std::time::Duration;

use crate::{
    splash_presenter, FlowEffect, KeyValueStore, LaunchError, LaunchTimer, MainSurface,
    PersistedWindowState, ShortcutAction, ShortcutTable, SplashSurface, TerminalOutcome,
    TerminalSignal, Timers, UpdateFlow, UpdateStatus, Updater, UpdaterEvent, WindowHost,
    WindowLifecycleStore, LAUNCH_UPDATE_POLICY, TERMINAL_STATUS_DISPLAY_MS,
    TIMEOUT_FALLBACK_DISPLAY_MS, UPDATE_CHECK_TIMEOUT_MS,
};

#[derive(Debug, Clone, PartialEq)]
pub enum LaunchEvent {
    SplashReady,
    Updater(UpdaterEvent),
    TimerFired(LaunchTimer),
    MainReady,
    MainCloseRequested,
    Shortcut(String),
    SecondInstance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    AwaitingSplash,
    Updating,
    AwaitingMainLaunch,
    AwaitingInstall,
    MainOpening,
    MainVisible,
    Relaunching,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchControl {
    Continue,
    Exit,
}

/// Owns both window handles for one process run and sequences
/// splash -> update check -> main window.
pub struct LaunchOrchestrator<H: WindowHost, U, K, T> {
    host: H,
    updater: U,
    window_store: WindowLifecycleStore<K>,
    timers: T,
    shortcuts: ShortcutTable,
    update_flow: UpdateFlow,
    splash: Option<H::Splash>,
    main: Option<H::Main>,
    update_terminal: TerminalSignal,
    main_launch: TerminalSignal,
    phase: SessionPhase,
    log: fn(&str),
}

impl<H, U, K, T> LaunchOrchestrator<H, U, K, T>
where
    H: WindowHost,
    U: Updater,
    K: KeyValueStore,
    T: Timers,
{
    pub fn new(host: H, updater: U, store: K, timers: T, log: fn(&str)) -> Self {
        Self {
            host,
            updater,
            window_store: WindowLifecycleStore::new(store),
            timers,
            shortcuts: ShortcutTable::standard(),
            update_flow: UpdateFlow::new(),
            splash: None,
            main: None,
            update_terminal: TerminalSignal::Pending,
            main_launch: TerminalSignal::Pending,
            phase: SessionPhase::NotStarted,
            log,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn log(&self, message: &str) {
        (self.log)(message);
    }

    /// Creates the splash window. The update check starts once the splash
    /// reports `SplashReady`; if that never arrives the session waits.
    pub fn start(&mut self) -> Result<(), LaunchError> {
        if self.phase != SessionPhase::NotStarted {
            return Ok(());
        }

        let splash = self
            .host
            .create_splash()
            .map_err(LaunchError::WindowCreation)?;
        self.splash = Some(splash);
        self.phase = SessionPhase::AwaitingSplash;
        self.log("splash window created, waiting for content");
        Ok(())
    }

    pub fn handle(&mut self, event: LaunchEvent) -> LaunchControl {
        match event {
            LaunchEvent::SplashReady => self.on_splash_ready(),
            LaunchEvent::Updater(event) => {
                // The check only exists once the splash has shown.
                if self.phase != SessionPhase::Updating {
                    return LaunchControl::Continue;
                }
                let effects = self.update_flow.handle_event(event);
                self.apply_flow_effects(effects);
                LaunchControl::Continue
            }
            LaunchEvent::TimerFired(timer) => self.on_timer(timer),
            LaunchEvent::MainReady => self.on_main_ready(),
            LaunchEvent::MainCloseRequested => self.on_main_close_requested(),
            LaunchEvent::Shortcut(chord) => self.on_shortcut(&chord),
            LaunchEvent::SecondInstance => self.on_second_instance(),
        }
    }

    fn on_splash_ready(&mut self) -> LaunchControl {
        if self.phase != SessionPhase::AwaitingSplash {
            return LaunchControl::Continue;
        }

        if let Some(splash) = self.splash.as_mut() {
            if let Err(error) = splash.show() {
                (self.log)(&format!("failed to show splash window: {error}"));
            }
        }
        self.phase = SessionPhase::Updating;
        self.updater.apply_policy(LAUNCH_UPDATE_POLICY);
        self.updater.check_for_updates();
        LaunchControl::Continue
    }

    fn on_timer(&mut self, timer: LaunchTimer) -> LaunchControl {
        match timer {
            LaunchTimer::UpdateCheckTimeout => {
                if self.phase != SessionPhase::Updating {
                    return LaunchControl::Continue;
                }
                let effects = self.update_flow.handle_timeout();
                self.apply_flow_effects(effects);
                LaunchControl::Continue
            }
            LaunchTimer::LaunchMain => self.launch_main(),
            LaunchTimer::InstallAndRestart => self.install_and_restart(),
        }
    }

    fn apply_flow_effects(&mut self, effects: Vec<FlowEffect>) {
        for effect in effects {
            match effect {
                FlowEffect::ShowStatus(status) => self.show_status(&status),
                FlowEffect::ArmTimeout => self.timers.schedule(
                    LaunchTimer::UpdateCheckTimeout,
                    Duration::from_millis(UPDATE_CHECK_TIMEOUT_MS),
                ),
                FlowEffect::DisarmTimeout => self.timers.cancel(LaunchTimer::UpdateCheckTimeout),
                FlowEffect::Terminal(outcome) => self.on_update_flow_terminal(outcome),
            }
        }
    }

    fn show_status(&mut self, status: &UpdateStatus) {
        let text = splash_presenter::status_text(status);
        (self.log)(&format!("splash status: {text}"));
        let Some(splash) = self.splash.as_mut() else {
            return;
        };
        if let Err(error) = splash.push_status(&text) {
            (self.log)(&format!("failed to push splash status: {error}"));
        }
    }

    /// Runs at most once per session, whichever of the real updater result
    /// or the fallback timeout gets here first.
    pub fn on_update_flow_terminal(&mut self, outcome: TerminalOutcome) {
        if self.update_terminal == TerminalSignal::Fired {
            (self.log)(&format!("ignoring duplicate update outcome: {outcome:?}"));
            return;
        }
        self.update_terminal = TerminalSignal::Fired;

        if let Some(error) = outcome.error() {
            (self.log)(&format!("update check did not complete: {error}"));
        }

        match outcome {
            TerminalOutcome::NotAvailable | TerminalOutcome::Failed(_) => {
                self.phase = SessionPhase::AwaitingMainLaunch;
                self.timers.schedule(
                    LaunchTimer::LaunchMain,
                    Duration::from_millis(TERMINAL_STATUS_DISPLAY_MS),
                );
            }
            TerminalOutcome::TimedOut => {
                self.phase = SessionPhase::AwaitingMainLaunch;
                self.timers.schedule(
                    LaunchTimer::LaunchMain,
                    Duration::from_millis(TIMEOUT_FALLBACK_DISPLAY_MS),
                );
            }
            TerminalOutcome::ReadyToInstall { version } => {
                (self.log)(&format!("update {version} downloaded, installing"));
                self.phase = SessionPhase::AwaitingInstall;
                self.timers.schedule(
                    LaunchTimer::InstallAndRestart,
                    Duration::from_millis(TERMINAL_STATUS_DISPLAY_MS),
                );
            }
        }
    }

    fn install_and_restart(&mut self) -> LaunchControl {
        if self.phase != SessionPhase::AwaitingInstall {
            return LaunchControl::Continue;
        }

        match self.updater.quit_and_install() {
            Ok(()) => {
                self.phase = SessionPhase::Relaunching;
                LaunchControl::Exit
            }
            Err(error) => {
                (self.log)(&format!("{}", LaunchError::Install(error)));
                self.show_status(&UpdateStatus::Failed("install".to_string()));
                self.phase = SessionPhase::AwaitingMainLaunch;
                self.timers.schedule(
                    LaunchTimer::LaunchMain,
                    Duration::from_millis(TERMINAL_STATUS_DISPLAY_MS),
                );
                LaunchControl::Continue
            }
        }
    }

    /// Creates the main window and binds shortcuts. Safe to call more than
    /// once; only the first call does anything.
    pub fn launch_main(&mut self) -> LaunchControl {
        if self.main_launch == TerminalSignal::Fired {
            return LaunchControl::Continue;
        }
        self.main_launch = TerminalSignal::Fired;

        let mut main = match self.host.create_main() {
            Ok(main) => main,
            Err(error) => {
                (self.log)(&format!("{}", LaunchError::WindowCreation(error)));
                self.phase = SessionPhase::Ended;
                return LaunchControl::Exit;
            }
        };

        if let Err(error) = main.bind_shortcuts(&self.shortcuts.chords()) {
            (self.log)(&format!("failed to bind main window shortcuts: {error}"));
        }
        self.main = Some(main);
        self.phase = SessionPhase::MainOpening;
        (self.log)("main window created, waiting for content");
        LaunchControl::Continue
    }

    fn on_main_ready(&mut self) -> LaunchControl {
        // Page reloads report readiness again.
        if self.phase != SessionPhase::MainOpening {
            return LaunchControl::Continue;
        }
        let Some(main) = self.main.as_mut() else {
            return LaunchControl::Continue;
        };

        if let Some(splash) = self.splash.take() {
            if let Err(error) = splash.destroy() {
                (self.log)(&format!("failed to destroy splash window: {error}"));
            }
        }

        let state = self.window_store.load();
        if state.is_maximized {
            if let Err(error) = main.maximize() {
                (self.log)(&format!("failed to restore maximized state: {error}"));
            }
        }
        if state.is_full_screen {
            if let Err(error) = main.set_fullscreen(true) {
                (self.log)(&format!("failed to restore fullscreen state: {error}"));
            }
        }
        if let Err(error) = main.show() {
            (self.log)(&format!("failed to show main window: {error}"));
        }

        self.phase = SessionPhase::MainVisible;
        LaunchControl::Continue
    }

    /// Captures the live window flags, then closes the window for good.
    fn on_main_close_requested(&mut self) -> LaunchControl {
        let Some(main) = self.main.take() else {
            return LaunchControl::Continue;
        };

        match (main.is_maximized(), main.is_fullscreen()) {
            (Ok(is_maximized), Ok(is_full_screen)) => {
                let state = PersistedWindowState {
                    is_maximized,
                    is_full_screen,
                };
                if let Err(error) = self.window_store.save(state) {
                    (self.log)(&format!("failed to persist window state: {error}"));
                }
            }
            (Err(error), _) | (_, Err(error)) => {
                (self.log)(&format!("skipping window state capture: {error}"));
            }
        }

        if let Err(error) = main.destroy() {
            (self.log)(&format!("failed to close main window: {error}"));
        }
        self.phase = SessionPhase::Ended;
        LaunchControl::Exit
    }

    fn on_shortcut(&mut self, chord: &str) -> LaunchControl {
        if !matches!(
            self.phase,
            SessionPhase::MainOpening | SessionPhase::MainVisible
        ) {
            return LaunchControl::Continue;
        }
        let Some(action) = self.shortcuts.resolve(chord) else {
            return LaunchControl::Continue;
        };
        let Some(main) = self.main.as_mut() else {
            return LaunchControl::Continue;
        };

        let result = match action {
            ShortcutAction::CancelOverlay => main.send_escape(),
            ShortcutAction::Reload => main.reload(),
            ShortcutAction::OpenDevTools => main.open_devtools(),
            ShortcutAction::ToggleFullscreen => match main.is_fullscreen() {
                Ok(is_full_screen) => {
                    if let Err(error) = self.window_store.record_fullscreen_toggle(!is_full_screen)
                    {
                        (self.log)(&format!("failed to persist fullscreen toggle: {error}"));
                    }
                    main.set_fullscreen(!is_full_screen)
                }
                Err(error) => Err(error),
            },
            ShortcutAction::Relaunch => {
                (self.log)("relaunch requested from shortcut");
                self.phase = SessionPhase::Relaunching;
                self.host.relaunch();
                return LaunchControl::Exit;
            }
        };

        if let Err(error) = result {
            (self.log)(&format!("shortcut {action:?} failed: {error}"));
        }
        LaunchControl::Continue
    }

    fn on_second_instance(&mut self) -> LaunchControl {
        (self.log)(&format!(
            "{}; keeping the current instance",
            LaunchError::SingleInstanceViolation
        ));

        let result = if let Some(main) = self.main.as_mut() {
            main.focus()
        } else if let Some(splash) = self.splash.as_mut() {
            splash.focus()
        } else {
            Ok(())
        };
        if let Err(error) = result {
            (self.log)(&format!("failed to focus existing window: {error}"));
        }
        LaunchControl::Continue
    }
}
