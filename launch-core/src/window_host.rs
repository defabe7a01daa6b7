use std::time::Duration;

/// The transient startup window.
pub trait SplashSurface {
    fn show(&mut self) -> Result<(), String>;
    fn push_status(&mut self, text: &str) -> Result<(), String>;
    fn focus(&mut self) -> Result<(), String>;
    fn destroy(self) -> Result<(), String>;
}

/// The window hosting the remote content.
pub trait MainSurface {
    /// Starts forwarding the given chords while this window has focus.
    fn bind_shortcuts(&mut self, chords: &[String]) -> Result<(), String>;
    fn maximize(&mut self) -> Result<(), String>;
    fn set_fullscreen(&mut self, full_screen: bool) -> Result<(), String>;
    fn is_maximized(&self) -> Result<bool, String>;
    fn is_fullscreen(&self) -> Result<bool, String>;
    fn show(&mut self) -> Result<(), String>;
    fn focus(&mut self) -> Result<(), String>;
    fn reload(&mut self) -> Result<(), String>;
    fn open_devtools(&mut self) -> Result<(), String>;
    fn send_escape(&mut self) -> Result<(), String>;
    /// Closes the window without raising another close request.
    fn destroy(self) -> Result<(), String>;
}

/// Creates windows and controls the process.
///
/// Windows are created hidden. Readiness is reported back to the
/// orchestrator as `SplashReady` / `MainReady` events.
pub trait WindowHost {
    type Splash: SplashSurface;
    type Main: MainSurface;

    fn create_splash(&mut self) -> Result<Self::Splash, String>;
    fn create_main(&mut self) -> Result<Self::Main, String>;
    /// Tears the process down and starts a fresh one.
    fn relaunch(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaunchTimer {
    UpdateCheckTimeout,
    LaunchMain,
    InstallAndRestart,
}

/// One-shot timers that post `TimerFired` back to the orchestrator.
/// Scheduling a timer that is already pending replaces it.
pub trait Timers {
    fn schedule(&mut self, timer: LaunchTimer, delay: Duration);
    fn cancel(&mut self, timer: LaunchTimer);
}
