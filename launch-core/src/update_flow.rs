use crate::{LaunchError, TerminalOutcome, UpdateStatus, UpdaterEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FlowPhase {
    Idle,
    Checking,
    Available,
    Downloading,
    Finished,
}

/// Whether the update phase has already reported its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalSignal {
    Pending,
    Fired,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowEffect {
    ShowStatus(UpdateStatus),
    ArmTimeout,
    DisarmTimeout,
    Terminal(TerminalOutcome),
}

/// Reducer over updater events.
///
/// The timeline only moves forward: `Idle -> Checking -> Available ->
/// Downloading -> Finished`, where any step may jump straight to
/// `Finished`. Events that would move it backwards are dropped, and once
/// the terminal signal has fired nothing else is accepted, including a
/// fallback timeout that was already queued.
#[derive(Debug)]
pub struct UpdateFlow {
    phase: FlowPhase,
    terminal: TerminalSignal,
    timeout_armed: bool,
}

impl Default for UpdateFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateFlow {
    pub fn new() -> Self {
        Self {
            phase: FlowPhase::Idle,
            terminal: TerminalSignal::Pending,
            timeout_armed: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> FlowPhase {
        self.phase
    }

    #[cfg(test)]
    pub(crate) fn terminal_signal(&self) -> TerminalSignal {
        self.terminal
    }

    #[cfg(test)]
    pub(crate) fn is_timeout_armed(&self) -> bool {
        self.timeout_armed
    }

    pub fn handle_event(&mut self, event: UpdaterEvent) -> Vec<FlowEffect> {
        if self.terminal == TerminalSignal::Fired {
            return Vec::new();
        }

        let next_phase = phase_for_event(&event);
        if !self.accepts(next_phase) {
            return Vec::new();
        }

        if event == UpdaterEvent::Checking {
            self.phase = FlowPhase::Checking;
            self.timeout_armed = true;
            return vec![
                FlowEffect::ShowStatus(UpdateStatus::Checking),
                FlowEffect::ArmTimeout,
            ];
        }

        let mut effects = Vec::with_capacity(3);
        if self.timeout_armed {
            self.timeout_armed = false;
            effects.push(FlowEffect::DisarmTimeout);
        }
        self.phase = next_phase;

        match event {
            UpdaterEvent::Checking => {}
            UpdaterEvent::Available { version } => {
                effects.push(FlowEffect::ShowStatus(UpdateStatus::Available(version)));
            }
            UpdaterEvent::DownloadProgress(progress) => {
                effects.push(FlowEffect::ShowStatus(UpdateStatus::Downloading {
                    percent: progress.percent,
                    bytes_per_second: progress.bytes_per_second,
                }));
            }
            UpdaterEvent::NotAvailable { .. } => {
                self.finish(
                    &mut effects,
                    UpdateStatus::NotAvailable,
                    TerminalOutcome::NotAvailable,
                );
            }
            UpdaterEvent::Downloaded { version } => {
                self.finish(
                    &mut effects,
                    UpdateStatus::ReadyToInstall,
                    TerminalOutcome::ReadyToInstall { version },
                );
            }
            UpdaterEvent::Error { cause } => {
                self.finish(
                    &mut effects,
                    UpdateStatus::Failed(cause.clone()),
                    TerminalOutcome::Failed(LaunchError::UpdateCheckFailed(cause)),
                );
            }
        }

        effects
    }

    /// Called when the fallback timer armed on `Checking` fires.
    pub fn handle_timeout(&mut self) -> Vec<FlowEffect> {
        if self.terminal == TerminalSignal::Fired || !self.timeout_armed {
            return Vec::new();
        }

        self.timeout_armed = false;
        let mut effects = Vec::with_capacity(2);
        self.finish(
            &mut effects,
            UpdateStatus::Failed("timeout".to_string()),
            TerminalOutcome::TimedOut,
        );
        effects
    }

    fn accepts(&self, next_phase: FlowPhase) -> bool {
        next_phase > self.phase
            || (next_phase == FlowPhase::Downloading && self.phase == FlowPhase::Downloading)
    }

    fn finish(
        &mut self,
        effects: &mut Vec<FlowEffect>,
        status: UpdateStatus,
        outcome: TerminalOutcome,
    ) {
        self.phase = FlowPhase::Finished;
        self.terminal = TerminalSignal::Fired;
        effects.push(FlowEffect::ShowStatus(status));
        effects.push(FlowEffect::Terminal(outcome));
    }
}

fn phase_for_event(event: &UpdaterEvent) -> FlowPhase {
    match event {
        UpdaterEvent::Checking => FlowPhase::Checking,
        UpdaterEvent::Available { .. } => FlowPhase::Available,
        UpdaterEvent::DownloadProgress(_) => FlowPhase::Downloading,
        UpdaterEvent::NotAvailable { .. }
        | UpdaterEvent::Downloaded { .. }
        | UpdaterEvent::Error { .. } => FlowPhase::Finished,
    }
}
