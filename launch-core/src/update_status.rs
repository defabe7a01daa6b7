use crate::LaunchError;

/// What the splash screen is currently telling the user about updates.
/// Only the most recent value matters.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateStatus {
    Checking,
    Available(String),
    NotAvailable,
    Downloading { percent: f64, bytes_per_second: f64 },
    ReadyToInstall,
    Failed(String),
}

/// How the update phase ended. Reported to the orchestrator exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalOutcome {
    NotAvailable,
    ReadyToInstall { version: String },
    Failed(LaunchError),
    TimedOut,
}

impl TerminalOutcome {
    pub fn error(&self) -> Option<LaunchError> {
        match self {
            Self::Failed(error) => Some(error.clone()),
            Self::TimedOut => Some(LaunchError::UpdateCheckTimeout),
            Self::NotAvailable | Self::ReadyToInstall { .. } => None,
        }
    }
}
