use thiserror::Error;

/// Failures the launch sequence knows how to name.
///
/// Only `SingleInstanceViolation` ends a process; every update-related
/// variant is converted into splash status text and a fallback launch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("update check timed out")]
    UpdateCheckTimeout,
    #[error("update check failed: {0}")]
    UpdateCheckFailed(String),
    #[error("another instance is already running")]
    SingleInstanceViolation,
    #[error("failed to create window: {0}")]
    WindowCreation(String),
    #[error("failed to install update: {0}")]
    Install(String),
    #[error("settings store error: {0}")]
    Store(String),
}
