use std::time::Duration;

use semver::Version;

/// Events an updater backend reports while checking, downloading and staging
/// a new build. This is the closed set the update flow reduces over.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdaterEvent {
    Checking,
    Available { version: String },
    NotAvailable { version: String },
    DownloadProgress(DownloadProgress),
    Downloaded { version: String },
    Error { cause: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownloadProgress {
    pub percent: f64,
    pub bytes_per_second: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdatePolicy {
    pub auto_download: bool,
    pub allow_downgrade: bool,
    pub allow_prerelease: bool,
}

pub const LAUNCH_UPDATE_POLICY: UpdatePolicy = UpdatePolicy {
    auto_download: true,
    allow_downgrade: false,
    allow_prerelease: false,
};

/// The external update service.
///
/// `check_for_updates` must not block: results arrive later as
/// [`UpdaterEvent`]s through whatever channel the implementation was built
/// with.
pub trait Updater {
    fn apply_policy(&mut self, policy: UpdatePolicy);
    fn check_for_updates(&mut self);
    fn quit_and_install(&mut self) -> Result<(), String>;
}

/// Whether a release offered by the update server may be installed over
/// the running version.
pub fn accepts_release(policy: UpdatePolicy, current: &Version, remote: &Version) -> bool {
    if !policy.allow_prerelease && !remote.pre.is_empty() {
        return false;
    }
    if policy.allow_downgrade {
        remote != current
    } else {
        remote > current
    }
}

/// Turns raw download chunks into percent / throughput readings.
#[derive(Debug, Default)]
pub struct ProgressMeter {
    downloaded: u64,
}

impl ProgressMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        chunk_len: usize,
        content_length: Option<u64>,
        elapsed: Duration,
    ) -> DownloadProgress {
        self.downloaded = self.downloaded.saturating_add(chunk_len as u64);

        let percent = match content_length {
            Some(total) if total > 0 => (self.downloaded as f64 / total as f64 * 100.0).min(100.0),
            _ => 0.0,
        };
        let seconds = elapsed.as_secs_f64();
        let bytes_per_second = if seconds > 0.0 {
            self.downloaded as f64 / seconds
        } else {
            0.0
        };

        DownloadProgress {
            percent,
            bytes_per_second,
        }
    }
}
