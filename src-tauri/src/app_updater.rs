use std::{
    sync::{Arc, Mutex},
    time::Instant,
};

use katatsumuri_launch::{
    accepts_release, LaunchEvent, LaunchEventSender, ProgressMeter, UpdatePolicy, Updater,
    UpdaterEvent, LAUNCH_UPDATE_POLICY,
};
use tauri::AppHandle;
use tauri_plugin_updater::{Update, UpdaterExt};

use crate::append_update_log;

struct StagedUpdate {
    update: Update,
    bytes: Vec<u8>,
}

/// Bridges the Tauri updater plugin to the launch session's event channel.
pub(crate) struct AppUpdater {
    app_handle: AppHandle,
    events: LaunchEventSender,
    policy: UpdatePolicy,
    staged: Arc<Mutex<Option<StagedUpdate>>>,
}

impl AppUpdater {
    pub(crate) fn new(app_handle: AppHandle, events: LaunchEventSender) -> Self {
        Self {
            app_handle,
            events,
            policy: LAUNCH_UPDATE_POLICY,
            staged: Arc::new(Mutex::new(None)),
        }
    }
}

impl Updater for AppUpdater {
    fn apply_policy(&mut self, policy: UpdatePolicy) {
        append_update_log(&format!(
            "policy: auto_download={} allow_downgrade={} allow_prerelease={}",
            policy.auto_download, policy.allow_downgrade, policy.allow_prerelease
        ));
        self.policy = policy;
    }

    fn check_for_updates(&mut self) {
        let app_handle = self.app_handle.clone();
        let events = self.events.clone();
        let policy = self.policy;
        let staged = Arc::clone(&self.staged);
        tauri::async_runtime::spawn(async move {
            run_update_check(app_handle, events, policy, staged).await;
        });
    }

    fn quit_and_install(&mut self) -> Result<(), String> {
        let staged = self
            .staged
            .lock()
            .map_err(|_| "Update staging lock is poisoned.".to_string())?
            .take()
            .ok_or_else(|| "No downloaded update to install.".to_string())?;

        let version = staged.update.version.to_string();
        staged
            .update
            .install(&staged.bytes)
            .map_err(|error| format!("Failed to install update {version}: {error}"))?;

        append_update_log(&format!("update {version} installed, restarting app"));
        self.app_handle.request_restart();
        Ok(())
    }
}

async fn run_update_check(
    app_handle: AppHandle,
    events: LaunchEventSender,
    policy: UpdatePolicy,
    staged: Arc<Mutex<Option<StagedUpdate>>>,
) {
    let emit = |event: UpdaterEvent| {
        if events.send(LaunchEvent::Updater(event)).is_err() {
            append_update_log("launch session is gone; dropping updater event");
        }
    };

    emit(UpdaterEvent::Checking);
    let current_version = app_handle.package_info().version.to_string();
    let check_started = Instant::now();

    let updater = match app_handle
        .updater_builder()
        .version_comparator(move |current, release| {
            accepts_release(policy, &current, &release.version)
        })
        .build()
    {
        Ok(updater) => updater,
        Err(error) => {
            append_update_log(&format!("failed to initialize updater: {error}"));
            emit(UpdaterEvent::Error {
                cause: error.to_string(),
            });
            return;
        }
    };

    let update = match updater.check().await {
        Ok(Some(update)) => update,
        Ok(None) => {
            append_update_log(&format!(
                "check finished: has_update=false current_version={} elapsed_ms={}",
                current_version,
                check_started.elapsed().as_millis()
            ));
            emit(UpdaterEvent::NotAvailable {
                version: current_version,
            });
            return;
        }
        Err(error) => {
            append_update_log(&format!(
                "check failed: current_version={} elapsed_ms={} error={}",
                current_version,
                check_started.elapsed().as_millis(),
                error
            ));
            emit(UpdaterEvent::Error {
                cause: error.to_string(),
            });
            return;
        }
    };

    let new_version = update.version.to_string();
    append_update_log(&format!(
        "check finished: has_update=true current_version={} latest_version={} elapsed_ms={}",
        current_version,
        new_version,
        check_started.elapsed().as_millis()
    ));
    emit(UpdaterEvent::Available {
        version: new_version.clone(),
    });

    if !policy.auto_download {
        return;
    }

    let download_started = Instant::now();
    let mut meter = ProgressMeter::new();
    let progress_events = events.clone();
    let downloaded = update
        .download(
            move |chunk_len, content_length| {
                let progress = meter.record(chunk_len, content_length, download_started.elapsed());
                let _ = progress_events.send(LaunchEvent::Updater(UpdaterEvent::DownloadProgress(
                    progress,
                )));
            },
            || {},
        )
        .await;

    match downloaded {
        Ok(bytes) => {
            append_update_log(&format!(
                "update {} downloaded ({} bytes)",
                new_version,
                bytes.len()
            ));
            match staged.lock() {
                Ok(mut guard) => *guard = Some(StagedUpdate { update, bytes }),
                Err(_) => {
                    emit(UpdaterEvent::Error {
                        cause: "update staging lock is poisoned".to_string(),
                    });
                    return;
                }
            }
            emit(UpdaterEvent::Downloaded {
                version: new_version,
            });
        }
        Err(error) => {
            append_update_log(&format!("download of {new_version} failed: {error}"));
            emit(UpdaterEvent::Error {
                cause: error.to_string(),
            });
        }
    }
}
