use crate::UpdateStatus;

pub fn status_text(status: &UpdateStatus) -> String {
    match status {
        UpdateStatus::Checking => "Checking for update...".to_string(),
        UpdateStatus::Available(version) => format!("New version available: {version}"),
        UpdateStatus::NotAvailable => "This is the latest version".to_string(),
        UpdateStatus::Downloading {
            percent,
            bytes_per_second,
        } => format!(
            "Downloading: {}% / {}KB/s",
            floor_to_whole(*percent),
            floor_to_whole(*bytes_per_second / 1000.0)
        ),
        UpdateStatus::ReadyToInstall => "Installing...".to_string(),
        UpdateStatus::Failed(_) => "Error: Update failed".to_string(),
    }
}

pub fn version_label(version: &str) -> String {
    format!("v{}", version.trim().trim_start_matches('v'))
}

// NaN and negatives clamp to zero.
fn floor_to_whole(value: f64) -> u64 {
    value.floor() as u64
}
