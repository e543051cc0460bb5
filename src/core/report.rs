use crate::core::{Alert, Result, RiskLevel};
use crate::domain::model::alerts_at_or_above;
use std::path::{Path, PathBuf};

/// Exit status when alerts at or above the `--fail-on` risk exist.
pub const EXIT_ALERTS_FOUND: i32 = 4;

/// Writes the HTML report and returns where it landed.
///
/// A directory target gets a timestamped file name inside it; missing parent
/// directories are created.
pub fn write_report(path: &Path, report: &str) -> Result<PathBuf> {
    let path = if path.is_dir() {
        path.join(format!(
            "zap_report_{}.html",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        ))
    } else {
        path.to_path_buf()
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, report)?;
    tracing::info!("📁 Report saved to: {}", path.display());
    Ok(path)
}

/// Exit status for an alert listing gated on `threshold`.
pub fn alerts_exit_code(alerts: &[Alert], threshold: Option<RiskLevel>) -> i32 {
    let Some(threshold) = threshold else {
        return 0;
    };

    let matching = alerts_at_or_above(alerts, threshold);
    if matching.is_empty() {
        return 0;
    }
    tracing::warn!(
        "Found {} alert(s) at or above {} risk",
        matching.len(),
        threshold
    );
    EXIT_ALERTS_FOUND
}
