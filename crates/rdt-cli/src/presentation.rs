//! Terminal formatting helpers.

use rdt_core::{DaemonJobStatus, DownloadProgress};

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Human-readable byte count (`1.5 MiB`).
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Single progress line, e.g. `42.0%  4.2 MiB / 10.0 MiB  512.0 KiB/s`.
pub fn format_progress(progress: &DownloadProgress) -> String {
    let total = if progress.bytes_total == 0 {
        "?".to_string()
    } else {
        format_bytes(progress.bytes_total)
    };
    format!(
        "{:5.1}%  {} / {}  {}/s",
        progress.percent_complete(),
        format_bytes(progress.bytes_done),
        total,
        format_bytes(progress.speed)
    )
}

/// Multi-line status summary for `rdt status`.
pub fn format_status(gid: &str, status: &DaemonJobStatus) -> String {
    let mut out = format!(
        "GID:      {gid}\nState:    {}\nProgress: {}",
        status.state.as_str(),
        format_progress(&status.progress())
    );
    if status.has_error_message() || status.error_code.is_some() {
        out.push_str(&format!("\nError:    {}", status.error_detail()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdt_core::DaemonJobState;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(10 * 1024 * 1024), "10.0 MiB");
    }

    #[test]
    fn test_format_progress_unknown_total() {
        let line = format_progress(&DownloadProgress::new(2048, 0, 0));
        assert!(line.contains("2.0 KiB / ?"));
    }

    #[test]
    fn test_format_status_includes_error() {
        let status = DaemonJobStatus::new(DaemonJobState::Error).with_error("9", "disk full");
        let text = format_status("g1", &status);
        assert!(text.contains("State:    error"));
        assert!(text.contains("Error:    9: disk full"));
    }
}
