//! Formatting helpers for durations and Discord timestamps.

use std::time::Duration;

use chrono::Utc;

/// Formats a duration as `1d 2h 3m 4s`, omitting zero components.
///
/// A duration shorter than a second renders as `0s`.
pub fn format_uptime(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (days, rem) = (secs / 86_400, secs % 86_400);
    let (hours, rem) = (rem / 3_600, rem % 3_600);
    let (minutes, seconds) = (rem / 60, rem % 60);

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{}s", seconds));
    }

    parts.join(" ")
}

/// Discord relative timestamp markup for a Unix timestamp, e.g. `<t:1700000000:R>`.
pub fn relative_timestamp(unix: i64) -> String {
    format!("<t:{}:R>", unix)
}

/// Discord relative timestamp markup for a moment `offset_secs` from now.
///
/// Negative offsets point into the past.
pub fn relative_from_now(offset_secs: i64) -> String {
    relative_timestamp(Utc::now().timestamp() + offset_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_component() {
        let d = Duration::from_secs(86_400 + 2 * 3_600 + 3 * 60 + 4);
        assert_eq!(format_uptime(d), "1d 2h 3m 4s");
    }

    #[test]
    fn omits_zero_components() {
        assert_eq!(format_uptime(Duration::from_secs(3_600)), "1h");
        assert_eq!(format_uptime(Duration::from_secs(86_400 + 5)), "1d 5s");
    }

    #[test]
    fn zero_renders_as_seconds() {
        assert_eq!(format_uptime(Duration::from_millis(400)), "0s");
    }

    #[test]
    fn relative_markup() {
        assert_eq!(relative_timestamp(1_700_000_000), "<t:1700000000:R>");
    }
}
