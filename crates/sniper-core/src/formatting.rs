use std::time::Duration;

/// Format a countdown the way the status line shows it, rounded to the
/// nearest second.
///
/// * `< 1` minute → `"25s"`
/// * `< 1` hour → `"1m5s"`
/// * otherwise → `"1h0m0s"`
///
/// # Examples
///
/// ```
/// use sniper_core::formatting::format_countdown;
/// use std::time::Duration;
///
/// assert_eq!(format_countdown(Duration::from_millis(24_600)), "25s");
/// assert_eq!(format_countdown(Duration::from_secs(65)),       "1m5s");
/// assert_eq!(format_countdown(Duration::from_secs(3_600)),    "1h0m0s");
/// assert_eq!(format_countdown(Duration::ZERO),                "0s");
/// ```
pub fn format_countdown(remaining: Duration) -> String {
    let total_secs = (remaining.as_millis() + 500) / 1000;
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m{}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Truncate `s` to at most `max_len` characters, ending in `"..."` when cut.
///
/// # Examples
///
/// ```
/// use sniper_core::formatting::truncate;
///
/// assert_eq!(truncate("student@vt.edu", 35), "student@vt.edu");
/// assert_eq!(truncate("abcdefghij", 8), "abcde...");
/// ```
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_countdown ─────────────────────────────────────────────────────

    #[test]
    fn test_format_countdown_seconds() {
        assert_eq!(format_countdown(Duration::from_secs(30)), "30s");
    }

    #[test]
    fn test_format_countdown_rounds_half_up() {
        assert_eq!(format_countdown(Duration::from_millis(1_500)), "2s");
        assert_eq!(format_countdown(Duration::from_millis(1_499)), "1s");
    }

    #[test]
    fn test_format_countdown_minutes() {
        assert_eq!(format_countdown(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_countdown(Duration::from_secs(120)), "2m0s");
    }

    #[test]
    fn test_format_countdown_hours() {
        assert_eq!(format_countdown(Duration::from_secs(3_725)), "1h2m5s");
    }

    // ── truncate ─────────────────────────────────────────────────────────────

    #[test]
    fn test_truncate_short_untouched() {
        assert_eq!(truncate("abc", 3), "abc");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(
            truncate("a.very.long.address@students.vt.edu", 20),
            "a.very.long.addre..."
        );
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }
}
