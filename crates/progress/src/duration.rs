//! Compact duration formatting.

const SECONDS_PER_MINUTE: u64 = 60;
const MINUTES_PER_HOUR: u64 = 60;
const HOURS_PER_DAY: u64 = 24;

/// Format a number of seconds as a compact string such as `2h30m30s`.
///
/// Fractional seconds are truncated. Zero components are omitted, and a
/// duration with no non-zero component renders as `0s`. Negative and
/// non-finite inputs are treated as zero.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };

    let secs = total % SECONDS_PER_MINUTE;
    let minutes = total / SECONDS_PER_MINUTE;
    let mins = minutes % MINUTES_PER_HOUR;
    let hours = minutes / MINUTES_PER_HOUR;
    let hrs = hours % HOURS_PER_DAY;
    let days = hours / HOURS_PER_DAY;

    let mut out = String::new();
    for (value, unit) in [(days, 'd'), (hrs, 'h'), (mins, 'm'), (secs, 's')] {
        if value != 0 {
            out.push_str(&value.to_string());
            out.push(unit);
        }
    }

    if out.is_empty() {
        out.push_str("0s");
    }
    out
}
