//! Display formatting for report values.

use serde_json::Value;

use super::raw::coerce_number;

/// Placeholder shown for any value the engine did not report.
pub const UNKNOWN: &str = "unknown";

/// Format a duration in seconds.
///
/// - `{h}h {m}m` at one hour or more
/// - `{m}m {s}s` at one minute or more
/// - `{s}s` otherwise
///
/// Each unit is truncated. Missing, negative, or non-finite input gives
/// `"unknown"`.
pub fn format_print_time(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds.filter(|s| s.is_finite() && *s >= 0.0) else {
        return UNKNOWN.to_string();
    };

    let total = seconds.trunc() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Format a duration given as an arbitrary JSON value.
/// Numbers and numeric strings are accepted; anything else is unknown.
pub fn format_print_time_value(value: &Value) -> String {
    format_print_time(coerce_number(value))
}

/// `value` with `decimals` places and a unit suffix, or `unknown`.
pub fn format_quantity(value: Option<f64>, decimals: usize, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.*} {}", decimals, v, unit),
        None => UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(format_print_time(Some(3725.0)), "1h 2m");
        assert_eq!(format_print_time(Some(3600.0)), "1h 0m");
        assert_eq!(format_print_time(Some(90061.0)), "25h 1m");
    }

    #[test]
    fn test_minutes_and_seconds() {
        assert_eq!(format_print_time(Some(125.0)), "2m 5s");
        assert_eq!(format_print_time(Some(60.0)), "1m 0s");
        assert_eq!(format_print_time(Some(3599.0)), "59m 59s");
    }

    #[test]
    fn test_seconds_only() {
        assert_eq!(format_print_time(Some(0.0)), "0s");
        assert_eq!(format_print_time(Some(59.0)), "59s");
    }

    #[test]
    fn test_truncates_instead_of_rounding() {
        assert_eq!(format_print_time(Some(59.99)), "59s");
        assert_eq!(format_print_time(Some(3659.9)), "1h 0m");
        assert_eq!(format_print_time(Some(119.5)), "1m 59s");
    }

    #[test]
    fn test_unknown_inputs() {
        assert_eq!(format_print_time(None), "unknown");
        assert_eq!(format_print_time(Some(-1.0)), "unknown");
        assert_eq!(format_print_time(Some(f64::NAN)), "unknown");
        assert_eq!(format_print_time(Some(f64::INFINITY)), "unknown");
    }

    #[test]
    fn test_json_values() {
        assert_eq!(format_print_time_value(&json!(3725)), "1h 2m");
        assert_eq!(format_print_time_value(&json!("125")), "2m 5s");
        assert_eq!(format_print_time_value(&json!("about an hour")), "unknown");
        assert_eq!(format_print_time_value(&json!(null)), "unknown");
        assert_eq!(format_print_time_value(&json!({ "seconds": 5 })), "unknown");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(Some(2.1), 2, "g"), "2.10 g");
        assert_eq!(format_quantity(None, 2, "g"), "unknown");
    }
}
