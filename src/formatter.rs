//! # Formatter Module
//!
//! Conversions between clock strings and seconds, and display strings for a
//! resolved activity. Nothing in here makes extraction decisions.

use crate::activity_model::ResolvedActivity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parse an `H:MM:SS` or `MM:SS` clock string into seconds
///
/// Returns `None` unless the string splits on `:` into 2 or 3 purely numeric
/// components whose trailing components are two digits below 60.
///
/// # Examples
///
/// ```rust
/// use runlog::formatter::parse_clock_to_seconds;
///
/// assert_eq!(parse_clock_to_seconds("1:43:08"), Some(6188));
/// assert_eq!(parse_clock_to_seconds("25:30"), Some(1530));
/// assert_eq!(parse_clock_to_seconds("5:75"), None);
/// assert_eq!(parse_clock_to_seconds("1:2:3:4"), None);
/// ```
pub fn parse_clock_to_seconds(text: &str) -> Option<u32> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() != 2 && parts.len() != 3 {
        return None;
    }

    let leading = parts[0];
    if leading.is_empty() || leading.len() > 4 || !leading.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut total: u32 = leading.parse().ok()?;

    for part in &parts[1..] {
        if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value: u32 = part.parse().ok()?;
        if value >= 60 {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(value)?;
    }

    Some(total)
}

/// Render a duration as `H:MM:SS` (one hour or more) or `MM:SS`
///
/// Parsing and rendering round-trip only for canonical clocks: no zero hour
/// (`"0:05:30"` renders back as `"05:30"`) and minutes below 60 in `MM:SS`
/// form (`"90:00"` renders back as `"1:30:00"`).
///
/// # Examples
///
/// ```rust
/// use runlog::formatter::format_duration;
///
/// assert_eq!(format_duration(3600), "1:00:00");
/// assert_eq!(format_duration(330), "05:30");
/// assert_eq!(format_duration(5400), "1:30:00");
/// ```
pub fn format_duration(secs: u32) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Render a pace in seconds per km as `M:SS`
///
/// # Examples
///
/// ```rust
/// use runlog::formatter::format_pace;
///
/// assert_eq!(format_pace(360), "6:00");
/// assert_eq!(format_pace(411), "6:51");
/// ```
pub fn format_pace(secs_per_km: u32) -> String {
    format!("{}:{:02}", secs_per_km / 60, secs_per_km % 60)
}

/// Render a distance with at most two decimals and no trailing zeros
pub fn format_distance(km: f64) -> String {
    let fixed = format!("{km:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Display strings for a resolved activity; absent fields stay `None`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedActivity {
    pub distance: Option<String>,
    pub duration: Option<String>,
    pub pace: Option<String>,
    /// Whether duration and pace come from the default-pace estimate
    pub estimated: bool,
}

/// Render every present field of a resolved activity
pub fn format_activity(activity: &ResolvedActivity) -> FormattedActivity {
    FormattedActivity {
        distance: activity.distance_km.map(format_distance),
        duration: activity.duration_secs.map(format_duration),
        pace: activity.pace_secs_per_km.map(format_pace),
        estimated: activity.is_estimated(),
    }
}

impl fmt::Display for FormattedActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref distance) = self.distance {
            parts.push(format!("{distance} km"));
        }
        if let Some(ref duration) = self.duration {
            parts.push(duration.clone());
        }
        if let Some(ref pace) = self.pace {
            parts.push(format!("{pace}/km"));
        }

        write!(f, "{}", parts.join(", "))?;
        if self.estimated {
            write!(f, " (estimated)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity_model::{DistanceSource, ValueSource};

    #[test]
    fn test_parse_clock_formats() {
        assert_eq!(parse_clock_to_seconds("1:00:00"), Some(3600));
        assert_eq!(parse_clock_to_seconds("05:30"), Some(330));
        assert_eq!(parse_clock_to_seconds("0:59"), Some(59));
        assert_eq!(parse_clock_to_seconds(" 12:00 "), Some(720));
    }

    #[test]
    fn test_parse_clock_rejects_malformed() {
        assert_eq!(parse_clock_to_seconds(""), None);
        assert_eq!(parse_clock_to_seconds("15"), None);
        assert_eq!(parse_clock_to_seconds("1:5"), None);
        assert_eq!(parse_clock_to_seconds("a:30"), None);
        assert_eq!(parse_clock_to_seconds("1:60"), None);
        assert_eq!(parse_clock_to_seconds(":30"), None);
        assert_eq!(parse_clock_to_seconds("1:30:"), None);
    }

    #[test]
    fn test_format_distance_trims_zeros() {
        assert_eq!(format_distance(10.0), "10");
        assert_eq!(format_distance(5.5), "5.5");
        assert_eq!(format_distance(15.04), "15.04");
        assert_eq!(format_distance(42.2), "42.2");
    }

    #[test]
    fn test_format_activity_estimated() {
        let activity = ResolvedActivity {
            distance_km: Some(10.0),
            duration_secs: Some(3600),
            pace_secs_per_km: Some(360),
            distance_source: DistanceSource::Extracted,
            duration_source: ValueSource::Estimated,
            pace_source: ValueSource::Estimated,
        };

        let formatted = format_activity(&activity);
        assert_eq!(formatted.distance.as_deref(), Some("10"));
        assert_eq!(formatted.duration.as_deref(), Some("1:00:00"));
        assert_eq!(formatted.pace.as_deref(), Some("6:00"));
        assert_eq!(formatted.to_string(), "10 km, 1:00:00, 6:00/km (estimated)");
    }

    #[test]
    fn test_format_activity_absent_fields() {
        let formatted = format_activity(&ResolvedActivity::default());

        assert_eq!(formatted, FormattedActivity::default());
        assert_eq!(formatted.to_string(), "");
    }
}
