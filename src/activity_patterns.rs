//! # Activity Patterns Module
//!
//! Regex tables for distance, time and pace recognition. Each entry pairs a
//! compiled pattern with its priority, the way its captures are read and the
//! guards a match must pass before it becomes a candidate. Tables are listed
//! in priority order; the candidate extractor walks them generically.

use lazy_static::lazy_static;
use regex::Regex;

/// Kilometer unit marker, spelled-out forms first
pub const KM_UNIT: &str = r"(?:километр\w*|kilomet\w*|км|km)";

/// How the capture groups of a match are turned into a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueReader {
    /// Group 1 is a decimal number with `.` or `,` separator
    Kilometers,
    /// Group 1 is an `H:MM:SS` or `MM:SS` clock
    Clock,
    /// Group 1 is minutes, group 2 is seconds
    MinutesSeconds,
}

/// Which neighbouring characters disqualify a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The number must not continue a preceding number (`15,04` must not yield `04`)
    NumberStart,
    /// Like `NumberStart`, and the number must not continue a clock either
    ClockStart,
    /// Bare number standing alone: no digits or separators `.,:'"/` on either side
    BareNumber,
    /// Clock standing alone and not followed by a `/km` pace suffix
    StandaloneClock,
}

/// One row of a pattern table
#[derive(Debug)]
pub struct PatternRule {
    pub name: &'static str,
    pub regex: Regex,
    pub priority: f32,
    pub reader: ValueReader,
    pub boundary: Boundary,
    /// Whether area/address words near the match suppress it
    pub geo_filtered: bool,
}

impl PatternRule {
    fn new(
        name: &'static str,
        pattern: &str,
        priority: f32,
        reader: ValueReader,
        boundary: Boundary,
        geo_filtered: bool,
    ) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("Activity pattern should be valid"),
            priority,
            reader,
            boundary,
            geo_filtered,
        }
    }
}

lazy_static! {
    /// Distance patterns, highest priority first
    pub static ref DISTANCE_PATTERNS: Vec<PatternRule> = vec![
        PatternRule::new(
            "decimal_with_unit",
            &format!(r"(?i)(\d+[.,]\d+)\s*{KM_UNIT}"),
            1.0,
            ValueReader::Kilometers,
            Boundary::NumberStart,
            false,
        ),
        PatternRule::new(
            "integer_with_unit",
            &format!(r"(?i)(\d+)\s*{KM_UNIT}"),
            0.9,
            ValueReader::Kilometers,
            Boundary::NumberStart,
            false,
        ),
        PatternRule::new(
            "labeled_distance",
            r"(?i)(?:дистанция|расстояние|distance)\s*:?\s*(\d+(?:[.,]\d+)?)",
            0.95,
            ValueReader::Kilometers,
            Boundary::NumberStart,
            false,
        ),
        PatternRule::new(
            "bare_decimal",
            r"(\d+[.,]\d+)",
            0.7,
            ValueReader::Kilometers,
            Boundary::BareNumber,
            true,
        ),
        PatternRule::new(
            "bare_integer",
            r"(\d{2,3})",
            0.3,
            ValueReader::Kilometers,
            Boundary::BareNumber,
            true,
        ),
    ];

    /// Time patterns; selection prefers the longest clock, not table order
    pub static ref TIME_PATTERNS: Vec<PatternRule> = vec![
        PatternRule::new(
            "labeled_time",
            r"(?i)(?:время|длительность|time|duration)\s*:?\s*(\d{1,2}:\d{2}(?::\d{2})?)",
            1.0,
            ValueReader::Clock,
            Boundary::StandaloneClock,
            false,
        ),
        PatternRule::new(
            "hours_minutes_seconds",
            r"(\d{1,2}:\d{2}:\d{2})",
            0.9,
            ValueReader::Clock,
            Boundary::StandaloneClock,
            false,
        ),
        PatternRule::new(
            "minutes_seconds",
            r"(\d{1,2}:\d{2})",
            0.8,
            ValueReader::Clock,
            Boundary::StandaloneClock,
            false,
        ),
    ];

    /// Pace patterns; the first candidate in table order wins
    pub static ref PACE_PATTERNS: Vec<PatternRule> = vec![
        PatternRule::new(
            "quote_marks",
            r#"(\d{1,2})\s?'\s?(\d{2})(?:"|\b)"#,
            1.0,
            ValueReader::MinutesSeconds,
            Boundary::NumberStart,
            false,
        ),
        PatternRule::new(
            "compact_quote",
            r#"(\d)(\d{2})""#,
            0.95,
            ValueReader::MinutesSeconds,
            Boundary::NumberStart,
            false,
        ),
        PatternRule::new(
            "per_km_slash",
            &format!(r"(?i)(\d{{1,2}}:\d{{2}})\s*(?:мин|min)?\.?\s*/\s*{KM_UNIT}"),
            0.9,
            ValueReader::Clock,
            Boundary::ClockStart,
            false,
        ),
        PatternRule::new(
            "labeled_pace",
            r"(?i)(?:темп|pace)\s*:?\s*(\d{1,2})[:'.](\d{2})",
            0.85,
            ValueReader::MinutesSeconds,
            Boundary::NumberStart,
            false,
        ),
    ];
}
