//! # Combined Pattern Fallback
//!
//! Fixed multi-field layouts seen in fitness-app screenshot exports, where
//! duration, distance and pace sit next to each other in a known order.
//! Only consulted for image recognition when no distance candidate survived.

use crate::candidate_extractor::parse_decimal;
use crate::extraction_config::ExtractionConfig;
use crate::formatter::parse_clock_to_seconds;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::debug;

/// Where the pace sits in a layout's capture groups
#[derive(Debug, Clone, Copy)]
enum PaceGroups {
    /// `M'SS"`: minutes and seconds in two groups
    Quote(usize, usize),
    /// `M:SS` clock in one group
    Clock(usize),
}

#[derive(Debug)]
struct Layout {
    name: &'static str,
    regex: Regex,
    time_group: usize,
    distance_group: usize,
    pace: PaceGroups,
}

impl Layout {
    fn new(
        name: &'static str,
        pattern: &str,
        time_group: usize,
        distance_group: usize,
        pace: PaceGroups,
    ) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("Layout pattern should be valid"),
            time_group,
            distance_group,
            pace,
        }
    }
}

lazy_static! {
    static ref LAYOUTS: Vec<Layout> = vec![
        // Samsung Health: 1:43:08 15,04 км 06'51"
        Layout::new(
            "time_distance_quote_pace",
            r#"(?i)(\d{1,2}:\d{2}:\d{2})\s+(\d+(?:[.,]\d+)?)\s*(?:км|km)?\s+(\d{1,2})'(\d{2})"?"#,
            1,
            2,
            PaceGroups::Quote(3, 4),
        ),
        // 15,04 км 1:43:08 06'51"
        Layout::new(
            "distance_time_quote_pace",
            r#"(?i)(\d+(?:[.,]\d+)?)\s*(?:км|km)?\s+(\d{1,2}:\d{2}(?::\d{2})?)\s+(\d{1,2})'(\d{2})"?"#,
            2,
            1,
            PaceGroups::Quote(3, 4),
        ),
        // 1:43:08 15,04 6:51 /км
        Layout::new(
            "time_distance_clock_pace",
            r"(?i)(\d{1,2}:\d{2}:\d{2})\s+(\d+(?:[.,]\d+)?)\s*(?:км|km)?\s+(\d{1,2}:\d{2})(?:\s*/\s*(?:км|km))?",
            1,
            2,
            PaceGroups::Clock(3),
        ),
    ];
}

/// Values read from a matching layout
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutMatch {
    pub layout: &'static str,
    pub distance_km: f64,
    pub duration_secs: Option<u32>,
    pub pace_secs_per_km: Option<u32>,
}

/// Try every layout in order; the first in-band distance wins
///
/// Durations and paces that fail their own bounds come back as `None`
/// while the distance is still reported.
pub fn match_layouts(text: &str, config: &ExtractionConfig) -> Option<LayoutMatch> {
    for layout in LAYOUTS.iter() {
        for caps in layout.regex.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if continues_previous_token(text, whole.start()) {
                continue;
            }

            let Some(distance_km) = caps
                .get(layout.distance_group)
                .and_then(|m| parse_decimal(m.as_str()))
            else {
                continue;
            };
            if !config.image_band.contains(distance_km) {
                debug!(layout = layout.name, distance_km, "Layout distance out of band");
                continue;
            }

            let duration_secs = caps
                .get(layout.time_group)
                .and_then(|m| parse_clock_to_seconds(m.as_str()))
                .filter(|secs| *secs > 0 && *secs <= config.max_duration_secs);
            let pace_secs_per_km =
                read_pace(&caps, layout.pace).filter(|secs| config.pace_bounds.contains(*secs));

            debug!(
                layout = layout.name,
                distance_km,
                ?duration_secs,
                ?pace_secs_per_km,
                "Combined layout matched"
            );
            return Some(LayoutMatch {
                layout: layout.name,
                distance_km,
                duration_secs,
                pace_secs_per_km,
            });
        }
    }
    None
}

fn read_pace(caps: &Captures<'_>, groups: PaceGroups) -> Option<u32> {
    match groups {
        PaceGroups::Quote(minutes, seconds) => {
            let minutes: u32 = caps.get(minutes)?.as_str().parse().ok()?;
            let seconds: u32 = caps.get(seconds)?.as_str().parse().ok()?;
            (seconds < 60).then_some(minutes * 60 + seconds)
        }
        PaceGroups::Clock(group) => parse_clock_to_seconds(caps.get(group)?.as_str()),
    }
}

fn continues_previous_token(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, ':' | '.' | ','))
}
