//! # Candidate Extractor
//!
//! Runs the distance, time and pace pattern tables over normalized text and
//! turns every match that passes its guards and range checks into a scored
//! [`Candidate`]. Matches that fail any check are dropped silently; the
//! selector only ever sees plausible values.

use crate::activity_model::{
    Candidate, CandidateKind, CandidateSet, CandidateValue, RecognitionMode, SourceSpan,
};
use crate::activity_patterns::{
    Boundary, PatternRule, ValueReader, DISTANCE_PATTERNS, PACE_PATTERNS, TIME_PATTERNS,
};
use crate::extraction_config::ExtractionConfig;
use crate::formatter::parse_clock_to_seconds;
use regex::Captures;
use tracing::{debug, trace};

/// Extract all distance, time and pace candidates from normalized text
pub fn extract_candidates(
    text: &str,
    mode: RecognitionMode,
    config: &ExtractionConfig,
) -> CandidateSet {
    let pace = collect(text, &PACE_PATTERNS, CandidateKind::Pace, mode, config);
    let mut time = collect(text, &TIME_PATTERNS, CandidateKind::Time, mode, config);
    // A clock already read as a pace ("темп 5:30") is not a duration
    time.retain(|t| !overlaps_any(t, &pace));
    // Likewise a decimal pace ("темп 5.15") is not a distance
    let mut distance = collect(text, &DISTANCE_PATTERNS, CandidateKind::Distance, mode, config);
    distance.retain(|d| !overlaps_any(d, &pace));

    let set = CandidateSet {
        distance,
        time,
        pace,
    };

    debug!(
        mode = %mode,
        distance = set.distance.len(),
        time = set.time.len(),
        pace = set.pace.len(),
        "Extracted candidates"
    );
    set
}

/// Walk one pattern table and collect its accepted candidates in table order
fn collect(
    text: &str,
    rules: &[PatternRule],
    kind: CandidateKind,
    mode: RecognitionMode,
    config: &ExtractionConfig,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for rule in rules {
        for caps in rule.regex.captures_iter(text) {
            let Some((start, end)) = value_span(&caps) else {
                continue;
            };

            if !boundary_accepts(text, start, end, rule.boundary) {
                trace!(pattern = rule.name, raw = &text[start..end], "Rejected by boundary");
                continue;
            }

            let Some(value) = read_value(&caps, rule.reader, kind, mode, config) else {
                trace!(pattern = rule.name, raw = &text[start..end], "Rejected value");
                continue;
            };

            let context = context_window(text, start, end, config.context_window);
            if rule.geo_filtered && mentions_geo_term(&context, &config.geo_terms) {
                debug!(pattern = rule.name, context = %context, "Suppressed by geographic context");
                continue;
            }

            trace!(pattern = rule.name, raw = &text[start..end], priority = rule.priority, "Accepted candidate");
            candidates.push(Candidate {
                kind,
                value,
                priority: rule.priority,
                source_span: SourceSpan {
                    start,
                    end,
                    context,
                },
                raw_match: text[start..end].to_string(),
            });
        }
    }

    candidates
}

/// Byte span from the first to the last participating value group
fn value_span(caps: &Captures<'_>) -> Option<(usize, usize)> {
    let first = caps.get(1)?;
    let last = caps.iter().skip(1).flatten().last().unwrap_or(first);
    Some((first.start(), last.end()))
}

fn read_value(
    caps: &Captures<'_>,
    reader: ValueReader,
    kind: CandidateKind,
    mode: RecognitionMode,
    config: &ExtractionConfig,
) -> Option<CandidateValue> {
    match reader {
        ValueReader::Kilometers => {
            let km = parse_decimal(caps.get(1)?.as_str())?;
            config
                .band_for(mode)
                .contains(km)
                .then_some(CandidateValue::Kilometers(km))
        }
        ValueReader::Clock => {
            let secs = parse_clock_to_seconds(caps.get(1)?.as_str())?;
            seconds_in_range(secs, kind, config).then_some(CandidateValue::Seconds(secs))
        }
        ValueReader::MinutesSeconds => {
            let minutes: u32 = caps.get(1)?.as_str().parse().ok()?;
            let seconds: u32 = caps.get(2)?.as_str().parse().ok()?;
            if seconds >= 60 {
                return None;
            }
            let secs = minutes * 60 + seconds;
            seconds_in_range(secs, kind, config).then_some(CandidateValue::Seconds(secs))
        }
    }
}

fn seconds_in_range(secs: u32, kind: CandidateKind, config: &ExtractionConfig) -> bool {
    match kind {
        CandidateKind::Pace => config.pace_bounds.contains(secs),
        _ => secs > 0 && secs <= config.max_duration_secs,
    }
}

/// Parse a number that may use `,` as the decimal separator
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().replace(',', ".").parse().ok()?;
    value.is_finite().then_some(value)
}

fn boundary_accepts(text: &str, start: usize, end: usize, boundary: Boundary) -> bool {
    let before = &text[..start];
    let after = &text[end..];
    let mut prev = before.chars().rev();
    let mut next = after.chars();
    let p1 = prev.next();
    let p2 = prev.next();
    let n1 = next.next();
    let n2 = next.next();

    let is_digit = |c: Option<char>| c.is_some_and(|c| c.is_ascii_digit());
    let is_decimal_sep = |c: Option<char>| matches!(c, Some('.') | Some(','));
    let continues_number_before = is_digit(p1) || (is_decimal_sep(p1) && is_digit(p2));
    let continues_number_after = is_digit(n1) || (is_decimal_sep(n1) && is_digit(n2));

    match boundary {
        Boundary::NumberStart => !continues_number_before,
        Boundary::ClockStart => !continues_number_before && p1 != Some(':'),
        Boundary::BareNumber => {
            let separator = |c: Option<char>| matches!(c, Some(':' | '\'' | '"' | '/'));
            !continues_number_before
                && !continues_number_after
                && !separator(p1)
                && !separator(n1)
        }
        Boundary::StandaloneClock => {
            !continues_number_before
                && !is_digit(n1)
                && p1 != Some(':')
                && n1 != Some(':')
                && !followed_by_per_km(after)
        }
    }
}

/// Whether the text after a clock starts a `/km` or `мин/км` pace suffix
fn followed_by_per_km(after: &str) -> bool {
    let rest = after.trim_start();
    let lower = rest.to_lowercase();
    let rest = lower
        .strip_prefix("мин")
        .or_else(|| lower.strip_prefix("min"))
        .unwrap_or(&lower);
    let rest = rest.trim_start_matches('.').trim_start();
    rest.starts_with('/')
}

/// The match plus up to `width` characters on each side
pub fn context_window(text: &str, start: usize, end: usize, width: usize) -> String {
    let before: Vec<char> = text[..start].chars().rev().take(width).collect();
    let after: String = text[end..].chars().take(width).collect();
    let mut context: String = before.into_iter().rev().collect();
    context.push_str(&text[start..end]);
    context.push_str(&after);
    context
}

fn spans_overlap(a: &SourceSpan, b: &SourceSpan) -> bool {
    a.start < b.end && b.start < a.end
}

fn overlaps_any(candidate: &Candidate, others: &[Candidate]) -> bool {
    others
        .iter()
        .any(|other| spans_overlap(&other.source_span, &candidate.source_span))
}

/// Whether a geo term starts a word anywhere in the context
///
/// Only the start is anchored so inflected forms ("районе") still count,
/// while terms hidden inside other words ("broad", "пул.") do not.
fn mentions_geo_term(context: &str, terms: &[String]) -> bool {
    let lower = context.to_lowercase();
    terms.iter().filter(|term| !term.is_empty()).any(|term| {
        lower.match_indices(term.as_str()).any(|(at, _)| {
            !lower[..at]
                .chars()
                .next_back()
                .is_some_and(char::is_alphanumeric)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str, mode: RecognitionMode) -> CandidateSet {
        extract_candidates(text, mode, &ExtractionConfig::default())
    }

    fn distances(set: &CandidateSet) -> Vec<(f64, f32)> {
        set.distance
            .iter()
            .map(|c| (c.value.as_f64(), c.priority))
            .collect()
    }

    #[test]
    fn test_decimal_with_unit() {
        let set = extract("пробежал 5,2 км", RecognitionMode::PlainText);
        let top = &set.distance[0];

        assert_eq!(top.value, CandidateValue::Kilometers(5.2));
        assert_eq!(top.priority, 1.0);
        assert_eq!(top.raw_match, "5,2");
    }

    #[test]
    fn test_integer_with_unit_does_not_split_decimals() {
        let set = extract("15,04 км", RecognitionMode::PlainText);
        assert!(!distances(&set).contains(&(4.0, 0.9)));
        assert!(distances(&set).contains(&(15.04, 1.0)));
    }

    #[test]
    fn test_labeled_distance() {
        let set = extract("Дистанция: 7.5", RecognitionMode::PlainText);
        assert!(distances(&set).contains(&(7.5, 0.95)));
    }

    #[test]
    fn test_bare_numbers() {
        let set = extract("сегодня 12.5 и потом 21", RecognitionMode::PlainText);
        let found = distances(&set);

        assert!(found.contains(&(12.5, 0.7)));
        assert!(found.contains(&(21.0, 0.3)));
    }

    #[test]
    fn test_bare_number_followed_by_punctuation() {
        let set = extract("ran 12.5, felt great", RecognitionMode::PlainText);
        assert!(distances(&set).contains(&(12.5, 0.7)));
    }

    #[test]
    fn test_bare_numbers_skip_clock_and_pace_pieces() {
        let set = extract("1:43:08 06'51\"", RecognitionMode::PlainText);
        assert!(set.distance.is_empty());
    }

    #[test]
    fn test_range_check_per_mode() {
        let set = extract("42.3 km", RecognitionMode::ImageRecognition);
        assert!(set.distance.is_empty());

        let set = extract("42.3 km", RecognitionMode::PlainText);
        assert!(distances(&set).contains(&(42.3, 1.0)));

        let set = extract("0.01 km", RecognitionMode::PlainText);
        assert!(set.distance.is_empty());
    }

    #[test]
    fn test_geo_suppression_only_for_bare_numbers() {
        let set = extract("5 км район Строитель", RecognitionMode::PlainText);
        assert_eq!(distances(&set), vec![(5.0, 0.9)]);

        let set = extract("микрорайон 15 старт", RecognitionMode::PlainText);
        assert!(set.distance.is_empty());

        let set = extract("забег 15 старт", RecognitionMode::PlainText);
        assert_eq!(distances(&set), vec![(15.0, 0.3)]);
    }

    #[test]
    fn test_time_candidates() {
        let set = extract("1:43:08 и 25:30", RecognitionMode::PlainText);
        let raws: Vec<&str> = set.time.iter().map(|c| c.raw_match.as_str()).collect();

        assert_eq!(raws, vec!["1:43:08", "25:30"]);
        assert_eq!(set.time[0].value, CandidateValue::Seconds(6188));
    }

    #[test]
    fn test_labeled_time() {
        let set = extract("Время: 45:10", RecognitionMode::PlainText);
        assert_eq!(set.time[0].priority, 1.0);
        assert_eq!(set.time[0].value, CandidateValue::Seconds(2710));
    }

    #[test]
    fn test_slash_pace_is_not_a_time() {
        let set = extract("5:30/км", RecognitionMode::PlainText);
        assert!(set.time.is_empty());
        assert_eq!(set.pace[0].value, CandidateValue::Seconds(330));

        let set = extract("5:30 мин/км", RecognitionMode::PlainText);
        assert!(set.time.is_empty());
        assert_eq!(set.pace.len(), 1);
    }

    #[test]
    fn test_labeled_pace_is_not_a_time() {
        let set = extract("10 km pace 6:00", RecognitionMode::PlainText);

        assert!(set.time.is_empty());
        assert_eq!(set.pace[0].value, CandidateValue::Seconds(360));
    }

    #[test]
    fn test_quote_pace() {
        let set = extract("06'51\"", RecognitionMode::ImageRecognition);
        assert_eq!(set.pace[0].value, CandidateValue::Seconds(411));

        let set = extract("5'45", RecognitionMode::PlainText);
        assert_eq!(set.pace[0].value, CandidateValue::Seconds(345));
    }

    #[test]
    fn test_compact_quote_pace() {
        let set = extract("темп 551\"", RecognitionMode::ImageRecognition);
        assert_eq!(set.pace[0].value, CandidateValue::Seconds(351));

        let set = extract("575\"", RecognitionMode::ImageRecognition);
        assert!(set.pace.is_empty());
    }

    #[test]
    fn test_pace_out_of_bounds() {
        let set = extract("0'30\"", RecognitionMode::PlainText);
        assert!(set.pace.is_empty());

        let set = extract("25'00\"", RecognitionMode::PlainText);
        assert!(set.pace.is_empty());
    }

    #[test]
    fn test_decimal_pace_is_not_a_distance() {
        let set = extract("Темп 5.15 12.45 1:05:30", RecognitionMode::ImageRecognition);

        assert_eq!(set.pace[0].value, CandidateValue::Seconds(315));
        assert_eq!(distances(&set), vec![(12.45, 0.7)]);

        let set = extract("Время 30:00 темп 6.00", RecognitionMode::PlainText);
        assert!(set.distance.is_empty());
        assert_eq!(set.pace.len(), 1);
    }

    #[test]
    fn test_geo_window_edge() {
        // "район" starts 12 characters before "15"
        let text = "район старт 15";
        let narrow = ExtractionConfig {
            context_window: 11,
            ..Default::default()
        };
        let wide = ExtractionConfig {
            context_window: 12,
            ..Default::default()
        };

        let set = extract_candidates(text, RecognitionMode::PlainText, &narrow);
        assert_eq!(distances(&set), vec![(15.0, 0.3)]);

        let set = extract_candidates(text, RecognitionMode::PlainText, &wide);
        assert!(set.distance.is_empty());
    }

    #[test]
    fn test_geo_terms_match_word_starts() {
        let terms: Vec<String> = ["road", "ул.", "район"].iter().map(|t| t.to_string()).collect();

        assert!(mentions_geo_term("Main Road 15", &terms));
        assert!(mentions_geo_term("в районе 15", &terms));
        assert!(mentions_geo_term("ул. Ленина 21", &terms));
        assert!(!mentions_geo_term("broad 15", &terms));
        assert!(!mentions_geo_term("пул. 15", &terms));
        assert!(!mentions_geo_term("микрорайон 15", &terms));
    }

    #[test]
    fn test_context_window_uses_characters() {
        let text = "район 15 старт";
        let start = text.find("15").unwrap();
        let context = context_window(text, start, start + 2, 3);
        assert_eq!(context, "он 15 ст");
    }
}
