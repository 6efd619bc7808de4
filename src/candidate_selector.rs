//! # Candidate Selector
//!
//! Picks one candidate per field:
//!
//! - **distance**: highest priority; among equal priorities a value with a
//!   fractional part beats a whole number
//! - **time**: the longest matched clock, so `H:MM:SS` beats a bare `MM:SS`
//! - **pace**: the first candidate in pattern order

use crate::activity_model::Candidate;
use std::cmp::Ordering;

/// Select the best distance candidate
///
/// Ties after both criteria keep the earliest candidate.
pub fn select_distance(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    for candidate in candidates {
        best = match best {
            Some(current) if distance_rank(candidate, current) != Ordering::Greater => Some(current),
            _ => Some(candidate),
        };
    }
    best
}

fn distance_rank(a: &Candidate, b: &Candidate) -> Ordering {
    a.priority
        .partial_cmp(&b.priority)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.has_fraction().cmp(&b.has_fraction()))
}

/// Select the time candidate with the longest matched text
pub fn select_time(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    for candidate in candidates {
        let longer = best.map_or(true, |current| {
            candidate.raw_match.chars().count() > current.raw_match.chars().count()
        });
        if longer {
            best = Some(candidate);
        }
    }
    best
}

/// Select the first pace candidate
pub fn select_pace(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity_model::{CandidateKind, CandidateValue, SourceSpan};

    fn candidate(kind: CandidateKind, value: CandidateValue, priority: f32, raw: &str) -> Candidate {
        Candidate {
            kind,
            value,
            priority,
            source_span: SourceSpan {
                start: 0,
                end: raw.len(),
                context: raw.to_string(),
            },
            raw_match: raw.to_string(),
        }
    }

    fn km(value: f64, priority: f32) -> Candidate {
        candidate(
            CandidateKind::Distance,
            CandidateValue::Kilometers(value),
            priority,
            &value.to_string(),
        )
    }

    #[test]
    fn test_distance_highest_priority_wins() {
        let candidates = vec![km(21.0, 0.3), km(5.0, 0.9), km(7.5, 0.7)];
        let best = select_distance(&candidates).unwrap();
        assert_eq!(best.value, CandidateValue::Kilometers(5.0));
    }

    #[test]
    fn test_distance_fraction_breaks_ties() {
        let candidates = vec![km(10.0, 0.7), km(10.4, 0.7)];
        let best = select_distance(&candidates).unwrap();
        assert_eq!(best.value, CandidateValue::Kilometers(10.4));
    }

    #[test]
    fn test_distance_full_tie_keeps_first() {
        let candidates = vec![km(3.5, 0.7), km(8.25, 0.7)];
        let best = select_distance(&candidates).unwrap();
        assert_eq!(best.value, CandidateValue::Kilometers(3.5));
    }

    #[test]
    fn test_time_longest_match_wins() {
        let candidates = vec![
            candidate(CandidateKind::Time, CandidateValue::Seconds(1530), 1.0, "25:30"),
            candidate(CandidateKind::Time, CandidateValue::Seconds(6188), 0.9, "1:43:08"),
        ];
        let best = select_time(&candidates).unwrap();
        assert_eq!(best.value, CandidateValue::Seconds(6188));
    }

    #[test]
    fn test_pace_first_wins() {
        let candidates = vec![
            candidate(CandidateKind::Pace, CandidateValue::Seconds(411), 1.0, "06'51"),
            candidate(CandidateKind::Pace, CandidateValue::Seconds(330), 0.9, "5:30"),
        ];
        assert_eq!(select_pace(&candidates).unwrap().value, CandidateValue::Seconds(411));
    }

    #[test]
    fn test_empty_lists() {
        assert!(select_distance(&[]).is_none());
        assert!(select_time(&[]).is_none());
        assert!(select_pace(&[]).is_none());
    }
}
