//! # Activity Data Model
//!
//! This module defines the data structures passed through the extraction
//! pipeline: the input observation, the tentative candidates produced by the
//! pattern tables, and the resolved activity handed back to the caller.
//!
//! ## Core Concepts
//!
//! - **RawObservation**: the text to analyze and where it came from
//! - **Candidate**: one tentative value for distance, time or pace
//! - **ResolvedActivity**: the final (distance, duration, pace) triple with
//!   a source tag per field
//!
//! ## Usage
//!
//! ```rust
//! use runlog::activity_model::{DistanceSource, ResolvedActivity, ValueSource};
//!
//! let activity = ResolvedActivity {
//!     distance_km: Some(10.0),
//!     distance_source: DistanceSource::Extracted,
//!     duration_secs: Some(3600),
//!     duration_source: ValueSource::Extracted,
//!     ..Default::default()
//! };
//! assert!(activity.has_distance());
//! assert!(!activity.is_estimated());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the text being analyzed came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RecognitionMode {
    /// Free-form chat message (e.g. "5.2 км #япобегал")
    #[default]
    PlainText,
    /// Text recognized from a screenshot of a fitness app
    ImageRecognition,
}

impl fmt::Display for RecognitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionMode::PlainText => write!(f, "plain-text"),
            RecognitionMode::ImageRecognition => write!(f, "image-recognition"),
        }
    }
}

/// Input of a single extraction call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// The raw text as received from chat or OCR
    pub text: String,
    /// Context hint selecting validity bands and fallbacks
    pub mode: RecognitionMode,
}

impl RawObservation {
    /// Observation coming from a chat message
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: RecognitionMode::PlainText,
        }
    }

    /// Observation coming from OCR of a screenshot
    pub fn image(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: RecognitionMode::ImageRecognition,
        }
    }
}

/// Which field a candidate is proposed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateKind {
    Distance,
    Time,
    Pace,
}

/// Parsed value carried by a candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CandidateValue {
    /// Distance in kilometers
    Kilometers(f64),
    /// Duration in seconds (time candidates) or seconds per km (pace candidates)
    Seconds(u32),
}

impl CandidateValue {
    /// Numeric value regardless of unit
    pub fn as_f64(&self) -> f64 {
        match *self {
            CandidateValue::Kilometers(km) => km,
            CandidateValue::Seconds(secs) => f64::from(secs),
        }
    }
}

/// Location of a match inside the normalized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Byte offset of the match start in the normalized text
    pub start: usize,
    /// Byte offset of the match end in the normalized text
    pub end: usize,
    /// The match together with the surrounding context window
    pub context: String,
}

/// A tentative value for one field, scored for disambiguation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub kind: CandidateKind,
    pub value: CandidateValue,
    /// Confidence of the pattern that produced this candidate (0.0 to 1.0)
    pub priority: f32,
    pub source_span: SourceSpan,
    /// The exact text the pattern matched
    pub raw_match: String,
}

impl Candidate {
    /// Whether the candidate value carries a non-zero fractional part
    pub fn has_fraction(&self) -> bool {
        self.value.as_f64().fract() != 0.0
    }
}

/// Candidate lists produced by one extraction pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateSet {
    pub distance: Vec<Candidate>,
    pub time: Vec<Candidate>,
    pub pace: Vec<Candidate>,
}

impl CandidateSet {
    /// Total number of candidates over all kinds
    pub fn len(&self) -> usize {
        self.distance.len() + self.time.len() + self.pace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How the resolved distance was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceSource {
    /// Found by the independent distance patterns
    Extracted,
    /// Found by a fixed multi-field screenshot layout
    Combined,
    /// Could not be determined
    #[default]
    Absent,
}

/// How a resolved duration or pace was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueSource {
    /// Read directly from the text
    Extracted,
    /// Computed from the distance and the other field
    Derived,
    /// Computed from the distance and the default pace
    Estimated,
    /// Could not be determined
    #[default]
    Absent,
}

/// The final output of an extraction call
///
/// Absent fields mean "could not determine"; the caller decides whether to
/// ask the user for a clearer message or photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedActivity {
    pub distance_km: Option<f64>,
    /// Duration in whole seconds
    pub duration_secs: Option<u32>,
    /// Pace in seconds per kilometer
    pub pace_secs_per_km: Option<u32>,
    pub distance_source: DistanceSource,
    pub duration_source: ValueSource,
    pub pace_source: ValueSource,
}

impl ResolvedActivity {
    pub fn has_distance(&self) -> bool {
        self.distance_km.is_some()
    }

    /// True when any value was filled in from the default pace
    pub fn is_estimated(&self) -> bool {
        self.duration_source == ValueSource::Estimated || self.pace_source == ValueSource::Estimated
    }

    /// True when distance, duration and pace are all present
    pub fn is_complete(&self) -> bool {
        self.distance_km.is_some() && self.duration_secs.is_some() && self.pace_secs_per_km.is_some()
    }
}
