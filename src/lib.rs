//! # Runlog
//!
//! Extraction engine for a running-club Telegram bot. It reads the distance,
//! duration and pace of a workout from a hashtagged chat message or from OCR
//! text of a fitness-app screenshot, and reconciles them into one consistent
//! [`ResolvedActivity`].
//!
//! ```rust
//! use runlog::{extract, RecognitionMode, ValueSource};
//!
//! let activity = extract("1:43:08 15,04 км 06'51\"", RecognitionMode::ImageRecognition);
//! assert_eq!(activity.distance_km, Some(15.04));
//! assert_eq!(activity.duration_secs, Some(6188));
//! assert_eq!(activity.pace_source, ValueSource::Extracted);
//! ```

pub mod activity_extractor;
pub mod activity_model;
pub mod activity_patterns;
pub mod batch;
pub mod candidate_extractor;
pub mod candidate_selector;
pub mod combined_patterns;
pub mod cross_deriver;
pub mod errors;
pub mod extraction_config;
pub mod formatter;
pub mod text_normalizer;

pub use activity_extractor::{extract, ActivityExtractor};
pub use activity_model::{
    Candidate, CandidateKind, CandidateSet, CandidateValue, DistanceSource, RawObservation,
    RecognitionMode, ResolvedActivity, ValueSource,
};
pub use errors::{AppError, AppResult};
pub use extraction_config::ExtractionConfig;
pub use formatter::{format_activity, FormattedActivity};
