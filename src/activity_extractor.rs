//! # Activity Extractor
//!
//! The extraction pipeline: normalize, extract candidates, select one value
//! per field, fall back to fixed screenshot layouts when image text yields no
//! distance, then cross-derive whatever is still missing.
//!
//! The extractor holds only its configuration and never mutates it, so one
//! instance can be shared across threads and tasks freely.

use crate::activity_model::{
    CandidateSet, CandidateValue, DistanceSource, RawObservation, RecognitionMode,
    ResolvedActivity, ValueSource,
};
use crate::candidate_extractor::extract_candidates;
use crate::candidate_selector::{select_distance, select_pace, select_time};
use crate::combined_patterns::match_layouts;
use crate::cross_deriver::reconcile;
use crate::errors::AppResult;
use crate::extraction_config::ExtractionConfig;
use crate::text_normalizer::normalize;
use lazy_static::lazy_static;
use tracing::{debug, info, warn};

lazy_static! {
    static ref DEFAULT_EXTRACTOR: ActivityExtractor = ActivityExtractor::new();
}

/// Extract a resolved activity using the default configuration
///
/// # Examples
///
/// ```rust
/// use runlog::{extract, RecognitionMode};
///
/// let activity = extract("10 км #япобегал", RecognitionMode::PlainText);
/// assert_eq!(activity.distance_km, Some(10.0));
/// assert_eq!(activity.duration_secs, Some(3600));
/// assert!(activity.is_estimated());
/// ```
pub fn extract(raw_text: &str, mode: RecognitionMode) -> ResolvedActivity {
    DEFAULT_EXTRACTOR.extract(raw_text, mode)
}

/// Activity extractor bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct ActivityExtractor {
    config: ExtractionConfig,
}

impl ActivityExtractor {
    /// Create an extractor with the default configuration
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Create an extractor with a custom configuration
    ///
    /// # Examples
    ///
    /// ```rust
    /// use runlog::{ActivityExtractor, ExtractionConfig, RecognitionMode};
    ///
    /// let config = ExtractionConfig {
    ///     default_pace_secs: 300,
    ///     ..Default::default()
    /// };
    /// let extractor = ActivityExtractor::with_config(config)?;
    /// let activity = extractor.extract("10 km", RecognitionMode::PlainText);
    /// assert_eq!(activity.duration_secs, Some(3000));
    /// # Ok::<(), runlog::AppError>(())
    /// ```
    pub fn with_config(config: ExtractionConfig) -> AppResult<Self> {
        config.validate()?;
        info!(
            default_pace_secs = config.default_pace_secs,
            context_window = config.context_window,
            geo_terms = config.geo_terms.len(),
            "Creating ActivityExtractor with custom config"
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Raw candidate lists for the given text, mostly for diagnostics
    pub fn candidates(&self, raw_text: &str, mode: RecognitionMode) -> CandidateSet {
        extract_candidates(&normalize(raw_text), mode, &self.config)
    }

    pub fn extract_observation(&self, observation: &RawObservation) -> ResolvedActivity {
        self.extract(&observation.text, observation.mode)
    }

    /// Resolve distance, duration and pace from raw text
    ///
    /// Never fails: anything that cannot be determined is left absent.
    pub fn extract(&self, raw_text: &str, mode: RecognitionMode) -> ResolvedActivity {
        let text = normalize(raw_text);
        let candidates = extract_candidates(&text, mode, &self.config);

        let mut activity = ResolvedActivity::default();

        if let Some(candidate) = select_distance(&candidates.distance) {
            activity.distance_km = Some(candidate.value.as_f64());
            activity.distance_source = DistanceSource::Extracted;
        }
        if let Some(CandidateValue::Seconds(secs)) = select_time(&candidates.time).map(|c| c.value) {
            activity.duration_secs = Some(secs);
            activity.duration_source = ValueSource::Extracted;
        }
        if let Some(CandidateValue::Seconds(secs)) = select_pace(&candidates.pace).map(|c| c.value) {
            activity.pace_secs_per_km = Some(secs);
            activity.pace_source = ValueSource::Extracted;
        }

        if activity.distance_km.is_none()
            && mode == RecognitionMode::ImageRecognition
            && self.config.enable_combined_fallback
        {
            if let Some(layout) = match_layouts(&text, &self.config) {
                activity.distance_km = Some(layout.distance_km);
                activity.distance_source = DistanceSource::Combined;
                if let Some(secs) = layout.duration_secs {
                    activity.duration_secs = Some(secs);
                    activity.duration_source = ValueSource::Extracted;
                }
                if let Some(secs) = layout.pace_secs_per_km {
                    activity.pace_secs_per_km = Some(secs);
                    activity.pace_source = ValueSource::Extracted;
                }
            }
        }

        if activity.distance_km.is_none() {
            warn!(
                mode = %mode,
                text = %text,
                candidates = candidates.len(),
                "Could not determine distance"
            );
            return activity;
        }

        let activity = reconcile(activity, &self.config);
        debug!(
            mode = %mode,
            distance_km = ?activity.distance_km,
            duration_secs = ?activity.duration_secs,
            pace_secs_per_km = ?activity.pace_secs_per_km,
            distance_source = ?activity.distance_source,
            duration_source = ?activity.duration_source,
            pace_source = ?activity.pace_source,
            "Resolved activity"
        );
        activity
    }
}
