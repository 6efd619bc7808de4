//! # Extraction Configuration Module
//!
//! This module defines the tunable limits used by the extraction pipeline:
//! distance validity bands per recognition mode, pace and duration bounds,
//! the default pace used for estimates, and the geographic blocklist for
//! bare-number distance candidates.

use crate::activity_model::RecognitionMode;
use crate::errors::{AppError, AppResult};
use crate::formatter::parse_clock_to_seconds;
use tracing::{debug, info};

// Constants for extraction configuration
pub const DEFAULT_PACE_SECS: u32 = 360; // 6:00/km
pub const DEFAULT_CONTEXT_WINDOW: usize = 20;
pub const MAX_DURATION_SECS: u32 = 86_400; // one day

/// Address and area words that disqualify a nearby bare number as a distance
pub const DEFAULT_GEO_TERMS: &[&str] = &[
    "район",
    "р-н",
    "микрорайон",
    "мкр",
    "улица",
    "ул.",
    "проспект",
    "пр-т",
    "переулок",
    "шоссе",
    "квартал",
    "бульвар",
    "набережная",
    "дом ",
    "корпус",
    "область",
    "street",
    "avenue",
    "district",
    "road",
];

/// Inclusive range of accepted distances in kilometers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceBand {
    pub min_km: f64,
    pub max_km: f64,
}

impl DistanceBand {
    pub const fn new(min_km: f64, max_km: f64) -> Self {
        Self { min_km, max_km }
    }

    pub fn contains(&self, km: f64) -> bool {
        km >= self.min_km && km <= self.max_km
    }
}

/// Inclusive range of accepted values in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondsBounds {
    pub min: u32,
    pub max: u32,
}

impl SecondsBounds {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, secs: u32) -> bool {
        secs >= self.min && secs <= self.max
    }
}

/// Configuration structure for activity extraction
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Distance band for chat messages
    pub plain_text_band: DistanceBand,
    /// Distance band for screenshot recognition (marathon ceiling)
    pub image_band: DistanceBand,
    /// Pace assumed when neither time nor pace could be read
    pub default_pace_secs: u32,
    /// Accepted pace range in seconds per km, for extracted and computed paces
    pub pace_bounds: SecondsBounds,
    /// Accepted range for durations computed from a pace
    pub derived_duration_bounds: SecondsBounds,
    /// Upper bound for durations read from text
    pub max_duration_secs: u32,
    /// Characters inspected on each side of a bare number for geo terms
    pub context_window: usize,
    /// Lowercase geographic/address terms suppressing bare-number distances
    pub geo_terms: Vec<String>,
    /// Whether image-mode extraction may fall back to fixed screenshot layouts
    pub enable_combined_fallback: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            plain_text_band: DistanceBand::new(0.1, 100.0),
            image_band: DistanceBand::new(0.5, 42.2),
            default_pace_secs: DEFAULT_PACE_SECS,
            pace_bounds: SecondsBounds::new(60, 1200),
            derived_duration_bounds: SecondsBounds::new(60, 36_000),
            max_duration_secs: MAX_DURATION_SECS,
            context_window: DEFAULT_CONTEXT_WINDOW,
            geo_terms: DEFAULT_GEO_TERMS.iter().map(|t| t.to_string()).collect(),
            enable_combined_fallback: true,
        }
    }
}

impl ExtractionConfig {
    /// Distance band that applies to the given recognition mode
    pub fn band_for(&self, mode: RecognitionMode) -> DistanceBand {
        match mode {
            RecognitionMode::PlainText => self.plain_text_band,
            RecognitionMode::ImageRecognition => self.image_band,
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> AppResult<()> {
        for (name, band) in [
            ("plain_text_band", &self.plain_text_band),
            ("image_band", &self.image_band),
        ] {
            let well_formed = band.min_km > 0.0 && band.max_km >= band.min_km && band.max_km.is_finite();
            if !well_formed {
                return Err(AppError::Config(format!(
                    "{name} must satisfy 0 < min <= max, got [{}, {}]",
                    band.min_km, band.max_km
                )));
            }
        }

        if self.pace_bounds.min == 0 || self.pace_bounds.max < self.pace_bounds.min {
            return Err(AppError::Config(format!(
                "pace_bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.pace_bounds.min, self.pace_bounds.max
            )));
        }

        if self.derived_duration_bounds.max < self.derived_duration_bounds.min {
            return Err(AppError::Config(
                "derived_duration_bounds are inverted".to_string(),
            ));
        }

        if !self.pace_bounds.contains(self.default_pace_secs) {
            return Err(AppError::Config(format!(
                "default_pace_secs {} is outside pace bounds [{}, {}]",
                self.default_pace_secs, self.pace_bounds.min, self.pace_bounds.max
            )));
        }

        if self.max_duration_secs == 0 {
            return Err(AppError::Config(
                "max_duration_secs must be greater than 0".to_string(),
            ));
        }

        if self.context_window == 0 {
            return Err(AppError::Config(
                "context_window must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Build a configuration from the process environment
    ///
    /// A `.env` file is not loaded here; the binary loads it once at startup.
    ///
    /// Recognized variables:
    ///
    /// * `RUNLOG_DEFAULT_PACE` - `M:SS` or plain seconds per km
    /// * `RUNLOG_CONTEXT_WINDOW` - characters around bare numbers
    /// * `RUNLOG_PLAIN_MAX_KM` - upper distance bound for chat text
    /// * `RUNLOG_IMAGE_MAX_KM` - upper distance bound for screenshots
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("RUNLOG_DEFAULT_PACE") {
            config.default_pace_secs = parse_pace_setting(&raw)?;
            debug!(default_pace_secs = config.default_pace_secs, "Default pace overridden");
        }

        if let Some(raw) = lookup("RUNLOG_CONTEXT_WINDOW") {
            config.context_window = raw.trim().parse().map_err(|_| {
                AppError::Config(format!("RUNLOG_CONTEXT_WINDOW is not a number: '{raw}'"))
            })?;
        }

        if let Some(raw) = lookup("RUNLOG_PLAIN_MAX_KM") {
            config.plain_text_band.max_km = parse_km_setting("RUNLOG_PLAIN_MAX_KM", &raw)?;
        }

        if let Some(raw) = lookup("RUNLOG_IMAGE_MAX_KM") {
            config.image_band.max_km = parse_km_setting("RUNLOG_IMAGE_MAX_KM", &raw)?;
        }

        config.validate()?;

        info!(
            default_pace_secs = config.default_pace_secs,
            context_window = config.context_window,
            plain_max_km = config.plain_text_band.max_km,
            image_max_km = config.image_band.max_km,
            "Extraction configuration loaded"
        );

        Ok(config)
    }
}

fn parse_pace_setting(raw: &str) -> AppResult<u32> {
    let raw = raw.trim();
    if raw.contains(':') {
        parse_clock_to_seconds(raw)
            .ok_or_else(|| AppError::Config(format!("RUNLOG_DEFAULT_PACE is not M:SS: '{raw}'")))
    } else {
        raw.parse()
            .map_err(|_| AppError::Config(format!("RUNLOG_DEFAULT_PACE is not a number: '{raw}'")))
    }
}

fn parse_km_setting(key: &str, raw: &str) -> AppResult<f64> {
    raw.trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| AppError::Config(format!("{key} is not a number: '{raw}'")))
}
