//! # Cross Deriver
//!
//! Fills in a missing duration or pace from the resolved distance using
//! `duration = pace * distance`. Order of attempts:
//!
//! 1. time known, pace missing: derive pace
//! 2. pace known, time missing: derive time
//! 3. both missing: estimate time from the configured default pace
//!
//! Every computed value is re-checked against its bounds and left absent
//! when it falls outside them.

use crate::activity_model::{ResolvedActivity, ValueSource};
use crate::extraction_config::ExtractionConfig;
use tracing::debug;

/// Complete a resolved activity whose distance is known
///
/// Activities without a distance are returned unchanged.
pub fn reconcile(mut activity: ResolvedActivity, config: &ExtractionConfig) -> ResolvedActivity {
    let Some(distance_km) = activity.distance_km.filter(|km| *km > 0.0) else {
        return activity;
    };

    match (activity.duration_secs, activity.pace_secs_per_km) {
        (Some(duration), None) => {
            let pace = round_secs(f64::from(duration) / distance_km);
            match pace.filter(|p| config.pace_bounds.contains(*p)) {
                Some(pace) => {
                    activity.pace_secs_per_km = Some(pace);
                    activity.pace_source = ValueSource::Derived;
                    debug!(duration, distance_km, pace, "Derived pace from duration");
                }
                None => debug!(duration, distance_km, "Derived pace out of bounds, left absent"),
            }
        }
        (None, Some(pace)) => {
            let duration = round_secs(f64::from(pace) * distance_km);
            match duration.filter(|d| config.derived_duration_bounds.contains(*d)) {
                Some(duration) => {
                    activity.duration_secs = Some(duration);
                    activity.duration_source = ValueSource::Derived;
                    debug!(pace, distance_km, duration, "Derived duration from pace");
                }
                None => debug!(pace, distance_km, "Derived duration out of bounds, left absent"),
            }
        }
        (None, None) => {
            let pace = config.default_pace_secs;
            let duration = round_secs(f64::from(pace) * distance_km);
            match duration.filter(|d| config.derived_duration_bounds.contains(*d)) {
                Some(duration) if config.pace_bounds.contains(pace) => {
                    activity.duration_secs = Some(duration);
                    activity.pace_secs_per_km = Some(pace);
                    activity.duration_source = ValueSource::Estimated;
                    activity.pace_source = ValueSource::Estimated;
                    debug!(pace, distance_km, duration, "Estimated duration from default pace");
                }
                _ => debug!(distance_km, "Estimated duration out of bounds, left absent"),
            }
        }
        (Some(_), Some(_)) => {}
    }

    activity
}

/// Round to whole seconds; `None` for values that do not fit a `u32`
fn round_secs(value: f64) -> Option<u32> {
    let rounded = value.round();
    (rounded.is_finite() && rounded >= 0.0 && rounded <= f64::from(u32::MAX))
        .then_some(rounded as u32)
}
