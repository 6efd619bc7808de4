//! # Batch Extraction
//!
//! Helpers for running the extractor over many observations at once, such as
//! a dump of OCR results from a batch of screenshots. An observation file
//! holds one observation per block; blocks are separated by blank lines.

use crate::activity_extractor::ActivityExtractor;
use crate::activity_model::{RawObservation, RecognitionMode, ResolvedActivity};
use crate::errors::{AppError, AppResult};
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Extract every observation in order on the current thread
pub fn extract_all<'a, I>(extractor: &ActivityExtractor, observations: I) -> Vec<ResolvedActivity>
where
    I: IntoIterator<Item = &'a RawObservation>,
{
    observations
        .into_iter()
        .map(|observation| extractor.extract_observation(observation))
        .collect()
}

/// Extract observations on the rayon thread pool, preserving order
pub fn extract_parallel(
    extractor: &ActivityExtractor,
    observations: &[RawObservation],
) -> Vec<ResolvedActivity> {
    debug!(
        observations = observations.len(),
        threads = rayon::current_num_threads(),
        "Starting parallel extraction"
    );

    observations
        .par_iter()
        .map(|observation| extractor.extract_observation(observation))
        .collect()
}

/// Split an observation dump into blocks of cleaned, non-empty lines
pub fn split_observations(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks
}

/// Read an observation file and extract every block in it
pub fn extract_file(
    extractor: &ActivityExtractor,
    path: impl AsRef<Path>,
    mode: RecognitionMode,
) -> AppResult<Vec<ResolvedActivity>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("Failed to read {}: {e}", path.display())))?;

    let observations: Vec<RawObservation> = split_observations(&content)
        .into_iter()
        .map(|text| RawObservation { text, mode })
        .collect();

    if observations.is_empty() {
        return Err(AppError::Input(format!(
            "No observations found in {}",
            path.display()
        )));
    }

    info!(
        path = %path.display(),
        observations = observations.len(),
        mode = %mode,
        "Extracting observations from file"
    );

    Ok(extract_parallel(extractor, &observations))
}
