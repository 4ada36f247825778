//! Outlier Truncation — clip excursions before the cleaned spectral pass
//!
//! Replaces samples far from a central value with that value, producing the
//! "cleaned" waveform for the second spectral pass. The center and spread
//! come from the channel's own median and robust RMS, so signal pulses and
//! coherent noise spikes get flattened to the baseline while normal
//! fluctuation passes through untouched.

use crate::types::Sample;

/// Excursion threshold in units of the robust spread. Fixed design
/// constant, not configurable.
pub const OUTLIER_CUT: f64 = 3.5;

/// Return a copy of `samples` with every sample further than
/// `OUTLIER_CUT * spread` from `center` replaced by `center`.
///
/// The input is never mutated. A zero-length input yields a zero-length
/// output; callers validate non-emptiness when computing the statistics
/// that feed `center` and `spread`.
pub fn truncate_outliers(samples: &[Sample], center: f64, spread: f64) -> Vec<Sample> {
    samples
        .iter()
        .map(|&s| {
            if (s - center).abs() > OUTLIER_CUT * spread {
                center
            } else {
                s
            }
        })
        .collect()
}
