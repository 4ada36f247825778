//! Waveform Statistics — conventional and robust noise estimators
//!
//! Computes the pedestal (mean) and RMS of a raw waveform, plus the
//! outlier-resistant median and quartile-based robust RMS. The robust pair
//! drives the outlier truncation step, so a handful of signal pulses or
//! noise spikes riding on the baseline do not inflate the spread estimate
//! the way they inflate the plain RMS.
//!
//! Ordering statistics use the element at the exact integer index
//! (`len / 2`, `len / 4`, `3 * len / 4`); even-length medians are *not*
//! interpolated between the two middle elements. Downstream thresholds were
//! tuned against this convention, so it is preserved exactly.
//!
//! ## Example
//!
//! ```rust
//! use wirecheck_core::waveform_stats::{basic_stats, robust_stats};
//!
//! let wf = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let (pedestal, rms) = basic_stats(&wf).unwrap();
//! let (median, _robust_rms) = robust_stats(&wf).unwrap();
//! assert!((pedestal - 3.0).abs() < 1e-10);
//! assert!((median - 3.0).abs() < 1e-10);
//! assert!(rms >= 0.0);
//! ```

use crate::types::{ChannelStatistics, Sample, WirecheckError, WirecheckResult};

/// Rescales the half-quartile spread to a standard deviation equivalent
/// under a normal-distribution assumption (Phi^-1(0.75) ~= 0.6745).
const QUARTILE_TO_SIGMA: f64 = 0.6745;

/// Compute the pedestal (arithmetic mean) and population RMS of a waveform.
///
/// The RMS divides the sum of squared deviations by N, not N-1.
/// Fails with [`WirecheckError::EmptyInput`] on a zero-length waveform.
pub fn basic_stats(samples: &[Sample]) -> WirecheckResult<(f64, f64)> {
    if samples.is_empty() {
        return Err(WirecheckError::EmptyInput);
    }
    let n = samples.len() as f64;
    let pedestal = samples.iter().sum::<f64>() / n;
    let var = samples
        .iter()
        .map(|&s| {
            let d = s - pedestal;
            d * d
        })
        .sum::<f64>()
        / n;
    Ok((pedestal, var.max(0.0).sqrt()))
}

/// Compute the median and quartile-based robust RMS of a waveform.
///
/// Works on a private sorted copy; the caller's slice is never mutated
/// (the raw samples are reused for the spectral path afterwards).
/// Fails with [`WirecheckError::EmptyInput`] on a zero-length waveform.
pub fn robust_stats(samples: &[Sample]) -> WirecheckResult<(f64, f64)> {
    if samples.is_empty() {
        return Err(WirecheckError::EmptyInput);
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let median = sorted[n / 2];
    let q1 = sorted[n / 4];
    let q3 = sorted[3 * n / 4];

    let spread_sq = 0.5 * ((q1 - median) * (q1 - median) + (q3 - median) * (q3 - median));
    let robust_rms = spread_sq.sqrt() / QUARTILE_TO_SIGMA;

    Ok((median, robust_rms))
}

/// Compute the full [`ChannelStatistics`] for one waveform.
pub fn compute_statistics(samples: &[Sample]) -> WirecheckResult<ChannelStatistics> {
    let (pedestal, rms) = basic_stats(samples)?;
    let (median, robust_rms) = robust_stats(samples)?;
    Ok(ChannelStatistics {
        pedestal,
        rms,
        median,
        robust_rms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_fails() {
        assert!(basic_stats(&[]).is_err());
        assert!(robust_stats(&[]).is_err());
        assert!(compute_statistics(&[]).is_err());
    }

    #[test]
    fn test_constant_waveform() {
        let wf = vec![4.25; 64];
        let stats = compute_statistics(&wf).unwrap();
        assert!((stats.pedestal - 4.25).abs() < 1e-10);
        assert!(stats.rms.abs() < 1e-10);
        assert!((stats.median - 4.25).abs() < 1e-10);
        assert!(stats.robust_rms.abs() < 1e-10);
    }

    #[test]
    fn test_median_odd_length() {
        let (median, _) = robust_stats(&[5.0, 1.0, 3.0, 2.0, 4.0]).unwrap();
        assert_eq!(median, 3.0);
    }

    #[test]
    fn test_median_even_length_no_interpolation() {
        // [1,2,3,4]: index 4/2 = 2 after ordering, i.e. 3.0 -- not 2.5.
        let (median, _) = robust_stats(&[4.0, 2.0, 1.0, 3.0]).unwrap();
        assert_eq!(median, 3.0);
    }

    #[test]
    fn test_population_rms() {
        // mean 2.5, variance (2.25+0.25+0.25+2.25)/4 = 1.25
        let (pedestal, rms) = basic_stats(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((pedestal - 2.5).abs() < 1e-10);
        assert!((rms - 1.25f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_spreads_non_negative() {
        let wf: Vec<f64> = (0..100).map(|i| ((i * 37) % 11) as f64 - 5.0).collect();
        let stats = compute_statistics(&wf).unwrap();
        assert!(stats.rms >= 0.0);
        assert!(stats.robust_rms >= 0.0);
    }

    #[test]
    fn test_robust_rms_resists_outliers() {
        // One huge spike barely moves the robust estimate but dominates
        // the plain RMS.
        let mut quiet: Vec<f64> = (0..128).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let (_, robust_quiet) = robust_stats(&quiet).unwrap();
        quiet[64] = 1000.0;
        let (_, rms_spiked) = basic_stats(&quiet).unwrap();
        let (_, robust_spiked) = robust_stats(&quiet).unwrap();
        assert!(rms_spiked > 50.0);
        assert!((robust_spiked - robust_quiet).abs() < 0.1);
    }

    #[test]
    fn test_input_not_mutated() {
        let wf = vec![9.0, 1.0, 5.0];
        let copy = wf.clone();
        let _ = robust_stats(&wf).unwrap();
        assert_eq!(wf, copy);
    }
}
