//! Spectral Engine — fixed-size forward transform and four-band integral
//!
//! Wraps one reusable forward FFT plan sized to the run's waveform length.
//! The plan is expensive to build relative to a single transform, so one
//! engine is constructed per run (lazily, from the first waveform observed)
//! and reused across every channel and event. A waveform of any other
//! length is a contract violation, reported as
//! [`WirecheckError::DimensionMismatch`] rather than silently re-planned,
//! because it indicates a configuration or data inconsistency upstream.
//!
//! The band integral partitions the non-negative-frequency half-spectrum
//! into four equal bands over its lower half, skipping the DC bin:
//!
//! ```text
//! 1-based bin:  1    2 .. N/8   N/8+1 .. 2N/8   2N/8+1 .. 3N/8   3N/8+1 .. 4N/8
//!              DC  [ band 1 ] [    band 2    ] [    band 3    ] [    band 4    ]
//! ```
//!
//! Restricting to the low-to-mid bins targets the coherent-pickup content
//! these diagnostics are after while cheaply ignoring the DC offset and the
//! mirrored upper half of the spectrum.

use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::fmt;
use std::sync::Arc;

use crate::types::{Sample, SpectralBandProfile, WirecheckError, WirecheckResult};

/// Reusable forward transform for real-valued waveforms of one fixed length.
pub struct SpectralEngine {
    /// Plan size: the run's shared waveform length.
    size: usize,
    /// Planned forward FFT.
    fft_forward: Arc<dyn Fft<f64>>,
    /// Scratch buffer for in-place transforms.
    scratch: Vec<Complex64>,
}

impl fmt::Debug for SpectralEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectralEngine")
            .field("size", &self.size)
            .finish()
    }
}

impl SpectralEngine {
    /// Plan a forward transform for waveforms of `size` samples.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft_forward = planner.plan_fft_forward(size);
        let scratch = vec![Complex64::new(0.0, 0.0); fft_forward.get_inplace_scratch_len()];
        Self {
            size,
            fft_forward,
            scratch,
        }
    }

    /// The fixed waveform length this engine was planned for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of non-negative-frequency bins (`size / 2 + 1`).
    pub fn half_bins(&self) -> usize {
        self.size / 2 + 1
    }

    /// Transform a real waveform and return the magnitude at each
    /// non-negative-frequency bin.
    ///
    /// Fails with [`WirecheckError::DimensionMismatch`] when the waveform
    /// length disagrees with the plan size.
    pub fn magnitude_spectrum(&mut self, samples: &[Sample]) -> WirecheckResult<Vec<f64>> {
        if samples.len() != self.size {
            return Err(WirecheckError::DimensionMismatch {
                expected: self.size,
                actual: samples.len(),
            });
        }

        let mut buffer: Vec<Complex64> =
            samples.iter().map(|&s| Complex64::new(s, 0.0)).collect();
        self.fft_forward
            .process_with_scratch(&mut buffer, &mut self.scratch);

        Ok(buffer[..self.half_bins()].iter().map(|c| c.norm()).collect())
    }

    /// Sum a magnitude spectrum into the four fixed frequency bands.
    ///
    /// `magnitudes` must come from [`magnitude_spectrum`](Self::magnitude_spectrum)
    /// on this engine. Bin 1 (DC) never contributes; the four bands never
    /// overlap and stop below the Nyquist bin.
    pub fn band_profile(&self, magnitudes: &[f64]) -> SpectralBandProfile {
        let eighth = self.size / 8;
        let mut bands = [0.0f64; 4];
        for (q, band) in bands.iter_mut().enumerate() {
            // 1-based bin range for this band, DC (bin 1) excluded.
            let lo = (q * eighth + 1).max(2);
            let hi = (q + 1) * eighth;
            for bin in lo..=hi {
                *band += magnitudes[bin - 1];
            }
        }
        SpectralBandProfile {
            band1: bands[0],
            band2: bands[1],
            band3: bands[2],
            band4: bands[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_half_spectrum_length() {
        let mut engine = SpectralEngine::new(16);
        let mags = engine.magnitude_spectrum(&vec![0.0; 16]).unwrap();
        assert_eq!(mags.len(), 9);
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let mut engine = SpectralEngine::new(16);
        let err = engine.magnitude_spectrum(&vec![0.0; 8]).unwrap_err();
        match err {
            WirecheckError::DimensionMismatch { expected, actual } => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 8);
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_waveform_zero_bands() {
        let mut engine = SpectralEngine::new(16);
        let mags = engine.magnitude_spectrum(&vec![0.0; 16]).unwrap();
        let bands = engine.band_profile(&mags);
        assert_eq!(bands.band1, 0.0);
        assert_eq!(bands.band2, 0.0);
        assert_eq!(bands.band3, 0.0);
        assert_eq!(bands.band4, 0.0);
        assert!(bands.is_computed());
    }

    #[test]
    fn test_dc_offset_excluded() {
        // A constant waveform puts all its energy in bin 1 (DC), which the
        // band integral must ignore.
        let mut engine = SpectralEngine::new(32);
        let mags = engine.magnitude_spectrum(&vec![7.5; 32]).unwrap();
        assert!(mags[0] > 100.0, "DC bin should carry the offset");
        let bands = engine.band_profile(&mags);
        assert!(bands.band1.abs() < 1e-9);
        assert!(bands.band2.abs() < 1e-9);
        assert!(bands.band3.abs() < 1e-9);
        assert!(bands.band4.abs() < 1e-9);
    }

    #[test]
    fn test_band_partition_no_overlap_no_dc() {
        // With distinct magnitudes per bin, the band sums account for every
        // 1-based bin in [2, 4N/8] exactly once and nothing else.
        let engine = SpectralEngine::new(16);
        let mags: Vec<f64> = (0..9).map(|i| (i * i) as f64 + 1.0).collect();
        let bands = engine.band_profile(&mags);
        // N=16: band1 = bin 2, band2 = bins 3..4, band3 = 5..6, band4 = 7..8
        assert_eq!(bands.band1, mags[1]);
        assert_eq!(bands.band2, mags[2] + mags[3]);
        assert_eq!(bands.band3, mags[4] + mags[5]);
        assert_eq!(bands.band4, mags[6] + mags[7]);
        let total = bands.band1 + bands.band2 + bands.band3 + bands.band4;
        let expected: f64 = mags[1..8].iter().sum();
        assert!((total - expected).abs() < 1e-10, "DC and Nyquist excluded");
    }

    #[test]
    fn test_single_tone_lands_in_one_band() {
        // A pure tone at bin 5 (1-based) lands in band 1 of a 64-point
        // transform (band 1 covers bins 2..8).
        let n = 64;
        let mut engine = SpectralEngine::new(n);
        let wf: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 4.0 * i as f64 / n as f64).cos())
            .collect();
        let mags = engine.magnitude_spectrum(&wf).unwrap();
        let bands = engine.band_profile(&mags);
        assert!(
            (bands.band1 - n as f64 / 2.0).abs() < 1e-6,
            "tone magnitude should be N/2, got {}",
            bands.band1
        );
        assert!(bands.band2.abs() < 1e-6);
        assert!(bands.band3.abs() < 1e-6);
        assert!(bands.band4.abs() < 1e-6);
    }

    #[test]
    fn test_band_sums_non_negative() {
        let n = 128;
        let mut engine = SpectralEngine::new(n);
        let wf: Vec<f64> = (0..n).map(|i| ((i * 31) % 17) as f64 - 8.0).collect();
        let mags = engine.magnitude_spectrum(&wf).unwrap();
        let bands = engine.band_profile(&mags);
        assert!(bands.band1 >= 0.0);
        assert!(bands.band2 >= 0.0);
        assert!(bands.band3 >= 0.0);
        assert!(bands.band4 >= 0.0);
    }
}
