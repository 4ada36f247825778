//! Core types for waveform noise characterization
//!
//! This module defines the data model shared by the whole crate: raw sample
//! buffers as read out per channel, the per-channel statistics and spectral
//! band profiles derived from them, and the output record handed to the
//! persistence collaborator.
//!
//! ## Record flow
//!
//! ```text
//! event ──> per-channel waveform ──> statistics ──┐
//!                    │                            ├──> ChannelRecord ──> sink
//!                    └──> FFT (raw + truncated) ──┘
//! ```

use serde::{Deserialize, Serialize};

/// A floating point amplitude sample (one readout tick).
pub type Sample = f64;

/// A detector readout channel identifier.
pub type Channel = u32;

/// Result type for wirecheck operations.
pub type WirecheckResult<T> = Result<T, WirecheckError>;

/// Errors that can occur during waveform characterization.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WirecheckError {
    /// A zero-length sample sequence was handed to a statistics or spectral
    /// routine. Fatal for that channel's record only.
    #[error("empty waveform: statistics are undefined for zero samples")]
    EmptyInput,

    /// A waveform length disagrees with the transform plan. Fatal for the
    /// run: all channels in a run must share one sample count.
    #[error("waveform length mismatch: plan is sized for {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A required configuration option is missing or out of range.
    /// Fatal at startup, before any event is processed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Identifiers for one unit of captured data in the source stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventHeader {
    /// Run number.
    pub run: u32,
    /// Subrun number within the run.
    pub subrun: u32,
    /// Event number within the subrun.
    pub event: u32,
    /// Event timestamp in seconds.
    pub time: f64,
}

/// One channel's raw waveform for one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelWaveform {
    /// Readout channel.
    pub channel: Channel,
    /// Amplitude samples, one per readout tick. All channels in a run
    /// share the same sample count.
    pub samples: Vec<Sample>,
}

/// Conventional and robust noise estimators for one waveform.
///
/// Derived solely from one waveform; `rms` and `robust_rms` are never
/// negative. Construction fails explicitly on an empty waveform rather
/// than producing NaN or zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStatistics {
    /// Arithmetic mean of the samples (baseline level).
    pub pedestal: f64,
    /// Population standard deviation (divide by N, not N-1).
    pub rms: f64,
    /// Middle element after ordering, at index `len / 2`. No interpolation
    /// for even lengths.
    pub median: f64,
    /// Quartile-based spread estimate, rescaled to be comparable to a
    /// standard deviation for normally distributed samples.
    pub robust_rms: f64,
}

/// Summed spectral magnitude over four equal frequency bands.
///
/// Each band is one quarter of the usable non-negative-frequency
/// half-spectrum, DC excluded. When the per-run budget skips an event the
/// profile carries the [`NOT_COMPUTED`](Self::NOT_COMPUTED) sentinel,
/// distinguishing "not computed this event" from "computed but zero energy".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralBandProfile {
    pub band1: f64,
    pub band2: f64,
    pub band3: f64,
    pub band4: f64,
}

impl SpectralBandProfile {
    /// Sentinel profile for events excluded by the per-run spectral budget.
    pub const NOT_COMPUTED: Self = Self {
        band1: -1.0,
        band2: -1.0,
        band3: -1.0,
        band4: -1.0,
    };

    /// Whether this profile holds computed band sums (band sums are
    /// non-negative by construction, so any negative field is the sentinel).
    pub fn is_computed(&self) -> bool {
        self.band1 >= 0.0
    }
}

/// One hit from the external hit collection, reduced to the fields the
/// quality cuts and diagnostics need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitSummary {
    /// Channel the hit was reconstructed on.
    pub channel: Channel,
    /// Peak pulse amplitude in ADC counts.
    pub peak_amplitude: f64,
    /// Fitted pulse integral.
    pub integral: f64,
    /// Summed ADC over the hit window.
    pub summed_adc: f64,
    /// Hit RMS in ticks.
    pub rms: f64,
    /// Number of hits in the same fitted snippet.
    pub multiplicity: i32,
}

/// The completed output record: one per channel per event.
///
/// Write-only and immutable once emitted; ownership passes to the
/// [`RecordSink`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub run: u32,
    pub subrun: u32,
    pub event: u32,
    pub time: f64,
    pub channel: Channel,
    /// Noise estimators for the raw waveform.
    pub stats: ChannelStatistics,
    /// Quality-passing hits on this channel in this event.
    pub hit_count: u32,
    /// Band profile of the raw waveform.
    pub raw_bands: SpectralBandProfile,
    /// Band profile after outlier truncation.
    pub trunc_bands: SpectralBandProfile,
}

/// Persistence collaborator interface. Emission is append-only and ordered
/// by event arrival; records are never reordered or deduplicated.
pub trait RecordSink {
    /// Take ownership of one completed record.
    fn emit(&mut self, record: ChannelRecord);
}

/// In-memory sink collecting records into a `Vec`.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Records in emission order.
    pub records: Vec<ChannelRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn emit(&mut self, record: ChannelRecord) {
        self.records.push(record);
    }
}
