//! # Wirecheck Core
//!
//! Per-channel waveform characterization for wire-readout detector
//! streams: robust noise statistics plus frequency-domain diagnostics used
//! to flag abnormal or shorted detector regions.
//!
//! For each channel's raw waveform in each event the analyzer computes:
//!
//! - **Pedestal / RMS**: mean baseline and population standard deviation
//! - **Median / robust RMS**: outlier-resistant ordering statistics
//! - **Spectral band profiles**: summed FFT magnitude over four fixed
//!   low-to-mid frequency bands, once on the raw waveform and once after
//!   outlier truncation, amortized by a per-run event budget
//! - **Hit count**: quality-passing hits on the channel in that event
//!
//! ## Processing Flow
//!
//! ```text
//! event source ──> ChannelRecordBuilder ──> RecordSink
//!                     │
//!                     ├─ waveform_stats  (pedestal, rms, median, robust rms)
//!                     ├─ budget          (first K events of each run get FFTs)
//!                     ├─ spectral        (one reusable plan, two passes)
//!                     └─ truncate        (clip > 3.5 robust sigma to median)
//! ```
//!
//! A separate, stateless [`regions`] classifier labels (y, z) detector
//! coordinates against the surveyed shorted-wire boundaries; it shares the
//! output-record model but none of the waveform machinery.
//!
//! ## Example
//!
//! ```rust
//! use wirecheck_core::{
//!     budget::SpectralBudget,
//!     builder::ChannelRecordBuilder,
//!     types::{ChannelWaveform, EventHeader, MemorySink},
//! };
//!
//! let mut builder = ChannelRecordBuilder::new(SpectralBudget::Limited(20), 5, 10);
//! let mut sink = MemorySink::new();
//!
//! let header = EventHeader { run: 1, subrun: 0, event: 1, time: 0.0 };
//! let waveforms = vec![ChannelWaveform { channel: 3, samples: vec![0.0; 16] }];
//!
//! builder.process_event(&header, &waveforms, &[], &mut sink).unwrap();
//! assert_eq!(sink.records.len(), 1);
//! assert_eq!(sink.records[0].stats.pedestal, 0.0);
//! ```
//!
//! Processing is single-threaded and synchronous; the transform plan held
//! by a builder is stateful, so parallel callers create one builder per
//! worker.

pub mod budget;
pub mod builder;
pub mod config;
pub mod regions;
pub mod spectral;
pub mod truncate;
pub mod types;
pub mod waveform_stats;

pub use budget::{FftScheduler, SpectralBudget};
pub use builder::ChannelRecordBuilder;
pub use config::AnalysisConfig;
pub use regions::{classify, RegionLabel, RegionMap};
pub use spectral::SpectralEngine;
pub use truncate::truncate_outliers;
pub use types::{
    Channel, ChannelRecord, ChannelStatistics, ChannelWaveform, EventHeader, HitSummary,
    MemorySink, RecordSink, Sample, SpectralBandProfile, WirecheckError, WirecheckResult,
};
pub use waveform_stats::{basic_stats, compute_statistics, robust_stats};
