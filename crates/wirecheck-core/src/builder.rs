//! Channel Record Builder — per-event orchestration of the analysis
//!
//! For each event the builder rebuilds the per-channel hit tally from the
//! event's hit collection, asks the scheduler once whether the event is
//! within the per-run spectral budget, and then walks the channel
//! waveforms: statistics always, and when in budget two transforms per
//! channel (raw, then outlier-truncated using that channel's own median
//! and robust RMS). One [`ChannelRecord`] per channel goes to the sink.
//!
//! Failure policy (no retries anywhere; this is an offline pass over an
//! already-captured dataset):
//! - empty waveform: that channel is skipped with a logged diagnostic and
//!   the event continues, preserving the other channels' records;
//! - waveform length mismatch: propagated to the caller and the run
//!   aborts, since it indicates an upstream inconsistency.

use std::collections::HashMap;

use crate::budget::{FftScheduler, SpectralBudget};
use crate::config::AnalysisConfig;
use crate::spectral::SpectralEngine;
use crate::truncate::truncate_outliers;
use crate::types::{
    Channel, ChannelRecord, ChannelWaveform, EventHeader, HitSummary, RecordSink,
    SpectralBandProfile, WirecheckError, WirecheckResult,
};
use crate::waveform_stats::compute_statistics;

/// Builds one output record per channel per event.
///
/// Holds all mutable per-run state explicitly: the spectral scheduler, the
/// lazily planned transform engine (sized to the first waveform observed,
/// on the precondition that all channels in a run share one sample count),
/// and the per-event hit tally. Create one builder per logical processing
/// thread; the engine plan is stateful and must not be shared.
#[derive(Debug)]
pub struct ChannelRecordBuilder {
    scheduler: FftScheduler,
    engine: Option<SpectralEngine>,
    hit_counts: HashMap<Channel, u32>,
    multiplicity_cut: i32,
    rms_cut: f64,
}

impl ChannelRecordBuilder {
    /// Create a builder with an explicit budget and hit-quality cuts.
    pub fn new(budget: SpectralBudget, multiplicity_cut: i64, rms_cut: i64) -> Self {
        Self {
            scheduler: FftScheduler::new(budget),
            engine: None,
            hit_counts: HashMap::new(),
            multiplicity_cut: multiplicity_cut as i32,
            rms_cut: rms_cut as f64,
        }
    }

    /// Create a builder from a validated configuration.
    pub fn from_config(config: &AnalysisConfig) -> WirecheckResult<Self> {
        config.validate()?;
        Ok(Self::new(
            config.spectral_budget(),
            config.hit_multiplicity_cut,
            config.hit_rms_cut,
        ))
    }

    /// Whether a hit counts toward its channel's per-event hit total.
    fn hit_passes(&self, hit: &HitSummary) -> bool {
        hit.multiplicity <= self.multiplicity_cut && hit.rms < self.rms_cut
    }

    /// Process one event: tally quality hits, run the statistics and (if in
    /// budget) spectral paths per channel, and emit records to `sink`.
    pub fn process_event(
        &mut self,
        header: &EventHeader,
        waveforms: &[ChannelWaveform],
        hits: &[HitSummary],
        sink: &mut dyn RecordSink,
    ) -> WirecheckResult<()> {
        self.hit_counts.clear();
        for hit in hits {
            if self.hit_passes(hit) {
                *self.hit_counts.entry(hit.channel).or_insert(0) += 1;
            }
        }

        // One budget decision per event, independent of channel count.
        let compute_fft = self.scheduler.begin_event(header.run);

        for wf in waveforms {
            let stats = match compute_statistics(&wf.samples) {
                Ok(stats) => stats,
                Err(WirecheckError::EmptyInput) => {
                    tracing::warn!(
                        channel = wf.channel,
                        run = header.run,
                        event = header.event,
                        "skipping channel: empty waveform"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };

            let (raw_bands, trunc_bands) = if compute_fft {
                let engine = self
                    .engine
                    .get_or_insert_with(|| SpectralEngine::new(wf.samples.len()));

                let raw_mags = engine.magnitude_spectrum(&wf.samples)?;
                let raw_bands = engine.band_profile(&raw_mags);

                let cleaned = truncate_outliers(&wf.samples, stats.median, stats.robust_rms);
                let trunc_mags = engine.magnitude_spectrum(&cleaned)?;
                let trunc_bands = engine.band_profile(&trunc_mags);

                (raw_bands, trunc_bands)
            } else {
                (
                    SpectralBandProfile::NOT_COMPUTED,
                    SpectralBandProfile::NOT_COMPUTED,
                )
            };

            sink.emit(ChannelRecord {
                run: header.run,
                subrun: header.subrun,
                event: header.event,
                time: header.time,
                channel: wf.channel,
                stats,
                hit_count: self.hit_counts.get(&wf.channel).copied().unwrap_or(0),
                raw_bands,
                trunc_bands,
            });
        }

        Ok(())
    }
}
