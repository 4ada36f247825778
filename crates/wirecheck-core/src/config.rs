//! Configuration System
//!
//! YAML-based configuration for the analysis pass: source selectors,
//! diagnostic toggles, the per-run spectral budget and the hit-quality
//! cuts. Configuration errors are fatal at startup, before any event is
//! processed or any output is created.
//!
//! ## Example Configuration
//!
//! ```yaml
//! digit_module_label: "daq"
//! hit_module_label: "gaushit"
//! make_shorted_region_plot: false
//! events_fft_per_run: 20
//! hit_multiplicity_cut: 5
//! hit_rms_cut: 10
//! ```
//!
//! The two hit cuts are required and carry no default. `events_fft_per_run`
//! is optional: absent means every event is transformed, a positive value
//! limits the transform to the first N events of each run, and a value of
//! zero or below disables the spectral path entirely.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::budget::SpectralBudget;
use crate::types::{WirecheckError, WirecheckResult};

fn default_digit_label() -> String {
    "daq".to_string()
}

fn default_hit_label() -> String {
    "gaushit".to_string()
}

/// Recognized analysis options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Producer label of the raw digit collection.
    #[serde(default = "default_digit_label")]
    pub digit_module_label: String,
    /// Producer label of the hit collection.
    #[serde(default = "default_hit_label")]
    pub hit_module_label: String,
    /// Whether to tile the shorted-region classifier into a label grid.
    #[serde(default)]
    pub make_shorted_region_plot: bool,
    /// Unrelated 2-D amplitude-vs-channel diagnostic toggle; recognized and
    /// validated, forwarded to the histogramming collaborator.
    #[serde(default)]
    pub make_2d_histos: bool,
    /// Per-run spectral budget. Absent = unlimited, > 0 = first N events,
    /// <= 0 = disabled.
    #[serde(default)]
    pub events_fft_per_run: Option<i64>,
    /// Maximum hit multiplicity counted toward a channel's hit total.
    /// Required.
    pub hit_multiplicity_cut: i64,
    /// Upper hit RMS bound (exclusive) counted toward a channel's hit
    /// total. Required.
    pub hit_rms_cut: i64,
}

impl AnalysisConfig {
    /// Parse configuration from a YAML string.
    ///
    /// A missing required option (either hit cut) is a parse failure.
    pub fn parse(yaml: &str) -> WirecheckResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| WirecheckError::Config(e.to_string()))
    }

    /// Load configuration from a file.
    pub fn load_from(path: &Path) -> WirecheckResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| WirecheckError::Config(format!("{}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Validate option ranges.
    pub fn validate(&self) -> WirecheckResult<()> {
        if self.hit_multiplicity_cut < 0 {
            return Err(WirecheckError::Config(
                "hit_multiplicity_cut must be non-negative".to_string(),
            ));
        }
        if self.hit_rms_cut < 0 {
            return Err(WirecheckError::Config(
                "hit_rms_cut must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// The tri-state spectral budget this configuration asks for.
    pub fn spectral_budget(&self) -> SpectralBudget {
        SpectralBudget::from_option(self.events_fft_per_run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config = AnalysisConfig::parse("hit_multiplicity_cut: 5\nhit_rms_cut: 10\n").unwrap();
        assert_eq!(config.digit_module_label, "daq");
        assert_eq!(config.hit_module_label, "gaushit");
        assert!(!config.make_shorted_region_plot);
        assert!(!config.make_2d_histos);
        assert_eq!(config.spectral_budget(), SpectralBudget::Unlimited);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_required_cut_fails() {
        assert!(AnalysisConfig::parse("hit_rms_cut: 10\n").is_err());
        assert!(AnalysisConfig::parse("hit_multiplicity_cut: 5\n").is_err());
        assert!(AnalysisConfig::parse("").is_err());
    }

    #[test]
    fn test_negative_cut_rejected() {
        let config =
            AnalysisConfig::parse("hit_multiplicity_cut: -1\nhit_rms_cut: 10\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_budget_tri_state() {
        let limited = AnalysisConfig::parse(
            "hit_multiplicity_cut: 5\nhit_rms_cut: 10\nevents_fft_per_run: 3\n",
        )
        .unwrap();
        assert_eq!(limited.spectral_budget(), SpectralBudget::Limited(3));

        let disabled = AnalysisConfig::parse(
            "hit_multiplicity_cut: 5\nhit_rms_cut: 10\nevents_fft_per_run: 0\n",
        )
        .unwrap();
        assert_eq!(disabled.spectral_budget(), SpectralBudget::Disabled);

        let negative = AnalysisConfig::parse(
            "hit_multiplicity_cut: 5\nhit_rms_cut: 10\nevents_fft_per_run: -4\n",
        )
        .unwrap();
        assert_eq!(negative.spectral_budget(), SpectralBudget::Disabled);
    }

    #[test]
    fn test_roundtrip() {
        let config = AnalysisConfig::parse(
            "digit_module_label: raw\nhit_multiplicity_cut: 2\nhit_rms_cut: 7\nmake_shorted_region_plot: true\n",
        )
        .unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = AnalysisConfig::parse(&yaml).unwrap();
        assert_eq!(parsed.digit_module_label, "raw");
        assert_eq!(parsed.hit_multiplicity_cut, 2);
        assert!(parsed.make_shorted_region_plot);
    }
}
