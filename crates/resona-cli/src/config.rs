//! Analysis parameter file format.
//!
//! Analysis settings can be stored as TOML so a measurement setup (band set,
//! filter length, trim threshold) is reproducible across runs:
//!
//! ```toml
//! filter_taps = 1024
//! bands = [125.0, 250.0, 500.0, 1000.0, 2000.0]
//! trim_threshold_db = -60.0
//! ```

use serde::Deserialize;
use std::path::Path;

/// Analysis settings loaded from a TOML file.
#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    /// FIR bandpass filter length in samples.
    #[serde(default = "default_filter_taps")]
    pub filter_taps: usize,
    /// Octave-band center frequencies in Hz, in display order.
    #[serde(default = "default_bands")]
    pub bands: Vec<f32>,
    /// Threshold for tail trimming, in dB relative to full scale.
    #[serde(default = "default_trim_threshold_db")]
    pub trim_threshold_db: f32,
}

fn default_filter_taps() -> usize {
    resona_analysis::DEFAULT_FILTER_TAPS
}

fn default_bands() -> Vec<f32> {
    resona_analysis::octave_bands::STANDARD
        .iter()
        .map(|b| b.center_hz)
        .collect()
}

fn default_trim_threshold_db() -> f32 {
    -60.0
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            filter_taps: default_filter_taps(),
            bands: default_bands(),
            trim_threshold_db: default_trim_threshold_db(),
        }
    }
}

impl AnalysisConfig {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_standard_bands() {
        let config = AnalysisConfig::default();
        assert_eq!(config.filter_taps, 1024);
        assert_eq!(config.bands.first(), Some(&63.0));
        assert_eq!(config.bands.last(), Some(&4000.0));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: AnalysisConfig = toml::from_str("bands = [500.0, 1000.0]").unwrap();
        assert_eq!(config.bands, vec![500.0, 1000.0]);
        assert_eq!(config.filter_taps, 1024);
        assert_eq!(config.trim_threshold_db, -60.0);
    }

    #[test]
    fn full_file_overrides_everything() {
        let text = r#"
            filter_taps = 512
            bands = [250.0]
            trim_threshold_db = -40.0
        "#;
        let config: AnalysisConfig = toml::from_str(text).unwrap();
        assert_eq!(config.filter_taps, 512);
        assert_eq!(config.bands, vec![250.0]);
        assert_eq!(config.trim_threshold_db, -40.0);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.toml");
        std::fs::write(&path, "filter_taps = 2048\n").unwrap();

        let config = AnalysisConfig::load(&path).unwrap();
        assert_eq!(config.filter_taps, 2048);
        assert_eq!(config.bands.len(), 7);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(AnalysisConfig::load(Path::new("no/such/file.toml")).is_err());
    }
}
