//! Per-band decay analysis pipeline.
//!
//! Runs filter -> decay curve -> T30 fit independently for each octave band
//! and collects the results in input order. A failing band is reported in
//! its own row and never aborts the analysis of the others; callers decide
//! whether partial results are acceptable.

use crate::band::{DEFAULT_FILTER_TAPS, KernelCache, OctaveBand, filter_with_kernel};
use crate::decay::decay_curve;
use crate::reverb::{DecayFit, decay_fit};
use crate::Result;

/// Per-band analysis outcome: the band plus its T30 fit or error.
#[derive(Debug, Clone)]
pub struct BandRt60 {
    /// The octave band this row describes.
    pub band: OctaveBand,
    /// T30 fit for the band, or the error that band produced.
    pub result: Result<DecayFit>,
}

/// Reusable per-band decay analyzer.
///
/// Owns the sample rate, the FIR tap count, and a [`KernelCache`], so the
/// same band set analyzed across many signals designs each bandpass filter
/// only once.
///
/// # Example
///
/// ```rust,ignore
/// use resona_analysis::{DecayAnalyzer, octave_bands};
///
/// let mut analyzer = DecayAnalyzer::new(48000.0);
/// let table = analyzer.analyze(&impulse_response, &octave_bands::EXTENDED);
/// ```
#[derive(Debug, Clone)]
pub struct DecayAnalyzer {
    sample_rate: f32,
    taps: usize,
    cache: KernelCache,
}

impl DecayAnalyzer {
    /// Create an analyzer with the default FIR length.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_taps(sample_rate, DEFAULT_FILTER_TAPS)
    }

    /// Create an analyzer with an explicit FIR length.
    pub fn with_taps(sample_rate: f32, taps: usize) -> Self {
        Self {
            sample_rate,
            taps,
            cache: KernelCache::new(),
        }
    }

    /// Sample rate this analyzer was built for, in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// FIR length used for band filtering.
    pub fn filter_taps(&self) -> usize {
        self.taps
    }

    /// Band-limit a signal to one octave band, time-aligned.
    pub fn filter_band(&mut self, signal: &[f32], band: OctaveBand) -> Result<Vec<f32>> {
        let kernel = self.cache.get(band, self.sample_rate, self.taps)?;
        Ok(filter_with_kernel(signal, &kernel))
    }

    /// Compute the energy-decay curve of a signal within one octave band.
    pub fn band_decay_curve(&mut self, signal: &[f32], band: OctaveBand) -> Result<Vec<f32>> {
        let filtered = self.filter_band(signal, band)?;
        decay_curve(&filtered)
    }

    /// Estimate T30 for a single octave band.
    pub fn analyze_band(&mut self, signal: &[f32], band: OctaveBand) -> Result<DecayFit> {
        let curve = self.band_decay_curve(signal, band)?;
        decay_fit(&curve, self.sample_rate)
    }

    /// Estimate T30 for each band, preserving input order.
    ///
    /// Every band is analyzed independently; rows carry their own success
    /// or failure.
    pub fn analyze(&mut self, signal: &[f32], bands: &[OctaveBand]) -> Vec<BandRt60> {
        bands
            .iter()
            .map(|&band| BandRt60 {
                band,
                result: self.analyze_band(signal, band),
            })
            .collect()
    }
}

/// One-shot convenience: analyze `signal` over `bands` at `sample_rate`.
///
/// Builds a throwaway [`DecayAnalyzer`]; hosts analyzing many signals with
/// the same band set should keep an analyzer around instead, for its kernel
/// cache.
pub fn band_reverb_times(signal: &[f32], sample_rate: f32, bands: &[OctaveBand]) -> Vec<BandRt60> {
    DecayAnalyzer::new(sample_rate).analyze(signal, bands)
}
