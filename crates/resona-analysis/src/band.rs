//! Octave-band definitions and time-aligned bandpass filtering.
//!
//! A 1/1-octave band spans from `fc/sqrt(2)` to `fc*sqrt(2)` around its center
//! frequency. Signals are band-limited with a linear-phase windowed-sinc FIR
//! filter whose group delay is compensated, so the filtered signal stays
//! index-aligned with the input.
//!
//! # Example
//!
//! ```rust
//! use resona_analysis::band::{OctaveBand, octave_band_filter, DEFAULT_FILTER_TAPS};
//!
//! let signal = vec![0.0f32; 2048];
//! let band = OctaveBand::new(1000.0);
//! let filtered = octave_band_filter(&signal, 48000.0, band, DEFAULT_FILTER_TAPS).unwrap();
//! assert_eq!(filtered.len(), signal.len());
//! ```

use crate::{Error, Result};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::Arc;

/// Default FIR filter length used by the analysis pipeline.
pub const DEFAULT_FILTER_TAPS: usize = 1024;

/// A 1/1-octave frequency band identified by its center frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctaveBand {
    /// Center frequency in Hz.
    pub center_hz: f32,
}

impl OctaveBand {
    /// Create a band centered at the given frequency.
    pub const fn new(center_hz: f32) -> Self {
        Self { center_hz }
    }

    /// Lower band edge, `center / sqrt(2)`, in Hz.
    pub fn low_hz(&self) -> f32 {
        self.center_hz / std::f32::consts::SQRT_2
    }

    /// Upper band edge, `center * sqrt(2)`, in Hz.
    pub fn high_hz(&self) -> f32 {
        self.center_hz * std::f32::consts::SQRT_2
    }

    /// Band edges normalized by the Nyquist frequency.
    ///
    /// Returns `(low, high)` with `0 < low < high < 1`, or
    /// [`Error::InvalidBand`] when the band does not fit below Nyquist at
    /// the given sample rate. Non-finite centers fail the same check.
    pub fn normalized_cutoffs(&self, sample_rate: f32) -> Result<(f32, f32)> {
        let nyquist = sample_rate / 2.0;
        let low = self.low_hz() / nyquist;
        let high = self.high_hz() / nyquist;
        let fits = low > 0.0 && high < 1.0;
        if !fits {
            return Err(Error::InvalidBand {
                center_hz: self.center_hz,
                nyquist,
            });
        }
        Ok((low, high))
    }
}

/// Standard 1/1-octave center frequencies for room-acoustic measurements.
pub mod octave_bands {
    use super::OctaveBand;

    /// 63 Hz octave band.
    pub const BAND_63: OctaveBand = OctaveBand::new(63.0);
    /// 125 Hz octave band.
    pub const BAND_125: OctaveBand = OctaveBand::new(125.0);
    /// 250 Hz octave band.
    pub const BAND_250: OctaveBand = OctaveBand::new(250.0);
    /// 500 Hz octave band.
    pub const BAND_500: OctaveBand = OctaveBand::new(500.0);
    /// 1 kHz octave band.
    pub const BAND_1000: OctaveBand = OctaveBand::new(1000.0);
    /// 2 kHz octave band.
    pub const BAND_2000: OctaveBand = OctaveBand::new(2000.0);
    /// 4 kHz octave band.
    pub const BAND_4000: OctaveBand = OctaveBand::new(4000.0);
    /// 8 kHz octave band.
    pub const BAND_8000: OctaveBand = OctaveBand::new(8000.0);

    /// Canonical measurement set, 63 Hz through 4 kHz.
    pub const STANDARD: [OctaveBand; 7] = [
        BAND_63, BAND_125, BAND_250, BAND_500, BAND_1000, BAND_2000, BAND_4000,
    ];

    /// Extended set including the 8 kHz band.
    pub const EXTENDED: [OctaveBand; 8] = [
        BAND_63, BAND_125, BAND_250, BAND_500, BAND_1000, BAND_2000, BAND_4000, BAND_8000,
    ];
}

/// Normalized sinc, `sin(pi x) / (pi x)`.
fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Design a linear-phase FIR bandpass kernel for an octave band.
///
/// Windowed-sinc design: the difference of two lowpass sinc kernels at the
/// band edges, shaped by a Hamming window, with the passband gain normalized
/// to unity at the band midpoint. The kernel is a pure function of
/// `(center_hz, sample_rate, taps)`: identical inputs always produce an
/// identical kernel.
///
/// # Arguments
/// * `band` - The octave band to isolate
/// * `sample_rate` - Sample rate in Hz
/// * `taps` - Kernel length in samples (must be at least 2)
///
/// # Returns
/// The `taps` filter coefficients, or [`Error::InvalidBand`] when the band
/// exceeds Nyquist.
pub fn bandpass_kernel(band: OctaveBand, sample_rate: f32, taps: usize) -> Result<Vec<f32>> {
    let (low, high) = band.normalized_cutoffs(sample_rate)?;
    let (low, high) = (f64::from(low), f64::from(high));

    // Symmetric around (taps-1)/2; fractional for even tap counts.
    let mid = (taps as f64 - 1.0) / 2.0;
    let mut kernel: Vec<f64> = (0..taps)
        .map(|n| {
            let m = n as f64 - mid;
            let ideal = high * sinc(high * m) - low * sinc(low * m);
            let window = 0.54 - 0.46 * (2.0 * PI * n as f64 / (taps as f64 - 1.0)).cos();
            ideal * window
        })
        .collect();

    // Scale so the response at the band midpoint is exactly unity.
    let f_mid = (low + high) / 2.0;
    let gain: f64 = kernel
        .iter()
        .enumerate()
        .map(|(n, &h)| h * (PI * f_mid * (n as f64 - mid)).cos())
        .sum();
    for h in &mut kernel {
        *h /= gain;
    }

    Ok(kernel.into_iter().map(|h| h as f32).collect())
}

/// Apply an FIR kernel to a signal with group-delay compensation.
///
/// The signal is convolved with `taps` zero samples appended to the tail
/// (capturing the filter's transient decay), then `taps/2` samples are
/// dropped from each end. For an even tap count the output has exactly the
/// input's length and is time-aligned with it, compensating the FIR's
/// `(taps-1)/2`-sample group delay.
///
/// Complexity is `O(taps * len)`.
pub fn filter_with_kernel(signal: &[f32], kernel: &[f32]) -> Vec<f32> {
    if signal.is_empty() {
        return Vec::new();
    }

    let taps = kernel.len();
    let half = taps / 2;
    let padded_len = signal.len() + taps;

    let mut out = Vec::with_capacity(padded_len - 2 * half);
    for n in half..(padded_len - half) {
        // Only kernel taps that land inside the signal contribute.
        let k_min = n.saturating_sub(signal.len() - 1);
        let k_max = taps.min(n + 1);
        let mut acc = 0.0f32;
        for k in k_min..k_max {
            acc += kernel[k] * signal[n - k];
        }
        out.push(acc);
    }
    out
}

/// Band-limit a signal to a 1/1-octave band.
///
/// Designs the kernel with [`bandpass_kernel`] and applies it with
/// [`filter_with_kernel`]; the output is time-aligned and (for even `taps`)
/// the same length as the input.
///
/// # Arguments
/// * `signal` - Input samples
/// * `sample_rate` - Sample rate in Hz
/// * `band` - The octave band to isolate
/// * `taps` - FIR length, typically [`DEFAULT_FILTER_TAPS`]
pub fn octave_band_filter(
    signal: &[f32],
    sample_rate: f32,
    band: OctaveBand,
    taps: usize,
) -> Result<Vec<f32>> {
    let kernel = bandpass_kernel(band, sample_rate, taps)?;
    Ok(filter_with_kernel(signal, &kernel))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct KernelKey {
    center_bits: u32,
    rate_bits: u32,
    taps: usize,
}

/// Memoizes bandpass kernels keyed on `(center_hz, sample_rate, taps)`.
///
/// Kernel design is a pure function of that tuple, so a band set reused
/// across many signals designs each filter exactly once.
#[derive(Debug, Clone, Default)]
pub struct KernelCache {
    kernels: HashMap<KernelKey, Arc<[f32]>>,
}

impl KernelCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the kernel for a band, designing and storing it on first use.
    pub fn get(&mut self, band: OctaveBand, sample_rate: f32, taps: usize) -> Result<Arc<[f32]>> {
        let key = KernelKey {
            center_bits: band.center_hz.to_bits(),
            rate_bits: sample_rate.to_bits(),
            taps,
        };
        if let Some(kernel) = self.kernels.get(&key) {
            return Ok(Arc::clone(kernel));
        }
        let kernel: Arc<[f32]> = bandpass_kernel(band, sample_rate, taps)?.into();
        self.kernels.insert(key, Arc::clone(&kernel));
        Ok(kernel)
    }

    /// Number of cached kernels.
    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    /// Whether the cache holds no kernels.
    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine(freq_hz: f32, sample_rate: f32, num_samples: usize) -> Vec<f32> {
        (0..num_samples)
            .map(|i| (2.0 * PI * freq_hz * i as f32 / sample_rate).sin())
            .collect()
    }

    fn rms(signal: &[f32]) -> f32 {
        (signal.iter().map(|x| x * x).sum::<f32>() / signal.len() as f32).sqrt()
    }

    #[test]
    fn band_edges() {
        let band = OctaveBand::new(1000.0);
        assert!((band.low_hz() - 707.1).abs() < 0.1);
        assert!((band.high_hz() - 1414.2).abs() < 0.1);
    }

    #[test]
    fn normalized_cutoffs_within_unit_interval() {
        let band = OctaveBand::new(1000.0);
        let (low, high) = band.normalized_cutoffs(48000.0).unwrap();
        assert!(0.0 < low && low < high && high < 1.0);
    }

    #[test]
    fn band_above_nyquist_is_rejected() {
        // 8 kHz band tops out at ~11.3 kHz, above the 8 kHz Nyquist of 16 kHz audio.
        let err = OctaveBand::new(8000.0).normalized_cutoffs(16000.0).unwrap_err();
        assert!(matches!(err, Error::InvalidBand { .. }));
    }

    #[test]
    fn non_positive_center_is_rejected() {
        assert!(OctaveBand::new(0.0).normalized_cutoffs(48000.0).is_err());
        assert!(OctaveBand::new(-100.0).normalized_cutoffs(48000.0).is_err());
    }

    #[test]
    fn kernel_is_deterministic() {
        let a = bandpass_kernel(OctaveBand::new(500.0), 48000.0, 256).unwrap();
        let b = bandpass_kernel(OctaveBand::new(500.0), 48000.0, 256).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn kernel_has_unity_midband_gain() {
        let sample_rate = 48000.0;
        let band = OctaveBand::new(1000.0);
        let kernel = bandpass_kernel(band, sample_rate, 1024).unwrap();

        // Evaluate the frequency response at the band midpoint directly.
        let (low, high) = band.normalized_cutoffs(sample_rate).unwrap();
        let f_mid = f64::from(low + high) / 2.0;
        let mid = (kernel.len() as f64 - 1.0) / 2.0;
        let gain: f64 = kernel
            .iter()
            .enumerate()
            .map(|(n, &h)| {
                f64::from(h) * (std::f64::consts::PI * f_mid * (n as f64 - mid)).cos()
            })
            .sum();
        assert!((gain - 1.0).abs() < 1e-3, "midband gain was {gain}");
    }

    #[test]
    fn filter_output_length_matches_input() {
        let sample_rate = 48000.0;
        for len in [100usize, 1000, 5000] {
            let signal = sine(1000.0, sample_rate, len);
            let out =
                octave_band_filter(&signal, sample_rate, OctaveBand::new(1000.0), 1024).unwrap();
            assert_eq!(out.len(), len);
        }
    }

    #[test]
    fn filter_passes_in_band_tone() {
        let sample_rate = 48000.0;
        let signal = sine(1000.0, sample_rate, 8192);
        let out = octave_band_filter(&signal, sample_rate, OctaveBand::new(1000.0), 1024).unwrap();

        // Compare away from the edges where the filter is fully immersed.
        let ratio = rms(&out[2048..6144]) / rms(&signal[2048..6144]);
        assert!(ratio > 0.7, "in-band tone attenuated, ratio {ratio}");
    }

    #[test]
    fn filter_rejects_out_of_band_tone() {
        let sample_rate = 48000.0;
        let signal = sine(100.0, sample_rate, 8192);
        let out = octave_band_filter(&signal, sample_rate, OctaveBand::new(1000.0), 1024).unwrap();

        let ratio = rms(&out[2048..6144]) / rms(&signal[2048..6144]);
        assert!(ratio < 0.05, "out-of-band tone leaked, ratio {ratio}");
    }

    #[test]
    fn filter_empty_signal() {
        let out = octave_band_filter(&[], 48000.0, OctaveBand::new(1000.0), 1024).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn cache_designs_each_kernel_once() {
        let mut cache = KernelCache::new();
        let band = OctaveBand::new(1000.0);
        let first = cache.get(band, 48000.0, 256).unwrap();
        let second = cache.get(band, 48000.0, 256).unwrap();
        assert_eq!(cache.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));

        cache.get(band, 44100.0, 256).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn cache_propagates_invalid_band() {
        let mut cache = KernelCache::new();
        assert!(cache.get(OctaveBand::new(8000.0), 16000.0, 256).is_err());
        assert!(cache.is_empty());
    }
}
