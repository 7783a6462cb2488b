//! Resona Analysis - Room-acoustic decay analysis
//!
//! This crate estimates reverberation time from a room impulse response (or
//! any time-domain signal) using the classic Schroeder method:
//!
//! - [`band`] - Octave-band definitions and time-aligned FIR bandpass filtering
//! - [`decay`] - Energy-decay curves via Schroeder integration
//! - [`reverb`] - T30 reverberation-time estimation by linear regression
//! - [`trim`] - Amplitude-threshold tail trimming for playback
//! - [`pipeline`] - Per-band orchestration producing a frequency/T30 table
//! - [`level`] - dB / linear amplitude conversions
//!
//! ## Example Workflow
//!
//! ```rust,ignore
//! use resona_analysis::{DecayAnalyzer, octave_bands};
//!
//! // 1. Obtain an impulse response (decoded WAV, simulator output, ...)
//!
//! // 2. Estimate T30 per octave band
//! let mut analyzer = DecayAnalyzer::new(sample_rate);
//! for row in analyzer.analyze(&impulse_response, &octave_bands::STANDARD) {
//!     match row.result {
//!         Ok(fit) => println!("{:.0} Hz: {:.2} s", row.band.center_hz, fit.t30_seconds),
//!         Err(e) => println!("{:.0} Hz: {}", row.band.center_hz, e),
//!     }
//! }
//! ```
//!
//! All computation is synchronous and pure: every stage takes a slice and
//! returns a fresh buffer, so the same analyzer can be reused across signals
//! (cached filter kernels are keyed on band, sample rate, and tap count).

pub mod band;
pub mod decay;
pub mod level;
pub mod pipeline;
pub mod reverb;
pub mod trim;

pub use band::{
    DEFAULT_FILTER_TAPS, KernelCache, OctaveBand, bandpass_kernel, filter_with_kernel,
    octave_band_filter, octave_bands,
};
pub use decay::decay_curve;
pub use level::{db_to_linear, linear_to_db};
pub use pipeline::{BandRt60, DecayAnalyzer, band_reverb_times};
pub use reverb::{DecayFit, decay_fit, reverb_time_t30};
pub use trim::trim_tail;

/// Error types for decay analysis.
///
/// Every variant is a value-level, recoverable failure: bands are analyzed
/// independently, so one band failing must never abort the others.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    /// The requested octave band does not fit between 0 Hz and Nyquist.
    #[error("octave band centered at {center_hz} Hz does not fit below the {nyquist} Hz Nyquist limit")]
    InvalidBand {
        /// Center frequency of the rejected band in Hz.
        center_hz: f32,
        /// Nyquist frequency (half the sample rate) in Hz.
        nyquist: f32,
    },

    /// The signal carries no energy to integrate.
    #[error("signal has no energy to integrate")]
    DegenerateSignal,

    /// Too few decay-curve points between the -5 dB and -35 dB crossings.
    #[error("decay curve has {points} point(s) between -5 dB and -35 dB, need at least 2")]
    InsufficientDecayRange {
        /// Number of points available for the regression.
        points: usize,
    },

    /// The fitted decay slope is not strictly negative.
    #[error("fitted decay slope {slope_db_per_sec} dB/s is not negative")]
    NonDecayingSignal {
        /// Slope of the least-squares fit in dB per second.
        slope_db_per_sec: f32,
    },
}

/// Convenience result type for decay analysis.
pub type Result<T> = std::result::Result<T, Error>;
