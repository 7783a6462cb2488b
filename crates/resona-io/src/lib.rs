//! WAV file I/O for the resona decay-analysis toolkit.
//!
//! This crate provides:
//!
//! - **Decoding**: [`read_wav`] loads a file to mono `f32` samples plus its
//!   spec; [`read_wav_normalized`] additionally scales the peak to full
//!   scale, the form analysis and playback both expect
//! - **Encoding**: [`write_wav`] saves samples back out
//! - **Probing**: [`read_wav_info`] reads metadata without loading samples
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use resona_io::{read_wav_normalized, write_wav};
//!
//! let (samples, spec) = read_wav_normalized("impulse_response.wav")?;
//! println!("{} samples at {} Hz", samples.len(), spec.sample_rate);
//! ```

mod wav;

pub use wav::{
    WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, read_wav_normalized, write_wav,
};

/// Error types for WAV I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for WAV I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
