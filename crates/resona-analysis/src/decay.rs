//! Energy-decay curves via Schroeder integration.
//!
//! The Schroeder curve is the reverse-cumulative sum of a signal's squared
//! samples, converted to decibels relative to the maximum cumulative energy.
//! Integrating smooths the raw (noisy) squared signal, which is what makes a
//! straight-line decay fit meaningful.

use crate::{Error, Result};

/// Floor for decay-curve values, in dB relative to the maximum energy.
///
/// Trailing samples with zero remaining energy land on this floor instead of
/// producing negative infinity.
pub const DB_FLOOR: f32 = -100.0;

/// Compute the energy-decay curve of a (band-filtered) signal.
///
/// Index `i` of the result holds the total remaining energy from sample `i`
/// to the end, in dB relative to the maximum: `10 * log10(E[i] / max(E))`.
/// The output has the input's length, its value at the maximum-energy index
/// is exactly 0 dB, and every value is finite and non-positive.
///
/// Because squared samples are non-negative, the curve is non-increasing by
/// construction.
///
/// # Errors
/// [`Error::DegenerateSignal`] when the signal carries no energy (all-zero
/// or empty input), or when its energy is not finite. NaN or infinite
/// samples are reported through this error, never through NaN output.
pub fn decay_curve(signal: &[f32]) -> Result<Vec<f32>> {
    // Reverse-cumulative energy. Accumulating from the tail adds the
    // smallest terms first, which keeps the f32 sum well conditioned.
    let mut remaining = Vec::with_capacity(signal.len());
    let mut sum = 0.0f32;
    for &x in signal.iter().rev() {
        sum += x * x;
        remaining.push(sum);
    }
    remaining.reverse();

    let max_energy = remaining.iter().fold(0.0f32, |a, &b| a.max(b));
    let usable = max_energy > 0.0 && max_energy.is_finite();
    if !usable {
        return Err(Error::DegenerateSignal);
    }

    let floor_ratio = 10.0f32.powf(DB_FLOOR / 10.0);
    Ok(remaining
        .iter()
        .map(|&e| 10.0 * (e / max_energy).max(floor_ratio).log10())
        .collect())
}
