//! T30 reverberation-time estimation.
//!
//! Fits a line to the -5 dB..-35 dB span of an energy-decay curve and
//! extrapolates the time to decay 60 dB (the conventional RT60), i.e.
//! `T30 = -60 / slope`.

use crate::{Error, Result};

/// Upper edge of the regression window, in dB.
pub const FIT_START_DB: f32 = -5.0;

/// Lower edge of the regression window, in dB.
pub const FIT_END_DB: f32 = -35.0;

/// Result of fitting a line to a decay curve.
///
/// Carries the extrapolated T30 plus the fit itself, so hosts can judge the
/// quality of the regression (window size, slope) and not just the scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayFit {
    /// Extrapolated time to decay 60 dB, in seconds.
    pub t30_seconds: f32,
    /// Fitted slope in dB per second (always negative).
    pub slope_db_per_sec: f32,
    /// Fitted intercept in dB at `t = 0`.
    pub intercept_db: f32,
    /// First curve index inside the regression window.
    pub fit_start: usize,
    /// One past the last curve index inside the regression window.
    pub fit_end: usize,
}

/// Fit the -5 dB..-35 dB span of a decay curve and extrapolate T30.
///
/// The fit window is found by scanning front-to-back for the first points
/// below [`FIT_START_DB`] and [`FIT_END_DB`]; on the non-increasing curves
/// produced by [`decay_curve`](crate::decay::decay_curve) these are the
/// threshold crossings. An ordinary least-squares line of dB against
/// `t[i] = i / sample_rate` over that window gives the decay slope.
///
/// # Errors
/// * [`Error::InsufficientDecayRange`] when fewer than two points lie
///   between the two thresholds (the curve never drops far enough).
/// * [`Error::NonDecayingSignal`] when the fitted slope is not strictly
///   negative (noise-dominated or pathological input). A zero-slope division
///   is reported this way, never as an infinite T30.
pub fn decay_fit(decay_db: &[f32], sample_rate: f32) -> Result<DecayFit> {
    let fit_start = decay_db
        .iter()
        .position(|&v| v < FIT_START_DB)
        .unwrap_or(decay_db.len());
    let fit_end = decay_db
        .iter()
        .position(|&v| v < FIT_END_DB)
        .unwrap_or(decay_db.len());

    if fit_end < fit_start + 2 {
        return Err(Error::InsufficientDecayRange {
            points: fit_end - fit_start,
        });
    }

    // Least squares of dB against time over [fit_start, fit_end).
    let n = (fit_end - fit_start) as f64;
    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    let mut sum_xy = 0.0f64;
    let mut sum_xx = 0.0f64;
    for (i, &db) in decay_db[fit_start..fit_end].iter().enumerate() {
        let x = (fit_start + i) as f64 / f64::from(sample_rate);
        let y = f64::from(db);
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;

    let decaying = slope < 0.0;
    if !decaying {
        return Err(Error::NonDecayingSignal {
            slope_db_per_sec: slope as f32,
        });
    }

    Ok(DecayFit {
        t30_seconds: (-60.0 / slope) as f32,
        slope_db_per_sec: slope as f32,
        intercept_db: intercept as f32,
        fit_start,
        fit_end,
    })
}

/// Estimate T30 from a decay curve, returning only the time in seconds.
///
/// See [`decay_fit`] for the full fit metrics and error conditions.
pub fn reverb_time_t30(decay_db: &[f32], sample_rate: f32) -> Result<f32> {
    decay_fit(decay_db, sample_rate).map(|fit| fit.t30_seconds)
}
