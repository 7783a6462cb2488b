//! Amplitude-threshold tail trimming.

use crate::level::db_to_linear;

/// Truncate trailing samples below an amplitude threshold.
///
/// Keeps the prefix through the last sample whose magnitude exceeds
/// `10^(threshold_db / 20)`. When no sample exceeds the threshold the input
/// is returned unchanged: a too-aggressive threshold must never silently
/// produce an empty signal.
///
/// The operation is idempotent: re-applying the same threshold to its own
/// output is a no-op, since the retained tail sample still exceeds it.
///
/// # Arguments
/// * `signal` - Input samples, any amplitude scale
/// * `threshold_db` - Cutoff in dB relative to full scale (e.g. `-60.0`)
///
/// # Example
///
/// ```rust
/// use resona_analysis::trim::trim_tail;
///
/// let signal = vec![1.0, 0.5, 0.0001, 0.0001];
/// let trimmed = trim_tail(&signal, -60.0);
/// assert_eq!(trimmed, vec![1.0, 0.5]);
/// ```
pub fn trim_tail(signal: &[f32], threshold_db: f32) -> Vec<f32> {
    let threshold = db_to_linear(threshold_db);
    match signal.iter().rposition(|&x| x.abs() > threshold) {
        Some(last) => signal[..=last].to_vec(),
        None => signal.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_silence() {
        let mut signal = vec![0.8f32, -0.4, 0.2];
        signal.extend(vec![1e-6f32; 100]);
        let trimmed = trim_tail(&signal, -60.0);
        assert_eq!(trimmed, vec![0.8, -0.4, 0.2]);
    }

    #[test]
    fn keeps_negative_peaks() {
        let signal = vec![0.1f32, -0.9, 1e-5, 1e-5];
        let trimmed = trim_tail(&signal, -20.0);
        assert_eq!(trimmed, vec![0.1, -0.9]);
    }

    #[test]
    fn below_threshold_signal_is_unchanged() {
        let signal = vec![1e-5f32; 50];
        assert_eq!(trim_tail(&signal, -60.0), signal);
    }

    #[test]
    fn idempotent() {
        let signal: Vec<f32> = (0..500).map(|i| (-(i as f32) / 50.0).exp()).collect();
        let once = trim_tail(&signal, -40.0);
        let twice = trim_tail(&once, -40.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_signal_stays_empty() {
        assert!(trim_tail(&[], -60.0).is_empty());
    }
}
