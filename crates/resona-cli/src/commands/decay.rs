//! Energy-decay-curve export command.
//!
//! Writes the Schroeder curve of one octave band as CSV (`time_seconds,db`)
//! for plotting in external tools.

use clap::Args;
use resona_analysis::{DecayAnalyzer, OctaveBand};
use resona_io::read_wav_normalized;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args)]
pub struct DecayArgs {
    /// Input WAV file (impulse response)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Band center frequency in Hz
    #[arg(long, default_value = "1000.0")]
    band: f32,

    /// FIR bandpass filter length
    #[arg(long, default_value = "1024")]
    taps: usize,

    /// Output CSV file
    #[arg(short, long)]
    output: PathBuf,
}

pub fn run(args: DecayArgs) -> anyhow::Result<()> {
    let (samples, spec) = read_wav_normalized(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    let mut analyzer = DecayAnalyzer::with_taps(sample_rate, args.taps);
    let curve = analyzer.band_decay_curve(&samples, OctaveBand::new(args.band))?;

    let mut file = std::fs::File::create(&args.output)?;
    writeln!(file, "time_seconds,db")?;
    for (i, db) in curve.iter().enumerate() {
        writeln!(file, "{:.6},{db:.3}", i as f32 / sample_rate)?;
    }

    println!(
        "Wrote {} points for the {} Hz band to {}",
        curve.len(),
        args.band,
        args.output.display()
    );
    Ok(())
}
