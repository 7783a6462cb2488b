//! Tail-trimming command for playback preparation.

use clap::Args;
use resona_analysis::trim_tail;
use resona_io::{read_wav_normalized, write_wav};
use std::path::PathBuf;

#[derive(Args)]
pub struct TrimArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(short, long)]
    output: PathBuf,

    /// Trim threshold in dB relative to full scale
    #[arg(long, default_value = "-60.0", allow_hyphen_values = true)]
    threshold: f32,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: TrimArgs) -> anyhow::Result<()> {
    let (samples, mut spec) = read_wav_normalized(&args.input)?;
    let trimmed = trim_tail(&samples, args.threshold);

    if trimmed.len() == samples.len() {
        println!(
            "No samples below {} dB to trim; copying unchanged.",
            args.threshold
        );
    } else {
        let removed = samples.len() - trimmed.len();
        println!(
            "Trimmed {removed} samples ({:.3}s) below {} dB.",
            removed as f32 / spec.sample_rate as f32,
            args.threshold
        );
    }

    spec.channels = 1;
    spec.bits_per_sample = args.bit_depth;
    write_wav(&args.output, &trimmed, spec)?;
    println!("Wrote {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use resona_io::{WavSpec, read_wav};

    #[test]
    fn trims_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("out.wav");

        // Full-scale burst followed by a quiet tail.
        let mut samples = vec![1.0f32, -0.5, 0.25];
        samples.extend(vec![1e-5f32; 1000]);
        write_wav(&input, &samples, WavSpec::default()).unwrap();

        run(TrimArgs {
            input,
            output: output.clone(),
            threshold: -60.0,
            bit_depth: 32,
        })
        .unwrap();

        let (trimmed, _) = read_wav(&output).unwrap();
        assert_eq!(trimmed.len(), 3);
    }
}
