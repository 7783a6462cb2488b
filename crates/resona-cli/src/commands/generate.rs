//! Test signal generation command.
//!
//! Produces synthetic signals with known decay behavior, so the analysis
//! pipeline can be validated without a measured or simulated room.

use clap::{Args, Subcommand};
use resona_io::{WavSpec, write_wav};
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Exponentially decaying noise with a chosen reverberation time
    Decay {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Target RT60 in seconds
        #[arg(long, default_value = "1.0")]
        rt60: f32,

        /// Duration in seconds
        #[arg(long, default_value = "2.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,
    },

    /// A single unit impulse
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Length in samples
        #[arg(long, default_value = "48000")]
        length: usize,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,
    },

    /// Stationary white noise
    Noise {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,
    },
}

/// Deterministic xorshift white noise in [-1, 1].
fn white_noise(length: usize, amplitude: f32) -> Vec<f32> {
    let mut state = 0x12345678u32;
    (0..length)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as i32 as f32) / (i32::MAX as f32) * amplitude
        })
        .collect()
}

/// Noise shaped by an exponential envelope that decays 60 dB in `rt60` seconds.
fn decaying_noise(sample_rate: f32, rt60: f32, num_samples: usize) -> Vec<f32> {
    // 60 dB of amplitude decay is a factor of 10^3 = e^6.908.
    let tau = rt60 / 6.908;
    white_noise(num_samples, 1.0)
        .into_iter()
        .enumerate()
        .map(|(i, noise)| noise * (-(i as f32) / (sample_rate * tau)).exp())
        .collect()
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Decay {
            output,
            rt60,
            duration,
            sample_rate,
        } => {
            let num_samples = (duration * sample_rate as f32) as usize;
            let signal = decaying_noise(sample_rate as f32, rt60, num_samples);
            let spec = WavSpec {
                sample_rate,
                ..Default::default()
            };
            write_wav(&output, &signal, spec)?;
            println!(
                "Wrote {:.2}s decay (RT60 {rt60} s) to {}",
                duration,
                output.display()
            );
        }

        GenerateCommand::Impulse {
            output,
            length,
            sample_rate,
        } => {
            let mut signal = vec![0.0f32; length];
            if let Some(first) = signal.first_mut() {
                *first = 1.0;
            }
            let spec = WavSpec {
                sample_rate,
                ..Default::default()
            };
            write_wav(&output, &signal, spec)?;
            println!("Wrote {length}-sample impulse to {}", output.display());
        }

        GenerateCommand::Noise {
            output,
            duration,
            sample_rate,
            amplitude,
        } => {
            let num_samples = (duration * sample_rate as f32) as usize;
            let signal = white_noise(num_samples, amplitude);
            let spec = WavSpec {
                sample_rate,
                ..Default::default()
            };
            write_wav(&output, &signal, spec)?;
            println!("Wrote {:.2}s of noise to {}", duration, output.display());
        }
    }

    Ok(())
}
