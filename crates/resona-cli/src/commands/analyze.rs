//! Per-band reverberation-time analysis command.

use crate::config::AnalysisConfig;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use resona_analysis::{BandRt60, DecayAnalyzer, OctaveBand, octave_bands};
use resona_io::read_wav_normalized;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV file (impulse response)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Include the 8 kHz band
    #[arg(long)]
    extended: bool,

    /// Comma-separated band center frequencies in Hz (overrides the band set)
    #[arg(long, value_delimiter = ',')]
    bands: Option<Vec<f32>>,

    /// FIR bandpass filter length (defaults to 1024 or the config value)
    #[arg(long)]
    taps: Option<usize>,

    /// Analysis settings file (TOML); command-line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write results as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write results as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
}

/// One analyzed band in an export file.
#[derive(Serialize)]
struct ReportRow {
    center_hz: f32,
    t30_seconds: Option<f32>,
    error: Option<String>,
}

impl From<&BandRt60> for ReportRow {
    fn from(row: &BandRt60) -> Self {
        match &row.result {
            Ok(fit) => Self {
                center_hz: row.band.center_hz,
                t30_seconds: Some(fit.t30_seconds),
                error: None,
            },
            Err(e) => Self {
                center_hz: row.band.center_hz,
                t30_seconds: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Resolve the band list: explicit `--bands`, then the config file, then the
/// chosen named set.
fn resolve_bands(args: &AnalyzeArgs, config: Option<&AnalysisConfig>) -> Vec<OctaveBand> {
    if let Some(centers) = &args.bands {
        return centers.iter().map(|&fc| OctaveBand::new(fc)).collect();
    }
    if let Some(config) = config {
        return config.bands.iter().map(|&fc| OctaveBand::new(fc)).collect();
    }
    if args.extended {
        octave_bands::EXTENDED.to_vec()
    } else {
        octave_bands::STANDARD.to_vec()
    }
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = args
        .config
        .as_deref()
        .map(AnalysisConfig::load)
        .transpose()?;

    println!("Analyzing {}...", args.input.display());
    let (samples, spec) = read_wav_normalized(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} samples, {} Hz, {:.2}s",
        samples.len(),
        spec.sample_rate,
        samples.len() as f32 / sample_rate
    );

    let bands = resolve_bands(&args, config.as_ref());
    let taps = args
        .taps
        .or(config.as_ref().map(|c| c.filter_taps))
        .unwrap_or(resona_analysis::DEFAULT_FILTER_TAPS);
    tracing::debug!(bands = bands.len(), taps, "starting per-band analysis");
    let mut analyzer = DecayAnalyzer::with_taps(sample_rate, taps);

    let pb = ProgressBar::new(bands.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} bands")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut rows = Vec::with_capacity(bands.len());
    for &band in &bands {
        let result = analyzer.analyze_band(&samples, band);
        rows.push(BandRt60 { band, result });
        pb.inc(1);
    }
    pb.finish_and_clear();

    print_table(&rows);

    if let Some(path) = &args.json {
        export_json(&rows, path)?;
        println!("Wrote {}", path.display());
    }
    if let Some(path) = &args.csv {
        export_csv(&rows, path)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn print_table(rows: &[BandRt60]) {
    println!();
    println!("{:>12}  {:>9}", "Center (Hz)", "T30 (s)");
    for row in rows {
        match &row.result {
            Ok(fit) => {
                println!("{:>12.0}  {:>9.2}", row.band.center_hz, fit.t30_seconds);
            }
            Err(e) => {
                println!("{:>12.0}  {:>9}  ({e})", row.band.center_hz, "--");
            }
        }
    }
}

fn export_json(rows: &[BandRt60], path: &Path) -> anyhow::Result<()> {
    let report: Vec<ReportRow> = rows.iter().map(ReportRow::from).collect();
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &report)?;
    Ok(())
}

fn export_csv(rows: &[BandRt60], path: &Path) -> anyhow::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "center_hz,t30_seconds,error")?;
    for row in rows.iter().map(ReportRow::from) {
        writeln!(
            file,
            "{},{},{}",
            row.center_hz,
            row.t30_seconds.map_or(String::new(), |t| format!("{t:.4}")),
            row.error.unwrap_or_default()
        )?;
    }
    Ok(())
}
