//! Criterion benchmarks for resona-analysis components
//!
//! Run with: cargo bench -p resona-analysis

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use resona_analysis::{
    DecayAnalyzer, OctaveBand, bandpass_kernel, decay_curve, filter_with_kernel, octave_bands,
    reverb_time_t30, trim_tail,
};

const SAMPLE_RATE: f32 = 48000.0;

/// Exponentially decaying white noise, a crude broadband impulse response.
fn generate_ir(size: usize, tau: f32) -> Vec<f32> {
    let mut state = 0x12345678u32;
    (0..size)
        .map(|i| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = (state as i32 as f32) / (i32::MAX as f32);
            noise * (-(i as f32) / (SAMPLE_RATE * tau)).exp()
        })
        .collect()
}

// ============================================================================
// Filter design and application
// ============================================================================

fn bench_kernel_design(c: &mut Criterion) {
    let mut group = c.benchmark_group("Kernel_Design");

    for &taps in &[256usize, 512, 1024, 2048] {
        group.bench_with_input(BenchmarkId::from_parameter(taps), &taps, |b, &taps| {
            b.iter(|| {
                let kernel =
                    bandpass_kernel(OctaveBand::new(1000.0), SAMPLE_RATE, black_box(taps));
                black_box(kernel)
            })
        });
    }

    group.finish();
}

fn bench_band_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("Band_Filter");
    group.sample_size(20);

    let kernel = bandpass_kernel(OctaveBand::new(1000.0), SAMPLE_RATE, 1024).unwrap();

    for &size in &[4800usize, 48000] {
        let signal = generate_ir(size, 0.2);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let out = filter_with_kernel(black_box(&signal), &kernel);
                black_box(out)
            })
        });
    }

    group.finish();
}

// ============================================================================
// Decay estimation
// ============================================================================

fn bench_decay_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decay_Curve");

    for &size in &[4800usize, 48000] {
        let signal = generate_ir(size, 0.2);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let curve = decay_curve(black_box(&signal));
                black_box(curve)
            })
        });
    }

    group.finish();
}

fn bench_t30_fit(c: &mut Criterion) {
    let signal = generate_ir(48000, 0.2);
    let curve = decay_curve(&signal).unwrap();

    c.bench_function("T30_Fit", |b| {
        b.iter(|| {
            let t30 = reverb_time_t30(black_box(&curve), SAMPLE_RATE);
            black_box(t30)
        })
    });
}

fn bench_trim(c: &mut Criterion) {
    let signal = generate_ir(48000, 0.2);

    c.bench_function("Trim_Tail", |b| {
        b.iter(|| {
            let trimmed = trim_tail(black_box(&signal), -60.0);
            black_box(trimmed)
        })
    });
}

// ============================================================================
// Full pipeline
// ============================================================================

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pipeline");
    group.sample_size(10);

    let signal = generate_ir(48000, 0.2);

    group.bench_function("standard_bands_cold", |b| {
        b.iter(|| {
            let mut analyzer = DecayAnalyzer::new(SAMPLE_RATE);
            let rows = analyzer.analyze(black_box(&signal), &octave_bands::STANDARD);
            black_box(rows)
        })
    });

    group.bench_function("standard_bands_warm_cache", |b| {
        let mut analyzer = DecayAnalyzer::new(SAMPLE_RATE);
        analyzer.analyze(&signal, &octave_bands::STANDARD);
        b.iter(|| {
            let rows = analyzer.analyze(black_box(&signal), &octave_bands::STANDARD);
            black_box(rows)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_kernel_design,
    bench_band_filter,
    bench_decay_curve,
    bench_t30_fit,
    bench_trim,
    bench_pipeline
);
criterion_main!(benches);
