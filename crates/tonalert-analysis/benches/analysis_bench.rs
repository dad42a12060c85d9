//! Criterion benchmarks for tonalert-analysis
//!
//! Run with: cargo bench -p tonalert-analysis

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::f32::consts::PI;
use tonalert_analysis::{AnalysisConfig, Analyzer, Fft, Waveform, Window, analyze};

const SAMPLE_RATE: u32 = 48000;

/// Generate a 16-bit test tone with a little noise
fn generate_signal(size: usize, frequency: f32) -> Vec<i32> {
    let mut state = 0x12345678u32;
    (0..size)
        .map(|i| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = 50.0 * (state as i32 as f32) / (i32::MAX as f32);
            let tone = 16000.0 * (2.0 * PI * frequency * i as f32 / SAMPLE_RATE as f32).sin();
            (tone + noise).round() as i32
        })
        .collect()
}

fn bench_fft_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("FFT_Forward");

    for size in [256, 1024, 4096, 16384] {
        let fft = Fft::new(size).unwrap();
        let mut signal: Vec<f32> = generate_signal(size, 1000.0)
            .into_iter()
            .map(|s| s as f32)
            .collect();
        Window::Hann.apply(&mut signal);

        group.bench_with_input(BenchmarkId::from_parameter(size), &signal, |b, signal| {
            b.iter(|| fft.forward(black_box(signal)))
        });
    }

    group.finish();
}

fn bench_fixed_window(c: &mut Criterion) {
    let waveform = Waveform::new(SAMPLE_RATE, generate_signal(48000, 1000.0), 32767).unwrap();
    let analyzer = Analyzer::new(AnalysisConfig::fixed_window());

    c.bench_function("fixed_window_1024", |b| {
        b.iter(|| analyzer.analyze(black_box(&waveform)))
    });
}

fn bench_full_signal(c: &mut Criterion) {
    let mut group = c.benchmark_group("Full_Signal");
    let config = AnalysisConfig::full_signal()
        .with_frequency_range(1000.0, 4000.0)
        .unwrap();

    for seconds in [1usize, 5] {
        let waveform = Waveform::new(
            SAMPLE_RATE,
            generate_signal(SAMPLE_RATE as usize * seconds, 2500.0),
            32767,
        )
        .unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{seconds}s")),
            &waveform,
            |b, waveform| b.iter(|| analyze(black_box(waveform), &config)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_fft_forward, bench_fixed_window, bench_full_signal);
criterion_main!(benches);
