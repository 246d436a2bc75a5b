//! Criterion benchmarks for lamina-core filters
//!
//! Run with: cargo bench -p lamina-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lamina_core::{
    AnalogBiquadCoefficients, BiquadCascade, BiquadDf1, BiquadDf2, BiquadTdf1, BiquadTdf2,
    ConstantTimeSmoother, Context, Contextual, FirFilter, LowPass1, NaiveLowPass, Processor,
    Smoother, StateVariableFilter, bilinear, butterworth_lowpass, prewarp, windowed_sinc_lowpass,
};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_processor<P: Processor<f32>>(c: &mut Criterion, group_name: &str, make: impl Fn() -> P) {
    let mut group = c.benchmark_group(group_name);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        let mut output = vec![0.0; block_size];

        group.bench_with_input(
            BenchmarkId::new("process_block", block_size),
            &block_size,
            |b, _| {
                let mut filter = make();
                b.iter(|| {
                    filter.process_block(black_box(&input), &mut output);
                    black_box(&output);
                });
            },
        );
    }

    group.finish();
}

fn bench_biquad_topologies(c: &mut Criterion) {
    let sr = f64::from(SAMPLE_RATE);
    let coeffs = bilinear::<f32>(
        AnalogBiquadCoefficients::lowpass(prewarp(1000.0, sr) as f32, 0.707),
        sr,
    );

    bench_processor(c, "Biquad/DF1", || BiquadDf1::with_coefficients(coeffs));
    bench_processor(c, "Biquad/DF2", || BiquadDf2::with_coefficients(coeffs));
    bench_processor(c, "Biquad/TDF1", || BiquadTdf1::with_coefficients(coeffs));
    bench_processor(c, "Biquad/TDF2", || BiquadTdf2::with_coefficients(coeffs));

    let mut group = c.benchmark_group("Biquad");
    group.bench_function("bilinear", |b| {
        b.iter(|| {
            black_box(bilinear::<f32>(
                AnalogBiquadCoefficients::lowpass(black_box(prewarp(1000.0, sr) as f32), 0.707),
                sr,
            ))
        });
    });
    group.finish();
}

fn bench_cascade(c: &mut Criterion) {
    let ctx = Context::new(f64::from(SAMPLE_RATE));
    let sections = butterworth_lowpass::<f32, 4>(2000.0, &ctx);
    bench_processor(c, "BiquadCascade/8th-order", || {
        let mut cascade = BiquadCascade::<f32, 4>::new();
        cascade.set_coefficients(&sections);
        cascade
    });
}

fn bench_one_pole(c: &mut Criterion) {
    let ctx = Context::new(f64::from(SAMPLE_RATE));
    bench_processor(c, "OnePole/naive", || {
        let mut lp = NaiveLowPass::<f32>::new();
        lp.set_context(ctx);
        lp.set_cutoff_frequency(1000.0);
        lp
    });
    bench_processor(c, "OnePole/tpt", || {
        let mut lp = LowPass1::<f32>::new();
        lp.set_context(ctx);
        lp.set_cutoff_frequency(1000.0);
        lp
    });
}

fn bench_svf(c: &mut Criterion) {
    let ctx = Context::new(f64::from(SAMPLE_RATE));
    bench_processor(c, "SVF", || {
        let mut svf = StateVariableFilter::<f32>::new();
        svf.set_context(ctx);
        svf.set_cutoff_frequency(1000.0);
        svf.set_resonance(0.7);
        svf
    });
}

fn bench_fir(c: &mut Criterion) {
    let sr = f64::from(SAMPLE_RATE);
    for duration in [0.001, 0.004] {
        let Ok(kernel) = windowed_sinc_lowpass(2000.0, duration, sr) else {
            continue;
        };
        let name = format!("FIR/{}-taps", kernel.len());
        bench_processor(c, &name, || {
            FirFilter::<f32>::from_design(&kernel).unwrap_or_default()
        });
    }

    let mut group = c.benchmark_group("FIR");
    group.bench_function("design_191", |b| {
        b.iter(|| black_box(windowed_sinc_lowpass(black_box(2000.0), 0.004, sr)));
    });
    group.finish();
}

fn bench_smoother(c: &mut Criterion) {
    let mut group = c.benchmark_group("ConstantTimeSmoother");

    group.bench_function("ramp_1024", |b| {
        let mut smoother = ConstantTimeSmoother::<f32>::new();
        smoother.set_time(0.01);
        b.iter(|| {
            smoother.reset();
            smoother.set_target_value(black_box(1.0));
            for _ in 0..1024 {
                black_box(smoother.process());
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_biquad_topologies,
    bench_cascade,
    bench_one_pole,
    bench_svf,
    bench_fir,
    bench_smoother,
);
criterion_main!(benches);
