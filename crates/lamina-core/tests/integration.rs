//! Integration tests for lamina-core filters working together.

use lamina_core::{
    AnalogBiquadCoefficients, Biquad, BiquadCascade, BiquadDf1, BiquadDf2, BiquadTdf1, BiquadTdf2,
    Context, Contextual, FirFilter, HighPass1, LowPass1, Processor, ProcessorExt,
    StateVariableFilter, SvfOutput, bilinear, butterworth_highpass, butterworth_lowpass, prewarp,
    windowed_sinc_lowpass,
};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

const SAMPLE_RATE: f64 = 48000.0;

/// Linear sine sweep from `f0` to `f1` Hz over `len` samples.
fn sweep(f0: f64, f1: f64, len: usize) -> Vec<f64> {
    let duration = len as f64 / SAMPLE_RATE;
    (0..len)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE;
            let phase = 2.0 * PI * (f0 * t + (f1 - f0) * t * t / (2.0 * duration));
            phase.sin()
        })
        .collect()
}

/// Steady-state peak amplitude of `filter` driven by a unit sine at `freq`.
fn sine_gain<P: Processor<f64>>(filter: &mut P, freq: f64) -> f64 {
    filter.reset();
    let settle = 9600;
    let measure = 4800;
    let mut peak: f64 = 0.0;
    for i in 0..settle + measure {
        let x = (2.0 * PI * freq * i as f64 / SAMPLE_RATE).sin();
        let y = filter.process(x);
        if i >= settle {
            peak = peak.max(y.abs());
        }
    }
    peak
}

#[test]
fn biquad_topologies_agree_on_swept_sine() {
    let wc = prewarp(1500.0, SAMPLE_RATE);
    for analog in [
        AnalogBiquadCoefficients::lowpass(wc, 0.707),
        AnalogBiquadCoefficients::highpass(wc, 2.0),
        AnalogBiquadCoefficients::bandpass(wc, 4.0),
        AnalogBiquadCoefficients::notch(wc, 1.0),
    ] {
        let c = bilinear::<f64>(analog, SAMPLE_RATE);
        let mut df1 = BiquadDf1::with_coefficients(c);
        let mut df2 = BiquadDf2::with_coefficients(c);
        let mut tdf1 = BiquadTdf1::with_coefficients(c);
        let mut tdf2 = BiquadTdf2::with_coefficients(c);

        for (i, x) in sweep(20.0, 20000.0, 4096).into_iter().enumerate() {
            let reference = df1.process(x);
            for (name, y) in [
                ("df2", df2.process(x)),
                ("tdf1", tdf1.process(x)),
                ("tdf2", tdf2.process(x)),
            ] {
                assert!(
                    (y - reference).abs() < 1e-6,
                    "{name} diverged at sample {i}: {y} vs {reference}"
                );
            }
        }
    }
}

#[test]
fn bilinear_one_pole_has_unity_dc_gain() {
    for sr in [22050.0, 44100.0, 48000.0, 96000.0] {
        for freq in [50.0, 1000.0, 8000.0] {
            let c = bilinear::<f64>(
                AnalogBiquadCoefficients::lowpass1(prewarp(freq, sr)),
                sr,
            );
            let dc = (c.b0 + c.b1 + c.b2) / (1.0 + c.a1 + c.a2);
            assert!((dc - 1.0).abs() < 1e-12, "sr={sr} freq={freq}: dc={dc}");
        }
    }
}

#[test]
fn prewarped_biquad_hits_cutoff() {
    let wc = prewarp(2000.0, SAMPLE_RATE);
    let c = bilinear::<f64>(AnalogBiquadCoefficients::lowpass(wc, FRAC_1_SQRT_2), SAMPLE_RATE);
    let mut filter = Biquad::<f64>::with_coefficients(c);
    let gain = sine_gain(&mut filter, 2000.0);
    assert!((gain - FRAC_1_SQRT_2).abs() < 0.01, "gain={gain}");
}

#[test]
fn butterworth_cascade_response() {
    let ctx = Context::new(SAMPLE_RATE);
    let mut lowpass = BiquadCascade::<f64, 4>::new();
    lowpass.set_coefficients(&butterworth_lowpass(1000.0, &ctx));

    assert!((sine_gain(&mut lowpass, 100.0) - 1.0).abs() < 0.01);
    assert!((sine_gain(&mut lowpass, 1000.0) - FRAC_1_SQRT_2).abs() < 0.01);
    assert!(sine_gain(&mut lowpass, 4000.0) < 1e-4);

    let mut highpass = BiquadCascade::<f64, 2>::new();
    highpass.set_coefficients(&butterworth_highpass(1000.0, &ctx));
    assert!(sine_gain(&mut highpass, 100.0) < 1e-3);
    assert!((sine_gain(&mut highpass, 10000.0) - 1.0).abs() < 0.02);
}

#[test]
fn svf_bounded_at_max_resonance() {
    for output in [
        SvfOutput::Lowpass,
        SvfOutput::Highpass,
        SvfOutput::Bandpass,
        SvfOutput::Notch,
    ] {
        let mut svf = StateVariableFilter::<f64>::new();
        svf.set_context(Context::new(SAMPLE_RATE));
        svf.set_cutoff_frequency(1000.0);
        svf.set_resonance(1.0);
        svf.set_output_type(output);

        let mut peak: f64 = 0.0;
        for x in sweep(20.0, 20000.0, 96000) {
            let y = svf.process(x);
            assert!(y.is_finite());
            peak = peak.max(y.abs());
        }
        assert!(peak < 20.0, "{output:?} peaked at {peak}");
    }
}

#[test]
fn svf_outputs_at_cutoff() {
    let mut svf = StateVariableFilter::<f64>::new();
    svf.set_context(Context::new(SAMPLE_RATE));
    svf.set_cutoff_frequency(500.0);

    svf.set_output_type(SvfOutput::Lowpass);
    assert!(sine_gain(&mut svf, 50.0) > 0.95);
    svf.set_output_type(SvfOutput::Highpass);
    assert!(sine_gain(&mut svf, 50.0) < 0.05);
    assert!(sine_gain(&mut svf, 10000.0) > 0.95);
    svf.set_output_type(SvfOutput::Notch);
    assert!(sine_gain(&mut svf, 500.0) < 0.1);
}

#[test]
fn one_pole_response() {
    let ctx = Context::new(SAMPLE_RATE);
    let mut lp = LowPass1::<f64>::new();
    lp.set_context(ctx);
    lp.set_cutoff_frequency(1000.0);
    let gain = sine_gain(&mut lp, 1000.0);
    assert!((0.68..0.73).contains(&gain), "lowpass gain at cutoff {gain}");
    assert!(sine_gain(&mut lp, 20.0) > 0.99);

    let mut hp = HighPass1::<f64>::new();
    hp.set_context(ctx);
    hp.set_cutoff_frequency(1000.0);
    assert!(sine_gain(&mut hp, 20.0) < 0.03);
    assert!(sine_gain(&mut hp, 15000.0) > 0.95);
}

#[test]
fn chained_one_poles_reject_dc() {
    let mut band = HighPass1::<f64>::new().chain(LowPass1::new());
    band.set_context(Context::new(SAMPLE_RATE));
    band.first_mut().set_cutoff_frequency(200.0);
    band.second_mut().set_cutoff_frequency(2000.0);

    let mut y = 1.0;
    for _ in 0..48000 {
        y = band.process(1.0);
    }
    assert!(y.abs() < 1e-6);
    assert!(sine_gain(&mut band, 630.0) > 0.7);
}

#[test]
fn fir_lowpass_passes_dc_and_delays_by_half_length() {
    let kernel = windowed_sinc_lowpass(2000.0, 0.002, SAMPLE_RATE).unwrap();
    let mut fir = FirFilter::<f64>::from_design(&kernel).unwrap();
    let delay = fir.latency_samples();

    // Step response crosses half-height at the group delay.
    let step: Vec<f64> = (0..kernel.len() + 10).map(|_| fir.process(1.0)).collect();
    assert!(step[delay - 1] < 0.5 && step[delay] > 0.5);
    assert!((step[kernel.len() - 1] - 1.0).abs() < 1e-9);

    assert!(sine_gain(&mut fir, 200.0) > 0.99);
    assert!(sine_gain(&mut fir, 15000.0) < 0.01);
}

#[test]
fn f32_and_f64_paths_agree() {
    let c = bilinear::<f64>(
        AnalogBiquadCoefficients::lowpass(prewarp(800.0, SAMPLE_RATE), 0.9),
        SAMPLE_RATE,
    );
    let mut wide = Biquad::<f64>::with_coefficients(c);
    let mut narrow = Biquad::<f32>::with_coefficients(c.cast());
    for x in sweep(20.0, 5000.0, 2048) {
        let a = wide.process(x);
        let b = f64::from(narrow.process(x as f32));
        assert!((a - b).abs() < 1e-3);
    }
}
