//! Analytic transfer-function evaluation.
//!
//! Frequencies enter as points on the s-plane imaginary axis ([`f2s`]).
//! Digital coefficient sets are evaluated by mapping that point through the
//! bilinear substitution, which is exactly the mapping [`lamina_core::bilinear`]
//! used to derive them: evaluating `bilinear(analog)` here at `f2s(f)` gives
//! the analog prototype's response at `f`, unwarped.
//!
//! To read the digital filter's response at a physical frequency `f`, prewarp
//! first: `f2s(prewarp(f, sr) / (2π))`.

use lamina_core::{
    AnalogBiquadCoefficients, DigitalBiquadCoefficients, HighPass1, LowPass1, NaiveLowPass, Sample,
};
use rustfft::num_complex::Complex;
use std::f64::consts::TAU;

/// The s-plane point `j·2πf` for a frequency in Hz.
pub fn f2s(freq: f64) -> Complex<f64> {
    Complex::new(0.0, freq * TAU)
}

/// Bilinear map of an s-plane point to the z-plane: `z = (k + s) / (k − s)`,
/// `k = 2·sample_rate`.
pub fn bilinear_z(s: Complex<f64>, sample_rate: f64) -> Complex<f64> {
    let k = Complex::new(sample_rate * 2.0, 0.0);
    (k + s) / (k - s)
}

/// Response of a digital biquad at the z-plane image of `s`.
///
/// Evaluates `(b0 + b1·z⁻¹ + b2·z⁻²) / (a0 + a1·z⁻¹ + a2·z⁻²)` with
/// `z⁻¹ = (k − s) / (k + s)`.
pub fn biquad_transfer<T: Sample>(
    coeffs: &DigitalBiquadCoefficients<T>,
    s: Complex<f64>,
    sample_rate: f64,
) -> Complex<f64> {
    let k = Complex::new(sample_rate * 2.0, 0.0);
    let z1 = (k - s) / (k + s);
    let z2 = z1 * z1;
    let (b0, b1, b2) = (coeffs.b0.into_f64(), coeffs.b1.into_f64(), coeffs.b2.into_f64());
    let (a0, a1, a2) = (coeffs.a0.into_f64(), coeffs.a1.into_f64(), coeffs.a2.into_f64());
    (z1 * b1 + z2 * b2 + b0) / (z1 * a1 + z2 * a2 + a0)
}

/// Response of an analog prototype at `s`.
pub fn analog_biquad_transfer<T: Sample>(
    coeffs: &AnalogBiquadCoefficients<T>,
    s: Complex<f64>,
) -> Complex<f64> {
    let s2 = s * s;
    let (b0, b1, b2) = (coeffs.b0.into_f64(), coeffs.b1.into_f64(), coeffs.b2.into_f64());
    let (a0, a1, a2) = (coeffs.a0.into_f64(), coeffs.a1.into_f64(), coeffs.a2.into_f64());
    (s * b1 + s2 * b2 + b0) / (s * a1 + s2 * a2 + a0)
}

/// First-order low-pass prototype `wc / (wc + s)`.
pub fn transfer_lp1(wc: Complex<f64>, s: Complex<f64>) -> Complex<f64> {
    wc / (wc + s)
}

/// First-order high-pass prototype `s / (wc + s)`.
pub fn transfer_hp1(wc: Complex<f64>, s: Complex<f64>) -> Complex<f64> {
    s / (wc + s)
}

/// Magnitude of a complex response in dB, floored at -240 dB.
pub fn magnitude_db(h: Complex<f64>) -> f64 {
    20.0 * h.norm().max(1e-12).log10()
}

/// Analog prototype response of a configured filter.
pub trait AnalogResponse {
    /// Response of the filter's analog prototype at `freq` Hz.
    fn analog_response(&self, freq: f64) -> Complex<f64>;
}

fn cutoff_to_wc<T: Sample>(cutoff: T) -> Complex<f64> {
    Complex::new(cutoff.into_f64() * TAU, 0.0)
}

impl<T: Sample> AnalogResponse for NaiveLowPass<T> {
    fn analog_response(&self, freq: f64) -> Complex<f64> {
        transfer_lp1(cutoff_to_wc(self.cutoff_frequency()), f2s(freq))
    }
}

impl<T: Sample> AnalogResponse for LowPass1<T> {
    fn analog_response(&self, freq: f64) -> Complex<f64> {
        transfer_lp1(cutoff_to_wc(self.cutoff_frequency()), f2s(freq))
    }
}

impl<T: Sample> AnalogResponse for HighPass1<T> {
    fn analog_response(&self, freq: f64) -> Complex<f64> {
        transfer_hp1(cutoff_to_wc(self.cutoff_frequency()), f2s(freq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lamina_core::{bilinear, prewarp};
    use std::f64::consts::FRAC_1_SQRT_2;

    const SR: f64 = 48000.0;

    #[test]
    fn test_f2s_is_imaginary() {
        let s = f2s(1000.0);
        assert_eq!(s.re, 0.0);
        assert!((s.im - 1000.0 * TAU).abs() < 1e-9);
    }

    #[test]
    fn test_bilinear_z_on_unit_circle() {
        for freq in [0.0, 100.0, 5000.0, 20000.0] {
            let z = bilinear_z(f2s(freq), SR);
            assert!((z.norm() - 1.0).abs() < 1e-12);
        }
        let dc = bilinear_z(f2s(0.0), SR);
        assert!((dc.re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_one_pole_prototypes() {
        let wc = Complex::new(1000.0 * TAU, 0.0);
        let s = f2s(1000.0);
        assert!((transfer_lp1(wc, s).norm() - FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((transfer_hp1(wc, s).norm() - FRAC_1_SQRT_2).abs() < 1e-12);
        let sum = transfer_lp1(wc, s) + transfer_hp1(wc, s);
        assert!((sum - Complex::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_bilinear_coefficients_reproduce_prototype() {
        let wc = 2.0 * SR * (core::f64::consts::PI * 2000.0 / SR).tan();
        for analog in [
            AnalogBiquadCoefficients::lowpass(wc, 0.707),
            AnalogBiquadCoefficients::highpass(wc, 3.0),
            AnalogBiquadCoefficients::bandpass(wc, 1.5),
            AnalogBiquadCoefficients::notch(wc, 0.5),
            AnalogBiquadCoefficients::lowpass1(wc),
        ] {
            let digital = bilinear::<f64>(analog, SR);
            for freq in [10.0, 500.0, 2000.0, 9000.0, 30000.0] {
                let s = f2s(freq);
                let a = analog_biquad_transfer(&analog, s);
                let d = biquad_transfer(&digital, s, SR);
                assert!((a - d).norm() < 1e-9 * a.norm().max(1.0), "freq {freq}");
            }
        }
    }

    #[test]
    fn test_prewarped_digital_cutoff() {
        let digital = bilinear::<f64>(
            AnalogBiquadCoefficients::lowpass1(prewarp(3000.0, SR)),
            SR,
        );
        let s = f2s(prewarp(3000.0, SR) / TAU);
        assert!((biquad_transfer(&digital, s, SR).norm() - FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((magnitude_db(biquad_transfer(&digital, s, SR)) + 3.0103).abs() < 1e-3);
    }

    #[test]
    fn test_filter_prototype_response() {
        let mut lp = LowPass1::<f32>::new();
        lp.set_cutoff_frequency(500.0);
        let h = lp.analog_response(500.0);
        assert!((h.norm() - FRAC_1_SQRT_2).abs() < 1e-6);

        let mut hp = HighPass1::<f64>::new();
        hp.set_cutoff_frequency(500.0);
        assert!(hp.analog_response(5.0).norm() < 0.011);

        let naive = NaiveLowPass::<f64>::new();
        assert!((naive.analog_response(0.0).re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_magnitude_floor() {
        assert!((magnitude_db(Complex::new(0.0, 0.0)) + 240.0).abs() < 1e-9);
        assert!((magnitude_db(Complex::new(0.0, 10.0)) - 20.0).abs() < 1e-12);
    }
}
