//! Coefficient derivation: continuous-time parameters to per-sample values.
//!
//! Two families live here:
//!
//! - **One-pole gains** ([`frequency_to_g`], [`time_to_g`]) used by the TPT
//!   one-pole and state-variable filters and by anything that needs a
//!   prewarped single-pole coefficient.
//! - **Biquad coefficients**: analog prototypes in the Laplace domain
//!   ([`AnalogBiquadCoefficients`]) mapped onto the z-domain with the
//!   bilinear transform ([`bilinear`]).
//!
//! None of these functions clamp their inputs. Cutoffs must lie in
//! `(0, nyquist)` and time constants must be positive; outside that domain
//! the result is undefined (typically `inf` or `NaN`).
//!
//! # Bilinear transform
//!
//! The substitution `s → k·(1 − z⁻¹)/(1 + z⁻¹)` with `k = 2·sample_rate`,
//! multiplied through by `(1 + z⁻¹)²`, expands to
//!
//! ```text
//! a0' = a0 + a1·k + a2·k²
//! b0  = (b0 + b1·k + b2·k²) / a0'
//! b1  = (2·b0 − 2·b2·k²)    / a0'
//! b2  = (b0 − b1·k + b2·k²) / a0'
//! a1  = (2·a0 − 2·a2·k²)    / a0'
//! a2  = (a0 − a1·k + a2·k²) / a0'
//! a0  = 1
//! ```
//!
//! # Reference
//!
//! Zavalishin, "The Art of VA Filter Design", rev. 2.1.2 (2018), Chapter 3.

use core::f64::consts::PI;
use libm::{cos, tan};

use crate::{Context, Sample};

/// Map a normalized frequency (`freq / sample_rate`, 0..0.5) to a one-pole
/// gain `g = f·π / (f·π + 1)`.
#[inline]
pub fn norm_frequency_to_g<T: Sample>(freq: T) -> T {
    let g = freq * T::from_f64(PI);
    g / (g + T::one())
}

/// Map a frequency in Hz to a one-pole gain, given the sample period.
///
/// ```rust
/// use lamina_core::coefficients::frequency_to_g;
///
/// let g = frequency_to_g(1000.0_f64, 1.0 / 48000.0);
/// let x = 1000.0 * core::f64::consts::PI / 48000.0;
/// assert!((g - x / (x + 1.0)).abs() < 1e-15);
/// ```
#[inline]
pub fn frequency_to_g<T: Sample>(freq: T, sample_period: T) -> T {
    norm_frequency_to_g(freq * sample_period)
}

/// Map a smoothing time constant in seconds to a one-pole gain.
///
/// Shorter times give faster responses. The equivalent normalized frequency
/// is `0.5 · T / time`.
#[inline]
pub fn time_to_g<T: Sample>(time: T, sample_period: T) -> T {
    let freq = T::from_f64(0.5) * sample_period / time;
    norm_frequency_to_g(freq)
}

/// Prewarped analog angular frequency for `freq` Hz.
///
/// Feeding `prewarp(f, sr)` into an analog prototype makes the
/// bilinear-transformed digital filter place its cutoff exactly at `f`.
#[inline]
pub fn prewarp(freq: f64, sample_rate: f64) -> f64 {
    2.0 * sample_rate * tan(PI * freq / sample_rate)
}

/// Z-domain biquad coefficients.
///
/// ```text
/// H(z) = (b0 + b1·z⁻¹ + b2·z⁻²) / (a0 + a1·z⁻¹ + a2·z⁻²)
/// ```
///
/// The filters assume `a0 == 1` and never read it. [`bilinear`] always
/// produces that normalization; use [`normalized`](Self::normalized) for
/// hand-written sets. Denominator stability is not validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitalBiquadCoefficients<T> {
    /// Feedforward coefficient for `x[n]`.
    pub b0: T,
    /// Feedforward coefficient for `x[n-1]`.
    pub b1: T,
    /// Feedforward coefficient for `x[n-2]`.
    pub b2: T,
    /// Output normalization, 1 after [`normalized`](Self::normalized).
    pub a0: T,
    /// Feedback coefficient for `y[n-1]`.
    pub a1: T,
    /// Feedback coefficient for `y[n-2]`.
    pub a2: T,
}

impl<T: Sample> DigitalBiquadCoefficients<T> {
    /// Build a coefficient set from its six terms.
    pub fn new(b0: T, b1: T, b2: T, a0: T, a1: T, a2: T) -> Self {
        Self {
            b0,
            b1,
            b2,
            a0,
            a1,
            a2,
        }
    }

    /// The passthrough set: `y[n] = x[n]`.
    pub fn identity() -> Self {
        Self::new(T::one(), T::zero(), T::zero(), T::one(), T::zero(), T::zero())
    }

    /// Divide every term by `a0`.
    pub fn normalized(self) -> Self {
        let inv = T::one() / self.a0;
        Self::new(
            self.b0 * inv,
            self.b1 * inv,
            self.b2 * inv,
            T::one(),
            self.a1 * inv,
            self.a2 * inv,
        )
    }

    /// Gain at 0 Hz: `(b0 + b1 + b2) / (a0 + a1 + a2)`.
    pub fn dc_gain(&self) -> T {
        (self.b0 + self.b1 + self.b2) / (self.a0 + self.a1 + self.a2)
    }

    /// Gain at Nyquist: `(b0 − b1 + b2) / (a0 − a1 + a2)`.
    pub fn nyquist_gain(&self) -> T {
        (self.b0 - self.b1 + self.b2) / (self.a0 - self.a1 + self.a2)
    }

    /// Convert to another sample type.
    pub fn cast<U: Sample>(self) -> DigitalBiquadCoefficients<U> {
        DigitalBiquadCoefficients::new(
            U::from_f64(self.b0.into_f64()),
            U::from_f64(self.b1.into_f64()),
            U::from_f64(self.b2.into_f64()),
            U::from_f64(self.a0.into_f64()),
            U::from_f64(self.a1.into_f64()),
            U::from_f64(self.a2.into_f64()),
        )
    }
}

impl<T: Sample> Default for DigitalBiquadCoefficients<T> {
    fn default() -> Self {
        Self::identity()
    }
}

/// Laplace-domain biquad coefficients, indexed by power of `s`.
///
/// ```text
/// H(s) = (b0 + b1·s + b2·s²) / (a0 + a1·s + a2·s²)
/// ```
///
/// Same shape as [`DigitalBiquadCoefficients`] but a different meaning; the
/// only consumer is [`bilinear`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalogBiquadCoefficients<T> {
    /// Numerator `s⁰` term.
    pub b0: T,
    /// Numerator `s¹` term.
    pub b1: T,
    /// Numerator `s²` term.
    pub b2: T,
    /// Denominator `s⁰` term.
    pub a0: T,
    /// Denominator `s¹` term.
    pub a1: T,
    /// Denominator `s²` term.
    pub a2: T,
}

impl<T: Sample> AnalogBiquadCoefficients<T> {
    /// Build a prototype from its six terms.
    pub fn new(b0: T, b1: T, b2: T, a0: T, a1: T, a2: T) -> Self {
        Self {
            b0,
            b1,
            b2,
            a0,
            a1,
            a2,
        }
    }

    /// First-order low-pass `wc / (wc + s)`.
    pub fn lowpass1(wc: T) -> Self {
        Self::new(wc, T::zero(), T::zero(), wc, T::one(), T::zero())
    }

    /// First-order high-pass `s / (wc + s)`.
    pub fn highpass1(wc: T) -> Self {
        Self::new(T::zero(), T::one(), T::zero(), wc, T::one(), T::zero())
    }

    /// Second-order low-pass `wc² / (s² + (wc/q)·s + wc²)`.
    pub fn lowpass(wc: T, q: T) -> Self {
        let wc2 = wc * wc;
        Self::new(wc2, T::zero(), T::zero(), wc2, wc / q, T::one())
    }

    /// Second-order high-pass `s² / (s² + (wc/q)·s + wc²)`.
    pub fn highpass(wc: T, q: T) -> Self {
        Self::new(T::zero(), T::zero(), T::one(), wc * wc, wc / q, T::one())
    }

    /// Second-order band-pass with 0 dB peak: `(wc/q)·s / (s² + (wc/q)·s + wc²)`.
    pub fn bandpass(wc: T, q: T) -> Self {
        let bw = wc / q;
        Self::new(T::zero(), bw, T::zero(), wc * wc, bw, T::one())
    }

    /// Second-order notch `(s² + wc²) / (s² + (wc/q)·s + wc²)`.
    pub fn notch(wc: T, q: T) -> Self {
        let wc2 = wc * wc;
        Self::new(wc2, T::zero(), T::one(), wc2, wc / q, T::one())
    }
}

impl<T: Sample> Default for AnalogBiquadCoefficients<T> {
    fn default() -> Self {
        Self::new(T::one(), T::zero(), T::zero(), T::one(), T::zero(), T::zero())
    }
}

/// Bilinear transform of an analog prototype at `sample_rate` Hz.
///
/// The expansion is evaluated in `f64` and the result is normalized so that
/// `a0 == 1` exactly.
///
/// ```rust
/// use lamina_core::{AnalogBiquadCoefficients, bilinear, prewarp};
///
/// let wc = prewarp(1000.0, 48000.0);
/// let digital = bilinear(AnalogBiquadCoefficients::<f64>::lowpass1(wc), 48000.0);
/// assert_eq!(digital.a0, 1.0);
/// assert!((digital.dc_gain() - 1.0).abs() < 1e-12);
/// ```
pub fn bilinear<T: Sample>(
    analog: AnalogBiquadCoefficients<T>,
    sample_rate: f64,
) -> DigitalBiquadCoefficients<T> {
    let k = sample_rate * 2.0;
    let k2 = k * k;

    let (ib0, ib1, ib2) = (
        analog.b0.into_f64(),
        analog.b1.into_f64(),
        analog.b2.into_f64(),
    );
    let (ia0, ia1, ia2) = (
        analog.a0.into_f64(),
        analog.a1.into_f64(),
        analog.a2.into_f64(),
    );

    let a0 = ia0 + ia1 * k + ia2 * k2;
    let b0 = (ib0 + ib1 * k + ib2 * k2) / a0;
    let b1 = (ib0 * 2.0 - ib2 * 2.0 * k2) / a0;
    let b2 = (ib0 - ib1 * k + ib2 * k2) / a0;
    let a1 = (ia0 * 2.0 - ia2 * 2.0 * k2) / a0;
    let a2 = (ia0 - ia1 * k + ia2 * k2) / a0;

    DigitalBiquadCoefficients::new(
        T::from_f64(b0),
        T::from_f64(b1),
        T::from_f64(b2),
        T::one(),
        T::from_f64(a1),
        T::from_f64(a2),
    )
}

/// Q of section `section` (0-based) in an order-`2·sections` Butterworth
/// cascade: `1 / (2·cos(π·(2k+1) / (4N)))`.
pub fn butterworth_q(sections: usize, section: usize) -> f64 {
    let n = sections as f64;
    let k = section as f64;
    1.0 / (2.0 * cos(PI * (2.0 * k + 1.0) / (4.0 * n)))
}

/// Digital sections of an order-`2N` Butterworth low-pass at `freq` Hz.
///
/// Feed the result to [`BiquadCascade::set_coefficients`](crate::BiquadCascade::set_coefficients).
pub fn butterworth_lowpass<T: Sample, const N: usize>(
    freq: f64,
    context: &Context,
) -> [DigitalBiquadCoefficients<T>; N] {
    let sr = context.sample_rate();
    let wc = prewarp(freq, sr);
    core::array::from_fn(|i| {
        let q = butterworth_q(N, i);
        bilinear(AnalogBiquadCoefficients::lowpass(wc, q), sr).cast()
    })
}

/// Digital sections of an order-`2N` Butterworth high-pass at `freq` Hz.
pub fn butterworth_highpass<T: Sample, const N: usize>(
    freq: f64,
    context: &Context,
) -> [DigitalBiquadCoefficients<T>; N] {
    let sr = context.sample_rate();
    let wc = prewarp(freq, sr);
    core::array::from_fn(|i| {
        let q = butterworth_q(N, i);
        bilinear(AnalogBiquadCoefficients::highpass(wc, q), sr).cast()
    })
}
