//! Biquad (bi-quadratic) filter with four interchangeable state layouts.
//!
//! All four topologies realise the same transfer function
//!
//! ```text
//! H(z) = (b0 + b1·z⁻¹ + b2·z⁻²) / (1 + a1·z⁻¹ + a2·z⁻²)
//! ```
//!
//! and agree to within floating-point rounding for fixed coefficients. They
//! differ in state count and in how gracefully they take coefficient changes
//! while running:
//!
//! | Topology | State | Under modulation |
//! |----------|-------|------------------|
//! | [`DirectForm1`] | 2 input + 2 output | most robust |
//! | [`DirectForm2`] | 2 | least safe |
//! | [`TransposedDirectForm1`] | 4 | safe |
//! | [`TransposedDirectForm2`] | 2 | good, cheapest robust choice (default) |
//!
//! The topology is a type parameter of [`Biquad`], fixed at construction.
//! There is no runtime switch.
//!
//! Coefficients are expected with `a0 == 1` (see
//! [`DigitalBiquadCoefficients::normalized`]); `a0` is never read here.

use core::fmt::Debug;

use crate::coefficients::DigitalBiquadCoefficients;
use crate::{Processor, Sample};

/// Per-topology biquad state.
///
/// `tick` computes one output from the input and the stored state, then
/// advances the state. `clear` zeroes it.
pub trait BiquadState<T: Sample>: Default + Clone + Debug {
    /// Advance one sample.
    fn tick(&mut self, c: &DigitalBiquadCoefficients<T>, x: T) -> T;

    /// Zero all state.
    fn clear(&mut self);
}

/// Direct Form I: two input and two output history values.
///
/// ```text
/// y[n] = b0·x[n] + b1·x[n-1] + b2·x[n-2] - a1·y[n-1] - a2·y[n-2]
/// ```
#[derive(Debug, Clone, Default)]
pub struct DirectForm1<T> {
    x1: T,
    x2: T,
    y1: T,
    y2: T,
}

impl<T: Sample> BiquadState<T> for DirectForm1<T> {
    #[inline]
    fn tick(&mut self, c: &DigitalBiquadCoefficients<T>, x: T) -> T {
        let y = c.b0 * x + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;

        y
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Direct Form II: one delay pair shared by feedback and feedforward paths.
#[derive(Debug, Clone, Default)]
pub struct DirectForm2<T> {
    v1: T,
    v2: T,
}

impl<T: Sample> BiquadState<T> for DirectForm2<T> {
    #[inline]
    fn tick(&mut self, c: &DigitalBiquadCoefficients<T>, x: T) -> T {
        let w = x - c.a1 * self.v1 - c.a2 * self.v2;
        let y = c.b0 * w + c.b1 * self.v1 + c.b2 * self.v2;

        self.v2 = self.v1;
        self.v1 = w;

        y
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Transposed Direct Form I: four accumulators.
#[derive(Debug, Clone, Default)]
pub struct TransposedDirectForm1<T> {
    s0: T,
    s1: T,
    s2: T,
    s3: T,
}

impl<T: Sample> BiquadState<T> for TransposedDirectForm1<T> {
    #[inline]
    fn tick(&mut self, c: &DigitalBiquadCoefficients<T>, x: T) -> T {
        let y = self.s0 + self.s2 + c.b0 * x;

        self.s0 = self.s1 + c.b1 * x;
        self.s1 = c.b2 * x;
        self.s2 = self.s3 - c.a1 * y;
        self.s3 = -(c.a2 * y);

        y
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Transposed Direct Form II: two accumulators.
#[derive(Debug, Clone, Default)]
pub struct TransposedDirectForm2<T> {
    v1: T,
    v2: T,
}

impl<T: Sample> BiquadState<T> for TransposedDirectForm2<T> {
    #[inline]
    fn tick(&mut self, c: &DigitalBiquadCoefficients<T>, x: T) -> T {
        let y = c.b0 * x + self.v1;

        self.v1 = c.b1 * x - c.a1 * y + self.v2;
        self.v2 = c.b2 * x - c.a2 * y;

        y
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Second-order IIR section with a compile-time topology.
///
/// # Example
///
/// ```rust
/// use lamina_core::{
///     AnalogBiquadCoefficients, Biquad, DirectForm1, Processor, bilinear, prewarp,
/// };
///
/// let sr = 48000.0;
/// let coeffs = bilinear(AnalogBiquadCoefficients::lowpass(prewarp(1000.0, sr), 0.707), sr);
///
/// // Default topology: Transposed Direct Form II.
/// let mut tdf2 = Biquad::<f64>::with_coefficients(coeffs);
/// // Explicit topology.
/// let mut df1 = Biquad::<f64, DirectForm1<f64>>::with_coefficients(coeffs);
///
/// let a = tdf2.process(1.0);
/// let b = df1.process(1.0);
/// assert!((a - b).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Biquad<T, S = TransposedDirectForm2<T>> {
    coefficients: DigitalBiquadCoefficients<T>,
    state: S,
    y: T,
}

/// Direct Form I biquad.
pub type BiquadDf1<T> = Biquad<T, DirectForm1<T>>;
/// Direct Form II biquad.
pub type BiquadDf2<T> = Biquad<T, DirectForm2<T>>;
/// Transposed Direct Form I biquad.
pub type BiquadTdf1<T> = Biquad<T, TransposedDirectForm1<T>>;
/// Transposed Direct Form II biquad.
pub type BiquadTdf2<T> = Biquad<T, TransposedDirectForm2<T>>;

impl<T: Sample, S: BiquadState<T>> Biquad<T, S> {
    /// Creates a biquad with passthrough coefficients.
    pub fn new() -> Self {
        Self::with_coefficients(DigitalBiquadCoefficients::identity())
    }

    /// Creates a biquad with the given coefficients and cleared state.
    pub fn with_coefficients(coefficients: DigitalBiquadCoefficients<T>) -> Self {
        Self {
            coefficients,
            state: S::default(),
            y: T::zero(),
        }
    }

    /// Replace the coefficients. State is kept, so this is safe to call
    /// between samples; how well the output tolerates the jump depends on the
    /// topology.
    #[inline]
    pub fn set_coefficients(&mut self, coefficients: DigitalBiquadCoefficients<T>) {
        self.coefficients = coefficients;
    }

    /// Current coefficients.
    #[inline]
    pub fn coefficients(&self) -> &DigitalBiquadCoefficients<T> {
        &self.coefficients
    }
}

impl<T: Sample, S: BiquadState<T>> Default for Biquad<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample, S: BiquadState<T>> Processor<T> for Biquad<T, S> {
    #[inline]
    fn process(&mut self, input: T) -> T {
        self.y = self.state.tick(&self.coefficients, input);
        self.y
    }

    fn reset(&mut self) {
        self.state.clear();
        self.y = T::zero();
    }

    #[inline]
    fn last(&self) -> T {
        self.y
    }
}

/// `N` biquad sections in series.
///
/// Each section's output feeds the next in array order. The ideal combined
/// transfer function does not depend on section order, but the internal
/// dynamic range does: put the lowest-Q sections first.
///
/// ```rust
/// use lamina_core::{BiquadCascade, Context, Processor, butterworth_lowpass};
///
/// let ctx = Context::new(48000.0);
/// let mut lp8 = BiquadCascade::<f64, 4>::new();
/// lp8.set_coefficients(&butterworth_lowpass(2000.0, &ctx));
/// let y = lp8.process(1.0);
/// assert_eq!(y, lp8.last());
/// ```
#[derive(Debug, Clone)]
pub struct BiquadCascade<T, const N: usize, S = TransposedDirectForm2<T>> {
    sections: [Biquad<T, S>; N],
    y: T,
}

impl<T: Sample, const N: usize, S: BiquadState<T>> BiquadCascade<T, N, S> {
    /// Creates a cascade of passthrough sections.
    pub fn new() -> Self {
        Self {
            sections: core::array::from_fn(|_| Biquad::new()),
            y: T::zero(),
        }
    }

    /// Set the coefficients of every section, in order.
    pub fn set_coefficients(&mut self, coefficients: &[DigitalBiquadCoefficients<T>; N]) {
        for (section, c) in self.sections.iter_mut().zip(coefficients.iter()) {
            section.set_coefficients(*c);
        }
    }

    /// Number of sections.
    pub const fn len(&self) -> usize {
        N
    }

    /// True for a zero-section cascade, which passes input through.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// All sections, in processing order.
    pub fn sections(&self) -> &[Biquad<T, S>; N] {
        &self.sections
    }

    /// Mutable access to all sections, in processing order.
    pub fn sections_mut(&mut self) -> &mut [Biquad<T, S>; N] {
        &mut self.sections
    }

    /// One section by index.
    pub fn section(&self, index: usize) -> Option<&Biquad<T, S>> {
        self.sections.get(index)
    }

    /// One section by index, mutably.
    pub fn section_mut(&mut self, index: usize) -> Option<&mut Biquad<T, S>> {
        self.sections.get_mut(index)
    }
}

impl<T: Sample, const N: usize, S: BiquadState<T>> Default for BiquadCascade<T, N, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample, const N: usize, S: BiquadState<T>> Processor<T> for BiquadCascade<T, N, S> {
    #[inline]
    fn process(&mut self, input: T) -> T {
        let mut y = input;
        for section in &mut self.sections {
            y = section.process(y);
        }
        self.y = y;
        y
    }

    fn reset(&mut self) {
        for section in &mut self.sections {
            section.reset();
        }
        self.y = T::zero();
    }

    #[inline]
    fn last(&self) -> T {
        self.y
    }
}
