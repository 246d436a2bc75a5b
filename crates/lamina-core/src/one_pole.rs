//! One-pole (6 dB/oct) filters: naive and topology-preserving.
//!
//! All three filters share one coefficient, the prewarped gain from
//! [`frequency_to_g`], and differ only in how the state is updated.
//!
//! - [`NaiveLowPass`] - the textbook `y += (x - y)·g` smoother.
//! - [`LowPass1`] - trapezoidal (TPT) integrator. Tracks the analog
//!   prototype even while the cutoff is being modulated.
//! - [`HighPass1`] - `x - lowpass(x)` on the same TPT integrator.
//!
//! The TPT low-pass update order is the whole point:
//!
//! ```text
//! v  = (x - z1)·G
//! y  = v + z1
//! z1 = v + y
//! ```
//!
//! # Reference
//!
//! Zavalishin, "The Art of VA Filter Design", rev. 2.1.2 (2018), Chapter 3.

use crate::coefficients::frequency_to_g;
use crate::{Context, Contextual, Processor, Sample};

const DEFAULT_CUTOFF_HZ: f64 = 100.0;

/// One step of the naive one-pole low-pass. `y` is the filter state.
#[inline]
pub fn naive_lowpass<T: Sample>(x: T, y: &mut T, g: T) -> T {
    *y = *y + (x - *y) * g;
    *y
}

/// One step of the TPT one-pole low-pass. `z1` is the integrator state.
#[inline]
pub fn tpt_lowpass<T: Sample>(x: T, z1: &mut T, g: T) -> T {
    let v = (x - *z1) * g;
    let y = v + *z1;
    *z1 = v + y;
    y
}

/// One step of the TPT one-pole high-pass, as `x - lowpass(x)`.
#[inline]
pub fn tpt_highpass<T: Sample>(x: T, z1: &mut T, g: T) -> T {
    x - tpt_lowpass(x, z1, g)
}

/// One step of the TPT one-pole high-pass in its direct two-coefficient form.
///
/// `h` scales the input difference and `g2` feeds the integrator:
/// `y = (x - z1)·h; z1 += y·g2`. With `g` the unnormalized integrator gain
/// (`G = g / (1 + g)`), `h = 1 - G` and `g2 = 2g` reproduce [`tpt_highpass`].
#[inline]
pub fn tpt_highpass_direct<T: Sample>(x: T, z1: &mut T, h: T, g2: T) -> T {
    let y = (x - *z1) * h;
    *z1 = *z1 + y * g2;
    y
}

/// Naive one-pole low-pass: `y[n] = y[n-1] + (x[n] - y[n-1])·g`.
///
/// Cheap and fine for fixed cutoffs; its response drifts from the analog
/// prototype as the cutoff approaches Nyquist.
#[derive(Debug, Clone)]
pub struct NaiveLowPass<T> {
    context: Context,
    g: T,
    y: T,
    frequency: T,
}

impl<T: Sample> NaiveLowPass<T> {
    /// Create a filter at 100 Hz with the default context.
    pub fn new() -> Self {
        let mut filter = Self {
            context: Context::default(),
            g: T::zero(),
            y: T::zero(),
            frequency: T::from_f64(DEFAULT_CUTOFF_HZ),
        };
        filter.set_cutoff_frequency(filter.frequency);
        filter
    }

    /// Set the cutoff in Hz. Must be in `(0, nyquist)`.
    pub fn set_cutoff_frequency(&mut self, freq: T) {
        self.frequency = freq;
        self.g = frequency_to_g(freq, T::from_f64(self.context.sample_period()));
    }

    /// Current cutoff in Hz.
    pub fn cutoff_frequency(&self) -> T {
        self.frequency
    }
}

impl<T: Sample> Default for NaiveLowPass<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> Contextual for NaiveLowPass<T> {
    fn set_context(&mut self, context: Context) {
        self.context = context;
        self.set_cutoff_frequency(self.frequency);
    }
}

impl<T: Sample> Processor<T> for NaiveLowPass<T> {
    #[inline]
    fn process(&mut self, input: T) -> T {
        naive_lowpass(input, &mut self.y, self.g)
    }

    fn reset(&mut self) {
        self.y = T::zero();
    }

    #[inline]
    fn last(&self) -> T {
        self.y
    }
}

/// TPT one-pole low-pass.
///
/// # Example
///
/// ```rust
/// use lamina_core::{Context, Contextual, LowPass1, Processor};
///
/// let mut lp = LowPass1::<f32>::new();
/// lp.set_context(Context::new(48000.0));
/// lp.set_cutoff_frequency(4000.0);
/// let out = lp.process(1.0);
/// assert!(out > 0.0 && out < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct LowPass1<T> {
    context: Context,
    g: T,
    z1: T,
    y: T,
    frequency: T,
}

impl<T: Sample> LowPass1<T> {
    /// Create a filter at 100 Hz with the default context.
    pub fn new() -> Self {
        let mut filter = Self {
            context: Context::default(),
            g: T::zero(),
            z1: T::zero(),
            y: T::zero(),
            frequency: T::from_f64(DEFAULT_CUTOFF_HZ),
        };
        filter.set_cutoff_frequency(filter.frequency);
        filter
    }

    /// Set the cutoff in Hz. Must be in `(0, nyquist)`.
    pub fn set_cutoff_frequency(&mut self, freq: T) {
        self.frequency = freq;
        self.g = frequency_to_g(freq, T::from_f64(self.context.sample_period()));
    }

    /// Current cutoff in Hz.
    pub fn cutoff_frequency(&self) -> T {
        self.frequency
    }

    /// The per-sample integrator gain `G`.
    pub fn gain(&self) -> T {
        self.g
    }
}

impl<T: Sample> Default for LowPass1<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> Contextual for LowPass1<T> {
    fn set_context(&mut self, context: Context) {
        self.context = context;
        self.set_cutoff_frequency(self.frequency);
    }
}

impl<T: Sample> Processor<T> for LowPass1<T> {
    #[inline]
    fn process(&mut self, input: T) -> T {
        self.y = tpt_lowpass(input, &mut self.z1, self.g);
        self.y
    }

    fn reset(&mut self) {
        self.z1 = T::zero();
        self.y = T::zero();
    }

    #[inline]
    fn last(&self) -> T {
        self.y
    }
}

/// TPT one-pole high-pass (`x - lowpass(x)`).
#[derive(Debug, Clone)]
pub struct HighPass1<T> {
    context: Context,
    g: T,
    z1: T,
    y: T,
    frequency: T,
}

impl<T: Sample> HighPass1<T> {
    /// Create a filter at 100 Hz with the default context.
    pub fn new() -> Self {
        let mut filter = Self {
            context: Context::default(),
            g: T::zero(),
            z1: T::zero(),
            y: T::zero(),
            frequency: T::from_f64(DEFAULT_CUTOFF_HZ),
        };
        filter.set_cutoff_frequency(filter.frequency);
        filter
    }

    /// Set the cutoff in Hz. Must be in `(0, nyquist)`.
    pub fn set_cutoff_frequency(&mut self, freq: T) {
        self.frequency = freq;
        self.g = frequency_to_g(freq, T::from_f64(self.context.sample_period()));
    }

    /// Current cutoff in Hz.
    pub fn cutoff_frequency(&self) -> T {
        self.frequency
    }
}

impl<T: Sample> Default for HighPass1<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> Contextual for HighPass1<T> {
    fn set_context(&mut self, context: Context) {
        self.context = context;
        self.set_cutoff_frequency(self.frequency);
    }
}

impl<T: Sample> Processor<T> for HighPass1<T> {
    #[inline]
    fn process(&mut self, input: T) -> T {
        self.y = tpt_highpass(input, &mut self.z1, self.g);
        self.y
    }

    fn reset(&mut self) {
        self.z1 = T::zero();
        self.y = T::zero();
    }

    #[inline]
    fn last(&self) -> T {
        self.y
    }
}
