//! State Variable Filter implementation.
//!
//! A two-integrator filter that produces lowpass, bandpass and highpass
//! simultaneously from one shared state pair. Well-suited for modulation:
//! both integrators are trapezoidal (TPT), so sweeping the cutoff does not
//! produce the artifacts that plague Direct Form implementations.
//!
//! # Topology
//!
//! With `G` the prewarped one-pole gain, `R` the damping and
//! `g1 = 2R + G`, `d = 1 / (1 + g1·G)`:
//!
//! ```text
//! hp = (x - g1·s1 - s2)·d
//! v1 = G·hp;  bp = v1 + s1;  s1 = bp + v1
//! v2 = G·bp;  lp = v2 + s2;  s2 = lp + v2
//! ```
//!
//! # Resonance
//!
//! The caller-facing resonance is in `[0, 1]` and maps linearly onto
//! `R ∈ [1.0, 0.1]`. The floor at 0.1 keeps the filter short of
//! self-oscillation at full resonance.
//!
//! # Reference
//!
//! Zavalishin, "The Art of VA Filter Design", rev. 2.1.2 (2018), Chapter 4.

use crate::coefficients::frequency_to_g;
use crate::math::{clamp, lerp};
use crate::{Context, Contextual, Processor, Sample};

/// Damping at zero resonance.
const MIN_RESONANCE_DAMPING: f64 = 1.0;
/// Damping at full resonance.
const MAX_RESONANCE_DAMPING: f64 = 0.1;

/// State Variable Filter output type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SvfOutput {
    /// Low-pass filter output: passes frequencies below the cutoff.
    #[default]
    Lowpass,
    /// High-pass filter output: passes frequencies above the cutoff.
    Highpass,
    /// Band-pass filter output: passes frequencies near the cutoff.
    Bandpass,
    /// Notch (band-reject) filter output, `lowpass + highpass`.
    Notch,
}

/// TPT State Variable Filter (2-pole, 12 dB/oct).
///
/// ## Parameters
///
/// - `cutoff`: Filter cutoff frequency in Hz (default 100.0), must be in
///   `(0, nyquist)`
/// - `resonance`: 0.0 to 1.0, clamped (default 0.0)
/// - `output_type`: Which output [`Processor::process`] returns (default
///   `Lowpass`)
///
/// # Example
///
/// ```rust
/// use lamina_core::{Context, Contextual, StateVariableFilter};
///
/// let mut svf = StateVariableFilter::<f32>::new();
/// svf.set_context(Context::new(48000.0));
/// svf.set_cutoff_frequency(1000.0);
/// svf.set_resonance(0.5);
///
/// let lp = svf.process_lowpass(0.5);
/// let bp = svf.last_bandpass();
/// ```
#[derive(Debug, Clone)]
pub struct StateVariableFilter<T> {
    context: Context,

    // Coefficients
    g: T,
    r: T,
    g1: T,
    d: T,

    // Integrator state
    s1: T,
    s2: T,

    // Outputs of the last processed sample
    hp: T,
    bp: T,
    lp: T,

    // Parameters
    frequency: T,
    resonance: T,
    output_type: SvfOutput,
}

impl<T: Sample> Default for StateVariableFilter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> StateVariableFilter<T> {
    /// Create a new SVF at 100 Hz, zero resonance, lowpass output, default
    /// context.
    pub fn new() -> Self {
        let mut svf = Self {
            context: Context::default(),
            g: T::zero(),
            r: T::from_f64(MIN_RESONANCE_DAMPING),
            g1: T::from_f64(2.0),
            d: T::zero(),
            s1: T::zero(),
            s2: T::zero(),
            hp: T::zero(),
            bp: T::zero(),
            lp: T::zero(),
            frequency: T::from_f64(100.0),
            resonance: T::zero(),
            output_type: SvfOutput::Lowpass,
        };
        svf.set_cutoff_frequency(svf.frequency);
        svf
    }

    /// Set cutoff frequency in Hz. Must be in `(0, nyquist)`; not clamped.
    pub fn set_cutoff_frequency(&mut self, freq: T) {
        self.frequency = freq;
        self.g = frequency_to_g(freq, T::from_f64(self.context.sample_period()));
        self.update_coefficients();
    }

    /// Get current cutoff frequency in Hz.
    pub fn cutoff_frequency(&self) -> T {
        self.frequency
    }

    /// Set resonance in `[0, 1]`. Values are clamped.
    pub fn set_resonance(&mut self, resonance: T) {
        self.resonance = clamp(resonance, T::zero(), T::one());
        self.r = lerp(
            T::from_f64(MIN_RESONANCE_DAMPING),
            T::from_f64(MAX_RESONANCE_DAMPING),
            self.resonance,
        );
        self.update_coefficients();
    }

    /// Get current resonance (0.0–1.0).
    pub fn resonance(&self) -> T {
        self.resonance
    }

    /// Set the output type returned by [`Processor::process`].
    pub fn set_output_type(&mut self, output_type: SvfOutput) {
        self.output_type = output_type;
    }

    /// Get current output type.
    pub fn output_type(&self) -> SvfOutput {
        self.output_type
    }

    /// Recompute `g1` and `d` from the current `G` and `R`.
    fn update_coefficients(&mut self) {
        self.g1 = T::from_f64(2.0) * self.r + self.g;
        self.d = T::one() / (T::one() + self.g1 * self.g);
    }

    #[inline]
    fn tick(&mut self, x: T) {
        self.hp = (x - self.g1 * self.s1 - self.s2) * self.d;

        let v1 = self.g * self.hp;
        self.bp = v1 + self.s1;
        self.s1 = self.bp + v1;

        let v2 = self.g * self.bp;
        self.lp = v2 + self.s2;
        self.s2 = self.lp + v2;
    }

    /// Process one sample and return the low-pass output.
    #[inline]
    pub fn process_lowpass(&mut self, x: T) -> T {
        self.tick(x);
        self.lp
    }

    /// Process one sample and return the band-pass output.
    #[inline]
    pub fn process_bandpass(&mut self, x: T) -> T {
        self.tick(x);
        self.bp
    }

    /// Process one sample and return the high-pass output.
    #[inline]
    pub fn process_highpass(&mut self, x: T) -> T {
        self.tick(x);
        self.hp
    }

    /// Process one sample and return all outputs (lowpass, highpass,
    /// bandpass, notch).
    pub fn process_all(&mut self, x: T) -> (T, T, T, T) {
        self.tick(x);
        (self.lp, self.hp, self.bp, self.lp + self.hp)
    }

    /// Low-pass output of the last processed sample.
    #[inline]
    pub fn last_lowpass(&self) -> T {
        self.lp
    }

    /// Band-pass output of the last processed sample.
    #[inline]
    pub fn last_bandpass(&self) -> T {
        self.bp
    }

    /// High-pass output of the last processed sample.
    #[inline]
    pub fn last_highpass(&self) -> T {
        self.hp
    }
}

impl<T: Sample> Contextual for StateVariableFilter<T> {
    fn set_context(&mut self, context: Context) {
        #[cfg(feature = "tracing")]
        tracing::debug!("svf_set_context: {} Hz", context.sample_rate());

        self.context = context;
        self.set_cutoff_frequency(self.frequency);
        self.set_resonance(self.resonance);
    }
}

impl<T: Sample> Processor<T> for StateVariableFilter<T> {
    fn process(&mut self, input: T) -> T {
        self.tick(input);
        self.last()
    }

    fn reset(&mut self) {
        self.s1 = T::zero();
        self.s2 = T::zero();
        self.hp = T::zero();
        self.bp = T::zero();
        self.lp = T::zero();
    }

    fn last(&self) -> T {
        match self.output_type {
            SvfOutput::Lowpass => self.lp,
            SvfOutput::Highpass => self.hp,
            SvfOutput::Bandpass => self.bp,
            SvfOutput::Notch => self.lp + self.hp,
        }
    }
}
