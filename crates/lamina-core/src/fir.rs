//! FIR filter: windowed-sinc design and circular-buffer convolution.
//!
//! # Design
//!
//! [`windowed_sinc_lowpass`] builds a linear-phase low-pass kernel: an ideal
//! sinc shaped by a 4-term Blackman-Nuttall window and normalized to unity
//! DC gain. The kernel length is `floor(sample_rate · duration)` forced odd,
//! so there is an exact center tap and the group delay is a whole number of
//! samples (`duration / 2` seconds).
//!
//! # Runtime
//!
//! [`FirFilter`] keeps a history buffer twice the kernel length. Every input
//! is written at two mirrored offsets, `pos` and `pos + N`, so the last `N`
//! inputs are always contiguous in `buffer[pos + 1 ..= pos + N]` and the
//! convolution runs backward over a plain slice with no wraparound checks.
//! Cost is `O(N)` per sample; this is meant for short and medium kernels.
//!
//! The buffer is allocated in [`FirFilter::set_coefficients`] and never
//! again; `process` is allocation-free.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use core::f64::consts::PI;
use libm::{cos, sin};

use crate::{Processor, Sample};

/// Blackman-Nuttall window terms.
const NUTTALL_A0: f64 = 0.3635819;
const NUTTALL_A1: f64 = 0.4891775;
const NUTTALL_A2: f64 = 0.1365995;
const NUTTALL_A3: f64 = 0.0106411;

/// Shortest kernel the design function accepts. The window is undefined
/// for a single tap.
pub const MIN_DESIGN_TAPS: usize = 3;

/// Errors raised when configuring an FIR filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirError {
    /// The coefficient set was empty.
    EmptyKernel,
    /// The requested duration yields fewer than [`MIN_DESIGN_TAPS`] taps.
    KernelTooShort {
        /// Taps the duration would have produced.
        taps: usize,
    },
}

impl core::fmt::Display for FirError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyKernel => write!(f, "FIR coefficient set is empty"),
            Self::KernelTooShort { taps } => write!(
                f,
                "FIR kernel of {taps} taps is too short (minimum {MIN_DESIGN_TAPS})"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FirError {}

/// Number of taps [`windowed_sinc_lowpass`] produces for `duration` seconds.
///
/// `floor(sample_rate · duration)`, minus one when even.
pub fn kernel_length(duration: f64, sample_rate: f64) -> usize {
    let n = (sample_rate * duration) as usize;
    if n % 2 == 0 { n.saturating_sub(1) } else { n }
}

/// Linear-phase low-pass kernel by the windowed-sinc method.
///
/// # Arguments
/// * `cutoff` - Cutoff frequency in Hz
/// * `duration` - Kernel duration in seconds; the group delay is half of it
/// * `sample_rate` - Sample rate in Hz
///
/// # Errors
/// [`FirError::KernelTooShort`] when `duration` yields fewer than three taps.
///
/// ```rust
/// use lamina_core::fir::windowed_sinc_lowpass;
///
/// let kernel = windowed_sinc_lowpass(1000.0, 0.002, 48000.0).unwrap();
/// assert_eq!(kernel.len(), 95);
/// let sum: f64 = kernel.iter().sum();
/// assert!((sum - 1.0).abs() < 1e-9);
/// ```
pub fn windowed_sinc_lowpass(
    cutoff: f64,
    duration: f64,
    sample_rate: f64,
) -> Result<Vec<f64>, FirError> {
    let n = kernel_length(duration, sample_rate);
    if n < MIN_DESIGN_TAPS {
        return Err(FirError::KernelTooShort { taps: n });
    }
    let m = (n - 1) as f64;
    let wc = (cutoff / sample_rate) * PI * 2.0;

    let mut kernel = Vec::with_capacity(n);
    let mut sum = 0.0;

    for i in 0..n {
        let x = (i as f64 - m * 0.5) * wc;
        let sinc = if x == 0.0 { 1.0 } else { sin(x) / x };

        let w2 = (i as f64 / m) * 2.0 * PI;
        let window = NUTTALL_A0 - NUTTALL_A1 * cos(w2) + NUTTALL_A2 * cos(w2 * 2.0)
            - NUTTALL_A3 * cos(w2 * 3.0);

        let c = window * sinc;
        sum += c;
        kernel.push(c);
    }

    for c in &mut kernel {
        *c /= sum;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("fir_design: {n} taps, cutoff {cutoff} Hz, dc sum {sum}");

    Ok(kernel)
}

/// Direct-form FIR filter over a mirrored circular buffer.
///
/// # Example
///
/// ```rust
/// use lamina_core::{FirFilter, Processor};
///
/// let mut fir = FirFilter::<f32>::new();
/// fir.set_coefficients(vec![0.25, 0.5, 0.25]).unwrap();
/// assert_eq!(fir.process(1.0), 0.25);
/// assert_eq!(fir.process(0.0), 0.5);
/// assert_eq!(fir.process(0.0), 0.25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FirFilter<T> {
    coefficients: Vec<T>,
    buffer: Vec<T>,
    pos: usize,
    y: T,
}

impl<T: Sample> FirFilter<T> {
    /// An unconfigured filter. `process` outputs zero until coefficients are
    /// set.
    pub fn new() -> Self {
        Self {
            coefficients: Vec::new(),
            buffer: Vec::new(),
            pos: 0,
            y: T::zero(),
        }
    }

    /// A filter with the given kernel.
    pub fn from_coefficients(coefficients: Vec<T>) -> Result<Self, FirError> {
        let mut fir = Self::new();
        fir.set_coefficients(coefficients)?;
        Ok(fir)
    }

    /// A filter from an `f64` design such as [`windowed_sinc_lowpass`].
    pub fn from_design(kernel: &[f64]) -> Result<Self, FirError> {
        Self::from_coefficients(kernel.iter().map(|&c| T::from_f64(c)).collect())
    }

    /// Replace the kernel, resize the history and clear it.
    ///
    /// This is the only place the filter allocates.
    ///
    /// # Errors
    /// [`FirError::EmptyKernel`] for an empty set; the filter is left
    /// unchanged.
    pub fn set_coefficients(&mut self, coefficients: Vec<T>) -> Result<(), FirError> {
        if coefficients.is_empty() {
            return Err(FirError::EmptyKernel);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("fir_set_coefficients: {} taps", coefficients.len());

        self.buffer = vec![T::zero(); coefficients.len() * 2];
        self.coefficients = coefficients;
        self.reset();
        Ok(())
    }

    /// The kernel.
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Number of taps.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// True until coefficients have been set.
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Group delay of a symmetric kernel, in samples.
    pub fn group_delay_samples(&self) -> usize {
        self.coefficients.len().saturating_sub(1) / 2
    }
}

impl<T: Sample> Processor<T> for FirFilter<T> {
    #[inline]
    fn process(&mut self, input: T) -> T {
        let n = self.coefficients.len();
        if n == 0 {
            return T::zero();
        }

        let head = self.pos + n;
        self.buffer[head] = input;
        self.buffer[self.pos] = input;

        // Newest sample last: history[n - 1 - i] is x[n - i].
        let history = &self.buffer[self.pos + 1..=head];
        let mut sum = T::zero();
        for (c, x) in self.coefficients.iter().zip(history.iter().rev()) {
            sum = sum + *c * *x;
        }

        self.pos += 1;
        if self.pos == n {
            self.pos = 0;
        }

        self.y = sum;
        sum
    }

    fn reset(&mut self) {
        self.buffer.fill(T::zero());
        self.pos = 0;
        self.y = T::zero();
    }

    #[inline]
    fn last(&self) -> T {
        self.y
    }

    fn latency_samples(&self) -> usize {
        self.group_delay_samples()
    }
}
