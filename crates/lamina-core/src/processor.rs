//! The per-sample processing contract shared by every filter.
//!
//! [`Processor`] is the `{process, reset, last}` capability that one-pole,
//! state-variable, biquad, cascade and FIR filters all implement. It is
//! generic over the [`Sample`] type and object-safe for a fixed `T`.
//!
//! ## Design Decisions
//!
//! - **Mono, per-sample**: `process` advances state by exactly one sample.
//!   Block helpers are thin loops over it.
//! - **No allocations**: every method may be called from a real-time
//!   callback.
//! - **Static dispatch first**: [`ProcessorExt::chain`] builds series
//!   combinations that inline completely.

use crate::{Context, Contextual, Sample};

/// Stateful per-sample processor.
///
/// # Example
///
/// ```rust
/// use lamina_core::Processor;
///
/// struct Gain {
///     gain: f32,
///     y: f32,
/// }
///
/// impl Processor<f32> for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         self.y = input * self.gain;
///         self.y
///     }
///
///     fn reset(&mut self) {
///         self.y = 0.0;
///     }
///
///     fn last(&self) -> f32 {
///         self.y
///     }
/// }
/// ```
pub trait Processor<T: Sample> {
    /// Process a single sample and return the output.
    fn process(&mut self, input: T) -> T;

    /// Clear signal state without touching coefficients.
    fn reset(&mut self);

    /// The most recent output, without processing anything.
    fn last(&self) -> T;

    /// Process a block of samples.
    ///
    /// # Panics
    /// Debug builds panic if `input.len() != output.len()`.
    fn process_block(&mut self, input: &[T], output: &mut [T]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in place.
    fn process_block_inplace(&mut self, buffer: &mut [T]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Processing latency in samples.
    ///
    /// Zero for the recursive filters; linear-phase FIR kernels report their
    /// group delay.
    fn latency_samples(&self) -> usize {
        0
    }
}

/// Extension trait for chaining processors in series.
pub trait ProcessorExt<T: Sample>: Processor<T> + Sized {
    /// Chain this processor with another. The output of `self` feeds `next`.
    ///
    /// ```rust
    /// use lamina_core::{Context, Contextual, HighPass1, LowPass1, Processor, ProcessorExt};
    ///
    /// let mut band = HighPass1::<f32>::new().chain(LowPass1::new());
    /// band.first_mut().set_cutoff_frequency(200.0);
    /// band.second_mut().set_cutoff_frequency(2000.0);
    /// band.set_context(Context::new(48000.0));
    /// let _ = band.process(1.0);
    /// ```
    fn chain<P: Processor<T>>(self, next: P) -> Chain<Self, P> {
        Chain {
            first: self,
            second: next,
        }
    }
}

impl<T: Sample, P: Processor<T>> ProcessorExt<T> for P {}

/// Two processors in series, created by [`ProcessorExt::chain`].
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<T: Sample, A: Processor<T>, B: Processor<T>> Processor<T> for Chain<A, B> {
    #[inline]
    fn process(&mut self, input: T) -> T {
        let mid = self.first.process(input);
        self.second.process(mid)
    }

    fn process_block(&mut self, input: &[T], output: &mut [T]) {
        self.first.process_block(input, output);
        self.second.process_block_inplace(output);
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }

    fn last(&self) -> T {
        self.second.last()
    }

    fn latency_samples(&self) -> usize {
        self.first.latency_samples() + self.second.latency_samples()
    }
}

impl<A: Contextual, B: Contextual> Contextual for Chain<A, B> {
    fn set_context(&mut self, context: Context) {
        self.first.set_context(context);
        self.second.set_context(context);
    }
}

impl<A, B> Chain<A, B> {
    /// Get a reference to the first processor in the chain.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Get a mutable reference to the first processor in the chain.
    pub fn first_mut(&mut self) -> &mut A {
        &mut self.first
    }

    /// Get a reference to the second processor in the chain.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Get a mutable reference to the second processor in the chain.
    pub fn second_mut(&mut self) -> &mut B {
        &mut self.second
    }
}
