//! Processing context: sample rate, sample period and block size.
//!
//! A [`Context`] is a small value object handed to every stateful component.
//! Components cache their own copy and recompute their coefficients when a
//! new one arrives; nothing is shared or reference counted. When the host
//! changes sample rate it builds a fresh `Context` and re-supplies it to
//! every active instance (see [`Contextual`]).

/// Sample rate, sample period and maximum block size.
///
/// The sample period is always derived from the sample rate, so the two can
/// never disagree.
///
/// ```rust
/// use lamina_core::Context;
///
/// let ctx = Context::new(48000.0);
/// assert_eq!(ctx.sample_rate(), 48000.0);
/// assert!((ctx.sample_period() - 1.0 / 48000.0).abs() < 1e-15);
/// assert_eq!(ctx.max_block_size(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Context {
    sample_rate: f64,
    sample_period: f64,
    max_block_size: usize,
}

/// Default sample rate used when no context has been supplied yet.
pub const DEFAULT_SAMPLE_RATE: f64 = 48000.0;

impl Context {
    /// Create a context for `sample_rate` Hz with a block size of one.
    ///
    /// `sample_rate` must be positive; this is a precondition, not a check.
    pub fn new(sample_rate: f64) -> Self {
        Self::with_block_size(sample_rate, 1)
    }

    /// Create a context with an explicit maximum block size.
    ///
    /// A block size of zero is raised to one.
    pub fn with_block_size(sample_rate: f64, max_block_size: usize) -> Self {
        debug_assert!(sample_rate > 0.0, "sample rate must be positive");
        Self {
            sample_rate,
            sample_period: 1.0 / sample_rate,
            max_block_size: max_block_size.max(1),
        }
    }

    /// Sample rate in Hz.
    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Sample period in seconds (`1 / sample_rate`).
    #[inline]
    pub fn sample_period(&self) -> f64 {
        self.sample_period
    }

    /// Largest number of samples the host will pass in one block.
    #[inline]
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Nyquist frequency in Hz.
    #[inline]
    pub fn nyquist(&self) -> f64 {
        self.sample_rate * 0.5
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

/// Components whose coefficients depend on the processing [`Context`].
///
/// Implementors store the context and recompute every derived coefficient
/// from their stored parameters. Signal state is left untouched.
pub trait Contextual {
    /// Replace the cached context and recompute coefficients.
    fn set_context(&mut self, context: Context);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_is_derived() {
        let ctx = Context::new(44100.0);
        assert!((ctx.sample_period() * 44100.0 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_block_size_floor_is_one() {
        let ctx = Context::with_block_size(48000.0, 0);
        assert_eq!(ctx.max_block_size(), 1);
        let ctx = Context::with_block_size(48000.0, 512);
        assert_eq!(ctx.max_block_size(), 512);
    }

    #[test]
    fn test_default_is_48k() {
        let ctx = Context::default();
        assert_eq!(ctx.sample_rate(), 48000.0);
        assert_eq!(ctx.nyquist(), 24000.0);
    }
}
