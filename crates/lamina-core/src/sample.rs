//! Sample type abstraction.
//!
//! Every filter in this crate is generic over its sample type so the same
//! code runs in `f32` on the audio thread and in `f64` where extra headroom
//! matters (analysis, long IIR cascades, tests that compare topologies).

use core::fmt::Debug;
use num_traits::Float;

/// Floating-point sample type accepted by all lamina processors.
///
/// Implemented for `f32` and `f64`. Coefficient design happens in `f64`
/// and is narrowed through [`Sample::from_f64`].
pub trait Sample: Float + Default + Debug + Send + Sync + 'static {
    /// Convert from `f64`, rounding to the nearest representable value.
    fn from_f64(value: f64) -> Self;

    /// Widen to `f64`.
    fn into_f64(self) -> f64;
}

impl Sample for f32 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn into_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Sample for f64 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn into_f64(self) -> f64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_roundtrip_is_nearest() {
        let x = <f32 as Sample>::from_f64(0.1);
        assert_eq!(x, 0.1_f32);
        assert!((x.into_f64() - 0.1).abs() < 1e-8);
    }

    #[test]
    fn test_f64_is_identity() {
        assert_eq!(<f64 as Sample>::from_f64(0.1), 0.1);
        assert_eq!(0.25_f64.into_f64(), 0.25);
    }
}
