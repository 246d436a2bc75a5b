//! Small numeric helpers consumed by the filters.
//!
//! All functions are pure, allocation-free and `no_std`.
//!
//! - [`lerp`] - Linear interpolation
//! - [`clamp`] - Value limiting that tolerates infinite bounds

use crate::Sample;

/// Linear interpolation between two values.
///
/// # Arguments
/// * `a` - Start value (at t=0)
/// * `b` - End value (at t=1)
/// * `t` - Interpolation factor (0.0 to 1.0)
///
/// # Example
/// ```rust
/// use lamina_core::math::lerp;
///
/// assert_eq!(lerp(1.0_f32, 0.1, 0.0), 1.0);
/// assert!((lerp(1.0_f64, 0.1, 1.0) - 0.1).abs() < 1e-12);
/// ```
#[inline]
pub fn lerp<T: Sample>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Clamp a value to `[min, max]`.
///
/// Unlike `f32::clamp` this never panics: bounds may be infinite, and a NaN
/// bound simply fails both comparisons and passes `x` through.
#[inline]
pub fn clamp<T: Sample>(x: T, min: T, max: T) -> T {
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}
