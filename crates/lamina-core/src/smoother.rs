//! Linear parameter smoothers.
//!
//! A smoother ramps a control value toward a target so that parameter jumps
//! do not click. Two policies implement [`Smoother`]:
//!
//! - [`ConstantRateSmoother`] - moves at most `sample_period / time` per
//!   sample, so a larger jump takes proportionally longer.
//! - [`ConstantTimeSmoother`] - rescales its step to the remaining distance
//!   whenever the target or time changes, so every ramp lasts `time` seconds.
//!
//! Both clamp each step to `±delta` and never overshoot the target.
//! A time of zero (or less) makes the smoother jump straight to the target.
//!
//! # Example
//!
//! ```rust
//! use lamina_core::{ConstantTimeSmoother, Smoother};
//!
//! let mut cutoff = ConstantTimeSmoother::<f64>::new();
//! cutoff.set_time(0.001); // 48 samples at the default 48 kHz
//! cutoff.set_target_value(1000.0);
//!
//! for _ in 0..48 {
//!     cutoff.process();
//! }
//! assert!((cutoff.last() - 1000.0).abs() < 1e-6);
//! ```

use crate::math::clamp;
use crate::{Context, Sample};

/// Ramping policy shared by the linear smoothers.
pub trait Smoother<T: Sample> {
    /// Zero both the current and the target value.
    fn reset(&mut self);

    /// Adopt a new sample rate and recompute the step size.
    fn set_context(&mut self, context: Context);

    /// Set the value to ramp toward.
    fn set_target_value(&mut self, value: T);

    /// Set the smoothing time in seconds.
    fn set_time(&mut self, time: T);

    /// Advance one sample and return the new value.
    fn process(&mut self) -> T;

    /// Set a new target, then advance one sample.
    #[inline]
    fn process_target(&mut self, value: T) -> T {
        self.set_target_value(value);
        self.process()
    }

    /// Most recent output.
    fn last(&self) -> T;

    /// Value being ramped toward.
    fn target(&self) -> T;

    /// True while the output has not yet reached the target.
    fn is_smoothing(&self) -> bool {
        self.last() != self.target()
    }
}

#[derive(Debug, Clone, Copy)]
struct Ramp<T> {
    context: Context,
    target: T,
    current: T,
    time: T,
    delta: T,
}

impl<T: Sample> Ramp<T> {
    fn new() -> Self {
        Self {
            context: Context::default(),
            target: T::zero(),
            current: T::zero(),
            time: T::zero(),
            delta: T::infinity(),
        }
    }

    /// Largest per-sample step covering `distance` in `time` seconds.
    #[inline]
    fn step_for(&self, distance: T) -> T {
        if self.time <= T::zero() {
            T::infinity()
        } else {
            T::from_f64(self.context.sample_period()) / self.time * distance
        }
    }

    #[inline]
    fn advance(&mut self) -> T {
        let diff = clamp(self.target - self.current, -self.delta, self.delta);
        self.current = self.current + diff;
        self.current
    }

    fn reset(&mut self) {
        self.current = T::zero();
        self.target = T::zero();
    }
}

/// Smoother with a fixed maximum change per sample.
///
/// The step is `sample_period / time` regardless of how far the target is,
/// so ramping from 0 to 10 takes ten times as long as ramping from 0 to 1.
#[derive(Debug, Clone, Copy)]
pub struct ConstantRateSmoother<T> {
    ramp: Ramp<T>,
}

impl<T: Sample> ConstantRateSmoother<T> {
    /// A smoother at rest on zero, 48 kHz context, zero time.
    pub fn new() -> Self {
        Self { ramp: Ramp::new() }
    }

    /// Smoothing time in seconds.
    pub fn time(&self) -> T {
        self.ramp.time
    }

    /// Current per-sample step limit.
    pub fn delta(&self) -> T {
        self.ramp.delta
    }

    fn update_delta(&mut self) {
        self.ramp.delta = self.ramp.step_for(T::one());
    }
}

impl<T: Sample> Default for ConstantRateSmoother<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> crate::Contextual for ConstantRateSmoother<T> {
    fn set_context(&mut self, context: Context) {
        Smoother::set_context(self, context);
    }
}

impl<T: Sample> Smoother<T> for ConstantRateSmoother<T> {
    fn reset(&mut self) {
        self.ramp.reset();
    }

    fn set_context(&mut self, context: Context) {
        self.ramp.context = context;
        self.update_delta();
    }

    #[inline]
    fn set_target_value(&mut self, value: T) {
        self.ramp.target = value;
    }

    fn set_time(&mut self, time: T) {
        self.ramp.time = time;
        self.update_delta();
    }

    #[inline]
    fn process(&mut self) -> T {
        self.ramp.advance()
    }

    #[inline]
    fn last(&self) -> T {
        self.ramp.current
    }

    #[inline]
    fn target(&self) -> T {
        self.ramp.target
    }
}

/// Smoother that reaches any target in exactly `time` seconds.
///
/// The step is recomputed from the remaining distance on every
/// [`set_target_value`](Smoother::set_target_value), [`set_time`](Smoother::set_time)
/// and [`set_context`](Smoother::set_context); it is constant for the rest of
/// the ramp. Retargeting mid-ramp restarts the timing from the current value.
#[derive(Debug, Clone, Copy)]
pub struct ConstantTimeSmoother<T> {
    ramp: Ramp<T>,
}

impl<T: Sample> ConstantTimeSmoother<T> {
    /// A smoother at rest on zero, 48 kHz context, zero time.
    pub fn new() -> Self {
        Self { ramp: Ramp::new() }
    }

    /// Smoothing time in seconds.
    pub fn time(&self) -> T {
        self.ramp.time
    }

    /// Current per-sample step limit.
    pub fn delta(&self) -> T {
        self.ramp.delta
    }

    fn update_delta(&mut self) {
        let distance = (self.ramp.target - self.ramp.current).abs();
        self.ramp.delta = self.ramp.step_for(distance);
    }
}

impl<T: Sample> Default for ConstantTimeSmoother<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sample> crate::Contextual for ConstantTimeSmoother<T> {
    fn set_context(&mut self, context: Context) {
        Smoother::set_context(self, context);
    }
}

impl<T: Sample> Smoother<T> for ConstantTimeSmoother<T> {
    fn reset(&mut self) {
        self.ramp.reset();
        self.update_delta();
    }

    fn set_context(&mut self, context: Context) {
        self.ramp.context = context;
        self.update_delta();
    }

    #[inline]
    fn set_target_value(&mut self, value: T) {
        self.ramp.target = value;
        self.update_delta();
    }

    fn set_time(&mut self, time: T) {
        self.ramp.time = time;
        self.update_delta();
    }

    #[inline]
    fn process(&mut self) -> T {
        self.ramp.advance()
    }

    #[inline]
    fn last(&self) -> T {
        self.ramp.current
    }

    #[inline]
    fn target(&self) -> T {
        self.ramp.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<S: Smoother<f64>>(smoother: &mut S, samples: usize) -> Vec<f64> {
        (0..samples).map(|_| smoother.process()).collect()
    }

    #[test]
    fn test_defaults_are_at_rest() {
        let mut rate = ConstantRateSmoother::<f32>::new();
        let mut time = ConstantTimeSmoother::<f32>::new();
        assert_eq!(rate.process(), 0.0);
        assert_eq!(time.process(), 0.0);
        assert_eq!(rate.time(), 0.0);
        assert!(!time.is_smoothing());
    }

    #[test]
    fn test_zero_time_jumps() {
        let mut rate = ConstantRateSmoother::<f64>::new();
        rate.set_target_value(3.0);
        assert_eq!(rate.process(), 3.0);

        let mut time = ConstantTimeSmoother::<f64>::new();
        time.set_time(0.0);
        assert_eq!(time.process_target(-2.0), -2.0);
        assert!(!time.delta().is_nan());
    }

    #[test]
    fn test_constant_rate_step_is_period_over_time() {
        let mut smoother = ConstantRateSmoother::<f64>::new();
        smoother.set_context(Context::new(1000.0));
        smoother.set_time(0.1);
        assert!((smoother.delta() - 0.01).abs() < 1e-15);

        smoother.set_target_value(1.0);
        let out = run(&mut smoother, 3);
        assert!((out[0] - 0.01).abs() < 1e-12);
        assert!((out[2] - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_constant_rate_duration_scales_with_distance() {
        let settle = |target: f64| {
            let mut smoother = ConstantRateSmoother::<f64>::new();
            smoother.set_time(0.001);
            smoother.set_target_value(target);
            let mut n = 0;
            while smoother.is_smoothing() {
                smoother.process();
                n += 1;
            }
            n
        };
        let short = settle(1.0);
        let long = settle(4.0);
        assert!((47..=49).contains(&short), "short ramp took {short}");
        assert!((191..=193).contains(&long), "long ramp took {long}");
    }

    #[test]
    fn test_constant_time_converges_at_same_index() {
        for target in [1.0, 10.0, -250.0] {
            let mut smoother = ConstantTimeSmoother::<f64>::new();
            smoother.set_time(0.01);
            smoother.set_target_value(target);
            let out = run(&mut smoother, 600);

            // 0.01 s at 48 kHz is 480 samples
            assert!((out[479] - target).abs() < 1e-9 * target.abs());
            assert!((out[470] - target).abs() > 1e-3 * target.abs());
            assert!(out[480..].iter().all(|&y| y == target));
        }
    }

    #[test]
    fn test_constant_time_retarget_restarts_timing() {
        let mut smoother = ConstantTimeSmoother::<f64>::new();
        smoother.set_context(Context::new(1000.0));
        smoother.set_time(0.1);
        smoother.set_target_value(1.0);
        run(&mut smoother, 50);
        let halfway = smoother.last();
        assert!((halfway - 0.5).abs() < 1e-9);

        smoother.set_target_value(0.0);
        let out = run(&mut smoother, 100);
        assert!((out[99]).abs() < 1e-9);
        assert!(out[98] > 0.0);
    }

    #[test]
    fn test_never_overshoots() {
        let mut smoother = ConstantRateSmoother::<f64>::new();
        smoother.set_context(Context::new(100.0));
        smoother.set_time(0.03);
        smoother.set_target_value(0.05);
        let out = run(&mut smoother, 20);
        assert!(out.iter().all(|&y| y <= 0.05));
        assert_eq!(out[19], 0.05);
    }

    #[test]
    fn test_context_change_rescales_step() {
        let mut smoother = ConstantRateSmoother::<f64>::new();
        smoother.set_time(0.5);
        let before = smoother.delta();
        smoother.set_context(Context::new(24000.0));
        assert!((smoother.delta() - 2.0 * before).abs() < 1e-15);
    }

    #[test]
    fn test_contextual_reaches_smoothers() {
        use crate::Contextual;

        let mut rate = ConstantRateSmoother::<f64>::new();
        let mut time = ConstantTimeSmoother::<f64>::new();
        rate.set_time(0.5);
        time.set_time(0.5);
        time.set_target_value(1.0);
        let (rate_before, time_before) = (rate.delta(), time.delta());

        let ctx = Context::new(24000.0);
        let components: [&mut dyn Contextual; 2] = [&mut rate, &mut time];
        for c in components {
            c.set_context(ctx);
        }

        assert!((rate.delta() - 2.0 * rate_before).abs() < 1e-15);
        assert!((time.delta() - 2.0 * time_before).abs() < 1e-15);
    }

    #[test]
    fn test_reset_zeroes_current_and_target() {
        let mut smoother = ConstantTimeSmoother::<f32>::new();
        smoother.set_time(0.01);
        smoother.process_target(1.0);
        smoother.reset();
        assert_eq!(smoother.last(), 0.0);
        assert_eq!(smoother.target(), 0.0);
        assert_eq!(smoother.process(), 0.0);
    }
}
