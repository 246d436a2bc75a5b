//! Measured frequency response

use lamina_core::{Processor, Sample};
use rustfft::{FftPlanner, num_complex::Complex};
use std::f64::consts::{PI, TAU};

/// Frequency response measured from a filter's impulse response.
#[derive(Debug, Clone)]
pub struct FrequencyResponse {
    /// Frequency bins (Hz), DC to Nyquist
    pub frequencies: Vec<f64>,
    /// Magnitude response (dB)
    pub magnitude_db: Vec<f64>,
    /// Phase response (radians, wrapped)
    pub phase_rad: Vec<f64>,
    sample_rate: f64,
}

impl FrequencyResponse {
    /// Measure a filter by feeding it a unit impulse.
    ///
    /// The filter is reset before and after capture. `fft_size` samples of
    /// the impulse response are transformed, so it should be long enough for
    /// the response to have decayed.
    ///
    /// # Arguments
    /// * `filter` - Filter to measure
    /// * `sample_rate` - Sample rate in Hz
    /// * `fft_size` - Capture length and FFT size
    pub fn measure<T: Sample, P: Processor<T>>(
        filter: &mut P,
        sample_rate: f64,
        fft_size: usize,
    ) -> Self {
        filter.reset();
        let impulse_response: Vec<f64> = (0..fft_size)
            .map(|i| {
                let x = if i == 0 { T::one() } else { T::zero() };
                filter.process(x).into_f64()
            })
            .collect();
        filter.reset();

        Self::from_impulse_response(&impulse_response, sample_rate)
    }

    /// Response of a captured impulse response; the FFT size is its length.
    pub fn from_impulse_response(impulse_response: &[f64], sample_rate: f64) -> Self {
        let fft_size = impulse_response.len();
        let mut spectrum: Vec<Complex<f64>> = impulse_response
            .iter()
            .map(|&x| Complex::new(x, 0.0))
            .collect();

        if fft_size > 0 {
            let mut planner = FftPlanner::new();
            planner.plan_fft_forward(fft_size).process(&mut spectrum);
        }

        let bins = if fft_size == 0 { 0 } else { fft_size / 2 + 1 };
        let freq_resolution = sample_rate / fft_size.max(1) as f64;

        let mut frequencies = Vec::with_capacity(bins);
        let mut magnitude_db = Vec::with_capacity(bins);
        let mut phase_rad = Vec::with_capacity(bins);

        for (i, h) in spectrum.iter().take(bins).enumerate() {
            frequencies.push(i as f64 * freq_resolution);
            magnitude_db.push(20.0 * h.norm().max(1e-12).log10());
            phase_rad.push(h.arg());
        }

        Self {
            frequencies,
            magnitude_db,
            phase_rad,
            sample_rate,
        }
    }

    /// Sample rate the response was measured at.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Magnitude at a specific frequency (interpolated)
    pub fn magnitude_at(&self, freq_hz: f64) -> f64 {
        interpolate(&self.frequencies, &self.magnitude_db, freq_hz)
    }

    /// Unwrapped phase at a specific frequency (interpolated)
    pub fn phase_at(&self, freq_hz: f64) -> f64 {
        interpolate(&self.frequencies, &unwrap_phase(&self.phase_rad), freq_hz)
    }

    /// First frequency where the magnitude falls 3 dB below `reference_db`.
    pub fn cutoff_frequency(&self, reference_db: f64) -> Option<f64> {
        let target = reference_db - 3.0;

        for i in 1..self.magnitude_db.len() {
            if self.magnitude_db[i] < target && self.magnitude_db[i - 1] >= target {
                let t = (target - self.magnitude_db[i - 1])
                    / (self.magnitude_db[i] - self.magnitude_db[i - 1]);
                return Some(
                    self.frequencies[i - 1] + t * (self.frequencies[i] - self.frequencies[i - 1]),
                );
            }
        }
        None
    }

    /// Group delay in samples at each bin.
    ///
    /// Negative derivative of the unwrapped phase with respect to normalized
    /// angular frequency. Meaningless where the magnitude is near zero.
    pub fn group_delay(&self) -> Vec<f64> {
        let n = self.frequencies.len();
        if n < 2 {
            return vec![0.0; n];
        }

        let unwrapped = unwrap_phase(&self.phase_rad);
        let to_omega = TAU / self.sample_rate;

        (0..n)
            .map(|i| {
                let lo = i.saturating_sub(1);
                let hi = (i + 1).min(n - 1);
                let d_omega = (self.frequencies[hi] - self.frequencies[lo]) * to_omega;
                if d_omega > 0.0 {
                    -(unwrapped[hi] - unwrapped[lo]) / d_omega
                } else {
                    0.0
                }
            })
            .collect()
    }
}

/// Unwrap phase to remove discontinuities
///
/// Phase values are adjusted to be continuous by adding/subtracting
/// multiples of 2*pi when jumps exceed pi.
pub fn unwrap_phase(phase: &[f64]) -> Vec<f64> {
    let mut unwrapped = Vec::with_capacity(phase.len());
    let mut correction = 0.0;

    for (i, &p) in phase.iter().enumerate() {
        if i > 0 {
            let diff = p - phase[i - 1];
            if diff > PI {
                correction -= TAU;
            } else if diff < -PI {
                correction += TAU;
            }
        }
        unwrapped.push(p + correction);
    }

    unwrapped
}

/// Linear interpolation helper
fn interpolate(x: &[f64], y: &[f64], target_x: f64) -> f64 {
    let (Some(&first), Some(&last)) = (y.first(), y.last()) else {
        return 0.0;
    };

    if target_x <= x[0] {
        return first;
    }

    for i in 1..x.len() {
        if target_x <= x[i] {
            let t = (target_x - x[i - 1]) / (x[i] - x[i - 1]);
            return y[i - 1] + t * (y[i] - y[i - 1]);
        }
    }

    last
}
