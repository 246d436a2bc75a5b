//! Filter design and preset validation.
//!
//! Core filters treat their parameters as preconditions: an out-of-range
//! cutoff yields garbage or infinities rather than an error. Presets come
//! from files, so they are checked here before anything is built.
//!
//! # Example
//!
//! ```rust
//! use lamina_config::{FilterDesign, ValidationError, validate_design};
//!
//! let design = FilterDesign::TptLowpass { cutoff: 30000.0 };
//! let err = validate_design(&design, 48000.0).unwrap_err();
//! assert!(matches!(err, ValidationError::CutoffOutOfRange { .. }));
//! ```

use lamina_core::fir::{MIN_DESIGN_TAPS, kernel_length};
use thiserror::Error;

use crate::design::FilterDesign;
use crate::preset::FilterPreset;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Sample rate not positive.
    #[error("sample rate {0} must be positive")]
    InvalidSampleRate(f64),

    /// Block size of zero.
    #[error("max block size must be at least 1")]
    InvalidBlockSize,

    /// Cutoff outside `(0, nyquist)`.
    #[error("cutoff {cutoff} Hz out of range (0, {nyquist})")]
    CutoffOutOfRange {
        /// The offending cutoff.
        cutoff: f64,
        /// Nyquist frequency at the preset's sample rate.
        nyquist: f64,
    },

    /// Resonance outside `[0, 1]`.
    #[error("resonance {0} out of range [0, 1]")]
    ResonanceOutOfRange(f64),

    /// Q not positive.
    #[error("q {0} must be positive")]
    InvalidQ(f64),

    /// FIR duration too short for a usable kernel.
    #[error("FIR duration {duration} s gives {taps} taps (minimum 3)")]
    FirTooShort {
        /// Requested duration in seconds.
        duration: f64,
        /// Taps that duration produces.
        taps: usize,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn collect(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

fn check_design(design: &FilterDesign, sample_rate: f64, errors: &mut Vec<ValidationError>) {
    let nyquist = sample_rate * 0.5;
    let cutoff = design.cutoff();
    if !(cutoff > 0.0 && cutoff < nyquist) {
        errors.push(ValidationError::CutoffOutOfRange { cutoff, nyquist });
    }

    match *design {
        FilterDesign::StateVariable { resonance, .. } if !(0.0..=1.0).contains(&resonance) => {
            errors.push(ValidationError::ResonanceOutOfRange(resonance));
        }
        FilterDesign::Biquad { q, .. } if !(q > 0.0 && q.is_finite()) => {
            errors.push(ValidationError::InvalidQ(q));
        }
        FilterDesign::FirLowpass { duration, .. } => {
            let taps = if duration.is_finite() && duration > 0.0 {
                kernel_length(duration, sample_rate)
            } else {
                0
            };
            if taps < MIN_DESIGN_TAPS {
                errors.push(ValidationError::FirTooShort { duration, taps });
            }
        }
        _ => {}
    }
}

/// Check a design's parameters against a sample rate.
///
/// All problems are reported; more than one comes back as
/// [`ValidationError::Multiple`].
pub fn validate_design(design: &FilterDesign, sample_rate: f64) -> ValidationResult<()> {
    if !(sample_rate > 0.0 && sample_rate.is_finite()) {
        return Err(ValidationError::InvalidSampleRate(sample_rate));
    }
    let mut errors = Vec::new();
    check_design(design, sample_rate, &mut errors);
    collect(errors)
}

/// Check a preset's context and filter design.
pub fn validate_preset(preset: &FilterPreset) -> ValidationResult<()> {
    let mut errors = Vec::new();
    let sample_rate = preset.context.sample_rate;

    if preset.context.max_block_size == 0 {
        errors.push(ValidationError::InvalidBlockSize);
    }

    if sample_rate > 0.0 && sample_rate.is_finite() {
        check_design(&preset.filter, sample_rate, &mut errors);
    } else {
        errors.push(ValidationError::InvalidSampleRate(sample_rate));
    }

    let result = collect(errors);
    if let Err(err) = &result {
        tracing::warn!(preset = %preset.name, %err, "preset failed validation");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{BiquadResponse, SvfMode, Topology};

    #[test]
    fn test_accepts_reasonable_designs() {
        let designs = [
            FilterDesign::NaiveLowpass { cutoff: 100.0 },
            FilterDesign::StateVariable {
                cutoff: 2000.0,
                resonance: 1.0,
                output: SvfMode::Notch,
            },
            FilterDesign::Biquad {
                topology: Topology::Df2,
                response: BiquadResponse::Bandpass,
                cutoff: 23999.0,
                q: 0.1,
            },
            FilterDesign::FirLowpass {
                cutoff: 1000.0,
                duration: 0.001,
            },
        ];
        for design in designs {
            assert_eq!(validate_design(&design, 48000.0), Ok(()));
        }
    }

    #[test]
    fn test_cutoff_bounds() {
        for cutoff in [0.0, -5.0, 24000.0, 30000.0, f64::NAN] {
            let result = validate_design(&FilterDesign::TptHighpass { cutoff }, 48000.0);
            assert!(
                matches!(result, Err(ValidationError::CutoffOutOfRange { nyquist, .. }) if nyquist == 24000.0),
                "cutoff {cutoff}"
            );
        }
    }

    #[test]
    fn test_resonance_and_q() {
        let svf = FilterDesign::StateVariable {
            cutoff: 1000.0,
            resonance: 1.5,
            output: SvfMode::Lowpass,
        };
        assert_eq!(
            validate_design(&svf, 48000.0),
            Err(ValidationError::ResonanceOutOfRange(1.5))
        );

        let biquad = FilterDesign::Biquad {
            topology: Topology::Tdf2,
            response: BiquadResponse::Lowpass,
            cutoff: 1000.0,
            q: 0.0,
        };
        assert_eq!(
            validate_design(&biquad, 48000.0),
            Err(ValidationError::InvalidQ(0.0))
        );
    }

    #[test]
    fn test_fir_too_short() {
        let fir = FilterDesign::FirLowpass {
            cutoff: 1000.0,
            duration: 2.0 / 48000.0,
        };
        assert!(matches!(
            validate_design(&fir, 48000.0),
            Err(ValidationError::FirTooShort { taps: 1, .. })
        ));
    }

    #[test]
    fn test_collects_multiple_errors() {
        let biquad = FilterDesign::Biquad {
            topology: Topology::Df1,
            response: BiquadResponse::Notch,
            cutoff: 50000.0,
            q: -1.0,
        };
        let Err(ValidationError::Multiple(errors)) = validate_design(&biquad, 48000.0) else {
            panic!("expected multiple errors");
        };
        assert_eq!(errors.len(), 2);
        let msg = ValidationError::Multiple(errors).to_string();
        assert!(msg.contains("cutoff 50000 Hz"), "got: {msg}");
        assert!(msg.contains("q -1 must be positive"), "got: {msg}");
    }

    #[test]
    fn test_bad_sample_rate() {
        assert_eq!(
            validate_design(&FilterDesign::TptLowpass { cutoff: 10.0 }, 0.0),
            Err(ValidationError::InvalidSampleRate(0.0))
        );
    }
}
