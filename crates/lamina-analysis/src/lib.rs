//! Lamina Analysis - frequency-response tools for lamina filters
//!
//! Everything here runs off the real-time path and is free to allocate.
//!
//! - [`transfer`] - Analytic responses: s-plane prototypes and digital biquads
//!   evaluated through the bilinear substitution
//! - [`response`] - Measured responses: FFT of a filter's impulse response
//!
//! ## Example
//!
//! ```rust
//! use lamina_analysis::{FrequencyResponse, biquad_transfer, f2s};
//! use lamina_core::{AnalogBiquadCoefficients, Biquad, bilinear, prewarp};
//! use std::f64::consts::TAU;
//!
//! let sr = 48000.0;
//! let wc = prewarp(1000.0, sr);
//! let coeffs = bilinear::<f64>(AnalogBiquadCoefficients::lowpass(wc, 0.707), sr);
//!
//! // Analytic magnitude at the digital 1 kHz cutoff: the s-plane point that
//! // the bilinear transform maps onto 1 kHz is the prewarped one.
//! let h = biquad_transfer(&coeffs, f2s(wc / TAU), sr);
//! assert!((h.norm() - 0.707).abs() < 1e-3);
//!
//! // Measured from the running filter
//! let mut filter = Biquad::<f64>::with_coefficients(coeffs);
//! let measured = FrequencyResponse::measure(&mut filter, sr, 8192);
//! let cutoff = measured.cutoff_frequency(0.0).unwrap();
//! assert!((cutoff - 1000.0).abs() < 10.0);
//! ```

pub mod response;
pub mod transfer;

pub use response::{FrequencyResponse, unwrap_phase};
pub use transfer::{
    AnalogResponse, analog_biquad_transfer, bilinear_z, biquad_transfer, f2s, magnitude_db,
    transfer_hp1, transfer_lp1,
};
pub use rustfft::num_complex::Complex;
