//! Lamina Core - real-time safe filter primitives
//!
//! This crate provides the filters and control-rate helpers that sit inside a
//! per-sample audio callback: no allocation, no locks and bounded work per
//! `process()` call.
//!
//! # Core Abstractions
//!
//! - [`Sample`] - Floating-point sample type (`f32` or `f64`)
//! - [`Context`] - Sample rate, sample period and block size
//! - [`Processor`] - Per-sample `process` / `reset` / `last` contract
//! - [`Contextual`] - Components that recompute coefficients on rate change
//! - [`Chain`] - Zero-cost serial combinator via [`ProcessorExt::chain`]
//!
//! ## Coefficient Derivation
//!
//! - [`frequency_to_g`], [`time_to_g`] - One-pole gains
//! - [`AnalogBiquadCoefficients`] + [`bilinear`] - Analog prototypes to digital sections
//! - [`butterworth_lowpass`], [`butterworth_highpass`] - Cascade designs
//!
//! ## Filters
//!
//! - [`NaiveLowPass`], [`LowPass1`], [`HighPass1`] - One-pole filters
//! - [`StateVariableFilter`] - TPT SVF with simultaneous LP/BP/HP/notch
//! - [`Biquad`] - Second-order section in one of four topologies
//!   ([`DirectForm1`], [`DirectForm2`], [`TransposedDirectForm1`], [`TransposedDirectForm2`])
//! - [`BiquadCascade`] - Fixed-size series of sections
//! - [`FirFilter`] + [`windowed_sinc_lowpass`] - Linear-phase convolution
//!
//! ## Parameter Smoothing
//!
//! - [`ConstantRateSmoother`] - Fixed step per sample
//! - [`ConstantTimeSmoother`] - Fixed ramp duration
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets. Only the FIR
//! filter needs an allocator, and only when its coefficients are set:
//!
//! ```toml
//! [dependencies]
//! lamina-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use lamina_core::{Context, Contextual, LowPass1, Processor, StateVariableFilter, SvfOutput};
//!
//! let mut svf = StateVariableFilter::<f32>::new();
//! svf.set_context(Context::new(44100.0));
//! svf.set_cutoff_frequency(800.0);
//! svf.set_resonance(0.5);
//! svf.set_output_type(SvfOutput::Bandpass);
//!
//! let mut tone = LowPass1::<f32>::new();
//! tone.set_context(Context::new(44100.0));
//! tone.set_cutoff_frequency(5000.0);
//!
//! let mut buffer = [0.0_f32; 64];
//! buffer[0] = 1.0;
//! svf.process_block_inplace(&mut buffer);
//! tone.process_block_inplace(&mut buffer);
//! assert!(buffer.iter().all(|y| y.is_finite()));
//! ```
//!
//! # Logging
//!
//! With the `tracing` feature, configuration-time operations (FIR design,
//! coefficient loading, context changes) emit `debug` events. Nothing is
//! logged from `process()`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod biquad;
pub mod coefficients;
pub mod context;
pub mod fir;
pub mod math;
pub mod one_pole;
pub mod processor;
pub mod sample;
pub mod smoother;
pub mod svf;

// Re-export main types at crate root
pub use biquad::{
    Biquad, BiquadCascade, BiquadDf1, BiquadDf2, BiquadState, BiquadTdf1, BiquadTdf2, DirectForm1,
    DirectForm2, TransposedDirectForm1, TransposedDirectForm2,
};
pub use coefficients::{
    AnalogBiquadCoefficients, DigitalBiquadCoefficients, bilinear, butterworth_highpass,
    butterworth_lowpass, butterworth_q, frequency_to_g, norm_frequency_to_g, prewarp, time_to_g,
};
pub use context::{Context, Contextual, DEFAULT_SAMPLE_RATE};
pub use fir::{FirError, FirFilter, windowed_sinc_lowpass};
pub use one_pole::{HighPass1, LowPass1, NaiveLowPass};
pub use processor::{Chain, Processor, ProcessorExt};
pub use sample::Sample;
pub use smoother::{ConstantRateSmoother, ConstantTimeSmoother, Smoother};
pub use svf::{StateVariableFilter, SvfOutput};
