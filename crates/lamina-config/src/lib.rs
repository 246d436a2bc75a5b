//! Filter presets for lamina.
//!
//! A preset is a TOML file naming one filter, its parameters in physical
//! units, and the processing context it is designed for. This crate loads
//! and saves presets, validates their parameters, and builds the matching
//! lamina-core filter.
//!
//! # Features
//!
//! - **Presets**: Load and save [`FilterPreset`] TOML files
//! - **Designs**: [`FilterDesign`] covers one-pole, SVF, biquad and FIR filters
//! - **Validation**: Range-check parameters before anything is built
//! - **Instances**: [`FilterInstance`] runs any design behind [`Processor`]
//!   and re-derives coefficients on a context change
//!
//! # Example
//!
//! ```rust
//! use lamina_config::{FilterPreset, FilterDesign, BiquadResponse, Topology};
//! use lamina_core::{Context, Contextual, Processor};
//!
//! let preset = FilterPreset::from_toml(r#"
//!     name = "Rumble"
//!
//!     [filter]
//!     type = "biquad"
//!     response = "highpass"
//!     cutoff = 60.0
//! "#).unwrap();
//!
//! assert_eq!(
//!     preset.filter,
//!     FilterDesign::Biquad {
//!         topology: Topology::Tdf2,
//!         response: BiquadResponse::Highpass,
//!         cutoff: 60.0,
//!         q: core::f64::consts::FRAC_1_SQRT_2,
//!     }
//! );
//!
//! let mut filter = preset.build::<f32>().unwrap();
//! filter.set_context(Context::new(96000.0));
//! let y = filter.process(0.5);
//! assert!(y.is_finite());
//! ```
//!
//! [`Processor`]: lamina_core::Processor

mod design;
mod error;
mod preset;

/// Parameter validation for designs and presets.
pub mod validation;

pub use design::{BiquadResponse, FilterDesign, FilterInstance, FilterKind, SvfMode, Topology};
pub use error::ConfigError;
pub use preset::{ContextConfig, FilterPreset};
pub use validation::{ValidationError, ValidationResult, validate_design, validate_preset};
