//! Preset file format and operations.

use lamina_core::{Context, DEFAULT_SAMPLE_RATE, Sample};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::design::{FilterDesign, FilterInstance};
use crate::error::ConfigError;
use crate::validation::validate_preset;

/// Processing context as stored in a preset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ContextConfig {
    /// Sample rate in Hz (defaults to 48000).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,

    /// Largest block the host will process (defaults to 1).
    #[serde(default = "default_block_size")]
    pub max_block_size: usize,
}

fn default_sample_rate() -> f64 {
    DEFAULT_SAMPLE_RATE
}

fn default_block_size() -> usize {
    1
}

impl ContextConfig {
    /// The core [`Context`] for these settings. Validate first; the sample
    /// rate must be positive.
    pub fn to_context(&self) -> Context {
        Context::with_block_size(self.sample_rate, self.max_block_size)
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            max_block_size: default_block_size(),
        }
    }
}

impl From<Context> for ContextConfig {
    fn from(context: Context) -> Self {
        Self {
            sample_rate: context.sample_rate(),
            max_block_size: context.max_block_size(),
        }
    }
}

/// Preset file format for a single filter.
///
/// # TOML Format
///
/// ```toml
/// name = "Vocal Presence Cut"
/// description = "Narrow notch at 3 kHz"
///
/// [context]
/// sample_rate = 48000.0
/// max_block_size = 256
///
/// [filter]
/// type = "biquad"
/// topology = "tdf2"
/// response = "notch"
/// cutoff = 3000.0
/// q = 4.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterPreset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Processing context the filter is designed for.
    #[serde(default)]
    pub context: ContextConfig,

    /// The filter itself.
    pub filter: FilterDesign,
}

impl FilterPreset {
    /// Create a preset at the default context.
    pub fn new(name: impl Into<String>, filter: FilterDesign) -> Self {
        Self {
            name: name.into(),
            description: None,
            context: ContextConfig::default(),
            filter,
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the processing context.
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context.into();
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: FilterPreset = toml::from_str(&content)?;
        tracing::info!(name = %preset.name, path = %path.display(), "preset loaded");
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::info!(name = %self.name, path = %path.display(), "preset saved");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate, then build the filter for the preset's context.
    pub fn build<T: Sample>(&self) -> Result<FilterInstance<T>, ConfigError> {
        validate_preset(self)?;
        let instance = FilterInstance::new(self.filter.clone(), self.context.to_context())?;
        tracing::info!(
            name = %self.name,
            kind = self.filter.kind_name(),
            sample_rate = self.context.sample_rate,
            "preset built"
        );
        Ok(instance)
    }
}
