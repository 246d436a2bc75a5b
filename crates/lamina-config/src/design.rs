//! Filter designs and the filters built from them.
//!
//! A [`FilterDesign`] is the serializable description of one filter: its
//! kind and its parameters in physical units. [`FilterDesign::build`] turns
//! it into a [`FilterKind`], the concrete lamina-core filter, for a given
//! [`Context`]. [`FilterInstance`] pairs the two so that a later context
//! change can re-derive coefficients from the design.

use lamina_core::{
    AnalogBiquadCoefficients, BiquadDf1, BiquadDf2, BiquadTdf1, BiquadTdf2, Context, Contextual,
    DigitalBiquadCoefficients, FirFilter, HighPass1, LowPass1, NaiveLowPass, Processor, Sample,
    StateVariableFilter, SvfOutput, bilinear, prewarp, windowed_sinc_lowpass,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::validation::validate_design;

/// Biquad state layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Direct Form I
    Df1,
    /// Direct Form II
    Df2,
    /// Transposed Direct Form I
    Tdf1,
    /// Transposed Direct Form II
    #[default]
    Tdf2,
}

/// Analog prototype a biquad is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiquadResponse {
    /// Second-order low-pass
    #[default]
    Lowpass,
    /// Second-order high-pass
    Highpass,
    /// Band-pass, 0 dB at the center frequency
    Bandpass,
    /// Band-reject
    Notch,
}

impl BiquadResponse {
    /// Digital coefficients for this response via the prewarped bilinear
    /// transform.
    pub fn coefficients<T: Sample>(
        self,
        cutoff: f64,
        q: f64,
        sample_rate: f64,
    ) -> DigitalBiquadCoefficients<T> {
        let wc = prewarp(cutoff, sample_rate);
        let analog = match self {
            Self::Lowpass => AnalogBiquadCoefficients::lowpass(wc, q),
            Self::Highpass => AnalogBiquadCoefficients::highpass(wc, q),
            Self::Bandpass => AnalogBiquadCoefficients::bandpass(wc, q),
            Self::Notch => AnalogBiquadCoefficients::notch(wc, q),
        };
        bilinear::<f64>(analog, sample_rate).cast()
    }
}

/// Serializable mirror of [`SvfOutput`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SvfMode {
    /// Low-pass output
    #[default]
    Lowpass,
    /// High-pass output
    Highpass,
    /// Band-pass output
    Bandpass,
    /// Notch output
    Notch,
}

impl From<SvfMode> for SvfOutput {
    fn from(mode: SvfMode) -> Self {
        match mode {
            SvfMode::Lowpass => SvfOutput::Lowpass,
            SvfMode::Highpass => SvfOutput::Highpass,
            SvfMode::Bandpass => SvfOutput::Bandpass,
            SvfMode::Notch => SvfOutput::Notch,
        }
    }
}

/// One filter, described by kind and parameters.
///
/// Serialized as an internally tagged table:
///
/// ```toml
/// type = "state_variable"
/// cutoff = 800.0
/// resonance = 0.5
/// output = "bandpass"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterDesign {
    /// Naive one-pole low-pass.
    NaiveLowpass {
        /// Cutoff in Hz.
        cutoff: f64,
    },
    /// TPT one-pole low-pass.
    TptLowpass {
        /// Cutoff in Hz.
        cutoff: f64,
    },
    /// TPT one-pole high-pass.
    TptHighpass {
        /// Cutoff in Hz.
        cutoff: f64,
    },
    /// TPT state-variable filter.
    StateVariable {
        /// Cutoff in Hz.
        cutoff: f64,
        /// Resonance, 0 to 1.
        #[serde(default)]
        resonance: f64,
        /// Which output to use.
        #[serde(default)]
        output: SvfMode,
    },
    /// Bilinear-transformed second-order section.
    Biquad {
        /// State layout.
        #[serde(default)]
        topology: Topology,
        /// Prototype response.
        #[serde(default)]
        response: BiquadResponse,
        /// Cutoff or center frequency in Hz.
        cutoff: f64,
        /// Quality factor.
        #[serde(default = "default_q")]
        q: f64,
    },
    /// Windowed-sinc FIR low-pass.
    FirLowpass {
        /// Cutoff in Hz.
        cutoff: f64,
        /// Kernel duration in seconds.
        duration: f64,
    },
}

fn default_q() -> f64 {
    core::f64::consts::FRAC_1_SQRT_2
}

impl FilterDesign {
    /// Short name of the filter kind, as it appears in the `type` key.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::NaiveLowpass { .. } => "naive_lowpass",
            Self::TptLowpass { .. } => "tpt_lowpass",
            Self::TptHighpass { .. } => "tpt_highpass",
            Self::StateVariable { .. } => "state_variable",
            Self::Biquad { .. } => "biquad",
            Self::FirLowpass { .. } => "fir_lowpass",
        }
    }

    /// Cutoff (or center) frequency in Hz.
    pub fn cutoff(&self) -> f64 {
        match *self {
            Self::NaiveLowpass { cutoff }
            | Self::TptLowpass { cutoff }
            | Self::TptHighpass { cutoff }
            | Self::StateVariable { cutoff, .. }
            | Self::Biquad { cutoff, .. }
            | Self::FirLowpass { cutoff, .. } => cutoff,
        }
    }

    /// Build the concrete filter for `context`.
    ///
    /// Parameters are not range-checked here; see
    /// [`validate_design`](crate::validate_design).
    pub fn build<T: Sample>(&self, context: &Context) -> Result<FilterKind<T>, ConfigError> {
        let sample_rate = context.sample_rate();

        let filter = match *self {
            Self::NaiveLowpass { cutoff } => {
                let mut filter = NaiveLowPass::new();
                filter.set_context(*context);
                filter.set_cutoff_frequency(T::from_f64(cutoff));
                FilterKind::NaiveLowPass(filter)
            }
            Self::TptLowpass { cutoff } => {
                let mut filter = LowPass1::new();
                filter.set_context(*context);
                filter.set_cutoff_frequency(T::from_f64(cutoff));
                FilterKind::LowPass(filter)
            }
            Self::TptHighpass { cutoff } => {
                let mut filter = HighPass1::new();
                filter.set_context(*context);
                filter.set_cutoff_frequency(T::from_f64(cutoff));
                FilterKind::HighPass(filter)
            }
            Self::StateVariable {
                cutoff,
                resonance,
                output,
            } => {
                let mut filter = StateVariableFilter::new();
                filter.set_context(*context);
                filter.set_cutoff_frequency(T::from_f64(cutoff));
                filter.set_resonance(T::from_f64(resonance));
                filter.set_output_type(output.into());
                FilterKind::StateVariable(filter)
            }
            Self::Biquad {
                topology,
                response,
                cutoff,
                q,
            } => {
                let coefficients = response.coefficients(cutoff, q, sample_rate);
                match topology {
                    Topology::Df1 => FilterKind::BiquadDf1(BiquadDf1::with_coefficients(coefficients)),
                    Topology::Df2 => FilterKind::BiquadDf2(BiquadDf2::with_coefficients(coefficients)),
                    Topology::Tdf1 => {
                        FilterKind::BiquadTdf1(BiquadTdf1::with_coefficients(coefficients))
                    }
                    Topology::Tdf2 => {
                        FilterKind::BiquadTdf2(BiquadTdf2::with_coefficients(coefficients))
                    }
                }
            }
            Self::FirLowpass { cutoff, duration } => {
                let kernel = windowed_sinc_lowpass(cutoff, duration, sample_rate)?;
                FilterKind::Fir(FirFilter::from_design(&kernel)?)
            }
        };

        tracing::debug!(kind = self.kind_name(), sample_rate, "filter built");
        Ok(filter)
    }

    /// Re-derive `filter`'s coefficients for a new context.
    ///
    /// One-pole, SVF and biquad state survives; an FIR kernel is redesigned
    /// for the new rate, which resizes and clears its history.
    ///
    /// # Errors
    /// [`ConfigError::Validation`] when the design is no longer valid at the
    /// new rate (a cutoff at or above the new Nyquist, an FIR kernel too
    /// short). `filter` is left untouched.
    pub fn retune<T: Sample>(
        &self,
        filter: &mut FilterKind<T>,
        context: &Context,
    ) -> Result<(), ConfigError> {
        validate_design(self, context.sample_rate())?;
        match (self, filter) {
            (Self::NaiveLowpass { .. }, FilterKind::NaiveLowPass(f)) => f.set_context(*context),
            (Self::TptLowpass { .. }, FilterKind::LowPass(f)) => f.set_context(*context),
            (Self::TptHighpass { .. }, FilterKind::HighPass(f)) => f.set_context(*context),
            (Self::StateVariable { .. }, FilterKind::StateVariable(f)) => f.set_context(*context),
            (
                Self::Biquad {
                    response, cutoff, q, ..
                },
                filter,
            ) if filter.is_biquad() => {
                let coefficients = response.coefficients(*cutoff, *q, context.sample_rate());
                filter.set_biquad_coefficients(coefficients);
            }
            (Self::FirLowpass { cutoff, duration }, FilterKind::Fir(f)) => {
                let kernel = windowed_sinc_lowpass(*cutoff, *duration, context.sample_rate())?;
                f.set_coefficients(kernel.iter().map(|&c| T::from_f64(c)).collect())?;
            }
            (_, filter) => *filter = self.build(context)?,
        }
        Ok(())
    }
}

/// A concrete lamina-core filter built from a [`FilterDesign`].
#[derive(Debug, Clone)]
pub enum FilterKind<T: Sample> {
    /// Naive one-pole low-pass
    NaiveLowPass(NaiveLowPass<T>),
    /// TPT one-pole low-pass
    LowPass(LowPass1<T>),
    /// TPT one-pole high-pass
    HighPass(HighPass1<T>),
    /// TPT state-variable filter
    StateVariable(StateVariableFilter<T>),
    /// Biquad, Direct Form I
    BiquadDf1(BiquadDf1<T>),
    /// Biquad, Direct Form II
    BiquadDf2(BiquadDf2<T>),
    /// Biquad, Transposed Direct Form I
    BiquadTdf1(BiquadTdf1<T>),
    /// Biquad, Transposed Direct Form II
    BiquadTdf2(BiquadTdf2<T>),
    /// FIR convolution
    Fir(FirFilter<T>),
}

macro_rules! dispatch {
    ($self:expr, $f:ident => $body:expr) => {
        match $self {
            FilterKind::NaiveLowPass($f) => $body,
            FilterKind::LowPass($f) => $body,
            FilterKind::HighPass($f) => $body,
            FilterKind::StateVariable($f) => $body,
            FilterKind::BiquadDf1($f) => $body,
            FilterKind::BiquadDf2($f) => $body,
            FilterKind::BiquadTdf1($f) => $body,
            FilterKind::BiquadTdf2($f) => $body,
            FilterKind::Fir($f) => $body,
        }
    };
}

impl<T: Sample> FilterKind<T> {
    /// True for the four biquad variants.
    pub fn is_biquad(&self) -> bool {
        matches!(
            self,
            Self::BiquadDf1(_) | Self::BiquadDf2(_) | Self::BiquadTdf1(_) | Self::BiquadTdf2(_)
        )
    }

    /// Replace the coefficients of a biquad variant; other kinds are left
    /// unchanged.
    pub fn set_biquad_coefficients(&mut self, coefficients: DigitalBiquadCoefficients<T>) {
        match self {
            Self::BiquadDf1(b) => b.set_coefficients(coefficients),
            Self::BiquadDf2(b) => b.set_coefficients(coefficients),
            Self::BiquadTdf1(b) => b.set_coefficients(coefficients),
            Self::BiquadTdf2(b) => b.set_coefficients(coefficients),
            _ => {}
        }
    }
}

impl<T: Sample> Processor<T> for FilterKind<T> {
    #[inline]
    fn process(&mut self, input: T) -> T {
        dispatch!(self, f => f.process(input))
    }

    fn process_block(&mut self, input: &[T], output: &mut [T]) {
        dispatch!(self, f => f.process_block(input, output))
    }

    fn process_block_inplace(&mut self, buffer: &mut [T]) {
        dispatch!(self, f => f.process_block_inplace(buffer))
    }

    fn reset(&mut self) {
        dispatch!(self, f => f.reset())
    }

    fn last(&self) -> T {
        dispatch!(self, f => f.last())
    }

    fn latency_samples(&self) -> usize {
        dispatch!(self, f => f.latency_samples())
    }
}

/// A built filter together with the design and context it came from.
///
/// Implements [`Contextual`]: a new context re-derives coefficients from the
/// stored design.
#[derive(Debug, Clone)]
pub struct FilterInstance<T: Sample> {
    design: FilterDesign,
    context: Context,
    filter: FilterKind<T>,
}

impl<T: Sample> FilterInstance<T> {
    /// Build `design` for `context`.
    pub fn new(design: FilterDesign, context: Context) -> Result<Self, ConfigError> {
        let filter = design.build(&context)?;
        Ok(Self {
            design,
            context,
            filter,
        })
    }

    /// The design this filter was built from.
    pub fn design(&self) -> &FilterDesign {
        &self.design
    }

    /// The context the coefficients were derived for.
    pub fn context(&self) -> Context {
        self.context
    }

    /// The concrete filter.
    pub fn kind(&self) -> &FilterKind<T> {
        &self.filter
    }

    /// Mutable access to the concrete filter.
    pub fn kind_mut(&mut self) -> &mut FilterKind<T> {
        &mut self.filter
    }

    /// Unwrap into the concrete filter.
    pub fn into_kind(self) -> FilterKind<T> {
        self.filter
    }
}

impl<T: Sample> Processor<T> for FilterInstance<T> {
    #[inline]
    fn process(&mut self, input: T) -> T {
        self.filter.process(input)
    }

    fn process_block(&mut self, input: &[T], output: &mut [T]) {
        self.filter.process_block(input, output);
    }

    fn process_block_inplace(&mut self, buffer: &mut [T]) {
        self.filter.process_block_inplace(buffer);
    }

    fn reset(&mut self) {
        self.filter.reset();
    }

    fn last(&self) -> T {
        self.filter.last()
    }

    fn latency_samples(&self) -> usize {
        self.filter.latency_samples()
    }
}

impl<T: Sample> Contextual for FilterInstance<T> {
    fn set_context(&mut self, context: Context) {
        tracing::debug!(
            kind = self.design.kind_name(),
            sample_rate = context.sample_rate(),
            "filter context change"
        );
        match self.design.retune(&mut self.filter, &context) {
            Ok(()) => self.context = context,
            Err(err) => tracing::warn!(%err, "keeping previous coefficients"),
        }
    }
}
