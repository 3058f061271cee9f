//! Design preset definition and serialization.

use serde::{Deserialize, Serialize};
use sonare_core::{
    Channels, Comb, Expansion, ImpulseResponse, LowPass, Oversampler, Resonator, Window,
};
use std::path::Path;

use crate::ConfigError;

fn default_sample_rate() -> f64 {
    48000.0
}

fn default_amplifier() -> f64 {
    1.0
}

fn default_channels() -> usize {
    1
}

/// Taper applied to designed coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum WindowKind {
    /// No tapering.
    Rectangular,
    /// Hann window.
    Hann,
    /// Hamming window.
    Hamming,
    /// Blackman window.
    #[default]
    Blackman,
    /// Nuttall window.
    Nuttall,
}

impl From<WindowKind> for Window {
    fn from(kind: WindowKind) -> Self {
        match kind {
            WindowKind::Rectangular => Window::Rectangular,
            WindowKind::Hann => Window::Hann,
            WindowKind::Hamming => Window::Hamming,
            WindowKind::Blackman => Window::Blackman,
            WindowKind::Nuttall => Window::Nuttall,
        }
    }
}

/// How base-rate samples are expanded before oversampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ExpansionKind {
    /// Insert zeros and scale by the magnification.
    ZeroStuff,
    /// Repeat each sample.
    #[default]
    SampleHold,
}

impl From<ExpansionKind> for Expansion {
    fn from(kind: ExpansionKind) -> Self {
        match kind {
            ExpansionKind::ZeroStuff => Expansion::ZeroStuff,
            ExpansionKind::SampleHold => Expansion::SampleHold,
        }
    }
}

/// Designer selection and its parameters, the `[design]` table of a preset.
///
/// The `type` key selects the variant:
///
/// ```toml
/// [design]
/// type = "comb"
/// delay = 4.5
/// amplifier = 0.7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DesignSpec {
    /// Windowed-sinc low-pass.
    Lowpass {
        /// Cutoff frequency in Hz.
        cutoff: f64,
    },
    /// Fractional-delay comb.
    Comb {
        /// Tap spacing in samples.
        delay: f64,
        /// Gain ratio between successive taps.
        #[serde(default = "default_amplifier")]
        amplifier: f64,
    },
    /// Gaussian-enveloped sinusoid bank.
    Resonator {
        /// Emphasised frequencies in Hz.
        #[serde(default)]
        frequencies: Vec<f64>,
        /// Overall gain.
        #[serde(default = "default_amplifier")]
        amplifier: f64,
        /// Gaussian spread in samples; absent means no decay.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        strength: Option<f64>,
    },
}

impl DesignSpec {
    /// Short name of the designer, as written in the `type` key.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lowpass { .. } => "lowpass",
            Self::Comb { .. } => "comb",
            Self::Resonator { .. } => "resonator",
        }
    }

    /// Build the core designer for these parameters.
    pub fn designer(&self, sample_rate: f64) -> Result<Box<dyn ImpulseResponse>, ConfigError> {
        let designer: Box<dyn ImpulseResponse> = match self {
            Self::Lowpass { cutoff } => Box::new(LowPass::new(sample_rate, *cutoff)?),
            Self::Comb { delay, amplifier } => Box::new(Comb::new(*delay, *amplifier)?),
            Self::Resonator {
                frequencies,
                amplifier,
                strength,
            } => Box::new(
                Resonator::new(sample_rate)?
                    .with_frequencies(frequencies.iter().copied())
                    .with_amplifier(*amplifier)
                    .with_strength(strength.unwrap_or(f64::INFINITY)),
            ),
        };
        Ok(designer)
    }
}

/// The optional `[oversampling]` table of a preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OversamplingConfig {
    /// Oversampling factor.
    pub magnification: usize,
    /// Samples per [`Oversampler::apply`] call, at the oversampled rate.
    pub filter_size: usize,
    /// Interleaved channel count, 1 or 2.
    #[serde(default = "default_channels")]
    pub channels: usize,
    /// Expansion used to bring base-rate input up to the oversampled rate.
    #[serde(default)]
    pub expansion: ExpansionKind,
}

impl OversamplingConfig {
    /// Create an oversampling section with mono, sample-and-hold defaults.
    pub fn new(magnification: usize, filter_size: usize) -> Self {
        Self {
            magnification,
            filter_size,
            channels: default_channels(),
            expansion: ExpansionKind::default(),
        }
    }

    /// Set the channel count.
    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    /// Set the expansion mode.
    pub fn with_expansion(mut self, expansion: ExpansionKind) -> Self {
        self.expansion = expansion;
        self
    }

    /// Build an oversampler running at `sample_rate` (the base rate).
    pub fn build(&self, sample_rate: f64) -> Result<Oversampler, ConfigError> {
        let channels = Channels::from_count(self.channels)?;
        Ok(Oversampler::new(
            sample_rate,
            self.magnification,
            channels,
            self.filter_size,
        )?)
    }
}

/// A named, serializable filter design.
///
/// # Example
///
/// ```rust
/// use sonare_config::{DesignPreset, DesignSpec, WindowKind};
///
/// let preset = DesignPreset::new("Gentle", 48000.0, 63, DesignSpec::Lowpass { cutoff: 3000.0 })
///     .with_window(WindowKind::Hann);
/// let taps = preset.coefficients().unwrap();
/// assert_eq!(taps.len(), 63);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPreset {
    /// Display name.
    pub name: String,

    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sampling rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,

    /// Number of coefficients to design.
    pub length: usize,

    /// Window applied after design; none leaves the raw response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowKind>,

    /// Designer and its parameters.
    pub design: DesignSpec,

    /// Optional oversampling stage settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oversampling: Option<OversamplingConfig>,
}

impl DesignPreset {
    /// Create a preset with no window and no oversampling section.
    pub fn new(
        name: impl Into<String>,
        sample_rate: f64,
        length: usize,
        design: DesignSpec,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate,
            length,
            window: None,
            design,
            oversampling: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the window.
    pub fn with_window(mut self, window: WindowKind) -> Self {
        self.window = Some(window);
        self
    }

    /// Attach an oversampling section.
    pub fn with_oversampling(mut self, oversampling: OversamplingConfig) -> Self {
        self.oversampling = Some(oversampling);
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Parse a preset from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Serialize the preset to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every parameter by running the design once.
    ///
    /// Also builds the oversampler when an `[oversampling]` table is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid_field("name", "must not be empty"));
        }
        self.coefficients()?;
        self.oversampler()?;
        Ok(())
    }

    /// Design the coefficients and apply the window, if any.
    pub fn coefficients(&self) -> Result<Vec<f64>, ConfigError> {
        if self.length == 0 {
            return Err(ConfigError::invalid_field("length", "must be greater than 0"));
        }
        let mut coefficients = self
            .design
            .designer(self.sample_rate)?
            .generate(self.length)?;
        if let Some(window) = self.window {
            Window::from(window).apply(&mut coefficients);
        }
        Ok(coefficients)
    }

    /// Build the oversampler described by the `[oversampling]` table.
    ///
    /// Returns `Ok(None)` when the preset has no such table.
    pub fn oversampler(&self) -> Result<Option<Oversampler>, ConfigError> {
        self.oversampling
            .as_ref()
            .map(|os| os.build(self.sample_rate))
            .transpose()
    }

    /// Expansion mode of the oversampling section, if present.
    pub fn expansion(&self) -> Option<Expansion> {
        self.oversampling.as_ref().map(|os| os.expansion.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonare_core::DspError;

    fn lowpass() -> DesignPreset {
        DesignPreset::new("Test", 48000.0, 32, DesignSpec::Lowpass { cutoff: 4000.0 })
    }

    #[test]
    fn test_preset_new() {
        let preset = lowpass();
        assert_eq!(preset.name, "Test");
        assert!(preset.description.is_none());
        assert!(preset.window.is_none());
        assert!(preset.oversampling.is_none());
        assert_eq!(preset.design.kind(), "lowpass");
    }

    #[test]
    fn test_parse_minimal() {
        let preset = DesignPreset::from_toml_str(
            r#"
name = "Echo"
length = 40

[design]
type = "comb"
delay = 10.0
"#,
        )
        .unwrap();
        assert_eq!(preset.sample_rate, 48000.0);
        assert_eq!(
            preset.design,
            DesignSpec::Comb {
                delay: 10.0,
                amplifier: 1.0
            }
        );
        let taps = preset.coefficients().unwrap();
        assert_eq!(taps[9], 1.0);
        assert_eq!(taps[19], 1.0);
    }

    #[test]
    fn test_parse_resonator_defaults() {
        let preset = DesignPreset::from_toml_str(
            r#"
name = "Ring"
sample_rate = 8000.0
length = 16
window = "hann"

[design]
type = "resonator"
frequencies = [1000.0, 2000.0]
"#,
        )
        .unwrap();
        assert_eq!(preset.window, Some(WindowKind::Hann));
        match &preset.design {
            DesignSpec::Resonator {
                frequencies,
                amplifier,
                strength,
            } => {
                assert_eq!(frequencies, &[1000.0, 2000.0]);
                assert_eq!(*amplifier, 1.0);
                assert!(strength.is_none());
            }
            other => panic!("unexpected design {other:?}"),
        }
    }

    #[test]
    fn test_parse_oversampling_section() {
        let preset = DesignPreset::from_toml_str(
            r#"
name = "AA"
length = 64

[design]
type = "lowpass"
cutoff = 20000.0

[oversampling]
magnification = 4
filter_size = 1024
channels = 2
expansion = "zero-stuff"
"#,
        )
        .unwrap();
        let os = preset.oversampling.as_ref().unwrap();
        assert_eq!(os.magnification, 4);
        assert_eq!(os.channels, 2);
        assert_eq!(os.expansion, ExpansionKind::ZeroStuff);
        assert_eq!(preset.expansion(), Some(Expansion::ZeroStuff));

        let oversampler = preset.oversampler().unwrap().unwrap();
        assert_eq!(oversampler.block_frames(), 128);
        assert!(oversampler.channels().is_stereo());
    }

    #[test]
    fn test_unknown_design_type_rejected() {
        let result = DesignPreset::from_toml_str(
            r#"
name = "Bad"
length = 8

[design]
type = "highpass"
cutoff = 100.0
"#,
        );
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_window_applied() {
        let raw = lowpass().coefficients().unwrap();
        let windowed = lowpass()
            .with_window(WindowKind::Blackman)
            .coefficients()
            .unwrap();
        // Blackman is zero at both ends and untouched at the centre
        assert!(windowed[0].abs() < 1e-12);
        assert!(raw[0].abs() > 1e-6);
        assert!(windowed[16] <= raw[16]);
    }

    #[test]
    fn test_validate_zero_length() {
        let mut preset = lowpass();
        preset.length = 0;
        assert!(matches!(
            preset.validate(),
            Err(ConfigError::InvalidField { field: "length", .. })
        ));
    }

    #[test]
    fn test_validate_empty_name() {
        let mut preset = lowpass();
        preset.name = "  ".to_string();
        assert!(matches!(
            preset.validate(),
            Err(ConfigError::InvalidField { field: "name", .. })
        ));
    }

    #[test]
    fn test_validate_cutoff_above_rate() {
        let preset = DesignPreset::new("X", 8000.0, 16, DesignSpec::Lowpass { cutoff: 9000.0 });
        assert!(matches!(
            preset.validate(),
            Err(ConfigError::Design(DspError::Frequency { .. }))
        ));
    }

    #[test]
    fn test_validate_resonator_frequency() {
        let preset = DesignPreset::new(
            "X",
            8000.0,
            16,
            DesignSpec::Resonator {
                frequencies: vec![100.0, 8001.0],
                amplifier: 1.0,
                strength: None,
            },
        );
        assert!(matches!(
            preset.validate(),
            Err(ConfigError::Design(DspError::Frequency { value, .. })) if value == 8001.0
        ));
    }

    #[test]
    fn test_validate_bad_sample_rate() {
        let preset = DesignPreset::new(
            "X",
            0.0,
            16,
            DesignSpec::Comb {
                delay: 2.0,
                amplifier: 0.5,
            },
        );
        // Comb ignores the rate, so only the oversampler would notice
        assert!(preset.validate().is_ok());
        let preset = preset.with_oversampling(OversamplingConfig::new(2, 64));
        assert!(matches!(
            preset.validate(),
            Err(ConfigError::Design(DspError::SamplingRate { .. }))
        ));
    }

    #[test]
    fn test_validate_oversampling_channels() {
        let preset = lowpass().with_oversampling(OversamplingConfig::new(2, 64).with_channels(3));
        assert!(matches!(
            preset.validate(),
            Err(ConfigError::Design(DspError::ArgumentRange {
                param: "channels",
                ..
            }))
        ));
    }

    #[test]
    fn test_toml_roundtrip() {
        let preset = DesignPreset::new(
            "Ring",
            44100.0,
            128,
            DesignSpec::Resonator {
                frequencies: vec![220.0, 660.0],
                amplifier: 0.5,
                strength: Some(40.0),
            },
        )
        .with_description("two partials")
        .with_window(WindowKind::Nuttall)
        .with_oversampling(
            OversamplingConfig::new(2, 256)
                .with_channels(2)
                .with_expansion(ExpansionKind::ZeroStuff),
        );

        let toml_str = preset.to_toml_string().unwrap();
        assert!(toml_str.contains("type = \"resonator\""));
        assert!(toml_str.contains("window = \"nuttall\""));
        let parsed = DesignPreset::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed, preset);
    }
}
