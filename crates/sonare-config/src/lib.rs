//! Design presets for sonare filters.
//!
//! A preset names a designer, its parameters, the coefficient count and an
//! optional window, and may carry the settings of an oversampling stage.
//! Presets are stored as TOML:
//!
//! ```toml
//! name = "Anti-alias 4x"
//! sample_rate = 48000.0
//! length = 255
//! window = "blackman"
//!
//! [design]
//! type = "lowpass"
//! cutoff = 20000.0
//!
//! [oversampling]
//! magnification = 4
//! filter_size = 2048
//! channels = 2
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use sonare_config::{DesignPreset, resolve_preset};
//!
//! let preset = DesignPreset::load("my_filter.toml").unwrap();
//! preset.validate().unwrap();
//! let taps = preset.coefficients().unwrap();
//!
//! // Factory presets and files resolve through the same entry point
//! let bell = resolve_preset("bell").unwrap();
//! bell.save("presets/bell.toml").unwrap();
//! ```

mod error;
mod preset;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_presets, get_factory_preset, is_factory_preset,
};
pub use preset::{DesignPreset, DesignSpec, ExpansionKind, OversamplingConfig, WindowKind};

use std::path::Path;

/// Resolve a preset by file path or factory name.
///
/// An existing file at `name_or_path` wins; otherwise the factory presets are
/// searched by name.
pub fn resolve_preset(name_or_path: &str) -> Result<DesignPreset, ConfigError> {
    let path = Path::new(name_or_path);
    if path.is_file() {
        return DesignPreset::load(path);
    }
    get_factory_preset(name_or_path)
        .ok_or_else(|| ConfigError::PresetNotFound(name_or_path.to_string()))
}
