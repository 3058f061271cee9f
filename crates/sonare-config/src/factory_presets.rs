//! Factory presets bundled with the sonare library.
//!
//! These cover one configuration of each designer plus a stereo anti-alias
//! stage, and are always available without external files.

use crate::DesignPreset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &["gentle_lowpass", "anti_alias_4x", "flanger", "bell"];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("gentle_lowpass", GENTLE_LOWPASS_PRESET),
    ("anti_alias_4x", ANTI_ALIAS_4X_PRESET),
    ("flanger", FLANGER_PRESET),
    ("bell", BELL_PRESET),
];

/// Short Hann-windowed low-pass for taming hiss.
const GENTLE_LOWPASS_PRESET: &str = r#"
name = "Gentle Lowpass"
description = "63-tap low-pass at 3 kHz with a Hann window"
sample_rate = 48000.0
length = 63
window = "hann"

[design]
type = "lowpass"
cutoff = 3000.0
"#;

/// Stereo 4x oversampling stage with a matching Blackman low-pass.
const ANTI_ALIAS_4X_PRESET: &str = r#"
name = "Anti-alias 4x"
description = "4x stereo oversampling with sample-and-hold expansion"
sample_rate = 48000.0
length = 255
window = "blackman"

[design]
type = "lowpass"
cutoff = 20000.0

[oversampling]
magnification = 4
filter_size = 2048
channels = 2
expansion = "sample-hold"
"#;

/// Fractional-delay comb with decaying echoes.
const FLANGER_PRESET: &str = r#"
name = "Flanger"
description = "Comb with 3.5-sample spacing and 0.7 feedback"
sample_rate = 48000.0
length = 32

[design]
type = "comb"
delay = 3.5
amplifier = 0.7
"#;

/// Inharmonic partials under a Gaussian envelope.
const BELL_PRESET: &str = r#"
name = "Bell"
description = "Resonator on three bell-like partials"
sample_rate = 48000.0
length = 1024
window = "nuttall"

[design]
type = "resonator"
frequencies = [440.0, 1210.0, 2380.0]
amplifier = 0.8
strength = 400.0
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use sonare_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {}", preset.name, preset.design.kind());
/// }
/// ```
pub fn factory_presets() -> Vec<DesignPreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| DesignPreset::from_toml_str(toml).ok())
        .collect()
}

/// Get a factory preset by identifier or display name, case-insensitively.
///
/// # Example
///
/// ```rust
/// use sonare_config::get_factory_preset;
///
/// let preset = get_factory_preset("flanger").unwrap();
/// assert_eq!(preset.name, "Flanger");
/// ```
pub fn get_factory_preset(name: &str) -> Option<DesignPreset> {
    let name_lower = name.to_lowercase();

    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.to_lowercase() == name_lower)
    {
        return DesignPreset::from_toml_str(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Check if a name refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_factory_presets_parse() {
        for (name, toml) in FACTORY_PRESETS_TOML {
            let result = DesignPreset::from_toml_str(toml);
            assert!(result.is_ok(), "factory preset '{name}' failed: {result:?}");
        }
        assert_eq!(factory_presets().len(), FACTORY_PRESET_NAMES.len());
    }

    #[test]
    fn test_all_factory_presets_validate() {
        for preset in factory_presets() {
            let result = preset.validate();
            assert!(result.is_ok(), "preset '{}' invalid: {result:?}", preset.name);
        }
    }

    #[test]
    fn test_names_match_table() {
        let ids: Vec<&str> = FACTORY_PRESETS_TOML.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, FACTORY_PRESET_NAMES);
    }

    #[test]
    fn test_get_factory_preset() {
        assert_eq!(get_factory_preset("bell").unwrap().name, "Bell");
        assert_eq!(get_factory_preset("BELL").unwrap().name, "Bell");
        assert_eq!(
            get_factory_preset("Anti-alias 4x").unwrap().design.kind(),
            "lowpass"
        );
        assert!(get_factory_preset("nonexistent").is_none());
    }

    #[test]
    fn test_is_factory_preset() {
        assert!(is_factory_preset("gentle_lowpass"));
        assert!(is_factory_preset("Gentle Lowpass"));
        assert!(!is_factory_preset("my_custom_design"));
    }

    #[test]
    fn test_anti_alias_has_oversampler() {
        let preset = get_factory_preset("anti_alias_4x").unwrap();
        let os = preset.oversampler().unwrap().unwrap();
        assert_eq!(os.magnification(), 4);
        assert_eq!(os.block_frames(), 256);
    }
}
