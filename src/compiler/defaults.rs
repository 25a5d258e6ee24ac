//! Built-in defaults for the override compiler.
//!
//! Every literal the compiler emits lives here so the precedence rules in
//! `compile.rs` read as pure ordering. `CompilerDefaults` can be replaced
//! wholesale from the `[defaults]` section of the config file.

use serde::{Deserialize, Serialize};

/// The "normal" layer height (mm). Still emitted explicitly when selected.
pub const DEFAULT_LAYER_HEIGHT: f64 = 0.15;
/// First-layer height (mm) paired with the normal layer height.
pub const DEFAULT_INITIAL_LAYER_HEIGHT: f64 = 0.2;
/// First-layer height as a multiple of any non-default layer height.
pub const INITIAL_LAYER_FACTOR: f64 = 1.5;
/// Infill percentage used when the user gives none.
pub const DEFAULT_INFILL_DENSITY: u8 = 20;

/// Values the compiler falls back to, grouped the way they are emitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompilerDefaults {
    /// Layer height (mm) treated as the engine's normal setting
    pub layer_height: f64,
    /// First-layer height (mm) used with the normal layer height
    pub initial_layer_height: f64,
    /// Multiplier deriving first-layer height from other layer heights
    pub initial_layer_factor: f64,
    /// Infill percentage when unset
    pub infill_density: u8,
    /// Generic print speed (mm/s), superseded by the material preset
    pub print_speed: f64,
    /// Generic bed temperature (C), superseded by the material preset
    pub bed_temperature: f64,
    /// Generic nozzle temperature (C), superseded by the material preset
    pub print_temperature: f64,
    pub support: SupportDefaults,
    pub quality: QualityDefaults,
}

impl Default for CompilerDefaults {
    fn default() -> Self {
        Self {
            layer_height: DEFAULT_LAYER_HEIGHT,
            initial_layer_height: DEFAULT_INITIAL_LAYER_HEIGHT,
            initial_layer_factor: INITIAL_LAYER_FACTOR,
            infill_density: DEFAULT_INFILL_DENSITY,
            print_speed: 50.0,
            bed_temperature: 60.0,
            print_temperature: 200.0,
            support: SupportDefaults::default(),
            quality: QualityDefaults::default(),
        }
    }
}

/// Dependent values emitted alongside `support_enable = true`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SupportDefaults {
    /// Placement used when the user enables support without choosing one
    pub support_type: String,
    /// Overhang angle (degrees) above which support is generated
    pub angle: f64,
    /// Support infill percentage
    pub infill_rate: f64,
}

impl Default for SupportDefaults {
    fn default() -> Self {
        Self {
            support_type: "buildplate".to_string(),
            angle: 50.0,
            infill_rate: 15.0,
        }
    }
}

/// Shell and adhesion values emitted in the baseline and the trailing block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QualityDefaults {
    pub retraction_enable: bool,
    pub wall_line_count: u32,
    pub top_layers: u32,
    pub bottom_layers: u32,
    /// Engine adhesion type ("skirt", "brim", "raft", "none")
    pub adhesion_type: String,
}

impl Default for QualityDefaults {
    fn default() -> Self {
        Self {
            retraction_enable: true,
            wall_line_count: 3,
            top_layers: 4,
            bottom_layers: 4,
            adhesion_type: "skirt".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let toml_str = r#"
            infill_density = 35

            [quality]
            adhesion_type = "brim"
        "#;
        let defaults: CompilerDefaults = toml::from_str(toml_str).unwrap();
        assert_eq!(defaults.infill_density, 35);
        assert_eq!(defaults.quality.adhesion_type, "brim");
        assert_eq!(defaults.quality.wall_line_count, 3);
        assert_eq!(defaults.layer_height, DEFAULT_LAYER_HEIGHT);
        assert_eq!(defaults.support.support_type, "buildplate");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let defaults: CompilerDefaults = toml::from_str("").unwrap();
        assert_eq!(defaults, CompilerDefaults::default());
    }
}
