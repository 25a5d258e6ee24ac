//! Settings-to-overrides compilation.
//!
//! The `Compiler` turns `UserSettings` into an ordered `OverrideList`. The
//! emission order encodes precedence: material presets are written after
//! the baseline so they supersede the generic temperatures and speed.

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::materials::{builtin_presets, MaterialTable};
use crate::settings::UserSettings;

use super::defaults::CompilerDefaults;
use super::types::OverrideList;

/// Layer heights closer than this are considered equal.
const LAYER_HEIGHT_EPSILON: f64 = 1e-9;

/// The settings compiler.
///
/// Holds the defaults table and the material presets; compiling is a pure
/// function of those and the input settings.
#[derive(Debug, Clone)]
pub struct Compiler {
    defaults: CompilerDefaults,
    materials: Cow<'static, MaterialTable>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// Compiler using the built-in defaults and material presets.
    pub fn new() -> Self {
        Self {
            defaults: CompilerDefaults::default(),
            materials: Cow::Borrowed(builtin_presets()),
        }
    }

    pub fn with_defaults(mut self, defaults: CompilerDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_materials(mut self, materials: MaterialTable) -> Self {
        self.materials = Cow::Owned(materials);
        self
    }

    pub fn defaults(&self) -> &CompilerDefaults {
        &self.defaults
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    /// Compile user settings into engine overrides.
    ///
    /// Never fails. Emission order:
    /// 1. Baseline defaults (speed, temperatures, quality, infill density)
    /// 2. Layer height and initial layer height
    /// 3. Infill pattern, if chosen
    /// 4. Support, if explicitly enabled or disabled
    /// 5. Material preset (supersedes step 1 temperatures and speed)
    /// 6. Material color, if given
    /// 7. Trailing quality block
    pub fn compile(&self, settings: &UserSettings) -> OverrideList {
        let d = &self.defaults;
        let mut list = OverrideList::new();

        // 1. Baseline
        list.set("speed_print", d.print_speed);
        list.set("material_bed_temperature", d.bed_temperature);
        list.set("material_print_temperature", d.print_temperature);
        self.emit_quality(&mut list);
        list.set(
            "infill_sparse_density",
            settings.effective_infill_density(d.infill_density),
        );

        // 2. Layer height, always explicit even at the normal default
        let layer_height = settings.effective_layer_height(d.layer_height);
        list.set("layer_height", layer_height);
        list.set("initial_layer_height", self.initial_layer_height(layer_height));

        // 3. Infill pattern
        if let Some(pattern) = settings.infill_pattern {
            list.set("infill_pattern", pattern.as_engine_value());
        }

        // 4. Support; unset emits nothing
        if let Some(enabled) = settings.support_enable {
            list.set("support_enable", enabled);
            if enabled {
                let support_type = settings
                    .support_type
                    .as_deref()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(d.support.support_type.as_str());
                list.set("support_type", support_type);
                list.set("support_angle", d.support.angle);
                list.set("support_infill_rate", d.support.infill_rate);
            }
        }

        // 5. Material preset
        let matched = self.materials.resolve(settings.material_type.as_deref());
        if matched.fallback {
            match settings.material_type.as_deref() {
                Some(requested) => warn!(
                    "Unknown material '{}', using {} preset",
                    requested, matched.key
                ),
                None => debug!("No material selected, using {} preset", matched.key),
            }
        }
        let preset = matched.preset;
        list.set("material_print_temperature", preset.print_temperature);
        list.set("material_bed_temperature", preset.bed_temperature);
        list.set("retraction_amount", preset.retraction_amount);
        list.set("speed_print", preset.print_speed);

        // 6. Color
        if let Some(color) = &settings.material_color {
            list.set("material_color", color.as_str());
        }

        // 7. Trailing quality block
        self.emit_quality(&mut list);

        debug!(
            "Compiled {} overrides ({} distinct keys) for material {}",
            list.len(),
            list.keys().len(),
            matched.key
        );

        list
    }

    fn emit_quality(&self, list: &mut OverrideList) {
        let q = &self.defaults.quality;
        list.set("retraction_enable", q.retraction_enable);
        list.set("wall_line_count", q.wall_line_count);
        list.set("top_layers", q.top_layers);
        list.set("bottom_layers", q.bottom_layers);
        list.set("adhesion_type", q.adhesion_type.as_str());
    }

    /// First-layer height: the fixed default at the normal layer height,
    /// otherwise proportional. Rounding at 1e-9 mm only strips float noise
    /// (0.2 × 1.5 gives 0.3, not 0.30000000000000004).
    fn initial_layer_height(&self, layer_height: f64) -> f64 {
        let d = &self.defaults;
        if (layer_height - d.layer_height).abs() < LAYER_HEIGHT_EPSILON {
            d.initial_layer_height
        } else {
            (layer_height * d.initial_layer_factor * 1e9).round() / 1e9
        }
    }
}

/// Compile settings with the built-in defaults and presets.
pub fn compile_overrides(settings: &UserSettings) -> OverrideList {
    Compiler::new().compile(settings)
}
