use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compiler::{Compiler, CompilerDefaults};
use crate::materials::{builtin_presets, MaterialTable};
use crate::settings::UserSettings;

use super::fields;
use super::format::{format_print_time, format_quantity, UNKNOWN};
use super::raw::RawMetadata;

/// Normalized, display-ready description of a slicing result.
///
/// Every measured field is `None` when the engine did not report a usable
/// value. The echo fields record the inputs that produced the run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrintReport {
    pub estimated_time_seconds: Option<f64>,
    pub filament_used_mm: Option<f64>,
    /// Derived from length and the material preset's density
    pub filament_used_grams: Option<f64>,
    /// Model volume in mm³
    pub volume: Option<f64>,
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub depth: Option<f64>,
    pub layer_count: Option<u64>,

    // === Echo of the settings actually used ===
    /// Preset key the run was compiled with (after default fallback)
    pub material: String,
    pub color: Option<String>,
    pub layer_height: f64,
    pub infill_density: u8,
}

impl PrintReport {
    /// Estimated time formatted as `1h 2m`, `2m 5s`, `45s`, or `unknown`.
    pub fn formatted_time(&self) -> String {
        format_print_time(self.estimated_time_seconds)
    }

    /// Filament length in meters.
    pub fn filament_used_m(&self) -> Option<f64> {
        self.filament_used_mm.map(|mm| mm / 1000.0)
    }
}

impl fmt::Display for PrintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Print time: {}", self.formatted_time())?;
        match (self.filament_used_m(), self.filament_used_grams) {
            (Some(m), Some(g)) => writeln!(f, "Filament: {:.2} m ({:.2} g)", m, g)?,
            (m, _) => writeln!(f, "Filament: {}", format_quantity(m, 2, "m"))?,
        }
        match self.layer_count {
            Some(layers) => writeln!(f, "Layers: {}", layers)?,
            None => writeln!(f, "Layers: {}", UNKNOWN)?,
        }
        writeln!(
            f,
            "Size: {} x {} x {}",
            format_quantity(self.width, 2, "mm"),
            format_quantity(self.depth, 2, "mm"),
            format_quantity(self.height, 2, "mm")
        )?;
        writeln!(f, "Volume: {}", format_quantity(self.volume, 2, "mm³"))?;
        match &self.color {
            Some(color) => writeln!(f, "Material: {} ({})", self.material, color)?,
            None => writeln!(f, "Material: {}", self.material)?,
        }
        writeln!(f, "Layer height: {} mm", self.layer_height)?;
        write!(f, "Infill: {}%", self.infill_density)
    }
}

/// Builds `PrintReport`s from raw engine metadata.
///
/// Uses the same defaults and material table as the compiler that produced
/// the run, so echoed values and densities agree with what was sent.
#[derive(Debug, Clone)]
pub struct Normalizer {
    defaults: CompilerDefaults,
    materials: Cow<'static, MaterialTable>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            defaults: CompilerDefaults::default(),
            materials: Cow::Borrowed(builtin_presets()),
        }
    }

    /// Normalizer sharing a compiler's defaults and presets.
    pub fn for_compiler(compiler: &Compiler) -> Self {
        Self {
            defaults: compiler.defaults().clone(),
            materials: Cow::Owned(compiler.materials().clone()),
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

    /// Normalize raw metadata into a report. Never fails.
    ///
    /// Each field is resolved independently from its candidate list.
    /// Filament mass is `length_mm / 1000 * density`, with density taken
    /// from the material preset rather than the metadata.
    pub fn normalize(&self, raw: &RawMetadata, settings: &UserSettings) -> PrintReport {
        let matched = self.materials.resolve(settings.material_type.as_deref());

        let filament_used_mm = raw.first_number(fields::FILAMENT_LENGTH);
        let filament_used_grams = filament_used_mm.map(|mm| mm / 1000.0 * matched.preset.density);

        let report = PrintReport {
            estimated_time_seconds: raw.first_number(fields::PRINT_TIME),
            filament_used_mm,
            filament_used_grams,
            volume: raw.first_number(fields::VOLUME),
            height: raw.first_number(fields::HEIGHT),
            width: raw.first_number(fields::WIDTH),
            depth: raw.first_number(fields::DEPTH),
            layer_count: raw.first_count(fields::LAYER_COUNT),
            material: matched.key.to_string(),
            color: settings.material_color.clone(),
            layer_height: settings.effective_layer_height(self.defaults.layer_height),
            infill_density: settings.effective_infill_density(self.defaults.infill_density),
        };

        debug!(
            "Normalized {} raw metadata fields: time={}, filament={:?} mm, layers={:?}",
            raw.raw().len(),
            report.formatted_time(),
            report.filament_used_mm,
            report.layer_count
        );

        report
    }
}

/// Normalize with the built-in defaults and presets.
pub fn normalize_metadata(raw: &RawMetadata, settings: &UserSettings) -> PrintReport {
    Normalizer::new().normalize(raw, settings)
}
