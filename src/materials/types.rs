//! Type definitions for the material preset table.
//!
//! Presets are deserialized from TOML (embedded or user-supplied) and
//! serialized to JSON for display layers.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A fixed bundle of print parameters for one material category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialPreset {
    /// Human-readable name for display (e.g., "ABS")
    pub display_name: String,
    /// Nozzle temperature in Celsius (maps to material_print_temperature)
    pub print_temperature: f64,
    /// Bed temperature in Celsius (maps to material_bed_temperature)
    pub bed_temperature: f64,
    /// Retraction distance in mm (maps to retraction_amount)
    pub retraction_amount: f64,
    /// Print speed in mm/s (maps to speed_print)
    pub print_speed: f64,
    /// Filament density in g/cm³, used for mass estimates
    pub density: f64,
}

impl MaterialPreset {
    /// Reject values that would produce negative masses or engine parameters.
    fn check(&self, key: &str) -> Result<()> {
        if !(self.density.is_finite() && self.density > 0.0) {
            bail!("Material preset '{}' has invalid density {}", key, self.density);
        }
        let fields = [
            ("print_temperature", self.print_temperature),
            ("bed_temperature", self.bed_temperature),
            ("retraction_amount", self.retraction_amount),
            ("print_speed", self.print_speed),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                bail!("Material preset '{}' has invalid {} {}", key, name, value);
            }
        }
        Ok(())
    }
}

/// On-disk shape of a preset table before keys are normalized.
#[derive(Debug, Deserialize)]
struct PresetFile {
    default: String,
    presets: HashMap<String, MaterialPreset>,
}

/// Outcome of resolving a material type against the table.
#[derive(Debug, Clone, Copy)]
pub struct PresetMatch<'a> {
    /// Normalized table key of the preset that was chosen
    pub key: &'a str,
    pub preset: &'a MaterialPreset,
    /// True when the requested material was absent or unrecognized
    pub fallback: bool,
}

/// Lookup table of material presets keyed by normalized material name.
///
/// Every lookup succeeds: unknown keys resolve to the designated default.
/// Entries are kept sorted by key; `default_index` always points into them.
#[derive(Debug, Clone)]
pub struct MaterialTable {
    presets: Vec<(String, MaterialPreset)>,
    default_index: usize,
}

/// Normalize a user-facing material string into a table key.
pub fn normalize_material_key(material: &str) -> String {
    material.trim().to_lowercase()
}

impl MaterialTable {
    /// Parse a preset table from TOML.
    ///
    /// Fails if two keys collide after normalization, if the default key
    /// does not name a preset, or if a preset carries a negative or
    /// non-finite value (density must also be non-zero).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: PresetFile = toml::from_str(content)?;

        let mut presets: Vec<(String, MaterialPreset)> = file
            .presets
            .into_iter()
            .map(|(key, preset)| (normalize_material_key(&key), preset))
            .collect();
        presets.sort_by(|a, b| a.0.cmp(&b.0));

        if presets.iter().any(|(key, _)| key.is_empty()) {
            bail!("Material preset key must not be empty");
        }
        if let Some(pair) = presets.windows(2).find(|w| w[0].0 == w[1].0) {
            bail!("Duplicate material preset '{}' (keys are case-insensitive)", pair[0].0);
        }
        for (key, preset) in &presets {
            preset.check(key)?;
        }

        let default_key = normalize_material_key(&file.default);
        let Some(default_index) = presets.iter().position(|(key, _)| *key == default_key) else {
            bail!("Default material '{}' has no preset", file.default);
        };

        Ok(Self {
            presets,
            default_index,
        })
    }

    fn entry(&self, key: &str) -> Option<&(String, MaterialPreset)> {
        self.presets.iter().find(|(k, _)| k == key)
    }

    /// Resolve a material type, falling back to the default preset.
    pub fn resolve(&self, material: Option<&str>) -> PresetMatch<'_> {
        let requested = material.map(normalize_material_key);
        let (entry, fallback) = match requested.as_deref().and_then(|key| self.entry(key)) {
            Some(entry) => (entry, false),
            None => (&self.presets[self.default_index], true),
        };

        PresetMatch {
            key: &entry.0,
            preset: &entry.1,
            fallback,
        }
    }

    /// Exact (case-insensitive) lookup without fallback.
    pub fn get(&self, material: &str) -> Option<&MaterialPreset> {
        self.entry(&normalize_material_key(material))
            .map(|(_, preset)| preset)
    }

    /// Whether the material names a preset in this table.
    pub fn is_known(&self, material: &str) -> bool {
        self.get(material).is_some()
    }

    /// Density (g/cm³) of the resolved preset.
    pub fn density(&self, material: Option<&str>) -> f64 {
        self.resolve(material).preset.density
    }

    pub fn default_key(&self) -> &str {
        &self.presets[self.default_index].0
    }

    /// All preset keys, sorted.
    pub fn known_materials(&self) -> Vec<&str> {
        self.presets.iter().map(|(key, _)| key.as_str()).collect()
    }

    /// Presets in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MaterialPreset)> {
        self.presets.iter().map(|(key, preset)| (key.as_str(), preset))
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
