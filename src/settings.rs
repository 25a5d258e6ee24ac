use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::compiler::DEFAULT_LAYER_HEIGHT;
use crate::error::SlicemateError;
use crate::materials::MaterialTable;

/// Smallest layer height (mm) considered printable on a typical FDM nozzle.
pub const LAYER_HEIGHT_MIN: f64 = 0.04;
/// Largest layer height (mm) considered printable on a typical FDM nozzle.
pub const LAYER_HEIGHT_MAX: f64 = 1.0;

/// Human-facing print settings collected from the user.
///
/// Field names are camelCase on the wire. Optional fields carry meaning when
/// absent: an unset `support_enable` is not the same as `false`, and the
/// compiler emits nothing for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Layer height in mm
    #[serde(default = "default_layer_height")]
    pub layer_height: f64,
    /// Sparse infill density in percent (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infill_density: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infill_pattern: Option<InfillPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_enable: Option<bool>,
    /// Engine support placement (e.g., "buildplate", "everywhere")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_type: Option<String>,
    /// Material key into the preset table, case-insensitive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_type: Option<String>,
    /// Free-form color, passed through to the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_color: Option<String>,
}

fn default_layer_height() -> f64 {
    DEFAULT_LAYER_HEIGHT
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            layer_height: DEFAULT_LAYER_HEIGHT,
            infill_density: None,
            infill_pattern: None,
            support_enable: None,
            support_type: None,
            material_type: None,
            material_color: None,
        }
    }
}

impl UserSettings {
    /// Layer height actually used: the user's value when it is a positive
    /// finite number, otherwise `fallback`.
    pub fn effective_layer_height(&self, fallback: f64) -> f64 {
        if self.layer_height.is_finite() && self.layer_height > 0.0 {
            self.layer_height
        } else {
            fallback
        }
    }

    /// Infill density actually used, capped at 100%.
    pub fn effective_infill_density(&self, fallback: u8) -> u8 {
        self.infill_density.unwrap_or(fallback).min(100)
    }
}

/// Sparse infill patterns understood by the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum InfillPattern {
    Grid,
    Lines,
    Triangles,
    Cubic,
    Concentric,
    Zigzag,
    Gyroid,
}

impl InfillPattern {
    pub const ALL: [InfillPattern; 7] = [
        InfillPattern::Grid,
        InfillPattern::Lines,
        InfillPattern::Triangles,
        InfillPattern::Cubic,
        InfillPattern::Concentric,
        InfillPattern::Zigzag,
        InfillPattern::Gyroid,
    ];

    /// Value written to the engine's `infill_pattern` parameter.
    pub fn as_engine_value(&self) -> &'static str {
        match self {
            InfillPattern::Grid => "grid",
            InfillPattern::Lines => "lines",
            InfillPattern::Triangles => "triangles",
            InfillPattern::Cubic => "cubic",
            InfillPattern::Concentric => "concentric",
            InfillPattern::Zigzag => "zigzag",
            InfillPattern::Gyroid => "gyroid",
        }
    }
}

impl fmt::Display for InfillPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_engine_value())
    }
}

impl FromStr for InfillPattern {
    type Err = SlicemateError;

    /// Case-insensitive parse of a pattern name.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let wanted = input.trim().to_lowercase();
        InfillPattern::ALL
            .into_iter()
            .find(|p| p.as_engine_value() == wanted)
            .ok_or_else(|| SlicemateError::Settings(format!("Unknown infill pattern: {}", input)))
    }
}

impl TryFrom<String> for InfillPattern {
    type Error = SlicemateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An advisory note about a setting that looks wrong.
///
/// Warnings never block compilation; the compiler substitutes defaults for
/// unusable values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub value: String,
}

/// Check user settings against physical limits and the preset table.
pub fn validate_settings(settings: &UserSettings, materials: &MaterialTable) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let layer = settings.layer_height;
    if !layer.is_finite() || layer <= 0.0 {
        warnings.push(ValidationWarning {
            field: "layerHeight".to_string(),
            message: format!(
                "Layer height must be a positive number; {} mm will be used",
                DEFAULT_LAYER_HEIGHT
            ),
            value: layer.to_string(),
        });
    } else if !(LAYER_HEIGHT_MIN..=LAYER_HEIGHT_MAX).contains(&layer) {
        warnings.push(ValidationWarning {
            field: "layerHeight".to_string(),
            message: format!(
                "Layer height {} mm outside printable range ({}-{} mm)",
                layer, LAYER_HEIGHT_MIN, LAYER_HEIGHT_MAX
            ),
            value: layer.to_string(),
        });
    }

    if let Some(density) = settings.infill_density {
        if density > 100 {
            warnings.push(ValidationWarning {
                field: "infillDensity".to_string(),
                message: format!("Infill density {}% exceeds 100%; 100% will be used", density),
                value: density.to_string(),
            });
        }
    }

    if let Some(support_type) = &settings.support_type {
        if settings.support_enable != Some(true) {
            warnings.push(ValidationWarning {
                field: "supportType".to_string(),
                message: "Support type is ignored unless support is enabled".to_string(),
                value: support_type.clone(),
            });
        }
    }

    if let Some(material) = &settings.material_type {
        if !materials.is_known(material) {
            warnings.push(ValidationWarning {
                field: "materialType".to_string(),
                message: format!(
                    "Unknown material '{}'; the {} preset will be used",
                    material,
                    materials.default_key()
                ),
                value: material.clone(),
            });
        }
    }

    warnings
}
