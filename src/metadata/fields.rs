//! Candidate field names for each report field, in priority order.
//!
//! Engines and engine versions spell the same quantity differently. The
//! normalizer takes the first candidate that holds a usable value. Dotted
//! names address nested objects.

/// Estimated print duration, seconds.
pub const PRINT_TIME: &[&str] = &[
    "printTime",
    "print_time",
    "estimated_time",
    "estimatedTime",
    "print_time_seconds",
];

/// Filament length consumed, mm.
pub const FILAMENT_LENGTH: &[&str] = &[
    "filamentUsed",
    "filament_used",
    "filament_length",
    "filamentLength",
    "material_length",
];

pub const LAYER_COUNT: &[&str] = &["layerCount", "layer_count", "layers", "total_layers"];

/// Model volume, mm³.
pub const VOLUME: &[&str] = &["volume", "model_volume", "modelVolume", "dimensions.volume"];

/// Model extent along Z, mm.
pub const HEIGHT: &[&str] = &["height", "model_height", "dimensions.height", "size.z"];

/// Model extent along X, mm.
pub const WIDTH: &[&str] = &["width", "model_width", "dimensions.width", "size.x"];

/// Model extent along Y, mm.
pub const DEPTH: &[&str] = &["depth", "model_depth", "dimensions.depth", "size.y"];
