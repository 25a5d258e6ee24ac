//! JSON-in, JSON-out entry points for host applications.
//!
//! Each command takes JSON text, runs the corresponding library operation
//! with the built-in defaults, and returns JSON text. Errors are flattened
//! to `String` so they cross FFI or IPC boundaries unchanged.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::compiler::compile_overrides;
use crate::error::SlicemateError;
use crate::materials::{builtin_presets, MaterialPreset};
use crate::metadata::{format_print_time_value, normalize_metadata, RawMetadata};
use crate::settings::{validate_settings, UserSettings};

fn parse_settings(settings_json: &str) -> Result<UserSettings, SlicemateError> {
    serde_json::from_str(settings_json)
        .map_err(|e| SlicemateError::Settings(format!("Invalid settings: {}", e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

/// Compile settings into the ordered override list.
///
/// Returns a JSON array of `{ "scope"?, "key", "value" }` objects.
pub fn compile_overrides_json(settings_json: &str) -> Result<String, String> {
    let settings = parse_settings(settings_json)?;
    let overrides = compile_overrides(&settings);
    info!("Compiled {} overrides", overrides.len());
    to_json(&overrides)
}

/// Compile settings and return the effective parameter set as an object.
pub fn resolve_overrides_json(settings_json: &str) -> Result<String, String> {
    let settings = parse_settings(settings_json)?;
    to_json(&compile_overrides(&settings).resolve())
}

/// Normalize raw engine metadata into a print report.
///
/// Any JSON value is accepted as metadata; only unparseable text fails.
pub fn normalize_metadata_json(metadata_json: &str, settings_json: &str) -> Result<String, String> {
    let settings = parse_settings(settings_json)?;
    let value: Value = serde_json::from_str(metadata_json)
        .map_err(|e| SlicemateError::Engine(format!("Metadata is not JSON: {}", e)))?;
    let report = normalize_metadata(&RawMetadata::from_value(value), &settings);
    info!("Normalized metadata: {}", report.formatted_time());
    to_json(&report)
}

/// Format a duration given as JSON (`3725`, `"3725"`, ...).
/// Anything unparseable or non-numeric gives `"unknown"`.
pub fn format_print_time_json(value_json: &str) -> String {
    serde_json::from_str::<Value>(value_json)
        .map(|v| format_print_time_value(&v))
        .unwrap_or_else(|_| format_print_time_value(&Value::Null))
}

/// Validate settings and return the warnings as a JSON array.
pub fn validate_settings_json(settings_json: &str) -> Result<String, String> {
    let settings = parse_settings(settings_json)?;
    to_json(&validate_settings(&settings, builtin_presets()))
}

/// The built-in preset table as a JSON object keyed by material.
pub fn list_materials_json() -> Result<String, String> {
    let presets: Map<String, Value> = builtin_presets()
        .iter()
        .map(|(key, preset): (&str, &MaterialPreset)| {
            serde_json::to_value(preset).map(|v| (key.to_string(), v))
        })
        .collect::<Result<_, _>>()
        .map_err(|e| e.to_string())?;
    to_json(&presets)
}
