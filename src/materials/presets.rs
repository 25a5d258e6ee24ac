//! TOML preset loading for the material table.
//!
//! Provides two loading methods:
//! - `builtin_presets()` - The embedded table compiled into the binary
//! - `load_presets(path)` - A custom table loaded from a file path

use anyhow::Result;
use std::path::Path;
use std::sync::LazyLock;
use tracing::info;

use super::types::MaterialTable;

/// Default presets embedded in the binary at compile time.
/// These are loaded from `config/materials.toml`.
const BUILTIN_PRESETS: &str = include_str!("../../config/materials.toml");

static BUILTIN_TABLE: LazyLock<MaterialTable> = LazyLock::new(|| {
    MaterialTable::from_toml_str(BUILTIN_PRESETS)
        .expect("embedded materials.toml must be a valid preset table")
});

/// Load a preset table from a TOML file at the given path.
///
/// # Returns
/// * `Ok(MaterialTable)` - Parsed and validated table
/// * `Err` - If the file cannot be read, the TOML is invalid, or the
///   `default` key does not name a preset
pub fn load_presets(path: &Path) -> Result<MaterialTable> {
    let content = std::fs::read_to_string(path)?;
    let table = MaterialTable::from_toml_str(&content)?;
    info!(
        "Loaded {} material presets from {:?} (default: {})",
        table.len(),
        path,
        table.default_key()
    );
    Ok(table)
}

/// The built-in preset table.
///
/// Parsed once on first use and shared by every caller.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn builtin_presets() -> &'static MaterialTable {
    &BUILTIN_TABLE
}
