use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::compiler::{Compiler, CompilerDefaults};
use crate::materials::load_presets;
use crate::metadata::Normalizer;

/// File name looked up inside the per-user config directory.
const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "slicemate";

/// User configuration, loaded from TOML.
///
/// Every section is optional; a missing file or an empty file gives the
/// built-in behavior.
///
/// ```toml
/// presets_path = "/home/me/materials.toml"
///
/// [defaults]
/// infill_density = 15
///
/// [defaults.quality]
/// adhesion_type = "brim"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SlicemateConfig {
    /// Replaces the compiler's built-in defaults table
    pub defaults: CompilerDefaults,
    /// Custom material preset table; the embedded table is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presets_path: Option<PathBuf>,
}

impl SlicemateConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Standard location: `<config dir>/slicemate/config.toml`
    /// (e.g., `~/.config/slicemate/config.toml` on Linux).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load a config file. Relative `presets_path` values are resolved
    /// against the config file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;

        if let Some(parent) = path.parent() {
            config.presets_path = config
                .presets_path
                .take()
                .map(|p| if p.is_relative() { parent.join(p) } else { p });
        }

        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load from the standard location, or fall back to defaults if no
    /// config file exists there.
    pub fn load_or_default() -> Result<Self> {
        Self::load_or_default_at(Self::default_path())
    }

    fn load_or_default_at(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                debug!("No config at {:?}, using built-in defaults", path);
                Ok(Self::default())
            }
            None => {
                debug!("No config directory on this platform, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Build a compiler from this config, loading the preset table if one
    /// is configured.
    pub fn compiler(&self) -> Result<Compiler> {
        let compiler = Compiler::new().with_defaults(self.defaults.clone());
        match &self.presets_path {
            Some(path) => Ok(compiler.with_materials(load_presets(path)?)),
            None => Ok(compiler),
        }
    }

    /// Build a compiler and a matching normalizer.
    pub fn components(&self) -> Result<(Compiler, Normalizer)> {
        let compiler = self.compiler()?;
        let normalizer = Normalizer::for_compiler(&compiler);
        Ok((compiler, normalizer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::UserSettings;

    #[test]
    fn test_empty_config_is_default() {
        let config = SlicemateConfig::from_toml_str("").unwrap();
        assert_eq!(config, SlicemateConfig::default());
        assert!(config.presets_path.is_none());
    }

    #[test]
    fn test_partial_defaults() {
        let config = SlicemateConfig::from_toml_str(
            r#"
                [defaults]
                infill_density = 15

                [defaults.support]
                angle = 60.0
            "#,
        )
        .unwrap();
        assert_eq!(config.defaults.infill_density, 15);
        assert_eq!(config.defaults.support.angle, 60.0);
        assert_eq!(config.defaults.layer_height, 0.15);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(SlicemateConfig::from_toml_str("[defaults\ninfill_density = ").is_err());
        assert!(SlicemateConfig::from_toml_str("[defaults]\ninfill_density = \"lots\"").is_err());
    }

    #[test]
    fn test_default_path_ends_with_app_dir() {
        if let Some(path) = SlicemateConfig::default_path() {
            assert!(path.ends_with("slicemate/config.toml"));
        }
    }

    #[test]
    fn test_load_resolves_relative_presets_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("materials.toml"),
            r#"
                default = "pctg"

                [presets.pctg]
                display_name = "PCTG"
                print_temperature = 245.0
                bed_temperature = 75.0
                retraction_amount = 5.5
                print_speed = 50.0
                density = 1.23
            "#,
        )
        .unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "presets_path = \"materials.toml\"\n").unwrap();

        let config = SlicemateConfig::load(&config_path).unwrap();
        assert_eq!(config.presets_path, Some(dir.path().join("materials.toml")));

        let (compiler, normalizer) = config.components().unwrap();
        let list = compiler.compile(&UserSettings::default());
        assert_eq!(
            list.effective("material_print_temperature").and_then(|v| v.as_f64()),
            Some(245.0)
        );
        let report = normalizer.normalize(&Default::default(), &UserSettings::default());
        assert_eq!(report.material, "pctg");
    }

    #[test]
    fn test_missing_presets_file_is_error() {
        let config = SlicemateConfig {
            presets_path: Some(PathBuf::from("/definitely/not/here.toml")),
            ..Default::default()
        };
        assert!(config.compiler().is_err());
    }

    #[test]
    fn test_load_or_default_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[defaults]\ninfill_density = 40\n").unwrap();

        let config = SlicemateConfig::load_or_default_at(Some(path)).unwrap();
        assert_eq!(config.defaults.infill_density, 40);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(APP_DIR).join(CONFIG_FILE);

        let config = SlicemateConfig::load_or_default_at(Some(missing)).unwrap();
        assert_eq!(config, SlicemateConfig::default());

        let config = SlicemateConfig::load_or_default_at(None).unwrap();
        assert_eq!(config, SlicemateConfig::default());
    }

    #[test]
    fn test_load_or_default_propagates_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "defaults = [").unwrap();

        assert!(SlicemateConfig::load_or_default_at(Some(path)).is_err());
    }
}
