use std::path::PathBuf;

use slicemate::compiler::{compile_overrides, OverrideValue};
use slicemate::metadata::{normalize_metadata, RawMetadata};
use slicemate::settings::UserSettings;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read_settings(name: &str) -> UserSettings {
    let content = std::fs::read_to_string(fixture_path(name)).expect("Failed to read settings fixture");
    serde_json::from_str(&content).expect("Failed to parse settings fixture")
}

fn read_metadata(name: &str) -> RawMetadata {
    let content = std::fs::read_to_string(fixture_path(name)).expect("Failed to read metadata fixture");
    RawMetadata::from_json(&content).expect("Failed to parse metadata fixture")
}

#[test]
fn test_full_settings_effective_parameters() {
    slicemate::init_tracing();

    let settings = read_settings("settings_abs_support.json");
    let overrides = compile_overrides(&settings);
    let effective = overrides.resolve();

    assert_eq!(effective["layer_height"], serde_json::json!(0.2));
    assert_eq!(effective["initial_layer_height"], serde_json::json!(0.3));
    assert_eq!(effective["infill_sparse_density"], serde_json::json!(30.0));
    assert_eq!(effective["infill_pattern"], "gyroid");
    assert_eq!(effective["support_enable"], true);
    assert_eq!(effective["support_type"], "everywhere");
    assert_eq!(effective["material_print_temperature"], serde_json::json!(240.0));
    assert_eq!(effective["material_bed_temperature"], serde_json::json!(100.0));
    assert_eq!(effective["speed_print"], serde_json::json!(50.0));
    assert_eq!(effective["material_color"], "Signal White");
    assert_eq!(effective["adhesion_type"], "skirt");
}

#[test]
fn test_minimal_settings() {
    let settings = read_settings("settings_minimal.json");
    let overrides = compile_overrides(&settings);

    assert_eq!(overrides.effective("layer_height"), Some(&OverrideValue::Number(0.15)));
    assert_eq!(overrides.effective("initial_layer_height"), Some(&OverrideValue::Number(0.2)));
    assert_eq!(overrides.effective("infill_sparse_density"), Some(&OverrideValue::Number(20.0)));
    assert!(overrides.keys().iter().all(|k| !k.starts_with("support_")));
    assert!(!overrides.contains_key("infill_pattern"));
    assert!(!overrides.contains_key("material_color"));
}

#[test]
fn test_every_input_shape_has_density_and_layer_height() {
    let variants = [
        UserSettings::default(),
        UserSettings {
            layer_height: 0.0,
            infill_density: Some(255),
            ..Default::default()
        },
        UserSettings {
            support_enable: Some(false),
            material_type: Some("".to_string()),
            ..Default::default()
        },
        read_settings("settings_abs_support.json"),
    ];

    for settings in &variants {
        let overrides = compile_overrides(settings);
        assert_eq!(overrides.count("infill_sparse_density"), 1, "{:?}", settings);
        assert!(overrides.contains_key("layer_height"));
        assert!(overrides.contains_key("initial_layer_height"));
        assert_eq!(overrides.iter().last().map(|o| o.key.as_str()), Some("adhesion_type"));
    }
}

#[test]
fn test_metadata_spellings_produce_same_report() {
    let settings = read_settings("settings_abs_support.json");

    let camel = normalize_metadata(&read_metadata("metadata_camel.json"), &settings);
    let snake = normalize_metadata(&read_metadata("metadata_snake.json"), &settings);
    let nested = normalize_metadata(&read_metadata("metadata_nested.json"), &settings);

    assert_eq!(camel, snake);
    assert_eq!(camel, nested);

    assert_eq!(camel.formatted_time(), "1h 2m");
    assert_eq!(camel.filament_used_grams, Some(2.1));
    assert_eq!(camel.layer_count, Some(80));
    assert_eq!(camel.volume, Some(4812.5));
    assert_eq!(camel.material, "abs");
    assert_eq!(camel.color.as_deref(), Some("Signal White"));
    assert_eq!(camel.layer_height, 0.2);
    assert_eq!(camel.infill_density, 30);
}

#[test]
fn test_malformed_metadata_degrades_to_unknown() {
    let report = normalize_metadata(&read_metadata("metadata_malformed.json"), &UserSettings::default());

    assert_eq!(report.estimated_time_seconds, None);
    assert_eq!(report.formatted_time(), "unknown");
    assert_eq!(report.filament_used_mm, None);
    assert_eq!(report.filament_used_grams, None);
    assert_eq!(report.layer_count, None);
    assert_eq!(report.height, None);

    let text = report.to_string();
    assert!(text.contains("Print time: unknown"));
    assert!(text.contains("Filament: unknown"));
    assert!(text.contains("Layers: unknown"));
}

#[test]
fn test_report_round_trips_through_json() {
    let report = normalize_metadata(
        &read_metadata("metadata_camel.json"),
        &read_settings("settings_abs_support.json"),
    );
    let json = serde_json::to_string(&report).expect("Failed to serialize report");
    let reparsed: slicemate::PrintReport = serde_json::from_str(&json).expect("Failed to re-parse report");
    assert_eq!(report, reparsed);
}
