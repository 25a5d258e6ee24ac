//! Print-metadata normalizer.
//!
//! Turns the slicing engine's raw result metadata, whose field names and
//! presence vary, into a `PrintReport` with a fixed shape. Missing or
//! malformed fields become `None` ("unknown"); nothing here fails.
//!
//! # Example
//!
//! ```
//! use slicemate::metadata::{normalize_metadata, RawMetadata};
//! use slicemate::settings::UserSettings;
//!
//! let raw = RawMetadata::from_json(r#"{ "print_time": 3725, "filament_used": 2000 }"#).unwrap();
//! let settings = UserSettings {
//!     material_type: Some("ABS".to_string()),
//!     ..Default::default()
//! };
//! let report = normalize_metadata(&raw, &settings);
//!
//! assert_eq!(report.formatted_time(), "1h 2m");
//! assert_eq!(report.filament_used_grams, Some(2.1));
//! ```

pub mod fields;
mod format;
mod raw;
mod report;

pub use format::{format_print_time, format_print_time_value, format_quantity, UNKNOWN};
pub use raw::RawMetadata;
pub use report::{normalize_metadata, Normalizer, PrintReport};
