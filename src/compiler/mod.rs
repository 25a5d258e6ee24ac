//! Settings-to-overrides compiler.
//!
//! Translates human-facing `UserSettings` into the ordered parameter list
//! the slicing engine consumes.
//!
//! # Precedence
//!
//! The output is a sequence, not a map. Keys may repeat and the engine
//! applies the last occurrence of each key. The compiler relies on this:
//! material presets are emitted after the generic baseline so that, for
//! example, `material_print_temperature` ends up at the preset's value.
//! Use `OverrideList::resolve` to see the effective parameter set.
//!
//! # Example
//!
//! ```
//! use slicemate::compiler::{compile_overrides, OverrideValue};
//! use slicemate::settings::UserSettings;
//!
//! let settings = UserSettings {
//!     material_type: Some("abs".to_string()),
//!     ..Default::default()
//! };
//! let overrides = compile_overrides(&settings);
//!
//! assert_eq!(
//!     overrides.effective("material_print_temperature"),
//!     Some(&OverrideValue::Number(240.0))
//! );
//! assert!(overrides.contains_key("infill_sparse_density"));
//! ```

mod compile;
mod defaults;
mod types;

pub use compile::{compile_overrides, Compiler};
pub use defaults::*;
pub use types::*;
