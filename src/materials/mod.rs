//! Material preset table shared by the override compiler and the
//! metadata normalizer.
//!
//! Each preset bundles the nozzle/bed temperatures, retraction, print speed
//! and filament density for one material category. Lookups are
//! case-insensitive and never fail: an absent or unrecognized material
//! resolves to the table's designated default preset.
//!
//! # Example
//!
//! ```
//! use slicemate::materials::builtin_presets;
//!
//! let table = builtin_presets();
//! assert_eq!(table.resolve(Some("ABS")).preset.density, 1.05);
//! assert!(table.resolve(Some("wood-fill")).fallback);
//! ```

mod presets;
mod types;

pub use presets::{builtin_presets, load_presets};
pub use types::*;
