//! Print-settings compiler and slicer-metadata normalizer.
//!
//! - [`compiler`] turns human-facing [`settings::UserSettings`] into the
//!   ordered parameter overrides a slicing engine consumes.
//! - [`metadata`] turns the engine's inconsistently-shaped result metadata
//!   into a [`metadata::PrintReport`].
//! - [`materials`] holds the material preset table both of them share.
//! - [`engine`] is the seam to an external slicing engine.

pub mod commands;
pub mod compiler;
pub mod config;
pub mod engine;
mod error;
pub mod materials;
pub mod metadata;
pub mod settings;

pub use compiler::{compile_overrides, Compiler, OverrideList, OverrideValue, ParameterOverride};
pub use config::SlicemateConfig;
pub use engine::{EngineOutput, SliceJob, SliceOutcome, SlicingEngine};
pub use error::SlicemateError;
pub use metadata::{format_print_time, normalize_metadata, Normalizer, PrintReport, RawMetadata};
pub use settings::{InfillPattern, UserSettings};

/// Install a `tracing` subscriber for binaries and tests embedding this crate.
///
/// Honors `RUST_LOG`, defaulting to `info`. Does nothing if a global
/// subscriber is already set.
pub fn init_tracing() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    if let Err(e) = result {
        tracing::debug!("Tracing subscriber already installed: {}", e);
    }
}
