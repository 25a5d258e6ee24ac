//! Seam to the external slicing engine.
//!
//! The engine converts a mesh plus an ordered parameter list into machine
//! instructions and a metadata record. This crate does not ship an engine;
//! callers implement `SlicingEngine` and hand it to a `SliceJob`, which
//! compiles the settings, runs the engine, and normalizes its metadata.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::compiler::{Compiler, OverrideList, ParameterOverride};
use crate::error::SlicemateError;
use crate::metadata::{Normalizer, PrintReport, RawMetadata};
use crate::settings::{validate_settings, UserSettings};

/// What the engine hands back after slicing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineOutput {
    /// Machine instructions (typically G-code)
    pub instructions: String,
    /// Result metadata in whatever shape the engine produces
    #[serde(default)]
    pub metadata: Value,
}

/// An asynchronous slicing engine.
///
/// `overrides` must be applied in order, with a later entry for a key
/// replacing any earlier one.
pub trait SlicingEngine {
    fn slice(
        &self,
        mesh: &[u8],
        overrides: &[ParameterOverride],
    ) -> impl Future<Output = Result<EngineOutput, SlicemateError>> + Send;
}

/// Result of a completed slicing job.
#[derive(Debug, Clone, Serialize)]
pub struct SliceOutcome {
    pub instructions: String,
    /// Overrides that were sent to the engine
    pub overrides: OverrideList,
    pub report: PrintReport,
}

/// One settings → engine → report run.
pub struct SliceJob<'a, E> {
    engine: &'a E,
    compiler: Compiler,
    normalizer: Normalizer,
    timeout: Option<Duration>,
}

impl<'a, E: SlicingEngine> SliceJob<'a, E> {
    /// Job using the built-in compiler defaults and presets, no timeout.
    pub fn new(engine: &'a E) -> Self {
        Self {
            engine,
            compiler: Compiler::new(),
            normalizer: Normalizer::new(),
            timeout: None,
        }
    }

    /// Use a configured compiler; the normalizer follows its presets.
    pub fn with_compiler(mut self, compiler: Compiler) -> Self {
        self.normalizer = Normalizer::for_compiler(&compiler);
        self.compiler = compiler;
        self
    }

    /// Abort the engine call after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Compile `settings`, slice `mesh`, and normalize the result.
    pub async fn run(&self, mesh: &[u8], settings: &UserSettings) -> Result<SliceOutcome, SlicemateError> {
        if mesh.is_empty() {
            return Err(SlicemateError::Settings("Mesh buffer is empty".to_string()));
        }

        for warning in validate_settings(settings, self.compiler.materials()) {
            warn!("{}: {} (value: {})", warning.field, warning.message, warning.value);
        }

        let overrides = self.compiler.compile(settings);
        info!(
            "Slicing {} byte mesh with {} overrides",
            mesh.len(),
            overrides.len()
        );

        let call = self.engine.slice(mesh, overrides.as_slice());
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| SlicemateError::Timeout(limit.as_millis() as u64))??,
            None => call.await?,
        };

        debug!(
            "Engine returned {} bytes of instructions",
            output.instructions.len()
        );

        let raw = RawMetadata::from_value(output.metadata);
        let report = self.normalizer.normalize(&raw, settings);

        Ok(SliceOutcome {
            instructions: output.instructions,
            overrides,
            report,
        })
    }
}
