//! EngineOutputs - reading the engine's "outputs" container.
//!
//! After a run the engine leaves an "outputs" container in the working
//! directory holding two fields: `responses`, the flat per-node response
//! matrix (length `N * M`), and `error`, the training-error trace (one
//! scalar per logged checkpoint, index order = time order).
//!
//! The reader opens the container, extracts both fields, and closes it
//! before returning; the harness holds no other view of engine state.

use crate::{Dataset, Result};
use std::path::Path;
use tracing::debug;

/// Container field name for the flat response matrix.
pub const RESPONSES_FIELD: &str = "responses";
/// Container field name for the error trace.
pub const ERROR_FIELD: &str = "error";

/// The two arrays an engine run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutputs {
    /// Flat response matrix, node index outer, sample index inner
    pub responses: Vec<f64>,
    /// Training-error trace, one value per logged checkpoint
    pub error: Vec<f64>,
}

impl EngineOutputs {
    /// Read the outputs container at `path`.
    ///
    /// # Errors
    ///
    /// `Io` if the container cannot be opened (the engine never ran or
    /// crashed before writing), `MissingField` if either expected field is
    /// absent.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let ds = Dataset::read(path.as_ref())?;
        let responses = ds.floats(RESPONSES_FIELD)?.to_vec();
        let error = ds.floats(ERROR_FIELD)?.to_vec();
        debug!(
            responses = responses.len(),
            checkpoints = error.len(),
            "read engine outputs"
        );
        Ok(Self { responses, error })
    }

    /// Package the outputs as a container (used by tests standing in for
    /// the engine, and by tooling that post-processes output files).
    pub fn to_dataset(&self) -> Dataset {
        let mut ds = Dataset::new();
        ds.insert_floats(ERROR_FIELD, self.error.clone());
        ds.insert_floats(RESPONSES_FIELD, self.responses.clone());
        ds
    }
}
