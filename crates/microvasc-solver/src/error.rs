//! Error types for microvasc-solver.

use microvasc_core::VesselId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("singular pressure system")]
    SingularSystem,

    #[error("no results for vessel {0}")]
    VesselNotFound(VesselId),

    #[error("solver returned no results for vessel {vessel} ({name})")]
    IncompleteCoverage { vessel: VesselId, name: String },

    #[error("solver executable not found: {0}")]
    ExecutableNotFound(String),

    #[error("solver execution failed: {0}")]
    ExecutionFailed(String),

    #[error("failed to parse solver output: {0}")]
    OutputParse(String),

    #[error("temp file error: {0}")]
    TempFile(String),

    #[error("config export: {0}")]
    Config(#[from] microvasc_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
