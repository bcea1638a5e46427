//! CLI failures and the exit codes they map to.
//!
//! | code | meaning |
//! |------|---------|
//! | 0    | success |
//! | 2    | clap argument error (raised before `run`) |
//! | 10   | engine could not be built (unknown engine, bad canvas size) |
//! | 11   | PNG could not be written |
//! | 12   | rejected input: malformed `--params`, unknown mode or palette |
//! | 13   | JSON output could not be produced |

use polymer_sketch_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// The engine registry or canvas refused the run.
    #[error(transparent)]
    Engine(EngineError),

    /// The snapshot could not be saved.
    #[error("failed to write snapshot: {0}")]
    Snapshot(String),

    /// `--params`, `--mode` or `--palette` could not be read.
    #[error("{0}")]
    Input(String),

    /// The engine rejected a parameter value.
    #[error("rejected parameter: {0}")]
    Param(EngineError),

    #[error("failed to encode JSON output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Snapshot(_) => 11,
            CliError::Input(_) | CliError::Param(_) => 12,
            CliError::Output(_) => 13,
        }
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => CliError::Snapshot(msg),
            EngineError::InvalidParam { .. }
            | EngineError::ParamNotFound(_)
            | EngineError::InvalidPalette(_)
            | EngineError::InvalidColor(_) => CliError::Param(e),
            EngineError::InvalidDimensions | EngineError::UnknownEngine(_) => CliError::Engine(e),
        }
    }
}
