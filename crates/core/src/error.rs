//! Error types for the polymer sketch core.

use thiserror::Error;

/// Errors produced by engine construction, configuration and output.
///
/// The per-frame simulation step has no failure path of its own; these
/// variants cover the edges around it (dimensions, parameters, colors, I/O).
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero (or overflowed) when creating a canvas or field.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// No engine is registered under the requested name.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// A requested parameter or control name does not exist.
    #[error("parameter not found: {0}")]
    ParamNotFound(String),

    /// A parameter existed but its value is not accepted.
    #[error("invalid value for parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed or looked up.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// Writing an output artifact failed.
    #[error("i/o error: {0}")]
    Io(String),
}
