//! Error handling for the freemarker crate.
//! Defines custom error types and results used throughout the library.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Custom error types for render operations.
///
/// Every error is surfaced to the immediate caller of the render
/// operation; nothing is retried automatically.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The template reference could not be turned into a usable source
    #[error("Unusable template source: {0}.")]
    ResolutionError(String),

    /// The caller-supplied data could not be serialized or embedded
    #[error("Data embedding error: {0}.")]
    DataEmbeddingError(String),

    /// The engine binary is missing or failed to start
    #[error("Failed to start engine process: {0}.")]
    ProcessSpawnError(String),

    /// The engine process exceeded the configured timeout and was killed
    #[error("Engine process timed out after {timeout:?}.")]
    ProcessTimeoutError { timeout: Duration },

    /// The engine ran but did not report success; `output` holds the
    /// captured engine log (line-translated when data was embedded)
    #[error("Engine reported failure: {output}")]
    RenderFailureError { output: String },
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;
