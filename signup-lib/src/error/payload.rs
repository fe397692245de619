//! Payload error types

use std::path::PathBuf;

/// Errors that can occur while assembling a request payload.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// A file part could not be read from disk.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The MIME type given for a file part is not valid.
    #[error("Invalid MIME type '{0}'")]
    InvalidMime(String),
}
