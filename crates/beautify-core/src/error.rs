use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by whole-file document I/O.
pub enum DocumentError {
    #[error("failed to read {}: {source}", path.display())]
    /// Reading the file failed.
    Read {
        /// The file being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    /// Writing the file failed.
    Write {
        /// The file being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8: {source}", path.display())]
    /// The file contents could not be decoded as text.
    InvalidUtf8 {
        /// The file being read.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: std::string::FromUtf8Error,
    },
}
