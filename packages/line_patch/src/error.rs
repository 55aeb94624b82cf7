use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when patching a file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The original file could not be read or the patched copy could not be
    /// written.
    #[error("failed to patch '{}': {source}", path.display())]
    Io {
        /// The file that was being read or written.
        path: PathBuf,

        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
}

/// A specialized `Result` type for patch operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;
