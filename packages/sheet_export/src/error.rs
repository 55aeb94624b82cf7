use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when exporting data to a file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The export file could not be created or written.
    #[error("failed to write export file '{}': {source}", path.display())]
    Io {
        /// The file that was being written.
        path: PathBuf,

        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
}

/// A specialized `Result` type for export operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn io_error_names_the_path() {
        let error = Error::Io {
            path: PathBuf::from("/tmp/out.csv"),
            source: std::io::Error::other("disk full"),
        };

        assert!(error.to_string().contains("out.csv"));
    }
}
