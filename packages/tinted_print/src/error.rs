use thiserror::Error;

/// Errors that can occur when reconfiguring stack capture.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The end index has already been read by an emission path and is latched.
    ///
    /// The first capture that consumes the end index fixes it for the remainder
    /// of the process lifetime.
    #[error("the stack end index has already been read and can no longer be changed")]
    AlreadyLatched,

    /// The caller provided an end index that cannot form a non-empty frame range.
    #[error("invalid stack end index {value}: the exclusive end index must be at least 1")]
    InvalidEndIndex {
        /// The rejected value.
        value: usize,
    },
}

/// A specialized `Result` type for stack capture configuration, returning the
/// crate's [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;
