//! Writes tabular debugging data to delimited files.
//!
//! The single entry point is [`Export`], an enum of output formats. Exports
//! never clobber earlier output by default: name collisions are resolved with
//! `_copy`/`_copyN` suffixes, so repeated runs of an experiment each keep
//! their data.
//!
//! This package is not meant for use in production, serving only as a
//! development tool.
//!
//! ```no_run
//! use sheet_export::Export;
//!
//! Export::Csv.save(
//!     "target/exports",
//!     "samples",
//!     &[&["iteration", "nanos"], &["0", "1250"], &["1", "1180"]],
//! )?;
//! # Ok::<(), sheet_export::Error>(())
//! ```

mod error;
mod export;

pub use error::{Error, Result};
pub use export::Export;
