//! Copies text files while swapping out numbered lines.
//!
//! The entry point is [`Editor`], an enum of supported file formats. Patching
//! never modifies the original: the result is written next to it with a
//! `_copy` suffix.
//!
//! This package is not meant for use in production, serving only as a
//! development tool.
//!
//! ```no_run
//! use line_patch::{Editor, Line};
//!
//! Editor::Txt.edit_lines("notes", "scratch", &[Line::new(0, "rewritten")])?;
//! # Ok::<(), line_patch::Error>(())
//! ```

mod editor;
mod error;

pub use editor::{Editor, Line};
pub use error::{Error, Result};
