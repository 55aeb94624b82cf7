//! Colorized console printing with optional call-stack annotation.
//!
//! This package provides the emission side of a small debugging toolkit:
//! - [`Tint`] - a set of foreground colors that print single lines to stdout
//! - [`StackCapture`] - process-wide configuration appending a slice of the
//!   calling thread's stack to every printed message
//!
//! This package is not meant for use in production, serving only as a
//! development tool.
//!
//! # Simple usage
//!
//! ```
//! use tinted_print::Tint;
//!
//! Tint::Green.ln("cache warmed");
//! Tint::Yellow.tag_ln("retry", "second attempt");
//! ```
//!
//! # Stack annotation
//!
//! Enabling capture on the shared configuration makes every subsequent print,
//! from any thread, carry a slice of its caller's stack:
//!
//! ```
//! use tinted_print::{StackCapture, Tint};
//!
//! StackCapture::shared().set_enabled(true);
//! Tint::Red.ln("where did this come from?");
//! StackCapture::shared().set_enabled(false);
//! ```
//!
//! The displayed frame range is `[start_index, end_index)`. The start index
//! can be moved at any time; the end index is latched by its first use and
//! rejects later changes.

mod error;
mod stack_capture;
mod tint;

pub use error::{Error, Result};
pub use stack_capture::{DEFAULT_START_INDEX, StackCapture};
pub use tint::{DIVISOR, Tint, current_frame};

/// Lock poisoning means a panic mid-update; continuing would print garbage.
pub(crate) const ERR_POISONED_LOCK: &str =
    "encountered poisoned lock - program validity cannot be guaranteed";
