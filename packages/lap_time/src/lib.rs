//! A reusable nanosecond stopwatch with lock-free lap reporting.
//!
//! The core functionality:
//! - [`Timer`] - a reusable stopwatch shared freely between threads, with a
//!   compare-and-set lap operation that needs no lock
//! - [`DurationFormat`] - renders nanosecond counts through an ordered
//!   selection of [`TimeUnit`]s
//!
//! Reports are printed through a [`Tint`](tinted_print::Tint), so they come
//! out colorized and - when the shared
//! [`StackCapture`](tinted_print::StackCapture) says so - annotated with the
//! caller's stack.
//!
//! This package is not meant for use in production, serving only as a
//! development tool.
//!
//! # Simple usage
//!
//! ```
//! use lap_time::Timer;
//! use tinted_print::Tint;
//!
//! let timer = Timer::begin(Tint::Green);
//!
//! // ... first phase of work ...
//! timer.lap();
//!
//! // ... second phase of work ...
//! timer.lap();
//!
//! timer.elapsed();
//! ```
//!
//! # Concurrent laps
//!
//! Any number of threads may lap one shared timer. The lap baseline advances
//! by a single compare-and-set attempt: among callers racing for the same
//! window exactly one wins and reports it, so reported laps never overlap.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use lap_time::Timer;
//! use tinted_print::Tint;
//!
//! let timer = Arc::new(Timer::begin(Tint::Cyan));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let timer = Arc::clone(&timer);
//!         thread::spawn(move || timer.lap())
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! ```

mod format;
mod pal;
mod timer;

pub use format::{DurationFormat, TimeUnit};
pub use timer::Timer;

/// Lock poisoning means a panic mid-update; continuing would report garbage.
pub(crate) const ERR_POISONED_LOCK: &str =
    "encountered poisoned lock - program validity cannot be guaranteed";
