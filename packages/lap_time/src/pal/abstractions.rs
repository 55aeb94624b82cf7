//! Time-source trait definition.

use std::fmt::Debug;

/// Provides monotonic nanosecond readings for the stopwatch.
///
/// Readings are strictly positive: 0 is reserved as the "never started"
/// sentinel in the stopwatch state, so no reading may ever collide with it.
pub(crate) trait TimeSource: Debug + Send + Sync + 'static {
    /// The current reading of the monotonic clock, in nanoseconds.
    fn nanos(&self) -> u64;
}
