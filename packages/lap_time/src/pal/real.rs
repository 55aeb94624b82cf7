//! Real time source backed by the process monotonic clock.

use std::sync::LazyLock;
use std::time::Instant;

use crate::pal::abstractions::TimeSource;

/// All readings are measured against one process-wide anchor so that readings
/// taken by different stopwatch instances are mutually comparable.
static CLOCK_ANCHOR: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Reads the monotonic clock as nanoseconds since the first reading taken by
/// this process.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RealTimeSource;

impl RealTimeSource {
    pub(crate) const fn new() -> Self {
        Self
    }
}

impl TimeSource for RealTimeSource {
    fn nanos(&self) -> u64 {
        let nanos: u64 = CLOCK_ANCHOR
            .elapsed()
            .as_nanos()
            .try_into()
            .expect("process uptimes measured in centuries do not fit in u64");

        // 0 is reserved as the never-started sentinel.
        nanos.max(1)
    }
}

#[cfg(test)]
#[cfg(not(miri))] // Miri cannot talk to the real clock.
mod tests {
    use super::*;

    #[test]
    fn readings_are_positive_and_monotonic() {
        let source = RealTimeSource::new();

        let first = source.nanos();
        let second = source.nanos();

        assert!(first > 0);
        assert!(second >= first);
    }
}
