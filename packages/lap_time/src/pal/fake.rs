//! Fake time source for testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::pal::abstractions::TimeSource;

/// Fake implementation of the time source for testing.
///
/// Readings are set explicitly by the test instead of being taken from a
/// clock. Clones share the same underlying reading, so a test can keep a
/// handle and move time forward after the stopwatch under test was built.
#[derive(Clone, Debug)]
pub(crate) struct FakeTimeSource {
    now_nanos: Arc<Mutex<u64>>,
}

impl FakeTimeSource {
    /// Creates a fake time source whose clock reads `start_nanos`.
    pub(crate) fn new(start_nanos: u64) -> Self {
        Self {
            now_nanos: Arc::new(Mutex::new(start_nanos)),
        }
    }

    /// Sets the clock reading, affecting all clones of this source.
    pub(crate) fn set_nanos(&self, nanos: u64) {
        *self
            .now_nanos
            .lock()
            .expect("FakeTimeSource state lock should not be poisoned") = nanos;
    }

    /// Moves the clock reading forward, affecting all clones of this source.
    pub(crate) fn advance(&self, by: Duration) {
        let mut guard = self
            .now_nanos
            .lock()
            .expect("FakeTimeSource state lock should not be poisoned");

        *guard = guard.saturating_add(
            by.as_nanos()
                .try_into()
                .expect("test advances fit in u64"),
        );
    }
}

impl TimeSource for FakeTimeSource {
    fn nanos(&self) -> u64 {
        *self
            .now_nanos
            .lock()
            .expect("FakeTimeSource state lock should not be poisoned")
    }
}
