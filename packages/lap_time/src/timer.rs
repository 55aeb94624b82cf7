//! The reusable interval stopwatch.

use std::fmt::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Local;
use tinted_print::Tint;

use crate::DurationFormat;
use crate::pal::{TimeSource, TimeSourceFacade};

/// Identifies stopwatches in printed output. Ids only need to be unique and
/// increasing; they are never reused or reset.
static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(0);

/// The stopwatch counters are debugging aids read a handful of times per
/// measurement, not hot counters; the strongest ordering keeps every reading
/// taken on any thread consistent with the most recent start or lap.
const COUNTER_ORDERING: Ordering = Ordering::SeqCst;

/// A reusable stopwatch that reports elapsed time and laps through a
/// [`Tint`], formatted by a [`DurationFormat`].
///
/// A timer is started with [`start`](Self::start) (or its silent variant) and
/// may be restarted any number of times; restarting discards all lap history.
/// Once started, any number of threads may share the timer and call
/// [`lap`](Self::lap) concurrently: the lap baseline is advanced with a single
/// atomic compare-and-set, so every reported lap covers a distinct,
/// non-overlapping slice of time.
///
/// # Examples
///
/// ```
/// use lap_time::{DurationFormat, Timer};
/// use tinted_print::Tint;
///
/// let timer = Timer::new(DurationFormat::FULL, Tint::Green);
/// timer.start();
///
/// // ... work ...
///
/// timer.lap();
/// timer.elapsed();
/// ```
///
/// # Contract
///
/// Querying [`elapsed_nanos`](Self::elapsed_nanos) or lapping before the first
/// start is a usage error: debug builds assert, release builds return a
/// nonsensically large duration. Calling [`start`](Self::start) concurrently
/// with itself or with [`lap`](Self::lap) is likewise unsupported - the two
/// baseline stores are independent and their interleaving is unspecified.
#[derive(Debug)]
pub struct Timer {
    id: u64,

    /// Nanosecond reading at the most recent start; 0 means "never started".
    begin: AtomicU64,

    /// The lap baseline. Advanced only by compare-and-set in [`Self::lap`],
    /// overwritten by starts and by [`Self::sync_lap`].
    last: AtomicU64,

    sync_lap_lock: Mutex<()>,
    format: DurationFormat,
    tint: Tint,
    time_source: TimeSourceFacade,
}

impl Timer {
    /// Creates a stopwatch that reports through `tint` in the given format.
    ///
    /// The stopwatch is not started.
    #[must_use]
    pub fn new(format: DurationFormat, tint: Tint) -> Self {
        Self::with_time_source(format, tint, TimeSourceFacade::real())
    }

    /// Creates a stopwatch with the [`FULL`](DurationFormat::FULL) format.
    #[must_use]
    pub fn full(tint: Tint) -> Self {
        Self::new(DurationFormat::FULL, tint)
    }

    /// Creates a stopwatch and optionally starts it immediately.
    #[must_use]
    pub fn with_start(format: DurationFormat, tint: Tint, start: bool) -> Self {
        let timer = Self::new(format, tint);

        if start {
            timer.start();
        }

        timer
    }

    /// Creates an already-running stopwatch with the
    /// [`FULL`](DurationFormat::FULL) format.
    #[must_use]
    pub fn begin(tint: Tint) -> Self {
        Self::with_start(DurationFormat::FULL, tint, true)
    }

    fn with_time_source(
        format: DurationFormat,
        tint: Tint,
        time_source: TimeSourceFacade,
    ) -> Self {
        Self {
            // Ids only need uniqueness, not ordering against other memory.
            id: NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed),
            begin: AtomicU64::new(0),
            last: AtomicU64::new(0),
            sync_lap_lock: Mutex::new(()),
            format,
            tint,
            time_source,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_fake_time(
        format: DurationFormat,
        tint: Tint,
        source: crate::pal::FakeTimeSource,
    ) -> Self {
        Self::with_time_source(format, tint, source.into())
    }

    /// The unique, process-wide identifier printed with every report.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    fn now(&self) -> u64 {
        self.time_source.nanos()
    }

    /// Sets both the start reading and the lap baseline to the current time.
    ///
    /// Two independent stores - single-writer by contract.
    fn reset(&self) {
        let now = self.now();

        self.begin.store(now, COUNTER_ORDERING);
        self.last.store(now, COUNTER_ORDERING);
    }

    fn start_message(&self) -> String {
        let wall_clock = Local::now().format("%I:%M %p");

        format!(
            "\n >>> Timer {} begins at =\n{}",
            self.id,
            indent(&wall_clock.to_string(), 3)
        )
    }

    /// Starts (or restarts) the stopwatch and announces the wall-clock time.
    ///
    /// Restarting moves both the start reading and the lap baseline, so all
    /// prior lap history is discarded.
    pub fn start(&self) {
        self.reset();
        self.tint.ln(&self.start_message());
    }

    /// Starts (or restarts) the stopwatch without printing anything.
    pub fn silent_start(&self) {
        self.reset();
    }

    /// Starts (or restarts) the stopwatch and returns the announcement that
    /// [`start`](Self::start) would have printed.
    #[must_use]
    pub fn start_text(&self) -> String {
        self.reset();
        self.tint.apply(&self.start_message())
    }

    /// Nanoseconds since the most recent start.
    ///
    /// Requires a prior [`start`](Self::start) or
    /// [`silent_start`](Self::silent_start); see the type-level contract.
    #[must_use]
    pub fn elapsed_nanos(&self) -> u64 {
        let begin = self.begin.load(COUNTER_ORDERING);

        debug_assert!(
            begin != 0,
            "must call start() or silent_start() before querying the timer"
        );

        self.now().saturating_sub(begin)
    }

    /// Prints the time elapsed since the most recent start.
    #[cfg_attr(test, mutants::skip)] // Observable only on stdout - the math lives in elapsed_nanos().
    pub fn elapsed(&self) {
        let nanos = self.elapsed_nanos();
        self.report("Elapsed", nanos);
    }

    /// Attempts to take a lap, returning the nanoseconds since the previous
    /// observation point on success.
    ///
    /// The lap baseline is advanced with a single compare-and-set attempt and
    /// no retry: when several threads race, exactly one of the callers that
    /// observed the same baseline wins and owns the window since it; the
    /// others return `None` and report nothing. Winners therefore always
    /// cover disjoint intervals, and time observed by losing callers is
    /// simply not reported.
    #[must_use]
    pub fn lap_nanos(&self) -> Option<u64> {
        let prev = self.last.load(COUNTER_ORDERING);
        let now = self.now();

        debug_assert!(
            prev != 0,
            "must call start() or silent_start() before taking a lap"
        );

        let lap = now.saturating_sub(prev);

        self.last
            .compare_exchange(prev, now, COUNTER_ORDERING, COUNTER_ORDERING)
            .ok()
            .map(|_| lap)
    }

    /// Takes a lap and prints it; silent when another concurrent lap won the
    /// window.
    pub fn lap(&self) {
        if let Some(lap) = self.lap_nanos() {
            self.report("Lapsed", lap);
        }
    }

    /// The lock-based lap: computes the time since the previous observation
    /// point under a mutex and returns it.
    ///
    /// Unlike [`lap_nanos`](Self::lap_nanos), the baseline after this call is
    /// the lap *duration* itself, not the observation timestamp, so the next
    /// lap - of either variant - measures against that duration. Mixing the
    /// two variants on one timer yields skewed readings.
    #[must_use]
    pub fn sync_lap_nanos(&self) -> u64 {
        let _guard = self.sync_lap_lock.lock().expect(crate::ERR_POISONED_LOCK);

        self.sync_lap_locked()
    }

    /// Takes a lock-based lap and prints it.
    ///
    /// See [`sync_lap_nanos`](Self::sync_lap_nanos) for the baseline
    /// behavior.
    pub fn sync_lap(&self) {
        let _guard = self.sync_lap_lock.lock().expect(crate::ERR_POISONED_LOCK);

        let lap = self.sync_lap_locked();
        self.report("Sync lapsed", lap);
    }

    /// Caller must hold `sync_lap_lock`.
    fn sync_lap_locked(&self) -> u64 {
        let prev = self.last.load(COUNTER_ORDERING);
        let lap = self.now().saturating_sub(prev);

        // The baseline becomes the lap duration, not the current reading.
        self.last.store(lap, COUNTER_ORDERING);

        lap
    }

    #[cfg_attr(test, mutants::skip)] // Observable only on stdout.
    fn report(&self, prefix: &str, nanos: u64) {
        self.tint.ln(&format!(
            "{prefix} at (timer {})...\n{}",
            self.id,
            indent(&self.format.format_nanos(nanos), 3)
        ));
    }
}

/// Prefixes every line of `text` with `spaces` spaces.
fn indent(text: &str, spaces: usize) -> String {
    let mut indented = String::with_capacity(text.len() + spaces);

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            indented.push('\n');
        }

        write!(indented, "{:spaces$}{line}", "").expect("writing to a String cannot fail");
    }

    indented
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::pal::FakeTimeSource;

    fn fake_timer(start_nanos: u64) -> (Timer, FakeTimeSource) {
        let source = FakeTimeSource::new(start_nanos);
        let timer = Timer::with_fake_time(DurationFormat::FULL, Tint::Green, source.clone());

        (timer, source)
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let first = Timer::full(Tint::Green);
        let second = Timer::full(Tint::Purple);

        assert!(second.id() > first.id());
    }

    #[test]
    fn elapsed_measures_from_the_most_recent_start() {
        let (timer, source) = fake_timer(1_000);

        timer.silent_start();
        source.set_nanos(1_750);

        assert_eq!(timer.elapsed_nanos(), 750);
    }

    #[test]
    fn lap_immediately_after_start_is_zero() {
        let (timer, _source) = fake_timer(1_000);

        timer.silent_start();

        assert_eq!(timer.lap_nanos(), Some(0));
    }

    #[test]
    fn laps_measure_against_the_previous_observation() {
        let (timer, source) = fake_timer(1_000);
        timer.silent_start();

        source.advance(Duration::from_nanos(500));
        assert_eq!(timer.lap_nanos(), Some(500));

        source.advance(Duration::from_nanos(200));
        assert_eq!(timer.lap_nanos(), Some(200));
    }

    #[test]
    fn restart_discards_lap_history() {
        let (timer, source) = fake_timer(1_000);
        timer.silent_start();

        source.advance(Duration::from_nanos(500));
        assert_eq!(timer.lap_nanos(), Some(500));

        // Restart well past the old baseline, then lap right away.
        source.set_nanos(100_000);
        timer.silent_start();
        source.advance(Duration::from_nanos(10));

        assert_eq!(timer.lap_nanos(), Some(10));
    }

    #[test]
    fn sync_lap_baselines_on_the_duration_not_the_timestamp() {
        let (timer, source) = fake_timer(1_000);
        timer.silent_start();

        source.set_nanos(1_300);
        assert_eq!(timer.sync_lap_nanos(), 300);

        // The baseline is now 300 - the previous lap's duration - so this lap
        // reads 1_400 - 300 rather than 1_400 - 1_300.
        source.set_nanos(1_400);
        assert_eq!(timer.sync_lap_nanos(), 1_100);
    }

    #[test]
    fn start_text_mentions_the_timer_id() {
        let (timer, _source) = fake_timer(1_000);

        let text = timer.start_text();

        assert!(text.contains(&format!("Timer {}", timer.id())));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "must call start() or silent_start()")]
    fn querying_before_start_asserts_in_debug_builds() {
        let (timer, _source) = fake_timer(1_000);

        let _nanos = timer.elapsed_nanos();
    }

    #[test]
    fn indent_prefixes_every_line() {
        assert_eq!(indent("a\nb", 3), "   a\n   b");
    }

    static_assertions::assert_impl_all!(Timer: Send, Sync);
}
