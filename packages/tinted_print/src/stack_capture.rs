//! Process-wide configuration for appending call-stack slices to printed messages.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::{Error, Result};

/// The default first frame to display.
///
/// Skips the capture machinery itself so the first displayed frame is the
/// code that asked for the print.
pub const DEFAULT_START_INDEX: usize = 3;

/// Configuration changes must be visible to every thread that emits a message
/// afterwards, so all flag accesses use the strongest ordering. These fields are
/// touched a handful of times per printed line - this is nowhere near a hot path.
const CONFIG_ORDERING: Ordering = Ordering::SeqCst;

/// The exclusive end of the displayed frame range.
///
/// The first read transitions `Floating` to `Latched`, after which the value
/// can never be written again - a successful write after the transition is
/// unrepresentable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum EndIndex {
    /// Never read; still writable.
    Floating(usize),

    /// Read at least once; fixed for the process lifetime.
    Latched(usize),
}

/// Controls whether and how much of the calling thread's call stack is appended
/// to every message emitted through a [`Tint`](crate::Tint).
///
/// One process-wide instance is reachable through [`StackCapture::shared`] and is
/// what the emission paths consult on every call; independent instances can be
/// constructed for tests.
///
/// The displayed range is `[start_index, end_index)`, clamped to the frames
/// actually available. The start index may be moved at any time. The end index
/// is latched by its first use: once any capture has read it, further
/// [`set_end_index`](Self::set_end_index) calls fail.
///
/// # Examples
///
/// ```
/// use tinted_print::StackCapture;
///
/// let capture = StackCapture::new();
/// assert!(!capture.is_enabled());
///
/// // Asking for two frames implicitly enables capture.
/// capture.set_depth(2)?;
/// assert!(capture.is_enabled());
/// # Ok::<(), tinted_print::Error>(())
/// ```
#[derive(Debug)]
pub struct StackCapture {
    enabled: AtomicBool,
    start_index: AtomicUsize,
    end_index: Mutex<EndIndex>,
}

static SHARED: StackCapture = StackCapture::new();

impl StackCapture {
    /// Creates an independent configuration: capture disabled, start index
    /// [`DEFAULT_START_INDEX`], end index unbounded.
    ///
    /// Emission paths only ever consult [`StackCapture::shared`]; independent
    /// instances exist so tests can exercise the configuration without
    /// touching process-wide state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            start_index: AtomicUsize::new(DEFAULT_START_INDEX),
            end_index: Mutex::new(EndIndex::Floating(usize::MAX)),
        }
    }

    /// The process-wide instance consulted by every emission path.
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Whether emitted messages currently have a stack slice appended.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(CONFIG_ORDERING)
    }

    /// Switches stack appending on or off for every emission path at once.
    ///
    /// Idempotent. The switch is immediately visible to all threads; emission
    /// paths re-read the flag on each call rather than caching behavior.
    pub fn set_enabled(&self, value: bool) {
        self.enabled.store(value, CONFIG_ORDERING);
    }

    /// The first frame index to display.
    #[must_use]
    pub fn start_index(&self) -> usize {
        self.start_index.load(CONFIG_ORDERING)
    }

    /// Moves the first displayed frame index.
    ///
    /// Unlike the end index, the start index is never latched and may be moved
    /// at any time. If the index is past the end of the captured stack, the
    /// last available frame is displayed instead.
    pub fn set_start_index(&self, index: usize) {
        self.start_index.store(index, CONFIG_ORDERING);
    }

    /// Reads the exclusive end of the displayed frame range, latching it.
    ///
    /// After the first call, [`set_end_index`](Self::set_end_index) fails.
    #[must_use]
    pub fn end_index(&self) -> usize {
        let mut guard = self.end_index.lock().expect(crate::ERR_POISONED_LOCK);

        match *guard {
            EndIndex::Floating(value) => {
                *guard = EndIndex::Latched(value);
                value
            }
            EndIndex::Latched(value) => value,
        }
    }

    /// Sets the exclusive end of the displayed frame range.
    ///
    /// Implicitly enables capture if it was disabled.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyLatched`] if any capture has already read the end index;
    /// [`Error::InvalidEndIndex`] if `index` is zero.
    pub fn set_end_index(&self, index: usize) -> Result<()> {
        let mut guard = self.end_index.lock().expect(crate::ERR_POISONED_LOCK);

        if matches!(*guard, EndIndex::Latched(_)) {
            return Err(Error::AlreadyLatched);
        }

        if index < 1 {
            return Err(Error::InvalidEndIndex { value: index });
        }

        *guard = EndIndex::Floating(index);
        drop(guard);

        if !self.is_enabled() {
            self.set_enabled(true);
        }

        Ok(())
    }

    /// Sets the end index as a distance from the current start index.
    ///
    /// # Errors
    ///
    /// See [`set_end_index`](Self::set_end_index).
    pub fn set_depth(&self, depth: usize) -> Result<()> {
        self.set_end_index(self.start_index().saturating_add(depth))
    }

    /// Restricts the displayed slice to the single frame at the start index.
    ///
    /// # Errors
    ///
    /// See [`set_end_index`](Self::set_end_index).
    pub fn single_frame(&self) -> Result<()> {
        self.set_depth(1)
    }

    /// Renders the configured stack slice of the calling thread, if capture is
    /// enabled and frames are available.
    ///
    /// This read of the end index latches it.
    #[must_use]
    pub fn capture(&self) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }

        render_frames(self.start_index(), self.end_index())
    }
}

impl Default for StackCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the `[start, end)` slice of the calling thread's stack, one frame
/// per line, or `None` if no frames could be captured.
///
/// The range is clamped to the frames actually available; a start index past
/// the end selects the last available frame.
pub(crate) fn render_frames(start: usize, end: usize) -> Option<String> {
    let backtrace = Backtrace::force_capture();

    if !matches!(backtrace.status(), BacktraceStatus::Captured) {
        return None;
    }

    let frames = parse_frames(&backtrace.to_string());

    if frames.is_empty() {
        return None;
    }

    let end = end.min(frames.len());

    let selected: &[String] = if start >= end {
        // The configured range starts past the captured stack; fall back to
        // the innermost-remaining frame rather than displaying nothing.
        frames.last().map(std::slice::from_ref)?
    } else {
        frames.get(start..end)?
    };

    let mut rendered = String::new();

    for (i, frame) in selected.iter().enumerate() {
        if i > 0 {
            rendered.push('\n');
        }

        write!(rendered, "    at {frame}").expect("writing to a String cannot fail");
    }

    Some(rendered)
}

/// Folds the multi-line `Backtrace` rendering into one entry per frame.
///
/// A frame header looks like `  3: some::symbol` and may be followed by an
/// `at src/file.rs:10:5` location line, which is appended in parentheses.
fn parse_frames(rendered: &str) -> Vec<String> {
    let mut frames = Vec::new();

    for line in rendered.lines() {
        let trimmed = line.trim_start();

        if let Some(symbol) = split_frame_header(trimmed) {
            frames.push(symbol.to_string());
        } else if let Some(location) = trimmed.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                write!(frame, " ({location})").expect("writing to a String cannot fail");
            }
        }
    }

    frames
}

/// Returns the symbol part of a frame header line, or `None` for other lines.
fn split_frame_header(line: &str) -> Option<&str> {
    let (index, symbol) = line.split_once(": ")?;

    if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
        Some(symbol)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disabled_with_defaults() {
        let capture = StackCapture::new();

        assert!(!capture.is_enabled());
        assert_eq!(capture.start_index(), DEFAULT_START_INDEX);
    }

    #[test]
    fn enabling_is_idempotent() {
        let capture = StackCapture::new();

        capture.set_enabled(true);
        capture.set_enabled(true);
        assert!(capture.is_enabled());

        capture.set_enabled(false);
        assert!(!capture.is_enabled());
    }

    #[test]
    fn end_index_is_writable_until_first_read() {
        let capture = StackCapture::new();

        capture.set_end_index(10).unwrap();
        capture.set_end_index(20).unwrap();

        assert_eq!(capture.end_index(), 20);
    }

    #[test]
    fn first_read_latches_end_index() {
        let capture = StackCapture::new();

        capture.set_end_index(10).unwrap();
        assert_eq!(capture.end_index(), 10);

        assert!(matches!(
            capture.set_end_index(11),
            Err(Error::AlreadyLatched)
        ));

        // The latched value keeps being served.
        assert_eq!(capture.end_index(), 10);
    }

    #[test]
    fn zero_end_index_is_rejected() {
        let capture = StackCapture::new();

        assert!(matches!(
            capture.set_end_index(0),
            Err(Error::InvalidEndIndex { value: 0 })
        ));
    }

    #[test]
    fn setting_end_index_implicitly_enables() {
        let capture = StackCapture::new();
        assert!(!capture.is_enabled());

        capture.set_end_index(5).unwrap();

        assert!(capture.is_enabled());
    }

    #[test]
    fn depth_is_relative_to_start_index() {
        let capture = StackCapture::new();

        capture.set_start_index(7);
        capture.set_depth(2).unwrap();

        assert_eq!(capture.end_index(), 9);
    }

    #[test]
    fn start_index_stays_writable_after_latch() {
        let capture = StackCapture::new();

        capture.set_depth(1).unwrap();
        let _latched = capture.end_index();

        capture.set_start_index(0);
        assert_eq!(capture.start_index(), 0);
    }

    #[test]
    fn shared_returns_the_same_instance() {
        assert!(std::ptr::eq(StackCapture::shared(), StackCapture::shared()));
    }

    #[test]
    fn capture_when_disabled_is_none_and_does_not_latch() {
        let capture = StackCapture::new();

        assert!(capture.capture().is_none());

        // The disabled capture never read the end index, so it is still writable.
        capture.set_end_index(4).unwrap();
    }

    #[test]
    #[cfg(not(miri))] // Miri has no real stacks to capture.
    fn capture_honors_configured_depth() {
        let capture = StackCapture::new();
        capture.set_depth(2).unwrap();

        let rendered = capture.capture().expect("test builds capture real stacks");

        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.lines().all(|line| line.contains("at ")));
    }

    #[test]
    #[cfg(not(miri))]
    fn out_of_range_start_falls_back_to_last_frame() {
        let rendered = render_frames(usize::MAX, usize::MAX)
            .expect("test builds capture real stacks");

        assert_eq!(rendered.lines().count(), 1);
    }

    #[test]
    fn frame_headers_are_parsed_with_locations() {
        let rendered = "   0: first::symbol\n             at src/a.rs:1:5\n   1: second::symbol\n";
        let frames = parse_frames(rendered);

        assert_eq!(
            frames,
            vec![
                "first::symbol (src/a.rs:1:5)".to_string(),
                "second::symbol".to_string(),
            ]
        );
    }

    #[test]
    fn non_frame_lines_are_ignored() {
        let frames = parse_frames("disabled backtrace\nnote: run with RUST_BACKTRACE=1");
        assert!(frames.is_empty());
    }
}
