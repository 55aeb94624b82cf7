//! Colorized single-line emission to standard output.

use std::fmt::Write;

use crossterm::style::{Color, ResetColor, SetForegroundColor};

use crate::stack_capture::{self, DEFAULT_START_INDEX, StackCapture};

/// A foreground color a message can be printed in.
///
/// Variants are stateless tags; whether a printed message has a stack slice
/// appended is decided per call by consulting [`StackCapture::shared`], so a
/// configuration change is picked up by every variant at once.
///
/// # Examples
///
/// ```
/// use tinted_print::Tint;
///
/// Tint::Green.ln("all good");
/// Tint::Red.tag_ln("worker-7", "gave up");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Tint {
    /// Green foreground.
    Green,
    /// Magenta foreground.
    Purple,
    /// White foreground.
    White,
    /// Red foreground.
    Red,
    /// Yellow foreground.
    Yellow,
    /// Blue foreground.
    Blue,
    /// Cyan foreground.
    Cyan,
}

impl Tint {
    fn color(self) -> Color {
        match self {
            Self::Green => Color::Green,
            Self::Purple => Color::Magenta,
            Self::White => Color::White,
            Self::Red => Color::Red,
            Self::Yellow => Color::Yellow,
            Self::Blue => Color::Blue,
            Self::Cyan => Color::Cyan,
        }
    }

    /// Prefixes every line of `message` with this tint's color escape and
    /// terminates the whole message with a single reset.
    ///
    /// Each line carries its own prefix so that multi-line messages stay
    /// colored even when a pager or log collector splits them apart.
    fn color_wrap(self, message: &str) -> String {
        let color = SetForegroundColor(self.color());
        let mut wrapped = String::with_capacity(message.len());

        for (i, line) in message.split('\n').enumerate() {
            if i > 0 {
                wrapped.push('\n');
            }

            write!(wrapped, "{color}{line}").expect("writing to a String cannot fail");
        }

        write!(wrapped, "{ResetColor}").expect("writing to a String cannot fail");

        wrapped
    }

    /// Returns what [`ln`](Self::ln) would print, without printing it.
    ///
    /// The shared [`StackCapture`] decides whether a stack slice is appended.
    #[must_use]
    pub fn apply(self, message: &str) -> String {
        match StackCapture::shared().capture() {
            Some(stack) => self.color_wrap(&format!("{message}\n{stack}")),
            None => self.color_wrap(message),
        }
    }

    fn apply_slice(self, start: usize, end: usize, message: &str) -> String {
        match stack_capture::render_frames(start, end) {
            Some(stack) => self.color_wrap(&format!("{message}\n{stack}")),
            None => self.color_wrap(message),
        }
    }

    /// Prints a message as one colored line.
    #[cfg_attr(test, mutants::skip)] // Observable only on stdout - covered by apply() tests.
    pub fn ln(self, message: &str) {
        println!("{}", self.apply(message));
    }

    /// Prints a message prefixed with a tag, as `TAG: message`.
    #[cfg_attr(test, mutants::skip)] // Observable only on stdout - covered by apply() tests.
    pub fn tag_ln(self, tag: &str, message: &str) {
        println!("{}", self.apply(&format!("{tag}: {message}")));
    }

    /// Prints a message with `depth` stack frames appended, starting from the
    /// shared configuration's start index.
    ///
    /// The explicit depth applies to this call only: it neither consults the
    /// enabled flag nor reads (and therefore never latches) the configured
    /// end index.
    #[cfg_attr(test, mutants::skip)] // Observable only on stdout.
    pub fn ln_depth(self, depth: usize, message: &str) {
        let start = StackCapture::shared().start_index();
        println!(
            "{}",
            self.apply_slice(start, start.saturating_add(depth), message)
        );
    }

    /// Prints a message with the single frame of the calling site appended.
    #[cfg_attr(test, mutants::skip)] // Observable only on stdout.
    pub fn stack_ln(self, message: &str) {
        println!(
            "{}",
            self.apply_slice(DEFAULT_START_INDEX, DEFAULT_START_INDEX + 1, message)
        );
    }

    /// Prints a message with the single frame at index `at` appended.
    #[cfg_attr(test, mutants::skip)] // Observable only on stdout.
    pub fn stack_ln_at(self, at: usize, message: &str) {
        println!(
            "{}",
            self.apply_slice(at, at.saturating_add(1), message)
        );
    }
}

/// A wide visual separator for breaking up noisy output.
pub const DIVISOR: &str = "\n || >>>>>>>> || **\n ================\n || >>>>>>>> || **\n";

/// Renders the immediate caller's stack frame, if one can be captured.
#[must_use]
pub fn current_frame() -> Option<String> {
    stack_capture::render_frames(DEFAULT_START_INDEX, DEFAULT_START_INDEX + 1)
}
