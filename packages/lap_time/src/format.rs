//! Rendering of nanosecond counts as human-readable unit sequences.

use std::fmt;
use std::fmt::Write;

/// A unit a duration component can be reported in.
///
/// Each unit knows its own wraparound rule: in a multi-unit sequence the
/// component wraps at the next coarser unit's boundary, so milliseconds read
/// 0-999 within the current second and nanoseconds read 0-999 999 within the
/// current millisecond. Seconds, having no coarser neighbor, never wrap.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TimeUnit {
    /// Whole seconds, suffix `secs`.
    Seconds,
    /// Milliseconds, suffix `millis`.
    Milliseconds,
    /// Nanoseconds, suffix `nanos`.
    Nanoseconds,
}

impl TimeUnit {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Seconds => "secs",
            Self::Milliseconds => "millis",
            Self::Nanoseconds => "nanos",
        }
    }

    /// Converts a total nanosecond count into this unit's resolution.
    const fn convert(self, nanos: u64) -> u64 {
        match self {
            Self::Seconds => nanos / 1_000_000_000,
            Self::Milliseconds => nanos / 1_000_000,
            Self::Nanoseconds => nanos,
        }
    }

    /// The divisor that wraps this unit at the next coarser unit's boundary,
    /// or `None` for the coarsest unit.
    const fn wraparound(self) -> Option<u64> {
        match self {
            Self::Seconds => None,
            Self::Milliseconds => Some(1_000),
            Self::Nanoseconds => Some(1_000_000),
        }
    }

    /// The value this unit contributes to a rendering of `nanos`.
    ///
    /// `wrap` is false for single-unit sequences, which report the full
    /// converted value.
    fn component(self, nanos: u64, wrap: bool) -> u64 {
        let converted = self.convert(nanos);

        match self.wraparound() {
            Some(divisor) if wrap => converted % divisor,
            _ => converted,
        }
    }
}

/// An ordered, non-empty selection of [`TimeUnit`]s, coarsest first, that a
/// nanosecond count is rendered through.
///
/// Components render as `<integer>[<suffix>]` and are joined with `": "`.
/// A single-unit format applies no wraparound at all - the lone component is
/// the full converted value.
///
/// # Examples
///
/// ```
/// use lap_time::DurationFormat;
///
/// assert_eq!(
///     DurationFormat::FULL.format_nanos(1_999_999_999),
///     "1[secs]: 999[millis]: 999999[nanos]"
/// );
/// assert_eq!(DurationFormat::NANOS.format_nanos(1_999_999_999), "1999999999[nanos]");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DurationFormat {
    units: &'static [TimeUnit],
}

impl DurationFormat {
    /// Whole seconds only.
    pub const SECS: Self = Self {
        units: &[TimeUnit::Seconds],
    };

    /// Milliseconds only.
    pub const MILLIS: Self = Self {
        units: &[TimeUnit::Milliseconds],
    };

    /// Nanoseconds only.
    pub const NANOS: Self = Self {
        units: &[TimeUnit::Nanoseconds],
    };

    /// Milliseconds within the second, then nanoseconds within the millisecond.
    pub const MILLIS_NANOS: Self = Self {
        units: &[TimeUnit::Milliseconds, TimeUnit::Nanoseconds],
    };

    /// Seconds, milliseconds and nanoseconds.
    pub const FULL: Self = Self {
        units: &[TimeUnit::Seconds, TimeUnit::Milliseconds, TimeUnit::Nanoseconds],
    };

    /// Creates a format from a custom unit sequence, coarsest first.
    ///
    /// # Panics
    ///
    /// Panics if `units` is empty.
    #[must_use]
    pub const fn of(units: &'static [TimeUnit]) -> Self {
        assert!(!units.is_empty(), "a duration format needs at least one unit");

        Self { units }
    }

    /// Renders a nanosecond count through this format's unit sequence.
    #[must_use]
    pub fn format_nanos(&self, nanos: u64) -> String {
        let wrap = self.units.len() > 1;
        let mut rendered = String::new();

        for (i, unit) in self.units.iter().enumerate() {
            if i > 0 {
                rendered.push_str(": ");
            }

            write!(rendered, "{}[{}]", unit.component(nanos, wrap), unit.suffix())
                .expect("writing to a String cannot fail");
        }

        rendered
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_format_wraps_each_component_at_the_coarser_boundary() {
        assert_eq!(
            DurationFormat::FULL.format_nanos(1_999_999_999),
            "1[secs]: 999[millis]: 999999[nanos]"
        );
    }

    #[test]
    fn full_format_of_zero_is_all_zero_components() {
        assert_eq!(
            DurationFormat::FULL.format_nanos(0),
            "0[secs]: 0[millis]: 0[nanos]"
        );
    }

    #[test]
    fn seconds_do_not_wrap() {
        // An hour and change; the seconds component keeps counting past 59.
        assert_eq!(
            DurationFormat::FULL.format_nanos(3_601_000_000_000),
            "3601[secs]: 0[millis]: 0[nanos]"
        );
    }

    #[test]
    fn single_unit_formats_apply_no_wraparound() {
        assert_eq!(
            DurationFormat::NANOS.format_nanos(1_999_999_999),
            "1999999999[nanos]"
        );
        assert_eq!(DurationFormat::MILLIS.format_nanos(1_999_999_999), "1999[millis]");
        assert_eq!(DurationFormat::SECS.format_nanos(61_000_000_000), "61[secs]");
    }

    #[test]
    fn millis_nanos_wraps_both_components() {
        assert_eq!(
            DurationFormat::MILLIS_NANOS.format_nanos(1_999_999_999),
            "999[millis]: 999999[nanos]"
        );
    }

    #[test]
    fn custom_sequences_preserve_order() {
        const SECS_NANOS: DurationFormat =
            DurationFormat::of(&[TimeUnit::Seconds, TimeUnit::Nanoseconds]);

        assert_eq!(
            SECS_NANOS.format_nanos(2_000_000_001),
            "2[secs]: 1[nanos]"
        );
    }

    #[test]
    fn unit_display_matches_suffix() {
        assert_eq!(TimeUnit::Seconds.to_string(), "secs");
        assert_eq!(TimeUnit::Milliseconds.to_string(), "millis");
        assert_eq!(TimeUnit::Nanoseconds.to_string(), "nanos");
    }
}
