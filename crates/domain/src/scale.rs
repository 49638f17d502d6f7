//! Time scales — symbolic query windows and their per-scale properties.
//!
//! Every property of a scale (key, duration, label, tick style) is an
//! exhaustive `match` on [`TimeScale`], so adding a scale forces every
//! table to be filled in.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::Timestamp;

/// `strftime` pattern for clock-time ticks (`1:05:09 PM`).
pub const CLOCK_PATTERN: &str = "%-I:%M:%S %p";
/// `strftime` pattern for calendar-date ticks (`1/31/2024`).
pub const DATE_PATTERN: &str = "%-m/%-d/%Y";
/// `strftime` pattern for full date-time labels (`1/31/2024, 1:05:09 PM`).
pub const DATE_TIME_PATTERN: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// A symbolic time window ending at "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeScale {
    #[serde(rename = "1-hour")]
    OneHour,
    #[serde(rename = "5-hour")]
    FiveHours,
    #[serde(rename = "12-hour")]
    TwelveHours,
    #[serde(rename = "day")]
    Day,
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "2-week")]
    TwoWeeks,
    #[serde(rename = "month")]
    Month,
}

impl TimeScale {
    /// Every scale, shortest first.
    pub const ALL: [TimeScale; 7] = [
        Self::OneHour,
        Self::FiveHours,
        Self::TwelveHours,
        Self::Day,
        Self::Week,
        Self::TwoWeeks,
        Self::Month,
    ];

    /// Symbolic key used in config files, CLI arguments, and JSON.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::OneHour => "1-hour",
            Self::FiveHours => "5-hour",
            Self::TwelveHours => "12-hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::TwoWeeks => "2-week",
            Self::Month => "month",
        }
    }

    /// Length of the window. A "month" is a fixed 28 days.
    #[must_use]
    pub fn duration(self) -> Duration {
        match self {
            Self::OneHour => Duration::hours(1),
            Self::FiveHours => Duration::hours(5),
            Self::TwelveHours => Duration::hours(12),
            Self::Day => Duration::hours(24),
            Self::Week => Duration::days(7),
            Self::TwoWeeks => Duration::days(14),
            Self::Month => Duration::days(28),
        }
    }

    /// Human-readable label for selectors and axis captions.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OneHour => "Last Hour",
            Self::FiveHours => "Last Five Hours",
            Self::TwelveHours => "Last Twelve Hours",
            Self::Day => "Last Day",
            Self::Week => "Last Week",
            Self::TwoWeeks => "Last Two Weeks",
            Self::Month => "Last Month",
        }
    }

    /// Tick granularity: clock time up to a day, calendar dates beyond.
    #[must_use]
    pub fn tick_style(self) -> TickStyle {
        match self {
            Self::OneHour | Self::FiveHours | Self::TwelveHours | Self::Day => TickStyle::ClockTime,
            Self::Week | Self::TwoWeeks | Self::Month => TickStyle::CalendarDate,
        }
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TimeScale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scale| scale.key() == s)
            .ok_or_else(|| ValidationError::UnknownScale(s.to_owned()))
    }
}

/// A half-open query window `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: Timestamp,
    end: Timestamp,
}

impl Interval {
    /// Build an interval from caller-supplied bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyInterval`] unless `start < end`.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ValidationError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(ValidationError::EmptyInterval)
        }
    }

    #[must_use]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Timestamp {
        self.end
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether `ts` falls inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start <= ts && ts < self.end
    }
}

/// Kind of label a [`TickFormatter`] renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStyle {
    ClockTime,
    CalendarDate,
}

impl TickStyle {
    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            Self::ClockTime => CLOCK_PATTERN,
            Self::CalendarDate => DATE_PATTERN,
        }
    }
}

/// Renders epoch-millisecond ticks as labels in a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickFormatter {
    style: TickStyle,
    offset: FixedOffset,
}

impl TickFormatter {
    #[must_use]
    pub fn new(style: TickStyle, offset: FixedOffset) -> Self {
        Self { style, offset }
    }

    #[must_use]
    pub fn style(&self) -> TickStyle {
        self.style
    }

    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Render one tick. Values outside chrono's range fall back to the raw number.
    #[must_use]
    pub fn format(&self, epoch_millis: i64) -> String {
        format_millis(epoch_millis, self.offset, self.style.pattern())
    }

    /// Turn the formatter into a plain closure for charting front-ends.
    pub fn into_fn(self) -> impl Fn(i64) -> String + Send + Sync + 'static {
        move |tick| self.format(tick)
    }
}

pub(crate) fn format_millis(epoch_millis: i64, offset: FixedOffset, pattern: &str) -> String {
    match DateTime::from_timestamp_millis(epoch_millis) {
        Some(ts) => ts.with_timezone(&offset).format(pattern).to_string(),
        None => epoch_millis.to_string(),
    }
}

/// Resolves scales into intervals, labels, and tick formatters.
///
/// Pure: every method is a function of its arguments and the display
/// offset chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleResolver {
    offset: FixedOffset,
}

impl Default for ScaleResolver {
    fn default() -> Self {
        Self { offset: Utc.fix() }
    }
}

impl ScaleResolver {
    /// Resolver rendering ticks in the given UTC offset.
    #[must_use]
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// `(now - duration(scale), now)`.
    #[must_use]
    pub fn interval_for(&self, scale: TimeScale, now: Timestamp) -> Interval {
        let start = now
            .checked_sub_signed(scale.duration())
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Interval { start, end: now }
    }

    #[must_use]
    pub fn label_for(&self, scale: TimeScale) -> &'static str {
        scale.label()
    }

    /// Axis caption shown under the time axis.
    #[must_use]
    pub fn axis_caption(&self, scale: TimeScale) -> String {
        format!("Time - {}", scale.label())
    }

    #[must_use]
    pub fn tick_formatter_for(&self, scale: TimeScale) -> TickFormatter {
        TickFormatter::new(scale.tick_style(), self.offset)
    }
}
