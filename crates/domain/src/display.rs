//! Display helpers shared by rendering front-ends.
//!
//! These mirror what the dashboard shows: moisture as a percentage, light
//! as day/night, and chart points with light encoded as an area series.

use chrono::FixedOffset;
use serde::Serialize;

use crate::reading::NormalizedReading;
use crate::scale::{CLOCK_PATTERN, DATE_TIME_PATTERN, format_millis};

/// Format a moisture fraction as a percentage with `decimals` places.
///
/// Tooltips use two decimals, axes and gauges use none.
#[must_use]
pub fn moisture_percent(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}

/// `"Day"` or `"Night"`, as shown in chart tooltips.
#[must_use]
pub fn light_label(is_light: bool) -> &'static str {
    if is_light { "Day" } else { "Night" }
}

/// `"LIGHT"` or `"DARK"`, as shown on the current-reading banner.
#[must_use]
pub fn light_state(is_light: bool) -> &'static str {
    if is_light { "LIGHT" } else { "DARK" }
}

/// Full date-time label (`1/31/2024, 1:05:09 PM`) used by tooltips.
#[must_use]
pub fn timestamp_label(epoch_millis: i64, offset: FixedOffset) -> String {
    format_millis(epoch_millis, offset, DATE_TIME_PATTERN)
}

/// Time-of-day label (`1:05:09 PM`) used by the current-reading banner.
#[must_use]
pub fn time_label(epoch_millis: i64, offset: FixedOffset) -> String {
    format_millis(epoch_millis, offset, CLOCK_PATTERN)
}

/// One point of the history chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date_millis: i64,
    pub moisture: f64,
    /// `1.0` while bright, `0.0` while dark, drawn as a filled area.
    pub light: f64,
}

impl From<&NormalizedReading> for ChartPoint {
    fn from(reading: &NormalizedReading) -> Self {
        Self {
            date_millis: reading.timestamp_millis,
            moisture: reading.moisture_fraction,
            light: if reading.is_light { 1.0 } else { 0.0 },
        }
    }
}

/// Map a fetched series onto chart points, keeping order.
#[must_use]
pub fn chart_points(readings: &[NormalizedReading]) -> Vec<ChartPoint> {
    readings.iter().map(ChartPoint::from).collect()
}
