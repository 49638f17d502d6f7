//! Terminal rendering of readings.

use std::fmt::Write as _;

use cactus_domain::display::{
    ChartPoint, chart_points, light_label, light_state, moisture_percent, time_label,
};
use cactus_domain::reading::NormalizedReading;
use cactus_domain::scale::{ScaleResolver, TimeScale};
use serde::Serialize;

/// JSON document printed by `range --json`.
#[derive(Debug, Serialize)]
pub struct SeriesDocument<'a> {
    pub scale: TimeScale,
    pub caption: String,
    pub readings: &'a [NormalizedReading],
    pub points: Vec<ChartPoint>,
}

impl<'a> SeriesDocument<'a> {
    #[must_use]
    pub fn new(resolver: &ScaleResolver, scale: TimeScale, readings: &'a [NormalizedReading]) -> Self {
        Self {
            scale,
            caption: resolver.axis_caption(scale),
            readings,
            points: chart_points(readings),
        }
    }
}

/// One line per reading, labelled with the scale's tick formatter.
#[must_use]
pub fn render_series(
    resolver: &ScaleResolver,
    scale: TimeScale,
    readings: &[NormalizedReading],
) -> String {
    let tick = resolver.tick_formatter_for(scale);
    let mut out = format!("{}\n", resolver.axis_caption(scale));
    if readings.is_empty() {
        out.push_str("(no readings)\n");
        return out;
    }
    for reading in readings {
        let _ = writeln!(
            out,
            "{:>12}  {:>7}  {}",
            tick.format(reading.timestamp_millis),
            moisture_percent(reading.moisture_fraction, 2),
            light_label(reading.is_light),
        );
    }
    out
}

/// The current-reading banner.
#[must_use]
pub fn render_current(resolver: &ScaleResolver, reading: &NormalizedReading) -> String {
    format!(
        "CURRENT READING\n{} / {}\nMoisture: {}\n",
        time_label(reading.timestamp_millis, resolver.offset()),
        light_state(reading.is_light),
        moisture_percent(reading.moisture_fraction, 0),
    )
}

/// Table of the available scales.
#[must_use]
pub fn render_scales() -> String {
    let mut out = String::new();
    for scale in TimeScale::ALL {
        let _ = writeln!(
            out,
            "{:<8} {:<18} {}h",
            scale.key(),
            scale.label(),
            scale.duration().num_hours()
        );
    }
    out
}
