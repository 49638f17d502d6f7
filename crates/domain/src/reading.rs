//! Sensor readings — the backend's wire shape and its normalized form.
//!
//! The backend reports raw sensor values: light as a 0/1 flag and soil
//! moisture as a 12-bit ADC count. [`NormalizedReading`] is what every
//! consumer works with: a boolean light state, a moisture fraction, and an
//! epoch-millisecond timestamp.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Full-scale value of the moisture ADC (12 bits).
pub const MOISTURE_FULL_SCALE: f64 = 4095.0;

/// Light level as emitted by the backend.
///
/// Current firmware sends `0`/`1`; older clients typed the field as a
/// boolean, so both encodings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireLight {
    Flag(bool),
    Level(#[serde(deserialize_with = "integral::deserialize")] i64),
}

impl WireLight {
    /// `true` only for `1` or `true`. Any other level counts as dark.
    #[must_use]
    pub fn is_bright(self) -> bool {
        matches!(self, Self::Flag(true) | Self::Level(1))
    }
}

impl From<bool> for WireLight {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for WireLight {
    fn from(value: i64) -> Self {
        Self::Level(value)
    }
}

/// A single record exactly as the backend serializes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireReading {
    pub light: WireLight,
    /// Raw ADC count, nominally `0..=4095`. Not range-checked.
    #[serde(deserialize_with = "integral::deserialize")]
    pub moisture: i64,
    #[serde(with = "wire_date")]
    pub date: Timestamp,
}

impl WireReading {
    #[must_use]
    pub fn new(light: impl Into<WireLight>, moisture: i64, date: Timestamp) -> Self {
        Self {
            light: light.into(),
            moisture,
            date,
        }
    }
}

/// Display-ready reading derived from a [`WireReading`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReading {
    pub is_light: bool,
    /// `moisture / 4095`. Out-of-range raw values are passed through
    /// unclamped, so this may fall outside `[0, 1]`.
    pub moisture_fraction: f64,
    pub timestamp_millis: i64,
}

impl NormalizedReading {
    /// Apply the unit conversion to a wire record.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_wire(wire: &WireReading) -> Self {
        Self {
            is_light: wire.light.is_bright(),
            moisture_fraction: wire.moisture as f64 / MOISTURE_FULL_SCALE,
            timestamp_millis: wire.date.timestamp_millis(),
        }
    }

    /// The reading's instant, or `None` if the millis are out of range.
    #[must_use]
    pub fn timestamp(&self) -> Option<Timestamp> {
        crate::time::from_millis(self.timestamp_millis)
    }
}

impl From<WireReading> for NormalizedReading {
    fn from(wire: WireReading) -> Self {
        Self::from_wire(&wire)
    }
}

impl From<&WireReading> for NormalizedReading {
    fn from(wire: &WireReading) -> Self {
        Self::from_wire(wire)
    }
}

/// Integer fields that some encoders emit as integral floats (`2048.0`).
mod integral {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(i64),
        Float(f64),
    }

    // 2^63 is exactly representable; i64::MAX is not.
    const UPPER: f64 = 9_223_372_036_854_775_808.0;

    #[allow(clippy::cast_possible_truncation)]
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Int(value) => Ok(value),
            Repr::Float(value) if value.fract() == 0.0 && (-UPPER..UPPER).contains(&value) => {
                Ok(value as i64)
            }
            Repr::Float(value) => Err(D::Error::custom(format!("expected an integer, got {value}"))),
        }
    }
}

/// (De)serialization of the `Date` field.
///
/// Accepts an RFC 3339 string (current protocol) or a structured
/// `{ "seconds", "nanos" }` object (earlier protocol revision). Always
/// serializes as RFC 3339.
mod wire_date {
    use chrono::DateTime;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::time::{Timestamp, to_wire};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Structured {
            #[serde(alias = "_seconds")]
            seconds: i64,
            #[serde(default, alias = "_nanoseconds")]
            nanos: u32,
        },
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_wire(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|dt| dt.to_utc())
                .map_err(|err| D::Error::custom(format!("invalid RFC 3339 date {text:?}: {err}"))),
            Repr::Structured { seconds, nanos } => DateTime::from_timestamp(seconds, nanos)
                .ok_or_else(|| D::Error::custom(format!("date out of range: {seconds}s {nanos}ns"))),
        }
    }
}
