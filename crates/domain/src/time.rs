//! Time and timestamp helpers.

use chrono::{DateTime, SecondsFormat, Utc};

/// UTC timestamp used for reading dates and interval bounds.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp the way the backend expects query bounds:
/// UTC, millisecond precision, `Z` suffix.
#[must_use]
pub fn to_wire(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Convert Unix epoch milliseconds back into a [`Timestamp`].
///
/// Returns `None` when the value is outside the representable range.
#[must_use]
pub fn from_millis(millis: i64) -> Option<Timestamp> {
    DateTime::from_timestamp_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_encode_with_millis_and_zulu_suffix() {
        let ts = from_millis(1_704_067_200_000).unwrap();
        assert_eq!(to_wire(ts), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn should_keep_sub_second_precision_when_encoding() {
        let ts = from_millis(1_704_067_200_123).unwrap();
        assert_eq!(to_wire(ts), "2024-01-01T00:00:00.123Z");
    }

    #[test]
    fn should_reject_out_of_range_millis() {
        assert!(from_millis(i64::MAX).is_none());
    }
}
