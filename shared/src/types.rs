//! Common types and helpers used across the platform

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Lowest value a health or confidence score may take
pub const SCORE_MIN: f64 = 0.0;

/// Highest value a health or confidence score may take
pub const SCORE_MAX: f64 = 100.0;

/// Clamp a health or confidence score into `[0, 100]`.
///
/// NaN collapses to the lower bound so a bad model reply can never leak out.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return SCORE_MIN;
    }
    score.clamp(SCORE_MIN, SCORE_MAX)
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a timestamp sent by a client or read back from the store.
///
/// Accepts RFC 3339 with an offset, or a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// which is taken to be UTC.
pub fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let raw = raw.trim();
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Utc.from_utc_datetime(&naive))
            .map_err(|_| rfc_err),
    }
}

/// Serde adapter for record timestamps.
///
/// Writes fixed-width RFC 3339 (microseconds, `Z` suffix) so stored documents
/// sort correctly when compared as strings.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_datetime(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_clamp_score_bounds() {
        assert_eq!(clamp_score(-12.0), 0.0);
        assert_eq!(clamp_score(140.0), 100.0);
        assert_eq!(clamp_score(64.5), 64.5);
        assert_eq!(clamp_score(f64::NAN), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(31.999), 32.0);
        assert_eq!(round2(2.345_1), 2.35);
    }

    #[test]
    fn test_parse_naive_datetime_as_utc() {
        let dt = parse_datetime("2025-02-01T10:00:00").unwrap();
        assert_eq!(dt.year(), 2025);
        assert_eq!(dt.month(), 2);
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_offset_datetime() {
        let dt = parse_datetime("2025-02-01T10:00:00+05:30").unwrap();
        assert_eq!(dt.hour(), 4);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_datetime("next tuesday").is_err());
    }

    #[test]
    fn test_timestamp_is_fixed_width() {
        #[derive(serde::Serialize)]
        struct Stamp {
            #[serde(with = "timestamp")]
            at: DateTime<Utc>,
        }

        let at = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let json = serde_json::to_value(Stamp { at }).unwrap();
        assert_eq!(json["at"], "2025-03-01T08:00:00.000000Z");
    }
}
