//! Core earthquake record for quakereport.
//!
//! This module defines the data structure that one feature of the USGS feed
//! is reduced to before it is formatted for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single earthquake event.
///
/// The four core fields come straight from the feature's `properties`; the
/// rest are carried along when the feed provides them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Earthquake {
    /// USGS event id (the feature id).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Event magnitude.
    pub magnitude: f64,

    /// Human-readable place, e.g. `"88 km N of Lae, Papua New Guinea"`.
    pub place: String,

    /// When the event occurred.
    pub time: DateTime<Utc>,

    /// Event page on the USGS website.
    pub url: String,

    /// Number of "did you feel it?" reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub felt: Option<u32>,

    /// Whether a tsunami flag was raised for the event.
    #[serde(default)]
    pub tsunami: bool,

    /// Hypocenter depth in kilometers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_km: Option<f64>,
}

impl Earthquake {
    /// Create an earthquake from its core fields.
    ///
    /// `time_millis` is milliseconds since the Unix epoch, as the feed reports it.
    ///
    /// # Errors
    ///
    /// Returns an error if `time_millis` is outside the representable range.
    pub fn new(
        magnitude: f64,
        place: impl Into<String>,
        time_millis: i64,
        url: impl Into<String>,
    ) -> Result<Self> {
        let time = DateTime::from_timestamp_millis(time_millis)
            .ok_or_else(|| Error::feed(format!("timestamp {time_millis} is out of range")))?;
        Ok(Self {
            id: None,
            magnitude,
            place: place.into(),
            time,
            url: url.into(),
            felt: None,
            tsunami: false,
            depth_km: None,
        })
    }

    /// Get the event time in milliseconds since the Unix epoch.
    #[must_use]
    pub fn time_millis(&self) -> i64 {
        self.time.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earthquake_new() {
        let quake = Earthquake::new(
            7.2,
            "88 km N of Lae, Papua New Guinea",
            1_454_124_312_220,
            "https://earthquake.usgs.gov/earthquakes/eventpage/us20004vvx",
        )
        .unwrap();

        assert!(quake.id.is_none());
        assert!((quake.magnitude - 7.2).abs() < f64::EPSILON);
        assert_eq!(quake.place, "88 km N of Lae, Papua New Guinea");
        assert_eq!(quake.time_millis(), 1_454_124_312_220);
        assert!(!quake.tsunami);
    }

    #[test]
    fn test_earthquake_time_is_utc() {
        let quake = Earthquake::new(5.0, "somewhere", 0, "u").unwrap();
        assert_eq!(quake.time.to_rfc3339(), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_earthquake_out_of_range_time() {
        let result = Earthquake::new(5.0, "somewhere", i64::MAX, "u");
        assert!(result.is_err());
    }

    #[test]
    fn test_earthquake_serialization_skips_missing_optionals() {
        let quake = Earthquake::new(4.5, "Near Somewhere", 1_000, "u").unwrap();
        let json = serde_json::to_string(&quake).unwrap();

        assert!(json.contains("\"magnitude\":4.5"));
        assert!(!json.contains("felt"));
        assert!(!json.contains("depth_km"));
    }
}
