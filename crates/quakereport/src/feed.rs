//! GeoJSON feed parsing.
//!
//! The USGS event service answers with a `FeatureCollection` whose features
//! each describe one event. Only the collection shape is mandatory: a feature
//! that lacks a usable magnitude, place, time, or URL is skipped and logged,
//! never allowed to fail the rest of the document.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::earthquake::Earthquake;
use crate::error::{Error, Result};

/// Counts gathered while parsing a feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedSummary {
    /// Number of features in the document.
    pub total: usize,
    /// Number of features dropped as malformed.
    pub skipped: usize,
}

impl FeedSummary {
    /// Number of features that became earthquakes.
    #[must_use]
    pub fn parsed(&self) -> usize {
        self.total - self.skipped
    }
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    features: Vec<Value>,
}

/// Parse a GeoJSON feature collection into earthquakes, preserving feed order.
///
/// # Errors
///
/// Returns an error if the document is not JSON or has no `features` array.
pub fn parse_feed(json: &str) -> Result<Vec<Earthquake>> {
    parse_feed_with_summary(json).map(|(quakes, _)| quakes)
}

/// Like [`parse_feed`], also reporting how many features were skipped.
///
/// # Errors
///
/// Returns an error if the document is not JSON or has no `features` array.
pub fn parse_feed_with_summary(json: &str) -> Result<(Vec<Earthquake>, FeedSummary)> {
    let collection: RawCollection = serde_json::from_str(json)
        .map_err(|e| Error::feed(format!("not a GeoJSON feature collection: {e}")))?;

    let mut summary = FeedSummary {
        total: collection.features.len(),
        skipped: 0,
    };
    let mut quakes = Vec::with_capacity(summary.total);

    for (index, feature) in collection.features.iter().enumerate() {
        match parse_feature(feature) {
            Ok(quake) => quakes.push(quake),
            Err(reason) => {
                summary.skipped += 1;
                let id = feature.get("id").and_then(Value::as_str).unwrap_or("?");
                warn!(index, id, %reason, "Skipping malformed feature");
            }
        }
    }

    debug!(
        total = summary.total,
        skipped = summary.skipped,
        "Parsed feed"
    );
    Ok((quakes, summary))
}

/// Map one feature onto an [`Earthquake`], or say why it can't be.
fn parse_feature(feature: &Value) -> std::result::Result<Earthquake, String> {
    let properties = feature
        .get("properties")
        .and_then(Value::as_object)
        .ok_or("missing properties object")?;

    let magnitude = properties
        .get("mag")
        .and_then(Value::as_f64)
        .ok_or("missing or non-numeric mag")?;
    let place = required_str(properties, "place")?;
    let time = properties
        .get("time")
        .and_then(Value::as_i64)
        .ok_or("missing or non-integer time")?;
    let url = required_str(properties, "url")?;

    let mut quake = Earthquake::new(magnitude, place, time, url).map_err(|e| e.to_string())?;

    quake.id = feature.get("id").and_then(Value::as_str).map(str::to_owned);
    quake.felt = properties
        .get("felt")
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok());
    quake.tsunami = properties
        .get("tsunami")
        .and_then(Value::as_i64)
        .is_some_and(|flag| flag != 0);
    quake.depth_km = feature
        .get("geometry")
        .and_then(|g| g.get("coordinates"))
        .and_then(Value::as_array)
        .and_then(|coords| coords.get(2))
        .and_then(Value::as_f64);

    Ok(quake)
}

fn required_str<'a>(
    properties: &'a Map<String, Value>,
    key: &str,
) -> std::result::Result<&'a str, String> {
    properties
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing or non-string {key}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {"count": 2},
        "features": [
            {
                "type": "Feature",
                "id": "us60007idc",
                "properties": {
                    "mag": 6.6,
                    "place": "94 km ESE of Kuril'sk, Russia",
                    "time": 1584926000000,
                    "url": "https://earthquake.usgs.gov/earthquakes/eventpage/us60007idc",
                    "felt": 61,
                    "tsunami": 1
                },
                "geometry": {"type": "Point", "coordinates": [147.7, 44.9, 57.0]}
            },
            {
                "type": "Feature",
                "id": "us70007v9g",
                "properties": {
                    "mag": 5.4,
                    "place": "Zagreb, Croatia",
                    "time": 1584857000000,
                    "url": "https://earthquake.usgs.gov/earthquakes/eventpage/us70007v9g",
                    "felt": null,
                    "tsunami": 0
                },
                "geometry": {"type": "Point", "coordinates": [15.97, 45.89]}
            }
        ]
    }"#;

    #[test]
    fn test_parse_feed_maps_fields() {
        let quakes = parse_feed(SAMPLE_FEED).unwrap();
        assert_eq!(quakes.len(), 2);

        let first = &quakes[0];
        assert_eq!(first.id.as_deref(), Some("us60007idc"));
        assert!((first.magnitude - 6.6).abs() < f64::EPSILON);
        assert_eq!(first.place, "94 km ESE of Kuril'sk, Russia");
        assert_eq!(first.time_millis(), 1_584_926_000_000);
        assert_eq!(
            first.url,
            "https://earthquake.usgs.gov/earthquakes/eventpage/us60007idc"
        );
        assert_eq!(first.felt, Some(61));
        assert!(first.tsunami);
        assert_eq!(first.depth_km, Some(57.0));
    }

    #[test]
    fn test_parse_feed_preserves_order() {
        let quakes = parse_feed(SAMPLE_FEED).unwrap();
        assert_eq!(quakes[1].place, "Zagreb, Croatia");
    }

    #[test]
    fn test_optional_fields_absent_or_null() {
        let quakes = parse_feed(SAMPLE_FEED).unwrap();
        let second = &quakes[1];
        assert!(second.felt.is_none());
        assert!(!second.tsunami);
        assert!(second.depth_km.is_none());
    }

    #[test]
    fn test_integer_magnitude_accepted() {
        let json = r#"{"features": [{"properties":
            {"mag": 5, "place": "x", "time": 0, "url": "u"}}]}"#;
        let quakes = parse_feed(json).unwrap();
        assert!((quakes[0].magnitude - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_features_are_skipped() {
        let json = r#"{"features": [
            {"id": "nomag", "properties": {"mag": null, "place": "a", "time": 1, "url": "u"}},
            {"id": "noplace", "properties": {"mag": 5.0, "time": 1, "url": "u"}},
            {"id": "badtime", "properties": {"mag": 5.0, "place": "a", "time": "yesterday", "url": "u"}},
            {"id": "nourl", "properties": {"mag": 5.0, "place": "a", "time": 1}},
            {"id": "noprops"},
            "not even an object",
            {"id": "good", "properties": {"mag": 5.1, "place": "b", "time": 2, "url": "u"}}
        ]}"#;

        let (quakes, summary) = parse_feed_with_summary(json).unwrap();
        assert_eq!(quakes.len(), 1);
        assert_eq!(quakes[0].id.as_deref(), Some("good"));
        assert_eq!(summary.total, 7);
        assert_eq!(summary.skipped, 6);
        assert_eq!(summary.parsed(), 1);
    }

    #[test]
    fn test_empty_feature_list() {
        let (quakes, summary) = parse_feed_with_summary(r#"{"features": []}"#).unwrap();
        assert!(quakes.is_empty());
        assert_eq!(summary, FeedSummary::default());
    }

    #[test]
    fn test_missing_features_array_is_error() {
        let err = parse_feed(r#"{"type": "FeatureCollection"}"#).unwrap_err();
        assert!(matches!(err, Error::Feed { .. }));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = parse_feed("<html>Service Unavailable</html>").unwrap_err();
        assert!(err.to_string().contains("malformed feed"));
    }
}
