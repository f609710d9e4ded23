//! USGS event query construction.

use chrono::NaiveDate;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The USGS FDSN event query endpoint.
pub const USGS_QUERY_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Sort order understood by the event service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderBy {
    /// Newest first.
    Time,
    /// Oldest first.
    TimeAsc,
    /// Largest first.
    Magnitude,
    /// Smallest first.
    MagnitudeAsc,
}

impl OrderBy {
    /// The value the service expects for the `orderby` parameter.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::TimeAsc => "time-asc",
            Self::Magnitude => "magnitude",
            Self::MagnitudeAsc => "magnitude-asc",
        }
    }
}

impl std::fmt::Display for OrderBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a single feed request.
///
/// The defaults select the felt magnitude 5+ events of the first quarter of
/// 2020.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedQuery {
    /// Query endpoint.
    pub base_url: String,
    /// First day of the window (inclusive).
    pub start_time: NaiveDate,
    /// Last day of the window.
    pub end_time: NaiveDate,
    /// Minimum number of felt reports.
    pub min_felt: Option<u32>,
    /// Minimum magnitude.
    pub min_magnitude: Option<f64>,
    /// Maximum number of events returned.
    pub limit: Option<u32>,
    /// Sort order; the service defaults to newest first.
    pub order_by: Option<OrderBy>,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            base_url: USGS_QUERY_URL.to_string(),
            start_time: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            end_time: NaiveDate::from_ymd_opt(2020, 4, 2).unwrap_or_default(),
            min_felt: Some(50),
            min_magnitude: Some(5.0),
            limit: None,
            order_by: None,
        }
    }
}

impl FeedQuery {
    /// Check the query for values the service would reject.
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted date window or a negative magnitude.
    pub fn validate(&self) -> Result<()> {
        if self.start_time > self.end_time {
            return Err(Error::query(format!(
                "start_time ({}) is after end_time ({})",
                self.start_time, self.end_time
            )));
        }
        if let Some(min) = self.min_magnitude {
            if !min.is_finite() || min < 0.0 {
                return Err(Error::query(format!(
                    "min_magnitude must be a non-negative number, got {min}"
                )));
            }
        }
        if self.limit == Some(0) {
            return Err(Error::query("limit must be greater than 0"));
        }
        Ok(())
    }

    /// Build the request URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the query is invalid or the base URL can't be parsed.
    pub fn to_url(&self) -> Result<Url> {
        self.validate()?;

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::query(format!("invalid base_url {:?}: {e}", self.base_url)))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("format", "geojson");
            pairs.append_pair("starttime", &self.start_time.to_string());
            pairs.append_pair("endtime", &self.end_time.to_string());
            if let Some(min_felt) = self.min_felt {
                pairs.append_pair("minfelt", &min_felt.to_string());
            }
            if let Some(min_magnitude) = self.min_magnitude {
                pairs.append_pair("minmagnitude", &min_magnitude.to_string());
            }
            if let Some(limit) = self.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
            if let Some(order_by) = self.order_by {
                pairs.append_pair("orderby", order_by.as_str());
            }
        }

        Ok(url)
    }
}
