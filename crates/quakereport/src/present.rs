//! Presentation helpers: the strings and colors one list row is built from.

use std::fmt::Display;
use std::sync::OnceLock;

use chrono::{DateTime, Local, TimeZone};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::earthquake::Earthquake;

/// Offset text shown when the place has no "X of Y" form.
pub const NEAR_THE: &str = "Near the";

/// Badge color for a magnitude bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagnitudeColor {
    /// Magnitude below 2.
    Magnitude1,
    /// Magnitude 2 up to 3.
    Magnitude2,
    /// Magnitude 3 up to 4.
    Magnitude3,
    /// Magnitude 4 up to 5.
    Magnitude4,
    /// Magnitude 5 up to 6.
    Magnitude5,
    /// Magnitude 6 up to 7.
    Magnitude6,
    /// Magnitude 7 up to 8.
    Magnitude7,
    /// Magnitude 8 up to 9.
    Magnitude8,
    /// Magnitude 9 up to 10.
    Magnitude9,
    /// Magnitude 10 and above.
    Magnitude10Plus,
}

impl MagnitudeColor {
    /// The color as red, green, blue components.
    #[must_use]
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Magnitude1 => (0x4A, 0x7B, 0xA7),
            Self::Magnitude2 => (0x04, 0xB4, 0xB3),
            Self::Magnitude3 => (0x10, 0xCA, 0xC9),
            Self::Magnitude4 => (0xF5, 0xA6, 0x23),
            Self::Magnitude5 => (0xFF, 0x7D, 0x50),
            Self::Magnitude6 => (0xFC, 0x66, 0x44),
            Self::Magnitude7 => (0xE7, 0x5F, 0x40),
            Self::Magnitude8 => (0xE1, 0x3A, 0x20),
            Self::Magnitude9 => (0xD9, 0x32, 0x18),
            Self::Magnitude10Plus => (0xC0, 0x38, 0x23),
        }
    }

    /// The color as a `#RRGGBB` string.
    #[must_use]
    pub fn hex(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

/// Pick the badge color for a magnitude.
///
/// Buckets by the floor of the magnitude. Values below 2 (negative
/// magnitudes included) share the first bucket.
#[must_use]
pub fn magnitude_color(magnitude: f64) -> MagnitudeColor {
    // Saturating cast; NaN lands in bucket 0.
    #[allow(clippy::cast_possible_truncation)]
    let floor = magnitude.floor() as i64;
    match floor {
        i64::MIN..=1 => MagnitudeColor::Magnitude1,
        2 => MagnitudeColor::Magnitude2,
        3 => MagnitudeColor::Magnitude3,
        4 => MagnitudeColor::Magnitude4,
        5 => MagnitudeColor::Magnitude5,
        6 => MagnitudeColor::Magnitude6,
        7 => MagnitudeColor::Magnitude7,
        8 => MagnitudeColor::Magnitude8,
        9 => MagnitudeColor::Magnitude9,
        _ => MagnitudeColor::Magnitude10Plus,
    }
}

/// Format a magnitude with exactly one decimal digit.
#[must_use]
pub fn format_magnitude(magnitude: f64) -> String {
    format!("{magnitude:.1}")
}

/// A place split into its offset ("88 km N of") and primary ("Lae, Papua New Guinea") parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationParts {
    /// Distance and direction from the primary location.
    pub offset: String,
    /// The named location.
    pub primary: String,
}

fn offset_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<offset>.*?\bof)\s(?P<primary>.+)$").expect("valid location pattern")
    })
}

/// Split a place string on its first "of".
///
/// Only the whole word `of` followed by whitespace splits, so a name such as
/// "Sofia, Bulgaria" stays intact. Places without one (or with nothing after
/// it) get [`NEAR_THE`] as the offset and keep the whole string as the
/// primary location.
#[must_use]
pub fn split_location(place: &str) -> LocationParts {
    match offset_pattern().captures(place) {
        Some(caps) => LocationParts {
            offset: caps["offset"].to_string(),
            primary: caps["primary"].to_string(),
        },
        None => LocationParts {
            offset: NEAR_THE.to_string(),
            primary: place.to_string(),
        },
    }
}

/// Format a date like `Mar 3, 1984`.
#[must_use]
pub fn format_date<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format("%b %-d, %Y").to_string()
}

/// Format a time of day like `4:30 PM`.
#[must_use]
pub fn format_time<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format("%-I:%M %p").to_string()
}

/// Time zone dates and times are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayZone {
    /// The machine's local zone.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
}

/// Every formatted field of one list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuakeRow {
    /// Magnitude with one decimal digit.
    pub magnitude: String,
    /// Badge color.
    pub color: MagnitudeColor,
    /// Location offset, e.g. "88 km N of".
    pub offset: String,
    /// Primary location.
    pub primary: String,
    /// Event date.
    pub date: String,
    /// Event time of day.
    pub time: String,
    /// Event page.
    pub url: String,
}

impl QuakeRow {
    /// Format an earthquake for display.
    #[must_use]
    pub fn from_earthquake(quake: &Earthquake, zone: DisplayZone) -> Self {
        let LocationParts { offset, primary } = split_location(&quake.place);
        let (date, time) = match zone {
            DisplayZone::Utc => date_and_time(&quake.time),
            DisplayZone::Local => date_and_time(&quake.time.with_timezone(&Local)),
        };

        Self {
            magnitude: format_magnitude(quake.magnitude),
            color: magnitude_color(quake.magnitude),
            offset,
            primary,
            date,
            time,
            url: quake.url.clone(),
        }
    }
}

fn date_and_time<Tz>(time: &DateTime<Tz>) -> (String, String)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    (format_date(time), format_time(time))
}
