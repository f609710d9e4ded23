//! `quakereport` - Significant earthquakes from the USGS GeoJSON feed
//!
//! This library fetches a list of earthquake events, reduces each GeoJSON
//! feature to an [`Earthquake`], and formats the list for a terminal.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod earthquake;
pub mod error;
pub mod feed;
pub mod logging;
pub mod present;
pub mod query;
pub mod render;
pub mod source;

pub use config::Config;
pub use earthquake::Earthquake;
pub use error::{Error, Result};
pub use feed::{parse_feed, FeedSummary};
pub use logging::init_logging;
pub use present::{DisplayZone, MagnitudeColor, QuakeRow};
pub use query::{FeedQuery, OrderBy};
pub use render::{OutputFormat, Renderer};
pub use source::{load, FileSource, QuakeSource, UsgsClient};
