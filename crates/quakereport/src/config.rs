//! Configuration management for quakereport.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::present::DisplayZone;
use crate::query::{FeedQuery, OrderBy, USGS_QUERY_URL};
use crate::render::{OutputFormat, Renderer};
use crate::source::DEFAULT_USER_AGENT;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "quakereport";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `QUAKEREPORT_`, sections split on `__`)
/// 2. TOML config file at `~/.config/quakereport/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed request configuration.
    pub feed: FeedConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

/// Feed request configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Event query endpoint.
    pub base_url: String,
    /// First day of the query window.
    pub start_time: NaiveDate,
    /// Last day of the query window.
    pub end_time: NaiveDate,
    /// Minimum number of felt reports.
    pub min_felt: Option<u32>,
    /// Minimum magnitude.
    pub min_magnitude: Option<f64>,
    /// Maximum number of events.
    pub limit: Option<u32>,
    /// Sort order.
    pub order_by: Option<OrderBy>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent with the request.
    pub user_agent: String,
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Output format.
    pub format: OutputFormat,
    /// Color magnitude badges.
    pub color: bool,
    /// Show dates and times in UTC instead of local time.
    pub utc: bool,
    /// Print event page URLs.
    pub show_urls: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        let query = FeedQuery::default();
        Self {
            base_url: USGS_QUERY_URL.to_string(),
            start_time: query.start_time,
            end_time: query.end_time,
            min_felt: query.min_felt,
            min_magnitude: query.min_magnitude,
            limit: query.limit,
            order_by: query.order_by,
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Plain,
            color: true,
            utc: false,
            show_urls: false,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load and validate configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing, or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config = Self::read_from(config_path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration without validating it.
    ///
    /// A missing file at the default path means "use defaults"; a custom
    /// path must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom path does not exist or parsing fails.
    pub fn read_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = match config_path {
            Some(path) if !path.exists() => return Err(Error::ConfigNotFound { path }),
            Some(path) => path,
            None => Self::default_config_path(),
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("QUAKEREPORT_").split("__"));

        Ok(figment.extract()?)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.feed.timeout_secs == 0 {
            return Err(Error::config_validation(
                "timeout_secs must be greater than 0",
            ));
        }

        if self.feed.user_agent.trim().is_empty() {
            return Err(Error::config_validation("user_agent must not be empty"));
        }

        // Reuse the query's own checks so the two never disagree.
        self.feed_query()
            .to_url()
            .map_err(|e| Error::config_validation(e.to_string()))?;

        Ok(())
    }

    /// Build the feed query described by the `[feed]` section.
    #[must_use]
    pub fn feed_query(&self) -> FeedQuery {
        FeedQuery {
            base_url: self.feed.base_url.clone(),
            start_time: self.feed.start_time,
            end_time: self.feed.end_time,
            min_felt: self.feed.min_felt,
            min_magnitude: self.feed.min_magnitude,
            limit: self.feed.limit,
            order_by: self.feed.order_by,
        }
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.feed.timeout_secs)
    }

    /// Get the zone dates and times are displayed in.
    #[must_use]
    pub fn display_zone(&self) -> DisplayZone {
        if self.display.utc {
            DisplayZone::Utc
        } else {
            DisplayZone::Local
        }
    }

    /// Build the renderer described by the `[display]` section.
    #[must_use]
    pub fn renderer(&self) -> Renderer {
        Renderer {
            format: self.display.format,
            color: self.display.color,
            show_urls: self.display.show_urls,
            zone: self.display_zone(),
        }
    }
}
