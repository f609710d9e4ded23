//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::config::Config;
use crate::query::OrderBy;
use crate::render::OutputFormat;

/// Feed query overrides shared by `list` and `url`.
#[derive(Debug, Default, Args)]
pub struct QueryArgs {
    /// First day of the window (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: Option<NaiveDate>,

    /// Last day of the window (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: Option<NaiveDate>,

    /// Minimum magnitude
    #[arg(short = 'm', long, value_name = "MAG")]
    pub min_magnitude: Option<f64>,

    /// Minimum number of felt reports
    #[arg(long, value_name = "N")]
    pub min_felt: Option<u32>,

    /// Maximum number of earthquakes
    #[arg(short = 'n', long)]
    pub limit: Option<u32>,

    /// Sort order
    #[arg(long, value_enum)]
    pub order_by: Option<OrderByArg>,
}

impl QueryArgs {
    /// Apply the given flags on top of the `[feed]` configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(start) = self.start {
            config.feed.start_time = start;
        }
        if let Some(end) = self.end {
            config.feed.end_time = end;
        }
        if let Some(min_magnitude) = self.min_magnitude {
            config.feed.min_magnitude = Some(min_magnitude);
        }
        if let Some(min_felt) = self.min_felt {
            config.feed.min_felt = Some(min_felt);
        }
        if let Some(limit) = self.limit {
            config.feed.limit = Some(limit);
        }
        if let Some(order_by) = self.order_by {
            config.feed.order_by = Some(order_by.into());
        }
    }
}

/// List command arguments.
#[derive(Debug, Default, Args)]
pub struct ListCommand {
    /// Query overrides.
    #[command(flatten)]
    pub query: QueryArgs,

    /// Read a saved GeoJSON feed instead of querying USGS
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Don't color magnitude badges
    #[arg(long)]
    pub no_color: bool,

    /// Show dates and times in UTC
    #[arg(long)]
    pub utc: bool,

    /// Print each event page URL
    #[arg(long)]
    pub urls: bool,
}

impl ListCommand {
    /// Apply the given flags on top of the configuration.
    pub fn apply(&self, config: &mut Config) {
        self.query.apply(config);
        if let Some(format) = self.format {
            config.display.format = format.into();
        }
        if self.no_color {
            config.display.color = false;
        }
        if self.utc {
            config.display.utc = true;
        }
        if self.urls {
            config.display.show_urls = true;
        }
    }
}

/// Url command arguments.
#[derive(Debug, Default, Args)]
pub struct UrlCommand {
    /// Query overrides.
    #[command(flatten)]
    pub query: QueryArgs,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Sort order argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderByArg {
    /// Newest first
    Time,
    /// Oldest first
    TimeAsc,
    /// Largest first
    Magnitude,
    /// Smallest first
    MagnitudeAsc,
}

impl From<OrderByArg> for OrderBy {
    fn from(arg: OrderByArg) -> Self {
        match arg {
            OrderByArg::Time => Self::Time,
            OrderByArg::TimeAsc => Self::TimeAsc,
            OrderByArg::Magnitude => Self::Magnitude,
            OrderByArg::MagnitudeAsc => Self::MagnitudeAsc,
        }
    }
}

/// Output format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Two lines per earthquake
    Plain,
    /// Aligned table
    Table,
    /// JSON output
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => Self::Plain,
            FormatArg::Table => Self::Table,
            FormatArg::Json => Self::Json,
        }
    }
}
