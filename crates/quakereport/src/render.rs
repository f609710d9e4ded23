//! Terminal rendering of the earthquake list.

use std::io::Write;

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::earthquake::Earthquake;
use crate::error::Result;
use crate::present::{DisplayZone, QuakeRow};

/// Text shown in place of an empty list.
pub const EMPTY_STATE: &str = "No earthquakes found.";

/// Output format for the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Two lines per earthquake, badge first.
    #[default]
    Plain,
    /// One aligned line per earthquake under a header.
    Table,
    /// JSON array of earthquake records.
    Json,
}

/// Renders earthquakes to a writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    /// Output format.
    pub format: OutputFormat,
    /// Paint magnitude badges with their bucket color.
    pub color: bool,
    /// Print each event page URL.
    pub show_urls: bool,
    /// Zone for dates and times.
    pub zone: DisplayZone,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            format: OutputFormat::Plain,
            color: true,
            show_urls: false,
            zone: DisplayZone::Local,
        }
    }
}

impl Renderer {
    /// Write the list in the configured format.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or JSON serialization fails.
    pub fn render<W: Write>(&self, quakes: &[Earthquake], out: &mut W) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, quakes)?;
                writeln!(out)?;
                Ok(())
            }
            _ if quakes.is_empty() => {
                writeln!(out, "{EMPTY_STATE}")?;
                Ok(())
            }
            OutputFormat::Plain => self.render_plain(&self.rows(quakes), out),
            OutputFormat::Table => self.render_table(&self.rows(quakes), out),
        }
    }

    fn rows(&self, quakes: &[Earthquake]) -> Vec<QuakeRow> {
        quakes
            .iter()
            .map(|quake| QuakeRow::from_earthquake(quake, self.zone))
            .collect()
    }

    /// Whether badges are actually painted. `colored` turns itself off when
    /// stdout is not a terminal or `NO_COLOR` is set.
    fn paints_badges(&self) -> bool {
        self.color && colored::control::SHOULD_COLORIZE.should_colorize()
    }

    /// Printed width of a badge.
    fn badge_width(&self) -> usize {
        if self.paints_badges() {
            6
        } else {
            7
        }
    }

    fn badge(&self, row: &QuakeRow) -> String {
        let text = format!(" {:>4} ", row.magnitude);
        if self.paints_badges() {
            let (r, g, b) = row.color.rgb();
            text.white().bold().on_truecolor(r, g, b).to_string()
        } else {
            format!("[{}]", text.trim_end())
        }
    }

    fn render_plain<W: Write>(&self, rows: &[QuakeRow], out: &mut W) -> Result<()> {
        let place_width = rows
            .iter()
            .map(|row| {
                let offset = row.offset.to_uppercase().chars().count();
                offset.max(row.primary.chars().count())
            })
            .max()
            .unwrap_or(0);
        let stamp_width = rows
            .iter()
            .map(|row| row.date.len().max(row.time.len()))
            .max()
            .unwrap_or(0);

        for row in rows {
            let badge = self.badge(row);
            let indent = " ".repeat(self.badge_width());
            writeln!(
                out,
                "{badge}  {:<place_width$}  {:>stamp_width$}",
                row.offset.to_uppercase(),
                row.date
            )?;
            writeln!(
                out,
                "{indent}  {:<place_width$}  {:>stamp_width$}",
                row.primary, row.time
            )?;
            if self.show_urls {
                writeln!(out, "{indent}  {}", row.url)?;
            }
        }
        Ok(())
    }

    fn render_table<W: Write>(&self, rows: &[QuakeRow], out: &mut W) -> Result<()> {
        let offset_width = column_width("OFFSET", rows.iter().map(|r| r.offset.as_str()));
        let primary_width = column_width("LOCATION", rows.iter().map(|r| r.primary.as_str()));
        let date_width = column_width("DATE", rows.iter().map(|r| r.date.as_str()));

        let badge_width = self.badge_width();

        write!(
            out,
            "{:<badge_width$}  {:<offset_width$}  {:<primary_width$}  {:<date_width$}  {:>8}",
            "MAG", "OFFSET", "LOCATION", "DATE", "TIME"
        )?;
        if self.show_urls {
            write!(out, "  URL")?;
        }
        writeln!(out)?;

        for row in rows {
            let badge = self.badge(row);
            write!(
                out,
                "{badge}  {:<offset_width$}  {:<primary_width$}  {:<date_width$}  {:>8}",
                row.offset, row.primary, row.date, row.time
            )?;
            if self.show_urls {
                write!(out, "  {}", row.url)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}
