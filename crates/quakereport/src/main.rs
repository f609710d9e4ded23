//! `quakes` - CLI for quakereport
//!
//! This binary fetches earthquakes from the USGS feed (or a saved feed file)
//! and lists them in the terminal.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use quakereport::cli::{Cli, Command, ConfigCommand, ListCommand, UrlCommand};
use quakereport::{init_logging, load, Config, FileSource, QuakeSource, UsgsClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match cli.command {
        Command::List(list_cmd) => {
            let mut config = load_config(cli.config)?;
            handle_list(&mut config, &list_cmd).await
        }
        Command::Url(url_cmd) => {
            let mut config = load_config(cli.config)?;
            handle_url(&mut config, &url_cmd)
        }
        Command::Config(config_cmd) => handle_config(cli.config, config_cmd),
    }
}

/// Feed settings are only checked by the commands that use them.
fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    Config::read_from(path).context("loading configuration")
}

async fn handle_list(config: &mut Config, cmd: &ListCommand) -> anyhow::Result<()> {
    cmd.apply(config);

    let source: Box<dyn QuakeSource> = match &cmd.input {
        Some(path) => Box::new(FileSource::new(path)),
        None => {
            config.validate()?;
            let url = config.feed_query().to_url()?;
            Box::new(UsgsClient::new(
                url,
                config.timeout(),
                &config.feed.user_agent,
            )?)
        }
    };

    let quakes = load(source.as_ref())
        .await
        .with_context(|| format!("loading earthquakes from {}", source.name()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    config.renderer().render(&quakes, &mut out)?;
    out.flush()?;
    Ok(())
}

fn handle_url(config: &mut Config, cmd: &UrlCommand) -> anyhow::Result<()> {
    cmd.query.apply(config);
    println!("{}", config.feed_query().to_url()?);
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print_config(&config);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => anyhow::bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn print_config(config: &Config) {
    let optional = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

    println!("Current Configuration");
    println!("=====================");
    println!();
    println!("[Feed]");
    println!("  Base URL:           {}", config.feed.base_url);
    println!("  Start date:         {}", config.feed.start_time);
    println!("  End date:           {}", config.feed.end_time);
    println!(
        "  Min magnitude:      {}",
        optional(config.feed.min_magnitude.map(|m| m.to_string()))
    );
    println!(
        "  Min felt reports:   {}",
        optional(config.feed.min_felt.map(|n| n.to_string()))
    );
    println!(
        "  Limit:              {}",
        optional(config.feed.limit.map(|n| n.to_string()))
    );
    println!(
        "  Order by:           {}",
        optional(config.feed.order_by.map(|o| o.to_string()))
    );
    println!("  Timeout (secs):     {}", config.feed.timeout_secs);
    println!();
    println!("[Display]");
    println!("  Format:             {:?}", config.display.format);
    println!("  Color:              {}", config.display.color);
    println!("  UTC:                {}", config.display.utc);
    println!("  Show URLs:          {}", config.display.show_urls);
}
