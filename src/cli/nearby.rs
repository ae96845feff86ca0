//! Nearby command handler
//!
//! Runs a nearby search against the configured catalog and prints it.

use crate::catalog::open_catalog;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, NearbyReport};
use crate::nearby::{find_nearby, NearbyQuery, RankingMode};
use crate::present::{present_all, MediaResolver};
use chrono::Utc;
use clap::Args;
use std::str::FromStr;

/// Origin used for media URLs when neither flag nor config provides one
const CLI_MEDIA_ORIGIN: &str = "http://localhost";

/// Nearby command arguments
#[derive(Args)]
pub struct NearbyArgs {
    /// Latitude of the query point
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,

    /// Longitude of the query point
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<String>,

    /// Ranking mode: nearest_first or top_rated
    #[arg(long, short = 'm', default_value = "nearest_first")]
    pub mode: String,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// JSON catalog file (overrides config)
    #[arg(long, short = 'c')]
    pub catalog: Option<String>,

    /// Origin for media URLs (e.g. https://travel.example)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the nearby command
pub async fn run(args: NearbyArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    // Validate before touching config or catalog
    let query = NearbyQuery::parse(args.lat.as_deref(), args.lon.as_deref())?;

    let mode = RankingMode::from_str(&args.mode).map_err(Error::Config)?;

    let formatter = get_formatter(&args.format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", args.format)))?;

    let mut config = Config::load()?;
    if let Some(path) = args.catalog {
        config.catalog.path = Some(path);
    }

    let catalog = open_catalog(&config);
    let outcome = find_nearby(catalog.as_ref(), &query, mode)?;

    let origin = args
        .base_url
        .or(config.media.public_base_url.clone())
        .unwrap_or_else(|| CLI_MEDIA_ORIGIN.to_string());
    let media = MediaResolver::new(origin, config.media.prefix.clone());

    let report = NearbyReport {
        origin: query.origin,
        mode,
        scanned: outcome.scanned,
        skipped: outcome.skipped(),
        results: present_all(&outcome.matches, &media),
        generated_at: Utc::now(),
    };

    let output = formatter.format(&report)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
