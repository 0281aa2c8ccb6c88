pub mod calendar;
mod cli;
pub mod config;
pub mod fixtures;
pub mod models;
pub mod scraping;
mod utils;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use models::{EligibleFixture, MembershipTier};
use scraping::FixtureSource;

pub use fixtures::{onsale_fixtures, FixtureError};

/// Fetches the fixtures from `source` and keeps those the given membership
/// and TAPs balance can buy, each with its earliest eligible window.
pub fn fetch_onsale_fixtures(
    source: &dyn FixtureSource,
    tier: MembershipTier,
    points: u32,
) -> anyhow::Result<Vec<EligibleFixture>> {
    let raw = source
        .fetch()
        .with_context(|| format!("failed to fetch fixtures from {}", source.source_url()))?;
    tracing::info!(count = raw.len(), "found raw fixtures");

    let onsale = onsale_fixtures(&raw, tier, points)?;
    tracing::info!(
        count = onsale.len(),
        "found fixtures with eligible on-sale dates"
    );
    Ok(onsale)
}

pub fn run() -> ExitCode {
    let cli = cli::Cli::parse();
    cli::init_tracing(cli.verbose);

    match cli::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("failed to process fixtures: {err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
