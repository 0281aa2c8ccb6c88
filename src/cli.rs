use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::calendar::{self, CalendarClient, GoogleCalendar, MemoryCalendar};
use crate::config::AppConfig;
use crate::models::{EligibleFixture, MembershipTier};
use crate::scraping::TicketingPage;

#[derive(Debug, Parser)]
#[command(
    name = "brentford-calendar",
    version,
    about = "Sync Brentford FC ticket on-sale dates to Google Calendar"
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct Membership {
    /// Membership type: SEASON_TICKET, MY_BEES_MEMBERS or MEMBERS
    #[arg(long)]
    pub membership: MembershipTier,

    /// Number of TAPs you have
    #[arg(long, default_value_t = 0)]
    pub taps: u32,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the fixtures you can buy tickets for as JSON
    List {
        #[command(flatten)]
        membership: Membership,
    },
    /// Create or update one calendar event per eligible fixture
    Sync {
        #[command(flatten)]
        membership: Membership,

        /// Google Calendar id, overrides the config file
        #[arg(long)]
        calendar_id: Option<String>,

        /// Project events without touching the calendar
        #[arg(long)]
        dry_run: bool,
    },
}

pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub fn execute(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load config")?;

    match cli.command {
        Command::List { membership } => {
            let fixtures = fetch(&config, &membership)?;
            println!("{}", serde_json::to_string_pretty(&fixtures)?);
        }
        Command::Sync {
            membership,
            calendar_id,
            dry_run,
        } => {
            if calendar_id.is_some() {
                config.calendar_id = calendar_id;
            }
            let fixtures = fetch(&config, &membership)?;
            if dry_run {
                let memory = MemoryCalendar::default();
                let report = sync(&memory, &fixtures)?;
                println!("{}", serde_json::to_string_pretty(&memory.events())?);
                eprintln!("dry run: {} to create, {} to update", report.created, report.updated);
            } else {
                let google = GoogleCalendar::from_config(&config)
                    .context("calendar configuration error")?;
                let report = sync(&google, &fixtures)?;
                println!(
                    "Synced {} fixtures to {}: {} created, {} updated",
                    fixtures.len(),
                    google.calendar_id(),
                    report.created,
                    report.updated
                );
            }
        }
    }
    Ok(())
}

fn fetch(config: &AppConfig, membership: &Membership) -> Result<Vec<EligibleFixture>> {
    let page = TicketingPage::new(config.ticketing_url(), config.http_timeout());
    tracing::info!(
        membership = %membership.membership,
        taps = membership.taps,
        "filtering fixtures"
    );
    crate::fetch_onsale_fixtures(&page, membership.membership, membership.taps)
}

fn sync(client: &dyn CalendarClient, fixtures: &[EligibleFixture]) -> Result<calendar::SyncReport> {
    calendar::sync_events(client, fixtures).context("calendar sync failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_command() {
        let cli = Cli::try_parse_from([
            "brentford-calendar",
            "-vv",
            "list",
            "--membership",
            "my_bees_members",
            "--taps",
            "400",
        ])
        .expect("parse args");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::List { membership } => {
                assert_eq!(membership.membership, MembershipTier::MyBeesMembers);
                assert_eq!(membership.taps, 400);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_sync_command_with_defaults() {
        let cli = Cli::try_parse_from([
            "brentford-calendar",
            "sync",
            "--membership",
            "SEASON_TICKET",
            "--dry-run",
            "--config",
            "/tmp/config.json",
        ])
        .expect("parse args");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.json")));
        match cli.command {
            Command::Sync {
                membership,
                calendar_id,
                dry_run,
            } => {
                assert_eq!(membership.membership, MembershipTier::SeasonTicket);
                assert_eq!(membership.taps, 0);
                assert_eq!(calendar_id, None);
                assert!(dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn membership_is_required() {
        assert!(Cli::try_parse_from(["brentford-calendar", "list"]).is_err());
    }

    #[test]
    fn rejects_unknown_membership() {
        assert!(
            Cli::try_parse_from(["brentford-calendar", "list", "--membership", "gold"]).is_err()
        );
    }
}
