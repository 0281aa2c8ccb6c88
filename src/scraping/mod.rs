pub mod base;
pub mod ticketing_html;

use crate::models::RawFixture;

pub use ticketing_html::TicketingPage;

/// Anything that can produce the raw fixture records for one sync run.
pub trait FixtureSource {
    fn source_url(&self) -> &str;
    fn fetch(&self) -> anyhow::Result<Vec<RawFixture>>;
}
