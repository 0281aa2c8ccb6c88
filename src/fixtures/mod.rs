pub mod categorize;
pub mod eligibility;
pub mod label;
pub mod projection;

use thiserror::Error;

use crate::models::{EligibleFixture, MembershipTier, RawFixture};

pub use categorize::categorize;
pub use eligibility::select_window;
pub use label::parse_label;
pub use projection::project_event;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixtureError {
    #[error("category label is empty")]
    EmptyLabel,
    #[error("unknown membership label: {label:?}")]
    UnknownMembershipLabel { label: String },
    #[error("malformed fixture data: {detail}")]
    MalformedSourceData { detail: String },
    #[error("no eligible on-sale window for fixture {title:?}")]
    NoEligibleWindow { title: String },
}

/// Runs every raw fixture through categorization and eligibility filtering.
///
/// Output keeps the source order. Fixtures without a window the user can buy in
/// are left out entirely; any label that cannot be parsed aborts the whole run.
pub fn onsale_fixtures(
    raw: &[RawFixture],
    tier: MembershipTier,
    points: u32,
) -> Result<Vec<EligibleFixture>, FixtureError> {
    let mut onsale = Vec::new();
    for fixture in raw {
        let categorized = categorize(fixture)?;
        let eligible = select_window(&categorized, tier, points);
        let Some(window) = &eligible.chosen else {
            tracing::debug!(fixture = %eligible.general.title, "no eligible window, dropping");
            continue;
        };
        tracing::debug!(
            fixture = %eligible.general.title,
            event_id = %window.event_id,
            on_sale = %window.on_sale_date,
            "eligible window selected"
        );
        onsale.push(eligible);
    }
    Ok(onsale)
}
