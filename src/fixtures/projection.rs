use chrono::Duration;

use super::FixtureError;
use crate::models::{CalendarEvent, EligibleFixture};

const CLUB_NAME: &str = "Brentford";

/// Builds the calendar entry for a fixture's chosen on-sale window.
///
/// The event starts when tickets go on sale and lasts one hour; its
/// `source_id` is the window's event id so repeated syncs update in place.
pub fn project_event(fixture: &EligibleFixture) -> Result<CalendarEvent, FixtureError> {
    let general = &fixture.general;
    let window = fixture
        .chosen
        .as_ref()
        .ok_or_else(|| FixtureError::NoEligibleWindow {
            title: general.title.clone(),
        })?;

    let opposition = &general.opposition_name;
    let (location, match_line) = if general.is_home_fixture {
        ("H", format!("Match: {CLUB_NAME} vs {opposition}"))
    } else {
        ("A", format!("Match: {opposition} vs {CLUB_NAME}"))
    };

    let buy_url = general.buy_now_link.url.as_str();
    let mut lines = vec![
        match_line,
        format!("Date: {}", general.fixture_date.format("%Y-%m-%d %H:%M")),
        format!("Competition: {}", general.competition),
        String::new(),
        format!("Membership: {}", window.membership_tier.display_label()),
        format!("Minimum Points: {}", window.minimum_points),
    ];
    if !buy_url.is_empty() {
        lines.push(String::new());
        lines.push(format!("Buy tickets: {buy_url}"));
    }

    let start = window.on_sale_date;
    Ok(CalendarEvent {
        summary: format!("{opposition} ({location}) - Tickets On Sale"),
        description: lines.join("\n"),
        start,
        end: start + Duration::hours(1),
        source_id: window.event_id.clone(),
        url: (!buy_url.is_empty()).then(|| buy_url.to_string()),
    })
}
