pub mod google;
pub mod memory;

use serde::Serialize;
use thiserror::Error;

use crate::fixtures::{project_event, FixtureError};
use crate::models::{CalendarEvent, EligibleFixture};

pub use google::GoogleCalendar;
pub use memory::MemoryCalendar;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("missing calendar access token")]
    MissingToken,
    #[error("no calendar id configured")]
    MissingCalendarId,
    #[error("http error: {0}")]
    Http(String),
    #[error("calendar api error: {0}")]
    Api(String),
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

/// A calendar that can create-or-update events keyed by `source_id`.
pub trait CalendarClient {
    /// Returns `true` when a new event was created, `false` when an existing
    /// event with the same `source_id` was updated.
    fn upsert_event(&self, event: &CalendarEvent) -> Result<bool, CalendarError>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
}

/// Projects every fixture and upserts it, one at a time, in order.
pub fn sync_events(
    client: &dyn CalendarClient,
    fixtures: &[EligibleFixture],
) -> Result<SyncReport, CalendarError> {
    let mut report = SyncReport::default();
    for fixture in fixtures {
        let event = project_event(fixture)?;
        if client.upsert_event(&event)? {
            report.created += 1;
        } else {
            report.updated += 1;
        }
    }
    tracing::info!(
        created = report.created,
        updated = report.updated,
        "calendar sync finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test_support::*;
    use crate::models::{MembershipTier, SaleWindow};

    fn eligible(opposition: &str, event_id: &str) -> EligibleFixture {
        EligibleFixture {
            general: general(opposition, true),
            chosen: Some(SaleWindow {
                membership_tier: MembershipTier::Members,
                minimum_points: 0,
                on_sale_date: at(10, 13),
                event_id: event_id.to_string(),
            }),
        }
    }

    #[test]
    fn second_sync_updates_instead_of_creating() {
        let calendar = MemoryCalendar::default();
        let fixtures = vec![eligible("Wolves", "W1"), eligible("Burnley", "B1")];

        let first = sync_events(&calendar, &fixtures).expect("first sync");
        assert_eq!(first, SyncReport { created: 2, updated: 0 });

        let second = sync_events(&calendar, &fixtures).expect("second sync");
        assert_eq!(second, SyncReport { created: 0, updated: 2 });
        assert_eq!(calendar.events().len(), 2);
    }

    #[test]
    fn fixture_without_window_aborts_sync() {
        let calendar = MemoryCalendar::default();
        let mut broken = eligible("Wolves", "W1");
        broken.chosen = None;
        let err = sync_events(&calendar, &[broken]).expect_err("no window");
        assert!(matches!(
            err,
            CalendarError::Fixture(FixtureError::NoEligibleWindow { .. })
        ));
        assert!(calendar.events().is_empty());
    }
}
