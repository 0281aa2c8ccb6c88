use super::{parse_label, FixtureError};
use crate::models::{CategorizedFixture, RawFixture, SaleWindow};

/// Turns the four category slots of a fixture into sale windows, in slot order.
pub fn categorize(fixture: &RawFixture) -> Result<CategorizedFixture, FixtureError> {
    let mut windows = Vec::with_capacity(fixture.slots.len());
    for slot in &fixture.slots {
        if slot.is_empty() {
            continue;
        }
        let (membership_tier, minimum_points) = parse_label(&slot.label)?;
        windows.push(SaleWindow {
            membership_tier,
            minimum_points,
            on_sale_date: slot.on_sale_date,
            event_id: slot.event_id.clone(),
        });
    }
    Ok(CategorizedFixture {
        general: fixture.general.clone(),
        windows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test_support::*;
    use crate::models::MembershipTier;

    #[test]
    fn keeps_slot_order() {
        let fixture = fixture(
            "Chelsea",
            true,
            [
                slot("Members", at(20, 9), "late"),
                slot("My Bees Members", at(10, 9), "early"),
                slot("Season Ticket Holders", at(5, 9), "earliest"),
                slot("Members", at(20, 9), "late"),
            ],
        );
        let categorized = categorize(&fixture).expect("categorize");
        let ids: Vec<_> = categorized
            .windows
            .iter()
            .map(|w| w.event_id.as_str())
            .collect();
        assert_eq!(ids, vec!["late", "early", "earliest", "late"]);
        assert_eq!(categorized.general, fixture.general);
    }

    #[test]
    fn skips_slot_with_empty_label_or_event_id() {
        let fixture = fixture(
            "Everton",
            false,
            [
                slot("", at(1, 9), "no-label"),
                slot("My Bees Members", at(2, 9), ""),
                slot("Members with 100+ TAPs", at(3, 9), "kept"),
                empty_slot(),
            ],
        );
        let categorized = categorize(&fixture).expect("categorize");
        assert_eq!(
            categorized.windows,
            vec![SaleWindow {
                membership_tier: MembershipTier::Members,
                minimum_points: 100,
                on_sale_date: at(3, 9),
                event_id: "kept".to_string(),
            }]
        );
    }

    #[test]
    fn blank_label_is_a_hard_failure() {
        let fixture = fixture(
            "Bournemouth",
            true,
            [
                slot("   ", at(1, 9), "EV1"),
                empty_slot(),
                empty_slot(),
                empty_slot(),
            ],
        );
        assert_eq!(
            categorize(&fixture),
            Err(FixtureError::UnknownMembershipLabel {
                label: "   ".to_string()
            })
        );
    }

    #[test]
    fn blank_event_id_is_kept_verbatim() {
        let fixture = fixture(
            "Bournemouth",
            true,
            [
                slot("Members", at(1, 9), "  "),
                empty_slot(),
                empty_slot(),
                empty_slot(),
            ],
        );
        let categorized = categorize(&fixture).expect("categorize");
        assert_eq!(categorized.windows.len(), 1);
        assert_eq!(categorized.windows[0].event_id, "  ");
        assert_eq!(categorized.windows[0].membership_tier, MembershipTier::Members);
    }

    #[test]
    fn all_empty_slots_yield_no_windows() {
        let fixture = fixture(
            "Leeds United",
            true,
            [empty_slot(), empty_slot(), empty_slot(), empty_slot()],
        );
        assert!(categorize(&fixture).expect("categorize").windows.is_empty());
    }

    #[test]
    fn label_failure_fails_fixture() {
        let fixture = fixture(
            "Spurs",
            true,
            [
                slot("Season Ticket Holders", at(1, 9), "ok"),
                slot("Hospitality", at(2, 9), "bad"),
                empty_slot(),
                empty_slot(),
            ],
        );
        assert_eq!(
            categorize(&fixture),
            Err(FixtureError::UnknownMembershipLabel {
                label: "Hospitality".to_string()
            })
        );
    }
}
