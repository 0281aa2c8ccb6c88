use once_cell::sync::Lazy;
use regex::Regex;

use super::FixtureError;
use crate::models::MembershipTier;

static POINTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d[\d,]*)\+\s*taps?").expect("valid points regex"));

/// Parses a category label such as `"My Bees members with 1,760+ TAPs"` into
/// the tier it is reserved for and the minimum TAPs balance required.
pub fn parse_label(label: &str) -> Result<(MembershipTier, u32), FixtureError> {
    if label.is_empty() {
        return Err(FixtureError::EmptyLabel);
    }
    let tier = parse_tier(label)?;
    Ok((tier, parse_minimum_points(label)))
}

// "my bees" first, then "season ticket" ahead of the generic "members".
fn parse_tier(label: &str) -> Result<MembershipTier, FixtureError> {
    let lower = label.to_lowercase();
    if lower.contains("my bees") {
        Ok(MembershipTier::MyBeesMembers)
    } else if lower.contains("season ticket") {
        Ok(MembershipTier::SeasonTicket)
    } else if lower.contains("members") {
        Ok(MembershipTier::Members)
    } else {
        Err(FixtureError::UnknownMembershipLabel {
            label: label.to_string(),
        })
    }
}

fn parse_minimum_points(label: &str) -> u32 {
    POINTS_RE
        .captures(label)
        .and_then(|caps| caps.get(1))
        .map(|digits| {
            let stripped = digits.as_str().replace(',', "");
            // only overflow can fail here; clamp to the largest balance representable
            stripped.parse::<u32>().unwrap_or(u32::MAX)
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn my_bees_without_points() {
        for label in ["My Bees Members", "MY BEES members", "all my bees"] {
            assert_eq!(
                parse_label(label),
                Ok((MembershipTier::MyBeesMembers, 0)),
                "label {label:?}"
            );
        }
    }

    #[test]
    fn strips_thousands_separator() {
        assert_eq!(
            parse_label("My Bees members with 1,760+ TAPs"),
            Ok((MembershipTier::MyBeesMembers, 1760))
        );
    }

    #[test]
    fn points_unit_is_case_insensitive_and_spacing_tolerant() {
        assert_eq!(
            parse_label("My Bees members with 300+taps"),
            Ok((MembershipTier::MyBeesMembers, 300))
        );
        assert_eq!(
            parse_label("Members with 50+   Taps"),
            Ok((MembershipTier::Members, 50))
        );
    }

    #[test]
    fn points_need_the_unit() {
        assert_eq!(
            parse_label("Members aged 18+"),
            Ok((MembershipTier::Members, 0))
        );
    }

    #[test]
    fn season_ticket_wins_over_members() {
        assert_eq!(
            parse_label("Season Ticket Members"),
            Ok((MembershipTier::SeasonTicket, 0))
        );
        assert_eq!(
            parse_label("All Season Ticket Holders"),
            Ok((MembershipTier::SeasonTicket, 0))
        );
    }

    #[test]
    fn generic_members() {
        assert_eq!(parse_label("All Members"), Ok((MembershipTier::Members, 0)));
    }

    #[test]
    fn empty_label_is_rejected() {
        assert_eq!(parse_label(""), Err(FixtureError::EmptyLabel));
    }

    #[test]
    fn blank_label_is_not_empty() {
        assert_eq!(
            parse_label("   "),
            Err(FixtureError::UnknownMembershipLabel {
                label: "   ".to_string()
            })
        );
    }

    #[test]
    fn unknown_label_carries_text() {
        assert_eq!(
            parse_label("General Sale"),
            Err(FixtureError::UnknownMembershipLabel {
                label: "General Sale".to_string()
            })
        );
    }

    #[test]
    fn oversized_points_saturate() {
        assert_eq!(
            parse_label("Members with 99,999,999,999+ TAPs"),
            Ok((MembershipTier::Members, u32::MAX))
        );
    }
}
