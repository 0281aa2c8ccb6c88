use crate::models::{CategorizedFixture, EligibleFixture, MembershipTier, SaleWindow};

pub fn is_eligible(window: &SaleWindow, tier: MembershipTier, points: u32) -> bool {
    tier.can_purchase(window.membership_tier) && points >= window.minimum_points
}

/// Picks the earliest window the user can buy in. Equal dates keep slot order.
pub fn select_window(
    fixture: &CategorizedFixture,
    tier: MembershipTier,
    points: u32,
) -> EligibleFixture {
    let chosen = fixture
        .windows
        .iter()
        .filter(|window| is_eligible(window, tier, points))
        .min_by_key(|window| window.on_sale_date)
        .cloned();
    EligibleFixture {
        general: fixture.general.clone(),
        chosen,
    }
}
