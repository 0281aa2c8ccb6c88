use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A button/CTA attached to a fixture.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub title: String,
    pub url: String,
    pub is_external: bool,
    pub is_active: bool,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub membership_only: bool,
    pub season_ticket_only: bool,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipTier {
    SeasonTicket,
    MyBeesMembers,
    Members,
}

impl MembershipTier {
    pub const ALL: [MembershipTier; 3] = [
        MembershipTier::SeasonTicket,
        MembershipTier::MyBeesMembers,
        MembershipTier::Members,
    ];

    pub fn display_label(self) -> &'static str {
        match self {
            MembershipTier::SeasonTicket => "Season Ticket Holders",
            MembershipTier::MyBeesMembers => "My Bees Members",
            MembershipTier::Members => "Members",
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            MembershipTier::SeasonTicket => "SEASON_TICKET",
            MembershipTier::MyBeesMembers => "MY_BEES_MEMBERS",
            MembershipTier::Members => "MEMBERS",
        }
    }

    pub fn can_purchase(self, window_tier: MembershipTier) -> bool {
        can_purchase(self, window_tier)
    }
}

/// Higher rank can buy in every window of an equal or lower rank.
pub fn tier_rank(tier: MembershipTier) -> u8 {
    match tier {
        MembershipTier::SeasonTicket => 3,
        MembershipTier::MyBeesMembers => 2,
        MembershipTier::Members => 1,
    }
}

pub fn can_purchase(user_tier: MembershipTier, window_tier: MembershipTier) -> bool {
    tier_rank(user_tier) >= tier_rank(window_tier)
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}

impl FromStr for MembershipTier {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_uppercase().replace('-', "_");
        MembershipTier::ALL
            .into_iter()
            .find(|tier| tier.wire_name() == normalized)
            .ok_or_else(|| {
                let names = MembershipTier::ALL
                    .iter()
                    .map(|tier| tier.wire_name())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("unknown membership `{input}` (expected one of: {names})")
            })
    }
}

/// One of the four parallel `categoryN*` slots of a scraped fixture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySlot {
    pub label: String,
    pub on_sale_date: DateTime<Utc>,
    pub event_id: String,
}

impl CategorySlot {
    /// Unused slots come through with an empty label and/or event id and a year-1 date.
    pub fn is_empty(&self) -> bool {
        self.label.is_empty() || self.event_id.is_empty()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeneralFixtureInfo {
    pub title: String,
    pub opposition_name: String,
    pub opposition_badge: String,
    pub is_home_fixture: bool,
    #[serde(deserialize_with = "fixture_datetime")]
    pub fixture_date: NaiveDateTime,
    pub competition: String,
    pub category: String,
    pub buy_now_link: Link,
    pub find_out_more_link: Link,
    pub sale_status: String,
}

/// Fixture record as embedded in the ticketing page.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(from = "RawFixtureWire")]
pub struct RawFixture {
    pub general: GeneralFixtureInfo,
    pub slots: [CategorySlot; 4],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFixtureWire {
    #[serde(flatten)]
    general: GeneralFixtureInfo,
    #[serde(rename = "category1Label")]
    category1_label: String,
    #[serde(rename = "category1OnSaleDate")]
    category1_on_sale_date: DateTime<Utc>,
    #[serde(rename = "category1EventId")]
    category1_event_id: String,
    #[serde(rename = "category2Label")]
    category2_label: String,
    #[serde(rename = "category2OnSaleDate")]
    category2_on_sale_date: DateTime<Utc>,
    #[serde(rename = "category2EventId")]
    category2_event_id: String,
    #[serde(rename = "category3Label")]
    category3_label: String,
    #[serde(rename = "category3OnSaleDate")]
    category3_on_sale_date: DateTime<Utc>,
    #[serde(rename = "category3EventId")]
    category3_event_id: String,
    #[serde(rename = "category4Label")]
    category4_label: String,
    #[serde(rename = "category4OnSaleDate")]
    category4_on_sale_date: DateTime<Utc>,
    #[serde(rename = "category4EventId")]
    category4_event_id: String,
}

impl From<RawFixtureWire> for RawFixture {
    fn from(wire: RawFixtureWire) -> Self {
        let slot = |label: String, on_sale_date: DateTime<Utc>, event_id: String| CategorySlot {
            label,
            on_sale_date,
            event_id,
        };
        RawFixture {
            general: wire.general,
            slots: [
                slot(
                    wire.category1_label,
                    wire.category1_on_sale_date,
                    wire.category1_event_id,
                ),
                slot(
                    wire.category2_label,
                    wire.category2_on_sale_date,
                    wire.category2_event_id,
                ),
                slot(
                    wire.category3_label,
                    wire.category3_on_sale_date,
                    wire.category3_event_id,
                ),
                slot(
                    wire.category4_label,
                    wire.category4_on_sale_date,
                    wire.category4_event_id,
                ),
            ],
        }
    }
}

// The site publishes kick-off as local wall-clock time; tolerate an offset too.
fn fixture_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(with_offset.naive_local());
    }
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&raw, fmt).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid fixture date: {raw:?}")))
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaleWindow {
    pub membership_tier: MembershipTier,
    pub minimum_points: u32,
    pub on_sale_date: DateTime<Utc>,
    pub event_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedFixture {
    pub general: GeneralFixtureInfo,
    pub windows: Vec<SaleWindow>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EligibleFixture {
    pub general: GeneralFixtureInfo,
    pub chosen: Option<SaleWindow>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub source_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
