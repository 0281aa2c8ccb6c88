use std::time::Duration;

use anyhow::Result;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::base;
use super::FixtureSource;
use crate::fixtures::FixtureError;
use crate::models::RawFixture;

pub const DEFAULT_URL: &str = "https://www.brentfordfc.com/en/ticket-information";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

static MODULE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"div[data-component="FixtureTicketingModule"]"#)
        .expect("fixture module selector")
});

/// The club's ticket information page, which embeds one JSON blob per fixture
/// in the `data-props` attribute of each ticketing module.
pub struct TicketingPage {
    url: String,
    timeout: Duration,
}

impl Default for TicketingPage {
    fn default() -> Self {
        Self::new(DEFAULT_URL, DEFAULT_TIMEOUT)
    }
}

impl FixtureSource for TicketingPage {
    fn source_url(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<Vec<RawFixture>> {
        let html = base::fetch_html(&self.url, self.timeout)?;
        Ok(parse_document(&html)?)
    }
}

impl TicketingPage {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

pub fn parse_document(html: &str) -> Result<Vec<RawFixture>, FixtureError> {
    let document = Html::parse_document(html);
    let modules: Vec<_> = document.select(&MODULE_SELECTOR).collect();
    tracing::info!(count = modules.len(), "found fixture modules");

    let mut fixtures = Vec::with_capacity(modules.len());
    for (index, module) in modules.into_iter().enumerate() {
        // the parser has already decoded entities such as &quot;
        let props = match module.value().attr("data-props") {
            Some(props) if !props.trim().is_empty() => props,
            _ => {
                tracing::warn!(index, "fixture module without data-props, skipping");
                continue;
            }
        };

        let fixture: RawFixture = serde_json::from_str(props).map_err(|err| {
            tracing::debug!(index, raw = %base::excerpt(props, 200), "undecodable data-props");
            FixtureError::MalformedSourceData {
                detail: format!("fixture module {index}: {err}"),
            }
        })?;
        tracing::debug!(title = %fixture.general.title, "parsed fixture");
        fixtures.push(fixture);
    }

    tracing::info!(count = fixtures.len(), "parsed fixtures");
    Ok(fixtures)
}
