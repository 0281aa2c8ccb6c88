use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{CalendarClient, CalendarError};
use crate::config::AppConfig;
use crate::models::CalendarEvent;

const API_BASE: &str = "https://www.googleapis.com/calendar/v3";
const SOURCE_ID_PROPERTY: &str = "source_id";

#[derive(Debug, Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<EventItem>,
}

#[derive(Debug, Deserialize)]
struct EventItem {
    id: String,
}

/// Google Calendar v3 REST client. Existing events are found through a private
/// extended property holding the event's `source_id`.
pub struct GoogleCalendar {
    client: Client,
    base_url: String,
    calendar_id: String,
    token: String,
}

impl GoogleCalendar {
    pub fn from_config(config: &AppConfig) -> Result<Self, CalendarError> {
        let token = config
            .access_token
            .as_ref()
            .ok_or(CalendarError::MissingToken)?
            .trim()
            .to_string();
        if token.is_empty() {
            return Err(CalendarError::MissingToken);
        }

        let calendar_id = config
            .calendar_id
            .as_ref()
            .ok_or(CalendarError::MissingCalendarId)?
            .trim()
            .to_string();
        if calendar_id.is_empty() {
            return Err(CalendarError::MissingCalendarId);
        }

        let client = Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(|err| CalendarError::Http(err.to_string()))?;

        tracing::info!(calendar_id = %calendar_id, "initialised google calendar client");
        Ok(Self {
            client,
            base_url: API_BASE.to_string(),
            calendar_id,
            token,
        })
    }

    #[cfg(test)]
    fn with_base_url(base_url: &str, calendar_id: &str, token: &str) -> Self {
        Self {
            client: Client::builder().no_proxy().build().expect("test client"),
            base_url: base_url.to_string(),
            calendar_id: calendar_id.to_string(),
            token: token.to_string(),
        }
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    fn events_url(&self, event_id: Option<&str>) -> Result<Url, CalendarError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|err| CalendarError::Http(err.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| CalendarError::Http(format!("invalid base url {}", self.base_url)))?;
            segments.pop_if_empty();
            segments.extend(["calendars", self.calendar_id.as_str(), "events"]);
            if let Some(id) = event_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn lookup_url(&self, source_id: &str) -> Result<Url, CalendarError> {
        let mut url = self.events_url(None)?;
        url.query_pairs_mut()
            .append_pair(
                "privateExtendedProperty",
                &format!("{SOURCE_ID_PROPERTY}={source_id}"),
            )
            .append_pair("maxResults", "1");
        Ok(url)
    }

    fn find_by_source_id(&self, source_id: &str) -> Result<Option<String>, CalendarError> {
        tracing::debug!(source_id, "searching for existing event");
        let body = self.execute(self.client.get(self.lookup_url(source_id)?))?;
        let list: EventList =
            serde_json::from_value(body).map_err(|err| CalendarError::Api(err.to_string()))?;
        let found = list.items.into_iter().next().map(|item| item.id);
        match &found {
            Some(id) => tracing::debug!(event_id = %id, "found existing event"),
            None => tracing::debug!("no existing event found"),
        }
        Ok(found)
    }

    fn create(&self, event: &CalendarEvent) -> Result<(), CalendarError> {
        tracing::info!(summary = %event.summary, "creating event");
        let created = self.execute(
            self.client
                .post(self.events_url(None)?)
                .json(&event_body(event)),
        )?;
        let created_id = created
            .get("id")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown");
        tracing::info!(event_id = created_id, "created event");
        Ok(())
    }

    fn update(&self, event_id: &str, event: &CalendarEvent) -> Result<(), CalendarError> {
        tracing::info!(event_id, summary = %event.summary, "updating event");
        self.execute(
            self.client
                .put(self.events_url(Some(event_id))?)
                .json(&event_body(event)),
        )?;
        Ok(())
    }

    fn execute(&self, request: RequestBuilder) -> Result<Value, CalendarError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .map_err(|err| CalendarError::Http(err.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|err| CalendarError::Http(err.to_string()))?;
        if !status.is_success() {
            return Err(CalendarError::Api(format!("status {status}: {text}")));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|err| CalendarError::Api(err.to_string()))
    }
}

impl CalendarClient for GoogleCalendar {
    fn upsert_event(&self, event: &CalendarEvent) -> Result<bool, CalendarError> {
        match self.find_by_source_id(&event.source_id)? {
            Some(existing) => {
                self.update(&existing, event)?;
                Ok(false)
            }
            None => {
                self.create(event)?;
                Ok(true)
            }
        }
    }
}

pub fn event_body(event: &CalendarEvent) -> Value {
    let mut body = json!({
        "summary": event.summary,
        "description": event.description,
        "start": { "dateTime": event.start.to_rfc3339(), "timeZone": "UTC" },
        "end": { "dateTime": event.end.to_rfc3339(), "timeZone": "UTC" },
        "extendedProperties": { "private": { "source_id": event.source_id } },
    });
    if let Some(url) = &event.url {
        body["source"] = json!({ "url": url, "title": "Ticket Info" });
    }
    body
}
