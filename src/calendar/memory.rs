use std::sync::{Mutex, PoisonError};

use super::{CalendarClient, CalendarError};
use crate::models::CalendarEvent;

/// In-process calendar with the same `source_id` dedup rules as the real one.
#[derive(Default)]
pub struct MemoryCalendar {
    events: Mutex<Vec<CalendarEvent>>,
}

impl MemoryCalendar {
    pub fn events(&self) -> Vec<CalendarEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CalendarClient for MemoryCalendar {
    fn upsert_event(&self, event: &CalendarEvent) -> Result<bool, CalendarError> {
        // every mutation finishes under the lock, so a poisoned list is still valid
        let mut guard = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        match guard
            .iter_mut()
            .find(|existing| existing.source_id == event.source_id)
        {
            Some(existing) => {
                tracing::info!(source_id = %event.source_id, summary = %event.summary, "updating event");
                *existing = event.clone();
                Ok(false)
            }
            None => {
                tracing::info!(source_id = %event.source_id, summary = %event.summary, "creating event");
                guard.push(event.clone());
                Ok(true)
            }
        }
    }
}
