//! In-memory event store for the current session.

use chrono::{DateTime, Utc};

use crate::error::CalendarError;
use crate::types::{CalendarEvent, EventDraft, EventPatch};

/// Ordered collection of events. Insertion order is preserved; nothing is date-sorted.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
    last_id: i64,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current contents and install `events`.
    pub fn replace_all(&mut self, events: Vec<CalendarEvent>) {
        self.events = events;
    }

    /// Append an event whose id the caller has already assigned.
    pub fn insert(&mut self, event: CalendarEvent) {
        self.events.push(event);
    }

    /// Assign a fresh id to `draft` and append it.
    pub fn create(&mut self, draft: EventDraft) -> CalendarEvent {
        let event = CalendarEvent::from_draft(self.next_id(), draft);
        self.insert(event.clone());
        event
    }

    /// Merge `patch` onto the event with `id`.
    pub fn patch(&mut self, id: &str, patch: &EventPatch) -> Result<&CalendarEvent, CalendarError> {
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CalendarError::NotFound(id.to_string()))?;
        patch.apply_to(event);
        Ok(event)
    }

    /// Remove the event with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> Result<CalendarEvent, CalendarError> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CalendarError::NotFound(id.to_string()))?;
        Ok(self.events.remove(index))
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events whose start falls in `[start, end]`, in store order.
    pub fn in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<&CalendarEvent> {
        self.events
            .iter()
            .filter(|e| e.starts_within(start, end))
            .collect()
    }

    /// Millisecond clock reading, bumped past the previous id when the clock
    /// hasn't advanced (or went backwards).
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        let id = if now > self.last_id { now } else { self.last_id + 1 };
        self.last_id = id;
        id.to_string()
    }
}
