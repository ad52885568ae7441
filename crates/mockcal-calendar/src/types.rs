//! Calendar event types and data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Calendar event as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub all_day: bool,
    pub meet_link: Option<String>,
    pub meet_id: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    #[serde(default)]
    pub recurring: bool,
    /// Minutes before the event.
    #[serde(default)]
    pub reminders: Vec<u32>,
}

impl CalendarEvent {
    /// Attach a store-assigned id to a draft.
    pub fn from_draft(id: String, draft: EventDraft) -> Self {
        let meet_id = draft
            .meet_id
            .or_else(|| draft.meet_link.as_deref().and_then(derive_meet_id));

        Self {
            id,
            title: draft.title,
            start: draft.start,
            end: draft.end,
            description: draft.description,
            location: draft.location,
            attendees: draft.attendees,
            color: draft.color,
            all_day: draft.all_day,
            meet_link: draft.meet_link,
            meet_id,
            priority: draft.priority,
            category: draft.category,
            recurring: draft.recurring,
            reminders: draft.reminders,
        }
    }

    /// Whether `start` lies in the inclusive range.
    pub fn starts_within(&self, range_start: DateTime<Utc>, range_end: DateTime<Utc>) -> bool {
        self.start >= range_start && self.start <= range_end
    }
}

/// Event priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A calendar event without an id, as submitted for creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub all_day: bool,
    pub meet_link: Option<String>,
    pub meet_id: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub reminders: Vec<u32>,
}

impl EventDraft {
    /// Minimal draft; every optional field empty.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            start,
            end,
            description: None,
            location: None,
            attendees: Vec::new(),
            color: None,
            all_day: false,
            meet_link: None,
            meet_id: None,
            priority: None,
            category: None,
            recurring: false,
            reminders: Vec::new(),
        }
    }
}

/// Partial update merged over an existing event.
///
/// `None` leaves a field untouched. For nullable fields the inner `Option`
/// is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub description: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub attendees: Option<Vec<String>>,
    pub color: Option<Option<String>>,
    pub all_day: Option<bool>,
    pub meet_link: Option<Option<String>>,
    pub meet_id: Option<Option<String>>,
    pub priority: Option<Option<Priority>>,
    pub category: Option<Option<String>>,
    pub recurring: Option<bool>,
    pub reminders: Option<Vec<u32>>,
}

impl EventPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Move or resize an event (drag and drop).
    pub fn reschedule(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite the fields present in this patch; everything else is kept.
    pub fn apply_to(&self, event: &mut CalendarEvent) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(start) = self.start {
            event.start = start;
        }
        if let Some(end) = self.end {
            event.end = end;
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        if let Some(location) = &self.location {
            event.location = location.clone();
        }
        if let Some(attendees) = &self.attendees {
            event.attendees = attendees.clone();
        }
        if let Some(color) = &self.color {
            event.color = color.clone();
        }
        if let Some(all_day) = self.all_day {
            event.all_day = all_day;
        }
        if let Some(meet_link) = &self.meet_link {
            event.meet_link = meet_link.clone();
            // A new link without an explicit id re-derives it.
            if self.meet_id.is_none() {
                event.meet_id = meet_link.as_deref().and_then(derive_meet_id);
            }
        }
        if let Some(meet_id) = &self.meet_id {
            event.meet_id = meet_id.clone();
        }
        if let Some(priority) = self.priority {
            event.priority = priority;
        }
        if let Some(category) = &self.category {
            event.category = category.clone();
        }
        if let Some(recurring) = self.recurring {
            event.recurring = recurring;
        }
        if let Some(reminders) = &self.reminders {
            event.reminders = reminders.clone();
        }
    }
}

/// Meeting identifier carried in a conferencing link: its last non-empty path segment.
///
/// `https://meet.google.com/abc-defg-hij` yields `abc-defg-hij`.
pub fn derive_meet_id(link: &str) -> Option<String> {
    match url::Url::parse(link) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.rev().find(|s| !s.is_empty()))
            .map(str::to_string),
        Err(_) => link
            .split('/')
            .map(str::trim)
            .rev()
            .find(|s| !s.is_empty())
            .map(str::to_string),
    }
}
