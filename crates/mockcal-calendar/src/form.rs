//! Event editor input, validated into drafts and patches.

use chrono::{DateTime, Utc};

use crate::error::CalendarError;
use crate::types::{CalendarEvent, EventDraft, EventPatch, Priority};

/// Raw values of the create/edit event form.
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    /// Comma-separated email addresses
    pub attendees: String,
    pub meet_link: String,
    /// Link the form was opened with. While `meet_link` still matches it, an
    /// edit leaves the stored link and meeting id alone.
    pub prefilled_meet_link: Option<String>,
    pub color: Option<String>,
    pub priority: Option<Priority>,
    pub category: String,
    pub reminders: Vec<u32>,
}

impl EventForm {
    /// Blank form for a new event; the range defaults to one hour from `now`.
    pub fn blank(now: DateTime<Utc>) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            location: String::new(),
            start: now,
            end: now + chrono::Duration::hours(1),
            all_day: false,
            attendees: String::new(),
            meet_link: String::new(),
            prefilled_meet_link: None,
            color: None,
            priority: None,
            category: String::new(),
            reminders: Vec::new(),
        }
    }

    /// Prefill for editing an existing event.
    pub fn from_event(event: &CalendarEvent) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            location: event.location.clone().unwrap_or_default(),
            start: event.start,
            end: event.end,
            all_day: event.all_day,
            attendees: event.attendees.join(", "),
            meet_link: event.meet_link.clone().unwrap_or_default(),
            prefilled_meet_link: event.meet_link.clone(),
            color: event.color.clone(),
            priority: event.priority,
            category: event.category.clone().unwrap_or_default(),
            reminders: event.reminders.clone(),
        }
    }

    /// Use a slot picked on the grid as the event's range.
    pub fn with_slot(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    fn validate(&self) -> Result<(), CalendarError> {
        if self.title.trim().is_empty() {
            return Err(CalendarError::InvalidEventData("title is required".to_string()));
        }
        if self.start > self.end {
            return Err(CalendarError::InvalidEventData(
                "end must not be before start".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and build a draft for creation.
    pub fn into_draft(self) -> Result<EventDraft, CalendarError> {
        self.validate()?;
        let mut draft = EventDraft::new(self.title.trim(), self.start, self.end);
        draft.description = non_empty(&self.description);
        draft.location = non_empty(&self.location);
        draft.attendees = parse_attendees(&self.attendees);
        draft.all_day = self.all_day;
        draft.meet_link = non_empty(&self.meet_link);
        draft.color = self.color;
        draft.priority = self.priority;
        draft.category = non_empty(&self.category);
        draft.reminders = self.reminders;
        Ok(draft)
    }

    /// Validate and build a patch for editing. Every form field is sent except
    /// an unchanged meeting link; cleared text fields clear the stored value.
    pub fn into_patch(self) -> Result<EventPatch, CalendarError> {
        self.validate()?;
        let meet_link = non_empty(&self.meet_link);
        let meet_link_changed = meet_link != self.prefilled_meet_link;
        Ok(EventPatch {
            title: Some(self.title.trim().to_string()),
            start: Some(self.start),
            end: Some(self.end),
            description: Some(non_empty(&self.description)),
            location: Some(non_empty(&self.location)),
            attendees: Some(parse_attendees(&self.attendees)),
            color: self.color.map(Some),
            all_day: Some(self.all_day),
            meet_link: meet_link_changed.then_some(meet_link),
            meet_id: None,
            priority: Some(self.priority),
            category: Some(non_empty(&self.category)),
            recurring: None,
            reminders: Some(self.reminders),
        })
    }
}

/// Split a comma-separated attendee list, dropping blanks. Order and duplicates are kept.
pub fn parse_attendees(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 20, hour, 0, 0).unwrap()
    }

    fn filled() -> EventForm {
        EventForm {
            title: "  Planning  ".into(),
            description: "".into(),
            location: "Room 4".into(),
            attendees: "a@example.com, ,b@example.com,a@example.com".into(),
            meet_link: "https://meet.google.com/abc-defg-hij".into(),
            ..EventForm::blank(at(9))
        }
    }

    #[test]
    fn test_parse_attendees() {
        assert_eq!(
            parse_attendees(" x@example.com ,, y@example.com "),
            vec!["x@example.com", "y@example.com"]
        );
        assert!(parse_attendees("").is_empty());
    }

    #[test]
    fn test_blank_form_spans_an_hour() {
        let form = EventForm::blank(at(9));
        assert_eq!(form.end - form.start, chrono::Duration::hours(1));
        assert!(!form.all_day);
    }

    #[test]
    fn test_into_draft() {
        let draft = filled().into_draft().unwrap();
        assert_eq!(draft.title, "Planning");
        assert_eq!(draft.description, None);
        assert_eq!(draft.location.as_deref(), Some("Room 4"));
        assert_eq!(
            draft.attendees,
            vec!["a@example.com", "b@example.com", "a@example.com"]
        );
        assert_eq!(draft.color, None);
    }

    #[test]
    fn test_title_required() {
        let mut form = filled();
        form.title = "   ".into();
        assert_eq!(
            form.into_draft(),
            Err(CalendarError::InvalidEventData("title is required".into()))
        );
    }

    #[test]
    fn test_end_before_start_rejected() {
        let form = filled().with_slot(at(11), at(10));
        assert!(matches!(
            form.into_patch(),
            Err(CalendarError::InvalidEventData(_))
        ));
    }

    #[test]
    fn test_edit_round_trip_clears_fields() {
        let event = CalendarEvent::from_draft("42".into(), filled().into_draft().unwrap());
        let mut form = EventForm::from_event(&event);
        assert_eq!(form.attendees, "a@example.com, b@example.com, a@example.com");

        form.location = String::new();
        let patch = form.into_patch().unwrap();

        let mut edited = event.clone();
        patch.apply_to(&mut edited);
        assert_eq!(edited.location, None);
        assert_eq!(edited.title, event.title);
        assert_eq!(edited.meet_id.as_deref(), Some("abc-defg-hij"));
    }

    #[test]
    fn test_edit_keeps_explicit_meet_id() {
        let mut event = CalendarEvent::from_draft("7".into(), filled().into_draft().unwrap());
        event.meet_id = Some("room-7".into());

        let mut form = EventForm::from_event(&event);
        form.title = "Planning (moved)".into();
        let patch = form.into_patch().unwrap();
        assert_eq!(patch.meet_link, None);

        let mut edited = event.clone();
        patch.apply_to(&mut edited);
        assert_eq!(edited.title, "Planning (moved)");
        assert_eq!(edited.meet_id.as_deref(), Some("room-7"));
    }

    #[test]
    fn test_edit_with_new_link_rederives_meet_id() {
        let mut event = CalendarEvent::from_draft("7".into(), filled().into_draft().unwrap());
        event.meet_id = Some("room-7".into());

        let mut form = EventForm::from_event(&event);
        form.meet_link = "https://meet.google.com/xyz-uvwx-rst".into();
        let mut edited = event.clone();
        form.into_patch().unwrap().apply_to(&mut edited);
        assert_eq!(edited.meet_id.as_deref(), Some("xyz-uvwx-rst"));
    }

    #[test]
    fn test_with_slot() {
        let draft = filled().with_slot(at(14), at(15)).into_draft().unwrap();
        assert_eq!(draft.start, at(14));
        assert_eq!(draft.end, at(15));
    }
}
