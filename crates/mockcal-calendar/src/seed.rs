//! Fixed demonstration dataset installed on sign-in and filtered by fetch.

use chrono::{DateTime, TimeZone, Utc};

use crate::types::CalendarEvent;

fn jan_2025(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    // Every (day, hour, minute) below is a valid January 2025 time.
    Utc.with_ymd_and_hms(2025, 1, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn seed_event(
    id: &str,
    title: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    description: &str,
    location: &str,
    attendees: &[&str],
    color: &str,
    all_day: bool,
) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        title: title.to_string(),
        start,
        end,
        description: Some(description.to_string()),
        location: Some(location.to_string()),
        attendees: attendees.iter().map(|a| a.to_string()).collect(),
        color: Some(color.to_string()),
        all_day,
        meet_link: None,
        meet_id: None,
        priority: None,
        category: None,
        recurring: false,
        reminders: Vec::new(),
    }
}

/// The six events of the week of January 13, 2025, in display order.
pub fn seed_events() -> Vec<CalendarEvent> {
    vec![
        seed_event(
            "1",
            "Team Meeting",
            jan_2025(13, 10, 0),
            jan_2025(13, 11, 0),
            "Review project progress and plan next steps.",
            "Conference Room A",
            &["member1@example.com", "member2@example.com"],
            "#1890ff",
            false,
        ),
        seed_event(
            "2",
            "Presentation Prep",
            jan_2025(14, 14, 0),
            jan_2025(14, 16, 0),
            "Prepare slides for next week's client presentation.",
            "Office",
            &["designer@example.com"],
            "#52c41a",
            false,
        ),
        seed_event(
            "3",
            "Lunch Meeting",
            jan_2025(15, 12, 0),
            jan_2025(15, 13, 30),
            "Casual discussion about the new project.",
            "Restaurant ABC",
            &["client@example.com"],
            "#fa8c16",
            false,
        ),
        seed_event(
            "4",
            "Annual General Meeting",
            jan_2025(16, 0, 0),
            jan_2025(16, 23, 59),
            "Company annual meeting. Attendance required.",
            "Hotel XYZ",
            &["all@company.com"],
            "#722ed1",
            true,
        ),
        seed_event(
            "5",
            "Code Review",
            jan_2025(17, 9, 0),
            jan_2025(17, 10, 30),
            "Review session for the new feature.",
            "Online",
            &["dev1@example.com", "dev2@example.com", "lead@example.com"],
            "#eb2f96",
            false,
        ),
        seed_event(
            "6",
            "Client Visit",
            jan_2025(17, 15, 0),
            jan_2025(17, 17, 0),
            "Final project review and demo.",
            "Client Office",
            &["client@example.com", "manager@example.com"],
            "#13c2c2",
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_is_well_formed() {
        let events = seed_events();
        assert_eq!(events.len(), 6);

        let ids: HashSet<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), 6);

        for event in &events {
            assert!(!event.title.is_empty());
            assert!(event.start <= event.end, "{} ends before it starts", event.id);
            assert!(event.start.timestamp() > 0);
        }
    }

    #[test]
    fn test_seed_is_in_start_order() {
        let events = seed_events();
        assert!(events.windows(2).all(|w| w[0].start <= w[1].start));
        assert!(events[3].all_day);
    }
}
