//! Month/week/day view logic: navigation, visible ranges and titles.
//!
//! Rendering is left to the host; these are the date computations the
//! views need to decide what to show and what to fetch.

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveTime, Utc};
use mockcal_core::WeekStart;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarViewType {
    Month,
    #[default]
    Week,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateAction {
    Prev,
    Next,
    Today,
}

/// Inclusive time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && t <= self.end
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Last second of `date`.
fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::seconds(1)
}

fn week_start_of(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let offset = match week_start {
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        WeekStart::Monday => date.weekday().num_days_from_monday(),
    };
    date - Days::new(u64::from(offset))
}

/// Move `date` one view unit back or forward, or jump to `today`.
///
/// Month steps clamp to the last day of shorter months (Jan 31 -> Feb 28).
pub fn navigate(
    view: CalendarViewType,
    date: DateTime<Utc>,
    action: NavigateAction,
    today: DateTime<Utc>,
) -> DateTime<Utc> {
    let moved = match (action, view) {
        (NavigateAction::Today, _) => Some(today),
        (NavigateAction::Prev, CalendarViewType::Month) => date.checked_sub_months(Months::new(1)),
        (NavigateAction::Next, CalendarViewType::Month) => date.checked_add_months(Months::new(1)),
        (NavigateAction::Prev, CalendarViewType::Week) => date.checked_sub_days(Days::new(7)),
        (NavigateAction::Next, CalendarViewType::Week) => date.checked_add_days(Days::new(7)),
        (NavigateAction::Prev, CalendarViewType::Day) => date.checked_sub_days(Days::new(1)),
        (NavigateAction::Next, CalendarViewType::Day) => date.checked_add_days(Days::new(1)),
    };
    moved.unwrap_or(date)
}

/// The span a view shows around `date`.
pub fn visible_range(
    view: CalendarViewType,
    date: DateTime<Utc>,
    week_start: WeekStart,
) -> DateRange {
    let day = date.date_naive();
    let (first, last) = match view {
        CalendarViewType::Month => {
            let first = day.with_day(1).unwrap_or(day);
            let last = first
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(day);
            (first, last)
        }
        CalendarViewType::Week => {
            let first = week_start_of(day, week_start);
            (first, first + Days::new(6))
        }
        CalendarViewType::Day => (day, day),
    };

    DateRange {
        start: start_of_day(first),
        end: end_of_day(last),
    }
}

/// Range loaded on every refetch: `before` months earlier to `after` months later.
pub fn fetch_window(date: DateTime<Utc>, before: u32, after: u32) -> DateRange {
    DateRange {
        start: date.checked_sub_months(Months::new(before)).unwrap_or(date),
        end: date.checked_add_months(Months::new(after)).unwrap_or(date),
    }
}

/// Header text: "January 2025", "Jan 12 - Jan 18, 2025" or "Mon, Jan 13, 2025".
pub fn header_title(view: CalendarViewType, date: DateTime<Utc>, week_start: WeekStart) -> String {
    match view {
        CalendarViewType::Month => date.format("%B %Y").to_string(),
        CalendarViewType::Week => {
            let range = visible_range(view, date, week_start);
            if range.start.year() == range.end.year() {
                format!(
                    "{} - {}",
                    range.start.format("%b %-d"),
                    range.end.format("%b %-d, %Y")
                )
            } else {
                format!(
                    "{} - {}",
                    range.start.format("%b %-d, %Y"),
                    range.end.format("%b %-d, %Y")
                )
            }
        }
        CalendarViewType::Day => date.format("%a, %b %-d, %Y").to_string(),
    }
}

/// Current date and view of a calendar screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarNavigator {
    date: DateTime<Utc>,
    view: CalendarViewType,
    week_start: WeekStart,
}

impl CalendarNavigator {
    pub fn new(date: DateTime<Utc>, view: CalendarViewType, week_start: WeekStart) -> Self {
        Self {
            date,
            view,
            week_start,
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn view(&self) -> CalendarViewType {
        self.view
    }

    pub fn set_view(&mut self, view: CalendarViewType) {
        self.view = view;
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = date;
    }

    pub fn navigate(&mut self, action: NavigateAction, today: DateTime<Utc>) -> DateTime<Utc> {
        self.date = navigate(self.view, self.date, action, today);
        self.date
    }

    pub fn visible_range(&self) -> DateRange {
        visible_range(self.view, self.date, self.week_start)
    }

    pub fn fetch_window(&self, before: u32, after: u32) -> DateRange {
        fetch_window(self.date, before, after)
    }

    pub fn title(&self) -> String {
        header_title(self.view, self.date, self.week_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ymd_h(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_navigate_by_view_unit() {
        let date = ymd_h(2025, 1, 15, 9);
        let today = ymd_h(2025, 6, 1, 0);

        assert_eq!(
            navigate(CalendarViewType::Month, date, NavigateAction::Next, today),
            ymd_h(2025, 2, 15, 9)
        );
        assert_eq!(
            navigate(CalendarViewType::Week, date, NavigateAction::Prev, today),
            ymd_h(2025, 1, 8, 9)
        );
        assert_eq!(
            navigate(CalendarViewType::Day, date, NavigateAction::Next, today),
            ymd_h(2025, 1, 16, 9)
        );
        assert_eq!(
            navigate(CalendarViewType::Day, date, NavigateAction::Today, today),
            today
        );
    }

    #[test]
    fn test_month_navigation_clamps() {
        let jan31 = ymd_h(2025, 1, 31, 12);
        let next = navigate(CalendarViewType::Month, jan31, NavigateAction::Next, jan31);
        assert_eq!(next, ymd_h(2025, 2, 28, 12));
    }

    #[test]
    fn test_month_range() {
        let range = visible_range(CalendarViewType::Month, ymd_h(2024, 2, 10, 8), WeekStart::Sunday);
        assert_eq!(range.start, ymd_h(2024, 2, 1, 0));
        assert_eq!(range.end, Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_week_range_sunday_start() {
        // Wednesday January 15, 2025
        let range = visible_range(CalendarViewType::Week, ymd_h(2025, 1, 15, 8), WeekStart::Sunday);
        assert_eq!(range.start, ymd_h(2025, 1, 12, 0));
        assert_eq!(range.end, Utc.with_ymd_and_hms(2025, 1, 18, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_week_range_monday_start() {
        let range = visible_range(CalendarViewType::Week, ymd_h(2025, 1, 12, 8), WeekStart::Monday);
        assert_eq!(range.start, ymd_h(2025, 1, 6, 0));
        assert!(range.contains(ymd_h(2025, 1, 12, 23)));
        assert!(!range.contains(ymd_h(2025, 1, 13, 0)));
    }

    #[test]
    fn test_day_range() {
        let range = visible_range(CalendarViewType::Day, ymd_h(2025, 1, 16, 14), WeekStart::Sunday);
        assert_eq!(range.start, ymd_h(2025, 1, 16, 0));
        assert!(range.contains(Utc.with_ymd_and_hms(2025, 1, 16, 23, 59, 59).unwrap()));
    }

    #[test]
    fn test_fetch_window() {
        let window = fetch_window(ymd_h(2025, 1, 15, 9), 1, 2);
        assert_eq!(window.start, ymd_h(2024, 12, 15, 9));
        assert_eq!(window.end, ymd_h(2025, 3, 15, 9));
    }

    #[test]
    fn test_header_titles() {
        let date = ymd_h(2025, 1, 13, 9);
        assert_eq!(
            header_title(CalendarViewType::Month, date, WeekStart::Sunday),
            "January 2025"
        );
        assert_eq!(
            header_title(CalendarViewType::Week, date, WeekStart::Sunday),
            "Jan 12 - Jan 18, 2025"
        );
        assert_eq!(
            header_title(CalendarViewType::Day, date, WeekStart::Sunday),
            "Mon, Jan 13, 2025"
        );
    }

    #[test]
    fn test_week_title_across_years() {
        let date = ymd_h(2024, 12, 31, 9);
        assert_eq!(
            header_title(CalendarViewType::Week, date, WeekStart::Sunday),
            "Dec 29, 2024 - Jan 4, 2025"
        );
    }

    #[test]
    fn test_navigator() {
        let today = ymd_h(2025, 1, 13, 9);
        let mut nav = CalendarNavigator::new(today, CalendarViewType::default(), WeekStart::Sunday);
        assert_eq!(nav.view(), CalendarViewType::Week);

        nav.navigate(NavigateAction::Next, today);
        assert_eq!(nav.title(), "Jan 19 - Jan 25, 2025");

        nav.set_view(CalendarViewType::Month);
        nav.navigate(NavigateAction::Prev, today);
        assert_eq!(nav.date(), ymd_h(2024, 12, 20, 9));

        nav.navigate(NavigateAction::Today, today);
        assert_eq!(nav.date(), today);
        assert_eq!(nav.fetch_window(1, 2).start, ymd_h(2024, 12, 13, 9));
    }
}
