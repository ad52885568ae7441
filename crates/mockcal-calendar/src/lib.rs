//! Mock calendar service for mockcal.
//!
//! An in-memory stand-in for a remote calendar API: sign-in, fetch and
//! event CRUD with simulated latency, plus the date logic behind
//! month/week/day views.

pub mod delay;
pub mod error;
pub mod form;
pub mod notify;
pub mod seed;
pub mod service;
pub mod session;
pub mod store;
pub mod types;
pub mod view;

pub use delay::{Delay, NoDelay, TokioDelay};
pub use error::CalendarError;
pub use form::{parse_attendees, EventForm};
pub use notify::{MemoryNotifier, Notification, NotificationLevel, Notifier, TracingNotifier};
pub use seed::seed_events;
pub use service::{CalendarService, CalendarSnapshot, FaultPlan, ServiceOptions};
pub use session::SessionState;
pub use store::EventStore;
pub use types::{derive_meet_id, CalendarEvent, EventDraft, EventPatch, Priority};
pub use view::{
    fetch_window, header_title, navigate, visible_range, CalendarNavigator, CalendarViewType,
    DateRange, NavigateAction,
};
