//! Mock calendar service: the single entry point for views.
//!
//! Every operation waits out a simulated latency, then commits against the
//! session and event store, then emits one notification. Operations are not
//! queued against each other; overlapping calls commit in the order their
//! latencies expire.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockcal_core::{Config, LatencyConfig, Operation};
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::instrument;

use crate::delay::{Delay, TokioDelay};
use crate::error::CalendarError;
use crate::notify::{Notification, Notifier};
use crate::seed::seed_events;
use crate::session::SessionState;
use crate::store::EventStore;
use crate::types::{CalendarEvent, EventDraft, EventPatch};

/// What a view reads: session flags plus the visible events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarSnapshot {
    pub signed_in: bool,
    pub pending: bool,
    pub events: Vec<CalendarEvent>,
}

/// Operations that fail after their latency instead of committing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaultPlan {
    failing: HashSet<Operation>,
}

impl FaultPlan {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn fail(mut self, op: Operation) -> Self {
        self.failing.insert(op);
        self
    }

    pub fn from_operations(ops: impl IntoIterator<Item = Operation>) -> Self {
        Self {
            failing: ops.into_iter().collect(),
        }
    }

    pub fn check(&self, op: Operation) -> Result<(), CalendarError> {
        if self.failing.contains(&op) {
            Err(CalendarError::OperationFailure {
                operation: op,
                reason: "injected failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceOptions {
    pub latency: LatencyConfig,
    /// Color given to created events that have none
    pub default_color: String,
    pub faults: FaultPlan,
    /// Dataset installed on sign-in and filtered by fetch
    pub seed: Vec<CalendarEvent>,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ServiceOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            latency: config.latency.clone(),
            default_color: config.calendar.default_color.clone(),
            faults: FaultPlan::from_operations(config.faults.fail_operations.iter().copied()),
            seed: seed_events(),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    session: SessionState,
    store: EventStore,
}

impl Inner {
    fn snapshot(&self) -> CalendarSnapshot {
        CalendarSnapshot {
            signed_in: self.session.is_signed_in(),
            pending: self.session.is_pending(),
            events: self.store.events().to_vec(),
        }
    }
}

struct Shared<D> {
    state: Mutex<Inner>,
    delay: D,
    notifier: Arc<dyn Notifier>,
    options: ServiceOptions,
    snapshots: watch::Sender<CalendarSnapshot>,
}

/// Cloneable handle to one mock calendar session.
pub struct CalendarService<D: Delay = TokioDelay> {
    shared: Arc<Shared<D>>,
}

impl<D: Delay> Clone for CalendarService<D> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl CalendarService<TokioDelay> {
    /// Service with real timers, configured from `config`.
    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> Self {
        Self::new(ServiceOptions::from_config(config), TokioDelay, notifier)
    }
}

impl<D: Delay> CalendarService<D> {
    pub fn new(options: ServiceOptions, delay: D, notifier: Arc<dyn Notifier>) -> Self {
        let (snapshots, _) = watch::channel(CalendarSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(Inner::default()),
                delay,
                notifier,
                options,
                snapshots,
            }),
        }
    }

    pub fn snapshot(&self) -> CalendarSnapshot {
        self.shared.state.lock().snapshot()
    }

    /// Receive a fresh snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<CalendarSnapshot> {
        self.shared.snapshots.subscribe()
    }

    pub fn is_signed_in(&self) -> bool {
        self.shared.state.lock().session.is_signed_in()
    }

    pub fn is_pending(&self) -> bool {
        self.shared.state.lock().session.is_pending()
    }

    pub fn events(&self) -> Vec<CalendarEvent> {
        self.shared.state.lock().store.events().to_vec()
    }

    pub fn event(&self, id: &str) -> Option<CalendarEvent> {
        self.shared.state.lock().store.get(id).cloned()
    }

    /// Visible events starting in `[start, end]`, in store order.
    pub fn events_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<CalendarEvent> {
        self.shared
            .state
            .lock()
            .store
            .in_range(start, end)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Start a session and install the seed dataset. A no-op while signed in.
    #[instrument(skip(self), level = "info")]
    pub async fn sign_in(&self) {
        let seed = self.shared.options.seed.clone();
        self.run(Operation::SignIn, move |inner| {
            inner.session.sign_in();
            inner.store.replace_all(seed);
            Ok(((), "Signed in to your calendar account (mock)".to_string()))
        })
        .await;
    }

    /// End the session and evict every visible event.
    #[instrument(skip(self), level = "info")]
    pub async fn sign_out(&self) {
        self.run(Operation::SignOut, |inner| {
            inner.session.sign_out();
            inner.store.clear();
            Ok(((), "Signed out".to_string()))
        })
        .await;
    }

    /// Replace the visible events with the seed events starting in `[start, end]`.
    ///
    /// Without both bounds the whole seed is installed. Local creates and
    /// updates made since the last fetch are not carried over.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_events(&self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) {
        let events: Vec<CalendarEvent> = match (start, end) {
            (Some(start), Some(end)) => self
                .shared
                .options
                .seed
                .iter()
                .filter(|e| e.starts_within(start, end))
                .cloned()
                .collect(),
            _ => self.shared.options.seed.clone(),
        };

        self.run(Operation::FetchEvents, move |inner| {
            let count = events.len();
            inner.store.replace_all(events);
            Ok(((), format!("Loaded {} events", count)))
        })
        .await;
    }

    /// Create an event with a store-assigned id. Returns it, or `None` if nothing was created.
    #[instrument(skip(self), level = "info")]
    pub async fn create_event(&self, mut draft: EventDraft) -> Option<CalendarEvent> {
        if draft.color.as_deref().filter(|c| !c.trim().is_empty()).is_none() {
            draft.color = Some(self.shared.options.default_color.clone());
        }

        self.run(Operation::CreateEvent, move |inner| {
            let event = inner.store.create(draft);
            tracing::debug!(id = %event.id, "Event created");
            Ok((event, "Event created (mock)".to_string()))
        })
        .await
    }

    /// Merge `patch` onto the event with `id`. Reports success even if no event matched.
    #[instrument(skip(self), level = "info")]
    pub async fn update_event(&self, id: &str, patch: EventPatch) {
        let id = id.to_string();
        self.run(Operation::UpdateEvent, move |inner| {
            if let Err(e) = inner.store.patch(&id, &patch) {
                tracing::debug!("Update ignored: {}", e);
            }
            Ok(((), "Event updated (mock)".to_string()))
        })
        .await;
    }

    /// Remove the event with `id`. Reports success even if no event matched.
    #[instrument(skip(self), level = "info")]
    pub async fn delete_event(&self, id: &str) {
        let id = id.to_string();
        self.run(Operation::DeleteEvent, move |inner| {
            if let Err(e) = inner.store.remove(&id) {
                tracing::debug!("Delete ignored: {}", e);
            }
            Ok(((), "Event deleted (mock)".to_string()))
        })
        .await;
    }

    /// Shared operation lifecycle.
    ///
    /// The session guard runs before the latency and again at commit. A call
    /// rejected up front is skipped without a notification. One that passes
    /// but finds the session changed at commit writes nothing and reports an
    /// error. Nothing is held locked across the await.
    async fn run<T, F>(&self, op: Operation, commit: F) -> Option<T>
    where
        F: FnOnce(&mut Inner) -> Result<(T, String), CalendarError> + Send,
        T: Send,
    {
        {
            let mut inner = self.shared.state.lock();
            if let Err(e) = session_guard(op, &inner.session) {
                tracing::debug!(operation = %op, "Skipped: {}", e);
                return None;
            }
            inner.session.begin_operation();
            self.publish(&inner);
        }

        self.shared
            .delay
            .sleep(self.shared.options.latency.for_operation(op))
            .await;

        let outcome = {
            let mut inner = self.shared.state.lock();
            inner.session.end_operation();
            let outcome = self
                .shared
                .options
                .faults
                .check(op)
                .and_then(|()| session_guard(op, &inner.session))
                .and_then(|()| commit(&mut *inner));
            self.publish(&inner);
            outcome
        };

        match outcome {
            Ok((value, text)) => {
                self.shared.notifier.notify(Notification::success(text));
                Some(value)
            }
            Err(e) => {
                tracing::warn!(operation = %op, "Operation failed: {}", e);
                self.shared.notifier.notify(Notification::error(e.user_message()));
                None
            }
        }
    }

    fn publish(&self, inner: &Inner) {
        self.shared.snapshots.send_replace(inner.snapshot());
    }
}

/// Sign-in needs a signed-out session; every other operation needs a signed-in one.
fn session_guard(op: Operation, session: &SessionState) -> Result<(), CalendarError> {
    if op.requires_session() {
        session.require_signed_in()
    } else if session.is_signed_in() {
        Err(CalendarError::AlreadySignedIn)
    } else {
        Ok(())
    }
}
