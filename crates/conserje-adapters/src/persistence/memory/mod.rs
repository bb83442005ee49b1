mod announcement;
mod event;
mod expense;
mod message;
mod reservation;
mod space;
mod user;
mod visitor;

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use conserje_core::announcement::Announcement;
use conserje_core::expense::CommonExpense;
use conserje_core::message::Message;
use conserje_core::reservation::{CommonSpace, SpaceReservation};
use conserje_core::user::User;
use conserje_core::visitor::Visitor;
use conserje_ports::error::PortError;

/// A published domain event as kept in the store's append-only log.
#[derive(Debug, Clone)]
pub struct StoredEvent {
    pub event_type: String,
    pub payload: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    users: Mutex<Vec<User>>,
    spaces: Mutex<Vec<CommonSpace>>,
    reservations: Mutex<Vec<SpaceReservation>>,
    visitors: Mutex<Vec<Visitor>>,
    expenses: Mutex<Vec<CommonExpense>>,
    announcements: Mutex<Vec<Announcement>>,
    messages: Mutex<Vec<Message>>,
    events: Mutex<Vec<StoredEvent>>,
}

/// In-memory backing store shared by every repository implementation.
/// Saves upsert by id, matching what a keyed table would do.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_log(&self) -> Result<Vec<StoredEvent>, PortError> {
        Ok(lock(&self.inner.events)?.clone())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, PortError> {
    mutex
        .lock()
        .map_err(|_| PortError::Persistence("store lock poisoned".into()))
}
