use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDate;
use crate::error::DomainError;
use crate::events::{
    DomainEvent, VisitorApproved, VisitorCancelled, VisitorCompleted, VisitorRegistered,
    VisitorRejected,
};
use crate::ids::{UserId, VisitorId};
use crate::user::Phone;

/// How long an approved registration permits entry, counted from the
/// announced visit time.
pub const VISIT_WINDOW: Duration = Duration::hours(24);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitorStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

/// A visitor announced by a resident. Approval is an administration
/// action; the concierge checks `is_active` at the door.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visitor {
    id: VisitorId,
    host_id: UserId,
    name: String,
    document_id: String,
    phone: Phone,
    visit_date: CalendarDate,
    visit_time: NaiveTime,
    status: VisitorStatus,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl Visitor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        host_id: UserId,
        name: String,
        document_id: String,
        phone: Phone,
        visit_date: CalendarDate,
        visit_time: NaiveTime,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> (Self, Vec<DomainEvent>) {
        let id = VisitorId::new();
        let visitor = Self {
            id: id.clone(),
            host_id: host_id.clone(),
            name,
            document_id,
            phone,
            visit_date,
            visit_time,
            status: VisitorStatus::Pending,
            notes,
            created_at: now,
        };
        let events = vec![DomainEvent::VisitorRegistered(VisitorRegistered {
            visitor_id: id,
            host_id,
            occurred_at: now,
        })];
        (visitor, events)
    }

    pub fn start_instant(&self) -> DateTime<Utc> {
        self.visit_date.at(self.visit_time)
    }

    /// Entry is permitted while the visit is approved and now lies within
    /// the closed 24-hour window starting at the announced time.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        let start = self.start_instant();
        self.status == VisitorStatus::Approved && now >= start && now <= start + VISIT_WINDOW
    }

    /// Unlike reservations, a visit needs no minimum notice: the host may
    /// cancel any time before the announced start.
    pub fn is_cancellable(&self, now: DateTime<Utc>) -> bool {
        self.status == VisitorStatus::Approved && self.start_instant() > now
    }

    pub fn approve(&mut self, now: DateTime<Utc>) -> Result<Vec<DomainEvent>, DomainError> {
        match self.status {
            VisitorStatus::Approved => Ok(vec![]),
            VisitorStatus::Pending => {
                self.status = VisitorStatus::Approved;
                Ok(vec![DomainEvent::VisitorApproved(VisitorApproved {
                    visitor_id: self.id.clone(),
                    occurred_at: now,
                })])
            }
            VisitorStatus::Rejected | VisitorStatus::Completed => {
                Err(DomainError::VisitAlreadyDecided)
            }
        }
    }

    pub fn reject(&mut self, now: DateTime<Utc>) -> Result<Vec<DomainEvent>, DomainError> {
        match self.status {
            VisitorStatus::Rejected => Ok(vec![]),
            VisitorStatus::Pending => {
                self.status = VisitorStatus::Rejected;
                Ok(vec![DomainEvent::VisitorRejected(VisitorRejected {
                    visitor_id: self.id.clone(),
                    occurred_at: now,
                })])
            }
            VisitorStatus::Approved | VisitorStatus::Completed => {
                Err(DomainError::VisitAlreadyDecided)
            }
        }
    }

    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<Vec<DomainEvent>, DomainError> {
        match self.status {
            VisitorStatus::Completed => Ok(vec![]),
            VisitorStatus::Approved => {
                self.status = VisitorStatus::Completed;
                Ok(vec![DomainEvent::VisitorCompleted(VisitorCompleted {
                    visitor_id: self.id.clone(),
                    occurred_at: now,
                })])
            }
            VisitorStatus::Pending | VisitorStatus::Rejected => Err(DomainError::VisitNotApproved),
        }
    }

    /// Host withdrawing an approved visit before it starts. Lands on
    /// Rejected, matching how the dashboard records it.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<Vec<DomainEvent>, DomainError> {
        if self.status != VisitorStatus::Approved {
            return Err(DomainError::VisitNotApproved);
        }
        if self.start_instant() <= now {
            return Err(DomainError::VisitAlreadyStarted);
        }
        self.status = VisitorStatus::Rejected;
        Ok(vec![DomainEvent::VisitorCancelled(VisitorCancelled {
            visitor_id: self.id.clone(),
            host_id: self.host_id.clone(),
            occurred_at: now,
        })])
    }

    pub fn id(&self) -> &VisitorId {
        &self.id
    }

    pub fn host_id(&self) -> &UserId {
        &self.host_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn visit_date(&self) -> CalendarDate {
        self.visit_date
    }

    pub fn visit_time(&self) -> NaiveTime {
        self.visit_time
    }

    pub fn status(&self) -> VisitorStatus {
        self.status
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
