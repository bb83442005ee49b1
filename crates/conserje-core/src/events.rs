use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ids::{AnnouncementId, ExpenseId, MessageId, ReservationId, SpaceId, UserId, VisitorId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DomainEvent {
    ReservationRequested(ReservationRequested),
    ReservationConfirmed(ReservationConfirmed),
    ReservationCancelled(ReservationCancelled),
    ReservationDeclined(ReservationDeclined),
    VisitorRegistered(VisitorRegistered),
    VisitorApproved(VisitorApproved),
    VisitorRejected(VisitorRejected),
    VisitorCompleted(VisitorCompleted),
    VisitorCancelled(VisitorCancelled),
    ExpensePaid(ExpensePaid),
    ExpenseOverdue(ExpenseOverdue),
    AnnouncementPublished(AnnouncementPublished),
    MessageSent(MessageSent),
    MessageAnswered(MessageAnswered),
    ResidentRegistered(ResidentRegistered),
}

impl DomainEvent {
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::ReservationRequested(e) => e.occurred_at,
            Self::ReservationConfirmed(e) => e.occurred_at,
            Self::ReservationCancelled(e) => e.occurred_at,
            Self::ReservationDeclined(e) => e.occurred_at,
            Self::VisitorRegistered(e) => e.occurred_at,
            Self::VisitorApproved(e) => e.occurred_at,
            Self::VisitorRejected(e) => e.occurred_at,
            Self::VisitorCompleted(e) => e.occurred_at,
            Self::VisitorCancelled(e) => e.occurred_at,
            Self::ExpensePaid(e) => e.occurred_at,
            Self::ExpenseOverdue(e) => e.occurred_at,
            Self::AnnouncementPublished(e) => e.occurred_at,
            Self::MessageSent(e) => e.occurred_at,
            Self::MessageAnswered(e) => e.occurred_at,
            Self::ResidentRegistered(e) => e.occurred_at,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReservationRequested(_) => "reservation.requested",
            Self::ReservationConfirmed(_) => "reservation.confirmed",
            Self::ReservationCancelled(_) => "reservation.cancelled",
            Self::ReservationDeclined(_) => "reservation.declined",
            Self::VisitorRegistered(_) => "visitor.registered",
            Self::VisitorApproved(_) => "visitor.approved",
            Self::VisitorRejected(_) => "visitor.rejected",
            Self::VisitorCompleted(_) => "visitor.completed",
            Self::VisitorCancelled(_) => "visitor.cancelled",
            Self::ExpensePaid(_) => "expense.paid",
            Self::ExpenseOverdue(_) => "expense.overdue",
            Self::AnnouncementPublished(_) => "announcement.published",
            Self::MessageSent(_) => "message.sent",
            Self::MessageAnswered(_) => "message.answered",
            Self::ResidentRegistered(_) => "resident.registered",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationRequested {
    pub reservation_id: ReservationId,
    pub user_id: UserId,
    pub space_id: SpaceId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationConfirmed {
    pub reservation_id: ReservationId,
    pub user_id: UserId,
    pub space_id: SpaceId,
    pub fee: i64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationCancelled {
    pub reservation_id: ReservationId,
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationDeclined {
    pub reservation_id: ReservationId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitorRegistered {
    pub visitor_id: VisitorId,
    pub host_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitorApproved {
    pub visitor_id: VisitorId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitorRejected {
    pub visitor_id: VisitorId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitorCompleted {
    pub visitor_id: VisitorId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitorCancelled {
    pub visitor_id: VisitorId,
    pub host_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpensePaid {
    pub expense_id: ExpenseId,
    pub user_id: UserId,
    pub amount: i64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseOverdue {
    pub expense_id: ExpenseId,
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnouncementPublished {
    pub announcement_id: AnnouncementId,
    pub author_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageSent {
    pub message_id: MessageId,
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageAnswered {
    pub message_id: MessageId,
    pub responder_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidentRegistered {
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}
