use async_trait::async_trait;
use chrono::{DateTime, Utc};

use conserje_core::announcement::Announcement;
use conserje_core::expense::CommonExpense;
use conserje_core::ids::{AnnouncementId, MessageId, ReservationId, UserId, VisitorId};
use conserje_core::message::{Message, MessageStatus};
use conserje_core::reservation::SpaceReservation;
use conserje_core::user::User;
use conserje_core::visitor::Visitor;

use crate::error::DeskError;
use crate::types::{
    ExpenseFilter, MonthlySummary, NewAnnouncement, NewMessage, NewReservation, NewResident,
    NewVisitor, ReservationFilter, Session, VisitorFilter,
};

#[async_trait]
pub trait FrontDoor: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, DeskError>;
}

#[async_trait]
pub trait ReservationDesk: Send + Sync {
    async fn reserve(
        &self,
        session: &Session,
        request: NewReservation,
        now: DateTime<Utc>,
    ) -> Result<ReservationId, DeskError>;
    async fn cancel(
        &self,
        session: &Session,
        reservation_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError>;
    async fn confirm(
        &self,
        session: &Session,
        reservation_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError>;
    async fn decline(
        &self,
        session: &Session,
        reservation_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError>;
    async fn list(
        &self,
        session: &Session,
        filter: ReservationFilter,
    ) -> Result<Vec<SpaceReservation>, DeskError>;
}

#[async_trait]
pub trait VisitorDesk: Send + Sync {
    async fn register(
        &self,
        session: &Session,
        request: NewVisitor,
        now: DateTime<Utc>,
    ) -> Result<VisitorId, DeskError>;
    async fn approve(
        &self,
        session: &Session,
        visitor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError>;
    async fn reject(
        &self,
        session: &Session,
        visitor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError>;
    async fn complete(
        &self,
        session: &Session,
        visitor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError>;
    async fn cancel(
        &self,
        session: &Session,
        visitor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError>;
    async fn list(
        &self,
        session: &Session,
        filter: VisitorFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Visitor>, DeskError>;
}

#[async_trait]
pub trait Billing: Send + Sync {
    async fn pay(
        &self,
        session: &Session,
        expense_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError>;
    async fn list(
        &self,
        session: &Session,
        filter: ExpenseFilter,
    ) -> Result<Vec<CommonExpense>, DeskError>;
    async fn refresh_overdue(&self, now: DateTime<Utc>) -> Result<usize, DeskError>;
    async fn monthly_summary(
        &self,
        session: &Session,
        month: &str,
        year: i32,
    ) -> Result<MonthlySummary, DeskError>;
}

#[async_trait]
pub trait Bulletin: Send + Sync {
    async fn publish(
        &self,
        session: &Session,
        request: NewAnnouncement,
        now: DateTime<Utc>,
    ) -> Result<AnnouncementId, DeskError>;
    async fn set_pinned(
        &self,
        session: &Session,
        announcement_id: &str,
        pinned: bool,
    ) -> Result<(), DeskError>;
    async fn list(&self, session: &Session) -> Result<Vec<Announcement>, DeskError>;
}

#[async_trait]
pub trait Mailbox: Send + Sync {
    async fn send(
        &self,
        session: &Session,
        request: NewMessage,
        now: DateTime<Utc>,
    ) -> Result<MessageId, DeskError>;
    async fn respond(
        &self,
        session: &Session,
        message_id: &str,
        response: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError>;
    async fn set_status(
        &self,
        session: &Session,
        message_id: &str,
        status: MessageStatus,
    ) -> Result<(), DeskError>;
    async fn list(&self, session: &Session) -> Result<Vec<Message>, DeskError>;
}

#[async_trait]
pub trait Directory: Send + Sync {
    async fn register_resident(
        &self,
        session: &Session,
        request: NewResident,
        now: DateTime<Utc>,
    ) -> Result<UserId, DeskError>;
    async fn list_residents(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Vec<User>, DeskError>;
}
