use async_trait::async_trait;

use conserje_core::announcement::Announcement;
use conserje_core::calendar::CalendarDate;
use conserje_core::events::DomainEvent;
use conserje_core::expense::CommonExpense;
use conserje_core::ids::{BuildingId, UserId};
use conserje_core::message::Message;
use conserje_core::reservation::{CommonSpace, SpaceReservation};
use conserje_core::user::User;
use conserje_core::visitor::Visitor;

use crate::error::PortError;
use crate::types::{ExpenseFilter, ReservationFilter, VisitorFilter};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: &User) -> Result<(), PortError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, PortError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PortError>;
    async fn list_all(&self) -> Result<Vec<User>, PortError>;
}

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn save(&self, space: &CommonSpace) -> Result<(), PortError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<CommonSpace>, PortError>;
    async fn list_active(&self) -> Result<Vec<CommonSpace>, PortError>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn save(&self, reservation: &SpaceReservation) -> Result<(), PortError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<SpaceReservation>, PortError>;
    async fn find_by_filter(
        &self,
        filter: &ReservationFilter,
    ) -> Result<Vec<SpaceReservation>, PortError>;
}

#[async_trait]
pub trait VisitorRepository: Send + Sync {
    async fn save(&self, visitor: &Visitor) -> Result<(), PortError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Visitor>, PortError>;
    /// `today` anchors the filter's today/upcoming/past buckets.
    async fn find_by_filter(
        &self,
        filter: &VisitorFilter,
        today: CalendarDate,
    ) -> Result<Vec<Visitor>, PortError>;
}

#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn save(&self, expense: &CommonExpense) -> Result<(), PortError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<CommonExpense>, PortError>;
    async fn find_by_filter(&self, filter: &ExpenseFilter)
        -> Result<Vec<CommonExpense>, PortError>;
}

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn save(&self, announcement: &Announcement) -> Result<(), PortError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Announcement>, PortError>;
    async fn list_for_building(&self, building: &BuildingId)
        -> Result<Vec<Announcement>, PortError>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn save(&self, message: &Message) -> Result<(), PortError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Message>, PortError>;
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Message>, PortError>;
    async fn list_for_building(&self, building: &BuildingId) -> Result<Vec<Message>, PortError>;
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), PortError>;
}
