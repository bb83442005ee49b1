use async_trait::async_trait;
use chrono::{DateTime, Utc};

use conserje_core::error::DomainError;
use conserje_core::events::{DomainEvent, ResidentRegistered};
use conserje_core::ids::UserId;
use conserje_core::user::{Phone, Role, User};
use conserje_ports::error::DeskError;
use conserje_ports::inbound::Directory;
use conserje_ports::outbound::{EventPublisher, UserRepository};
use conserje_ports::types::{NewResident, Session};

use crate::error::AppError;

/// Administration's resident registry: account creation and the building
/// directory.
pub struct DirectoryService<U, EP>
where
    U: UserRepository,
    EP: EventPublisher,
{
    users: U,
    events: EP,
}

impl<U, EP> DirectoryService<U, EP>
where
    U: UserRepository,
    EP: EventPublisher,
{
    pub fn new(users: U, events: EP) -> Self {
        Self { users, events }
    }

    pub async fn register_resident(
        &self,
        session: &Session,
        request: NewResident,
        now: DateTime<Utc>,
    ) -> Result<UserId, AppError> {
        if !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::Domain(DomainError::DuplicateEmail));
        }
        let phone = Phone::new(&request.phone)?;
        let user = User::new(
            request.email,
            request.name,
            request.apartment,
            phone,
            Role::Resident,
            session.building_id.clone(),
            now,
        );
        let id = user.id().clone();
        self.users.save(&user).await?;
        self.events
            .publish(vec![DomainEvent::ResidentRegistered(ResidentRegistered {
                user_id: id.clone(),
                occurred_at: now,
            })])
            .await?;
        Ok(id)
    }

    /// The directory, filtered by an optional search over name, apartment
    /// and email, ordered by apartment.
    pub async fn list_residents(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Vec<User>, AppError> {
        if !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let needle = search.map(str::to_lowercase);
        let mut residents: Vec<User> = self
            .users
            .list_all()
            .await?
            .into_iter()
            .filter(|u| u.role() == Role::Resident)
            .filter(|u| {
                needle.as_deref().map_or(true, |n| {
                    u.name().to_lowercase().contains(n)
                        || u.apartment().to_lowercase().contains(n)
                        || u.email().to_lowercase().contains(n)
                })
            })
            .collect();
        residents.sort_by(|a, b| a.apartment().cmp(b.apartment()));
        Ok(residents)
    }
}

#[async_trait]
impl<U, EP> Directory for DirectoryService<U, EP>
where
    U: UserRepository,
    EP: EventPublisher,
{
    async fn register_resident(
        &self,
        session: &Session,
        request: NewResident,
        now: DateTime<Utc>,
    ) -> Result<UserId, DeskError> {
        DirectoryService::register_resident(self, session, request, now)
            .await
            .map_err(Into::into)
    }

    async fn list_residents(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Vec<User>, DeskError> {
        DirectoryService::list_residents(self, session, search)
            .await
            .map_err(Into::into)
    }
}
