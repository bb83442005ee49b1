use async_trait::async_trait;
use chrono::{DateTime, Utc};

use conserje_core::announcement::{Announcement, AnnouncementKind, Priority};
use conserje_core::ids::AnnouncementId;
use conserje_ports::error::{DeskError, PortError};
use conserje_ports::inbound::Bulletin;
use conserje_ports::outbound::{AnnouncementRepository, EventPublisher};
use conserje_ports::types::{NewAnnouncement, Session};

use crate::error::AppError;

/// Select-box values come in as free text; anything unrecognized lands on
/// the general/medium defaults rather than failing the publish.
fn parse_kind(value: &str) -> AnnouncementKind {
    match value.trim().to_ascii_lowercase().as_str() {
        "maintenance" | "mantencion" | "mantención" => AnnouncementKind::Maintenance,
        "improvement" | "mejora" => AnnouncementKind::Improvement,
        "emergency" | "emergencia" => AnnouncementKind::Emergency,
        _ => AnnouncementKind::General,
    }
}

fn parse_priority(value: &str) -> Priority {
    match value.trim().to_ascii_lowercase().as_str() {
        "low" | "baja" => Priority::Low,
        "high" | "alta" => Priority::High,
        _ => Priority::Medium,
    }
}

pub struct AnnouncementService<A, EP>
where
    A: AnnouncementRepository,
    EP: EventPublisher,
{
    announcements: A,
    events: EP,
}

impl<A, EP> AnnouncementService<A, EP>
where
    A: AnnouncementRepository,
    EP: EventPublisher,
{
    pub fn new(announcements: A, events: EP) -> Self {
        Self {
            announcements,
            events,
        }
    }

    pub async fn publish(
        &self,
        session: &Session,
        request: NewAnnouncement,
        now: DateTime<Utc>,
    ) -> Result<AnnouncementId, AppError> {
        if !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let (announcement, events) = Announcement::new(
            session.building_id.clone(),
            request.title,
            request.content,
            parse_kind(&request.kind),
            parse_priority(&request.priority),
            session.user_id.clone(),
            now,
        )?;
        let id = announcement.id().clone();
        self.announcements.save(&announcement).await?;
        self.events.publish(events).await?;
        Ok(id)
    }

    pub async fn set_pinned(
        &self,
        session: &Session,
        announcement_id: &str,
        pinned: bool,
    ) -> Result<(), AppError> {
        if !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let mut announcement = self
            .announcements
            .find_by_id(announcement_id)
            .await?
            .ok_or(AppError::Port(PortError::NotFound))?;
        announcement.set_pinned(pinned);
        self.announcements.save(&announcement).await?;
        Ok(())
    }

    /// Board order: pinned first, newest first within each group.
    pub async fn list(&self, session: &Session) -> Result<Vec<Announcement>, AppError> {
        let mut announcements = self
            .announcements
            .list_for_building(&session.building_id)
            .await?;
        announcements.sort_by(|a, b| {
            b.is_pinned()
                .cmp(&a.is_pinned())
                .then(b.created_at().cmp(&a.created_at()))
        });
        Ok(announcements)
    }
}

#[async_trait]
impl<A, EP> Bulletin for AnnouncementService<A, EP>
where
    A: AnnouncementRepository,
    EP: EventPublisher,
{
    async fn publish(
        &self,
        session: &Session,
        request: NewAnnouncement,
        now: DateTime<Utc>,
    ) -> Result<AnnouncementId, DeskError> {
        AnnouncementService::publish(self, session, request, now)
            .await
            .map_err(Into::into)
    }

    async fn set_pinned(
        &self,
        session: &Session,
        announcement_id: &str,
        pinned: bool,
    ) -> Result<(), DeskError> {
        AnnouncementService::set_pinned(self, session, announcement_id, pinned)
            .await
            .map_err(Into::into)
    }

    async fn list(&self, session: &Session) -> Result<Vec<Announcement>, DeskError> {
        AnnouncementService::list(self, session)
            .await
            .map_err(Into::into)
    }
}
