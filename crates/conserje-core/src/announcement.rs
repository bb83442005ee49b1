use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::events::{AnnouncementPublished, DomainEvent};
use crate::ids::{AnnouncementId, BuildingId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnouncementKind {
    Maintenance,
    Improvement,
    General,
    Emergency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A notice published by administration on the building board. Pinned
/// announcements sort above everything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    id: AnnouncementId,
    building_id: BuildingId,
    title: String,
    content: String,
    kind: AnnouncementKind,
    priority: Priority,
    author_id: UserId,
    pinned: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Announcement {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        building_id: BuildingId,
        title: String,
        content: String,
        kind: AnnouncementKind,
        priority: Priority,
        author_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<(Self, Vec<DomainEvent>), DomainError> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(DomainError::EmptyAnnouncement);
        }
        let id = AnnouncementId::new();
        let announcement = Self {
            id: id.clone(),
            building_id,
            title,
            content,
            kind,
            priority,
            author_id: author_id.clone(),
            pinned: false,
            created_at: now,
            updated_at: now,
        };
        let events = vec![DomainEvent::AnnouncementPublished(AnnouncementPublished {
            announcement_id: id,
            author_id,
            occurred_at: now,
        })];
        Ok((announcement, events))
    }

    pub fn edit(
        &mut self,
        title: String,
        content: String,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(DomainError::EmptyAnnouncement);
        }
        self.title = title;
        self.content = content;
        self.updated_at = now;
        Ok(())
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    pub fn id(&self) -> &AnnouncementId {
        &self.id
    }

    pub fn building_id(&self) -> &BuildingId {
        &self.building_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> AnnouncementKind {
        self.kind
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
