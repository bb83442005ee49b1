use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::events::{DomainEvent, MessageAnswered, MessageSent};
use crate::ids::{BuildingId, MessageId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageCategory {
    General,
    Maintenance,
    Complaint,
    Suggestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

/// One reply in a message thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    author_id: UserId,
    content: String,
    created_at: DateTime<Utc>,
}

impl MessageResponse {
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A resident's message to administration: a subject, a categorized body
/// and a thread of responses. Status tracks the handling workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    user_id: UserId,
    building_id: BuildingId,
    subject: String,
    content: String,
    category: MessageCategory,
    status: MessageStatus,
    responses: Vec<MessageResponse>,
    created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        user_id: UserId,
        building_id: BuildingId,
        subject: String,
        content: String,
        category: MessageCategory,
        now: DateTime<Utc>,
    ) -> Result<(Self, Vec<DomainEvent>), DomainError> {
        if subject.trim().is_empty() || content.trim().is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        let id = MessageId::new();
        let message = Self {
            id: id.clone(),
            user_id: user_id.clone(),
            building_id,
            subject,
            content,
            category,
            status: MessageStatus::Open,
            responses: Vec::new(),
            created_at: now,
        };
        let events = vec![DomainEvent::MessageSent(MessageSent {
            message_id: id,
            user_id,
            occurred_at: now,
        })];
        Ok((message, events))
    }

    /// Appends a reply to the thread. A first reply moves an open message
    /// into progress; a closed message takes no more replies.
    pub fn respond(
        &mut self,
        author_id: UserId,
        content: String,
        now: DateTime<Utc>,
    ) -> Result<Vec<DomainEvent>, DomainError> {
        if self.status == MessageStatus::Closed {
            return Err(DomainError::MessageClosed);
        }
        if content.trim().is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        self.responses.push(MessageResponse {
            author_id: author_id.clone(),
            content,
            created_at: now,
        });
        if self.status == MessageStatus::Open {
            self.status = MessageStatus::InProgress;
        }
        Ok(vec![DomainEvent::MessageAnswered(MessageAnswered {
            message_id: self.id.clone(),
            responder_id: author_id,
            occurred_at: now,
        })])
    }

    pub fn set_status(&mut self, status: MessageStatus) {
        self.status = status;
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn building_id(&self) -> &BuildingId {
        &self.building_id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> MessageCategory {
        self.category
    }

    pub fn status(&self) -> MessageStatus {
        self.status
    }

    pub fn responses(&self) -> &[MessageResponse] {
        &self.responses
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        chrono::DateTime::parse_from_rfc3339(s)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn make_message() -> Message {
        let (message, _) = Message::new(
            UserId::new(),
            BuildingId::new(),
            "Filtración en el baño".into(),
            "Hay una filtración bajo el lavamanos del baño principal.".into(),
            MessageCategory::Maintenance,
            ts("2025-01-15T10:00:00Z"),
        )
        .unwrap();
        message
    }

    #[test]
    fn new_message_opens_the_thread() {
        let (message, events) = Message::new(
            UserId::new(),
            BuildingId::new(),
            "Consulta".into(),
            "¿Cuándo llega la cuenta de enero?".into(),
            MessageCategory::General,
            ts("2025-01-15T10:00:00Z"),
        )
        .unwrap();
        assert_eq!(message.status(), MessageStatus::Open);
        assert!(message.responses().is_empty());
        assert_eq!(events[0].event_type(), "message.sent");
    }

    #[test]
    fn blank_subject_or_content_rejected() {
        let result = Message::new(
            UserId::new(),
            BuildingId::new(),
            "  ".into(),
            "contenido".into(),
            MessageCategory::General,
            ts("2025-01-15T10:00:00Z"),
        );
        assert!(matches!(result, Err(DomainError::EmptyMessage)));
    }

    #[test]
    fn first_reply_moves_to_in_progress() {
        let mut message = make_message();
        let events = message
            .respond(
                UserId::new(),
                "Agendamos la visita del gásfiter para mañana.".into(),
                ts("2025-01-15T12:00:00Z"),
            )
            .unwrap();
        assert_eq!(message.status(), MessageStatus::InProgress);
        assert_eq!(message.responses().len(), 1);
        assert_eq!(events[0].event_type(), "message.answered");
    }

    #[test]
    fn replies_keep_a_resolved_status() {
        let mut message = make_message();
        message
            .respond(UserId::new(), "En camino.".into(), ts("2025-01-15T12:00:00Z"))
            .unwrap();
        message.set_status(MessageStatus::Resolved);
        message
            .respond(UserId::new(), "Gracias.".into(), ts("2025-01-15T13:00:00Z"))
            .unwrap();
        assert_eq!(message.status(), MessageStatus::Resolved);
        assert_eq!(message.responses().len(), 2);
    }

    #[test]
    fn closed_message_takes_no_replies() {
        let mut message = make_message();
        message.set_status(MessageStatus::Closed);
        let result = message.respond(
            UserId::new(),
            "¿Sigue pendiente?".into(),
            ts("2025-01-16T09:00:00Z"),
        );
        assert!(matches!(result, Err(DomainError::MessageClosed)));
    }

    #[test]
    fn blank_reply_rejected() {
        let mut message = make_message();
        let result = message.respond(UserId::new(), "   ".into(), ts("2025-01-15T12:00:00Z"));
        assert!(matches!(result, Err(DomainError::EmptyMessage)));
    }
}
