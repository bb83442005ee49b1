use async_trait::async_trait;
use chrono::{DateTime, Utc};

use conserje_core::ids::MessageId;
use conserje_core::message::{Message, MessageCategory, MessageStatus};
use conserje_ports::error::{DeskError, PortError};
use conserje_ports::inbound::Mailbox;
use conserje_ports::outbound::{EventPublisher, MessageRepository};
use conserje_ports::types::{NewMessage, Session};

use crate::error::AppError;

/// Select-box category values; anything unrecognized lands on general.
fn parse_category(value: &str) -> MessageCategory {
    match value.trim().to_ascii_lowercase().as_str() {
        "maintenance" | "mantencion" | "mantención" => MessageCategory::Maintenance,
        "complaint" | "reclamo" => MessageCategory::Complaint,
        "suggestion" | "sugerencia" => MessageCategory::Suggestion,
        _ => MessageCategory::General,
    }
}

pub struct MessageService<M, EP>
where
    M: MessageRepository,
    EP: EventPublisher,
{
    messages: M,
    events: EP,
}

impl<M, EP> MessageService<M, EP>
where
    M: MessageRepository,
    EP: EventPublisher,
{
    pub fn new(messages: M, events: EP) -> Self {
        Self { messages, events }
    }

    pub async fn send(
        &self,
        session: &Session,
        request: NewMessage,
        now: DateTime<Utc>,
    ) -> Result<MessageId, AppError> {
        let (message, events) = Message::new(
            session.user_id.clone(),
            session.building_id.clone(),
            request.subject,
            request.content,
            parse_category(&request.category),
            now,
        )?;
        let id = message.id().clone();
        self.messages.save(&message).await?;
        self.events.publish(events).await?;
        Ok(id)
    }

    /// Replying is open to administration and to the message's author, so
    /// a thread can go back and forth.
    pub async fn respond(
        &self,
        session: &Session,
        message_id: &str,
        response: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut message = self.load(message_id).await?;
        if message.user_id() != &session.user_id && !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let events = message.respond(session.user_id.clone(), response.to_string(), now)?;
        self.messages.save(&message).await?;
        self.events.publish(events).await?;
        Ok(())
    }

    /// Workflow state is an administration concern.
    pub async fn set_status(
        &self,
        session: &Session,
        message_id: &str,
        status: MessageStatus,
    ) -> Result<(), AppError> {
        if !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let mut message = self.load(message_id).await?;
        message.set_status(status);
        self.messages.save(&message).await?;
        Ok(())
    }

    /// Residents see their own threads; admins see the whole building,
    /// newest first.
    pub async fn list(&self, session: &Session) -> Result<Vec<Message>, AppError> {
        let mut messages = if session.is_admin() {
            self.messages.list_for_building(&session.building_id).await?
        } else {
            self.messages.list_for_user(&session.user_id).await?
        };
        messages.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(messages)
    }

    async fn load(&self, message_id: &str) -> Result<Message, AppError> {
        self.messages
            .find_by_id(message_id)
            .await?
            .ok_or(AppError::Port(PortError::NotFound))
    }
}

#[async_trait]
impl<M, EP> Mailbox for MessageService<M, EP>
where
    M: MessageRepository,
    EP: EventPublisher,
{
    async fn send(
        &self,
        session: &Session,
        request: NewMessage,
        now: DateTime<Utc>,
    ) -> Result<MessageId, DeskError> {
        MessageService::send(self, session, request, now)
            .await
            .map_err(Into::into)
    }

    async fn respond(
        &self,
        session: &Session,
        message_id: &str,
        response: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError> {
        MessageService::respond(self, session, message_id, response, now)
            .await
            .map_err(Into::into)
    }

    async fn set_status(
        &self,
        session: &Session,
        message_id: &str,
        status: MessageStatus,
    ) -> Result<(), DeskError> {
        MessageService::set_status(self, session, message_id, status)
            .await
            .map_err(Into::into)
    }

    async fn list(&self, session: &Session) -> Result<Vec<Message>, DeskError> {
        MessageService::list(self, session)
            .await
            .map_err(Into::into)
    }
}
