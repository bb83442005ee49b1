use async_trait::async_trait;

use conserje_core::ids::{BuildingId, UserId};
use conserje_core::message::Message;
use conserje_ports::error::PortError;
use conserje_ports::outbound::MessageRepository;

use super::{lock, MemoryStore};

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn save(&self, message: &Message) -> Result<(), PortError> {
        let mut messages = lock(&self.inner.messages)?;
        if let Some(pos) = messages.iter().position(|m| m.id() == message.id()) {
            messages[pos] = message.clone();
        } else {
            messages.push(message.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Message>, PortError> {
        let messages = lock(&self.inner.messages)?;
        Ok(messages.iter().find(|m| m.id().to_string() == id).cloned())
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Message>, PortError> {
        let messages = lock(&self.inner.messages)?;
        Ok(messages
            .iter()
            .filter(|m| m.user_id() == user)
            .cloned()
            .collect())
    }

    async fn list_for_building(&self, building: &BuildingId) -> Result<Vec<Message>, PortError> {
        let messages = lock(&self.inner.messages)?;
        Ok(messages
            .iter()
            .filter(|m| m.building_id() == building)
            .cloned()
            .collect())
    }
}
