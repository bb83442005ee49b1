use async_trait::async_trait;

use conserje_core::user::User;
use conserje_ports::error::PortError;
use conserje_ports::outbound::UserRepository;

use super::{lock, MemoryStore};

#[async_trait]
impl UserRepository for MemoryStore {
    async fn save(&self, user: &User) -> Result<(), PortError> {
        let mut users = lock(&self.inner.users)?;
        if let Some(pos) = users.iter().position(|u| u.id() == user.id()) {
            users[pos] = user.clone();
        } else {
            users.push(user.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, PortError> {
        let users = lock(&self.inner.users)?;
        Ok(users.iter().find(|u| u.id().to_string() == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PortError> {
        let users = lock(&self.inner.users)?;
        Ok(users
            .iter()
            .find(|u| u.email().eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, PortError> {
        Ok(lock(&self.inner.users)?.clone())
    }
}
