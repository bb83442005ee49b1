use async_trait::async_trait;

use conserje_ports::error::DeskError;
use conserje_ports::inbound::FrontDoor;
use conserje_ports::outbound::UserRepository;
use conserje_ports::types::Session;

use crate::error::AppError;

/// Mock credential check: every account shares one access password,
/// supplied at wiring time. Stands in for a real identity provider.
pub struct AuthService<U>
where
    U: UserRepository,
{
    users: U,
    access_password: String,
}

impl<U> AuthService<U>
where
    U: UserRepository,
{
    pub fn new(users: U, access_password: String) -> Self {
        Self {
            users,
            access_password,
        }
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Session, AppError> {
        if password != self.access_password {
            return Err(AppError::InvalidCredentials);
        }
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;
        Ok(Session {
            user_id: user.id().clone(),
            name: user.name().to_string(),
            role: user.role(),
            building_id: user.building_id().clone(),
        })
    }
}

#[async_trait]
impl<U> FrontDoor for AuthService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, DeskError> {
        AuthService::authenticate(self, email, password)
            .await
            .map_err(Into::into)
    }
}
