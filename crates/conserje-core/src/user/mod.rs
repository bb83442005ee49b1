pub mod phone;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{BuildingId, UserId};

pub use phone::Phone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Resident,
    Admin,
}

/// A registered account: a resident of the building, or a member of the
/// administration company. The apartment field holds the unit number for
/// residents and a free-form label for administration staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: String,
    name: String,
    apartment: String,
    phone: Phone,
    role: Role,
    building_id: BuildingId,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: String,
        name: String,
        apartment: String,
        phone: Phone,
        role: Role,
        building_id: BuildingId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            email,
            name,
            apartment,
            phone,
            role,
            building_id,
            created_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apartment(&self) -> &str {
        &self.apartment
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn building_id(&self) -> &BuildingId {
        &self.building_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        chrono::DateTime::parse_from_rfc3339("2025-01-15T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn make_user(role: Role) -> User {
        User::new(
            "juan.perez@email.com".into(),
            "Juan Pérez".into(),
            "301".into(),
            Phone::new("+56987654321").unwrap(),
            role,
            BuildingId::new(),
            now(),
        )
    }

    #[test]
    fn resident_is_not_admin() {
        assert!(!make_user(Role::Resident).is_admin());
        assert!(make_user(Role::Admin).is_admin());
    }

    #[test]
    fn user_keeps_contact_details() {
        let user = make_user(Role::Resident);
        assert_eq!(user.apartment(), "301");
        assert_eq!(user.phone().as_str(), "+56987654321");
    }
}
