use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::BuildingId;

/// The managed property. A deployment holds exactly one, but entities
/// reference it by id so multi-building administration stays possible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    id: BuildingId,
    name: String,
    address: String,
    total_apartments: u32,
    admin_company: String,
    created_at: DateTime<Utc>,
}

impl Building {
    pub fn new(
        name: String,
        address: String,
        total_apartments: u32,
        admin_company: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: BuildingId::new(),
            name,
            address,
            total_apartments,
            admin_company,
            created_at: now,
        }
    }

    pub fn id(&self) -> &BuildingId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn total_apartments(&self) -> u32 {
        self.total_apartments
    }

    pub fn admin_company(&self) -> &str {
        &self.admin_company
    }
}
