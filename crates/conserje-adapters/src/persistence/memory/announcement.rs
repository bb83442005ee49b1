use async_trait::async_trait;

use conserje_core::announcement::Announcement;
use conserje_core::ids::BuildingId;
use conserje_ports::error::PortError;
use conserje_ports::outbound::AnnouncementRepository;

use super::{lock, MemoryStore};

#[async_trait]
impl AnnouncementRepository for MemoryStore {
    async fn save(&self, announcement: &Announcement) -> Result<(), PortError> {
        let mut announcements = lock(&self.inner.announcements)?;
        if let Some(pos) = announcements
            .iter()
            .position(|a| a.id() == announcement.id())
        {
            announcements[pos] = announcement.clone();
        } else {
            announcements.push(announcement.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Announcement>, PortError> {
        let announcements = lock(&self.inner.announcements)?;
        Ok(announcements
            .iter()
            .find(|a| a.id().to_string() == id)
            .cloned())
    }

    async fn list_for_building(
        &self,
        building: &BuildingId,
    ) -> Result<Vec<Announcement>, PortError> {
        let announcements = lock(&self.inner.announcements)?;
        Ok(announcements
            .iter()
            .filter(|a| a.building_id() == building)
            .cloned()
            .collect())
    }
}
