use async_trait::async_trait;

use conserje_core::reservation::CommonSpace;
use conserje_ports::error::PortError;
use conserje_ports::outbound::SpaceRepository;

use super::{lock, MemoryStore};

#[async_trait]
impl SpaceRepository for MemoryStore {
    async fn save(&self, space: &CommonSpace) -> Result<(), PortError> {
        let mut spaces = lock(&self.inner.spaces)?;
        if let Some(pos) = spaces.iter().position(|s| s.id() == space.id()) {
            spaces[pos] = space.clone();
        } else {
            spaces.push(space.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CommonSpace>, PortError> {
        let spaces = lock(&self.inner.spaces)?;
        Ok(spaces.iter().find(|s| s.id().to_string() == id).cloned())
    }

    async fn list_active(&self) -> Result<Vec<CommonSpace>, PortError> {
        let spaces = lock(&self.inner.spaces)?;
        Ok(spaces.iter().filter(|s| s.is_active()).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conserje_core::ids::BuildingId;
    use std::collections::BTreeSet;

    fn make_space(name: &str) -> CommonSpace {
        CommonSpace::new(
            BuildingId::new(),
            name.into(),
            "".into(),
            20,
            Some(15000),
            Vec::new(),
            BTreeSet::new(),
            Vec::new(),
        )
    }

    #[tokio::test]
    async fn deactivated_spaces_drop_out_of_the_active_list() {
        let store = MemoryStore::new();
        let mut quincho = make_space("Quincho");
        store.save(&quincho).await.unwrap();
        store.save(&make_space("Salón de Eventos")).await.unwrap();

        assert_eq!(store.list_active().await.unwrap().len(), 2);

        quincho.deactivate();
        store.save(&quincho).await.unwrap();

        let active = store.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name(), "Salón de Eventos");
    }
}
