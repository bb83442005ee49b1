use async_trait::async_trait;

use conserje_core::reservation::SpaceReservation;
use conserje_ports::error::PortError;
use conserje_ports::outbound::ReservationRepository;
use conserje_ports::types::ReservationFilter;

use super::{lock, MemoryStore};

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn save(&self, reservation: &SpaceReservation) -> Result<(), PortError> {
        let mut reservations = lock(&self.inner.reservations)?;
        if let Some(pos) = reservations.iter().position(|r| r.id() == reservation.id()) {
            reservations[pos] = reservation.clone();
        } else {
            reservations.push(reservation.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<SpaceReservation>, PortError> {
        let reservations = lock(&self.inner.reservations)?;
        Ok(reservations
            .iter()
            .find(|r| r.id().to_string() == id)
            .cloned())
    }

    async fn find_by_filter(
        &self,
        filter: &ReservationFilter,
    ) -> Result<Vec<SpaceReservation>, PortError> {
        let reservations = lock(&self.inner.reservations)?;
        let mut matched: Vec<SpaceReservation> = reservations
            .iter()
            .filter(|r| filter.user_id.as_ref().map_or(true, |u| r.user_id() == u))
            .filter(|r| filter.space_id.as_ref().map_or(true, |s| r.space_id() == s))
            .filter(|r| filter.status.map_or(true, |s| r.status() == s))
            .filter(|r| filter.date.map_or(true, |d| r.date() == d))
            .cloned()
            .collect();
        matched.sort_by_key(|r| (r.date(), r.start_time()));
        Ok(matched)
    }
}
