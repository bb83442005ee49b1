use async_trait::async_trait;
use chrono::{DateTime, Utc};

use conserje_core::calendar::CalendarDate;
use conserje_core::error::DomainError;
use conserje_core::ids::ReservationId;
use conserje_core::reservation::{ReservationStatus, SpaceReservation};
use conserje_ports::error::{DeskError, PortError};
use conserje_ports::inbound::ReservationDesk;
use conserje_ports::outbound::{EventPublisher, ReservationRepository, SpaceRepository};
use conserje_ports::types::{NewReservation, ReservationFilter, Session};

use crate::error::AppError;
use crate::forms::{parse_date_text, parse_time};

/// How far ahead a space can be booked.
pub const BOOKING_HORIZON_DAYS: u64 = 60;

pub struct ReservationService<S, R, EP>
where
    S: SpaceRepository,
    R: ReservationRepository,
    EP: EventPublisher,
{
    spaces: S,
    reservations: R,
    events: EP,
}

impl<S, R, EP> ReservationService<S, R, EP>
where
    S: SpaceRepository,
    R: ReservationRepository,
    EP: EventPublisher,
{
    pub fn new(spaces: S, reservations: R, events: EP) -> Self {
        Self {
            spaces,
            reservations,
            events,
        }
    }

    /// Books a slot and confirms it in-line, the way the mock payment flow
    /// does. Validation order matches the form: space, date, times, clash.
    pub async fn reserve(
        &self,
        session: &Session,
        request: NewReservation,
        now: DateTime<Utc>,
    ) -> Result<ReservationId, AppError> {
        let space = self
            .spaces
            .find_by_id(&request.space_id)
            .await?
            .ok_or(AppError::Port(PortError::NotFound))?;
        if !space.is_active() {
            return Err(AppError::Domain(DomainError::SpaceUnavailable));
        }

        let today = CalendarDate::from_instant(now);
        let date = parse_date_text(&request.date, today)?;
        space
            .constraints(today, BOOKING_HORIZON_DAYS)
            .check(date, today)?;

        let start = parse_time(&request.start_time)?;
        let end = parse_time(&request.end_time)?;
        if !space.allows_hour(start) || !space.allows_hour(end) {
            return Err(AppError::Domain(DomainError::OutsideAvailableHours));
        }

        let fee = space.fee_for(start, end);
        let (mut reservation, mut events) = SpaceReservation::new(
            session.user_id.clone(),
            space.id().clone(),
            date,
            start,
            end,
            request.notes,
            fee,
            now,
        )?;

        let same_day = self
            .reservations
            .find_by_filter(&ReservationFilter {
                space_id: Some(space.id().clone()),
                date: Some(date),
                ..Default::default()
            })
            .await?;
        if same_day.iter().any(|existing| reservation.overlaps(existing)) {
            return Err(AppError::Domain(DomainError::SlotTaken));
        }

        events.extend(reservation.confirm(now)?);
        let id = reservation.id().clone();
        self.reservations.save(&reservation).await?;
        self.events.publish(events).await?;

        Ok(id)
    }

    pub async fn cancel(
        &self,
        session: &Session,
        reservation_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut reservation = self.load(reservation_id).await?;
        if reservation.user_id() != &session.user_id && !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let events = reservation.cancel(now)?;
        self.reservations.save(&reservation).await?;
        self.events.publish(events).await?;
        Ok(())
    }

    pub async fn confirm(
        &self,
        session: &Session,
        reservation_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let mut reservation = self.load(reservation_id).await?;
        let events = reservation.confirm(now)?;
        self.reservations.save(&reservation).await?;
        self.events.publish(events).await?;
        Ok(())
    }

    pub async fn decline(
        &self,
        session: &Session,
        reservation_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let mut reservation = self.load(reservation_id).await?;
        let events = reservation.decline(now)?;
        self.reservations.save(&reservation).await?;
        self.events.publish(events).await?;
        Ok(())
    }

    /// Residents only ever see their own reservations; admins see all.
    pub async fn list(
        &self,
        session: &Session,
        mut filter: ReservationFilter,
    ) -> Result<Vec<SpaceReservation>, AppError> {
        if !session.is_admin() {
            filter.user_id = Some(session.user_id.clone());
        }
        Ok(self.reservations.find_by_filter(&filter).await?)
    }

    /// Whether the cancel button should be offered for a reservation.
    pub fn can_cancel(reservation: &SpaceReservation, now: DateTime<Utc>) -> bool {
        reservation.status() == ReservationStatus::Confirmed && reservation.is_cancellable(now)
    }

    async fn load(&self, reservation_id: &str) -> Result<SpaceReservation, AppError> {
        self.reservations
            .find_by_id(reservation_id)
            .await?
            .ok_or(AppError::Port(PortError::NotFound))
    }
}

#[async_trait]
impl<S, R, EP> ReservationDesk for ReservationService<S, R, EP>
where
    S: SpaceRepository,
    R: ReservationRepository,
    EP: EventPublisher,
{
    async fn reserve(
        &self,
        session: &Session,
        request: NewReservation,
        now: DateTime<Utc>,
    ) -> Result<ReservationId, DeskError> {
        ReservationService::reserve(self, session, request, now)
            .await
            .map_err(Into::into)
    }

    async fn cancel(
        &self,
        session: &Session,
        reservation_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError> {
        ReservationService::cancel(self, session, reservation_id, now)
            .await
            .map_err(Into::into)
    }

    async fn confirm(
        &self,
        session: &Session,
        reservation_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError> {
        ReservationService::confirm(self, session, reservation_id, now)
            .await
            .map_err(Into::into)
    }

    async fn decline(
        &self,
        session: &Session,
        reservation_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError> {
        ReservationService::decline(self, session, reservation_id, now)
            .await
            .map_err(Into::into)
    }

    async fn list(
        &self,
        session: &Session,
        filter: ReservationFilter,
    ) -> Result<Vec<SpaceReservation>, DeskError> {
        ReservationService::list(self, session, filter)
            .await
            .map_err(Into::into)
    }
}
