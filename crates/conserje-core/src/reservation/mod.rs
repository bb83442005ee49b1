pub mod space;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDate;
use crate::error::DomainError;
use crate::events::{
    DomainEvent, ReservationCancelled, ReservationConfirmed, ReservationDeclined,
    ReservationRequested,
};
use crate::ids::{ReservationId, SpaceId, UserId};

pub use space::CommonSpace;

/// Residents may cancel a confirmed reservation only with more than this
/// much notice.
pub const CANCELLATION_NOTICE: Duration = Duration::hours(24);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceReservation {
    id: ReservationId,
    user_id: UserId,
    space_id: SpaceId,
    date: CalendarDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    status: ReservationStatus,
    notes: Option<String>,
    fee: i64,
    created_at: DateTime<Utc>,
}

impl SpaceReservation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        space_id: SpaceId,
        date: CalendarDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        notes: Option<String>,
        fee: i64,
        now: DateTime<Utc>,
    ) -> Result<(Self, Vec<DomainEvent>), DomainError> {
        if end_time <= start_time {
            return Err(DomainError::InvalidTimeSlot);
        }
        let id = ReservationId::new();
        let reservation = Self {
            id: id.clone(),
            user_id: user_id.clone(),
            space_id: space_id.clone(),
            date,
            start_time,
            end_time,
            status: ReservationStatus::Pending,
            notes,
            fee,
            created_at: now,
        };
        let events = vec![DomainEvent::ReservationRequested(ReservationRequested {
            reservation_id: id,
            user_id,
            space_id,
            occurred_at: now,
        })];
        Ok((reservation, events))
    }

    /// The instant the reserved slot begins.
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.date.at(self.start_time)
    }

    /// A resident may cancel only while the reservation is confirmed and
    /// starts strictly more than 24 hours from now. Exactly at the boundary
    /// cancellation is refused.
    pub fn is_cancellable(&self, now: DateTime<Utc>) -> bool {
        self.status == ReservationStatus::Confirmed
            && self.start_instant() - now > CANCELLATION_NOTICE
    }

    pub fn confirm(&mut self, now: DateTime<Utc>) -> Result<Vec<DomainEvent>, DomainError> {
        match self.status {
            ReservationStatus::Cancelled => Err(DomainError::ReservationAlreadyCancelled),
            ReservationStatus::Confirmed => Ok(vec![]),
            ReservationStatus::Pending => {
                self.status = ReservationStatus::Confirmed;
                Ok(vec![DomainEvent::ReservationConfirmed(ReservationConfirmed {
                    reservation_id: self.id.clone(),
                    user_id: self.user_id.clone(),
                    space_id: self.space_id.clone(),
                    fee: self.fee,
                    occurred_at: now,
                })])
            }
        }
    }

    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<Vec<DomainEvent>, DomainError> {
        match self.status {
            ReservationStatus::Cancelled => Ok(vec![]),
            ReservationStatus::Pending => Err(DomainError::ReservationNotConfirmed),
            ReservationStatus::Confirmed => {
                if self.start_instant() - now <= CANCELLATION_NOTICE {
                    return Err(DomainError::CancellationWindowClosed);
                }
                self.status = ReservationStatus::Cancelled;
                Ok(vec![DomainEvent::ReservationCancelled(ReservationCancelled {
                    reservation_id: self.id.clone(),
                    user_id: self.user_id.clone(),
                    occurred_at: now,
                })])
            }
        }
    }

    /// Administration turning down a request that was never confirmed. Not
    /// subject to the notice rule.
    pub fn decline(&mut self, now: DateTime<Utc>) -> Result<Vec<DomainEvent>, DomainError> {
        match self.status {
            ReservationStatus::Pending => {
                self.status = ReservationStatus::Cancelled;
                Ok(vec![DomainEvent::ReservationDeclined(ReservationDeclined {
                    reservation_id: self.id.clone(),
                    occurred_at: now,
                })])
            }
            _ => Err(DomainError::ReservationNotPending),
        }
    }

    /// Whether two live reservations claim the same space at the same time.
    /// Intervals are half-open, so back-to-back slots do not collide.
    pub fn overlaps(&self, other: &SpaceReservation) -> bool {
        self.status != ReservationStatus::Cancelled
            && other.status != ReservationStatus::Cancelled
            && self.space_id == other.space_id
            && self.date == other.date
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }

    pub fn id(&self) -> &ReservationId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn space_id(&self) -> &SpaceId {
        &self.space_id
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn fee(&self) -> i64 {
        self.fee
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        chrono::DateTime::parse_from_rfc3339(s)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn hour(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn make_reservation(date: CalendarDate, start: NaiveTime, end: NaiveTime) -> SpaceReservation {
        let (reservation, _) = SpaceReservation::new(
            UserId::new(),
            SpaceId::new(),
            date,
            start,
            end,
            Some("Cumpleaños familiar".into()),
            75000,
            ts("2025-01-10T10:00:00Z"),
        )
        .unwrap();
        reservation
    }

    fn confirmed(date: CalendarDate, start: NaiveTime, end: NaiveTime) -> SpaceReservation {
        let mut reservation = make_reservation(date, start, end);
        reservation.confirm(ts("2025-01-10T10:00:00Z")).unwrap();
        reservation
    }

    fn jan(day: u32) -> CalendarDate {
        CalendarDate::new(2025, 1, day).unwrap()
    }

    #[test]
    fn slot_must_end_after_it_starts() {
        let result = SpaceReservation::new(
            UserId::new(),
            SpaceId::new(),
            jan(20),
            hour(15, 0),
            hour(15, 0),
            None,
            0,
            ts("2025-01-10T10:00:00Z"),
        );
        assert!(matches!(result, Err(DomainError::InvalidTimeSlot)));
    }

    #[test]
    fn new_reservation_is_pending_and_emits_request() {
        let (reservation, events) = SpaceReservation::new(
            UserId::new(),
            SpaceId::new(),
            jan(20),
            hour(15, 0),
            hour(18, 0),
            None,
            75000,
            ts("2025-01-10T10:00:00Z"),
        )
        .unwrap();
        assert_eq!(reservation.status(), ReservationStatus::Pending);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "reservation.requested");
    }

    #[test]
    fn confirm_emits_event_with_fee() {
        let mut reservation = make_reservation(jan(20), hour(15, 0), hour(18, 0));
        let events = reservation.confirm(ts("2025-01-10T10:01:00Z")).unwrap();
        assert_eq!(reservation.status(), ReservationStatus::Confirmed);
        assert_eq!(events[0].event_type(), "reservation.confirmed");
    }

    #[test]
    fn cancellable_just_over_24_hours_before_start() {
        // Starts 2025-01-20T15:00Z; 24h and 1min before is 2025-01-19T14:59Z
        let reservation = confirmed(jan(20), hour(15, 0), hour(18, 0));
        assert!(reservation.is_cancellable(ts("2025-01-19T14:59:00Z")));
    }

    #[test]
    fn not_cancellable_at_exactly_24_hours() {
        let reservation = confirmed(jan(20), hour(15, 0), hour(18, 0));
        assert!(!reservation.is_cancellable(ts("2025-01-19T15:00:00Z")));
        assert!(!reservation.is_cancellable(ts("2025-01-20T10:00:00Z")));
    }

    #[test]
    fn pending_reservation_is_not_cancellable_by_resident() {
        let reservation = make_reservation(jan(20), hour(15, 0), hour(18, 0));
        assert!(!reservation.is_cancellable(ts("2025-01-10T10:00:00Z")));
        let mut reservation = reservation;
        assert_eq!(
            reservation.cancel(ts("2025-01-10T10:00:00Z")),
            Err(DomainError::ReservationNotConfirmed)
        );
    }

    #[test]
    fn cancel_inside_window_refused() {
        let mut reservation = confirmed(jan(20), hour(15, 0), hour(18, 0));
        assert_eq!(
            reservation.cancel(ts("2025-01-19T15:00:00Z")),
            Err(DomainError::CancellationWindowClosed)
        );
        assert_eq!(reservation.status(), ReservationStatus::Confirmed);
    }

    #[test]
    fn cancel_with_notice_succeeds() {
        let mut reservation = confirmed(jan(20), hour(15, 0), hour(18, 0));
        let events = reservation.cancel(ts("2025-01-18T10:00:00Z")).unwrap();
        assert_eq!(reservation.status(), ReservationStatus::Cancelled);
        assert_eq!(events[0].event_type(), "reservation.cancelled");
    }

    #[test]
    fn cancel_already_cancelled_is_noop() {
        let mut reservation = confirmed(jan(20), hour(15, 0), hour(18, 0));
        reservation.cancel(ts("2025-01-18T10:00:00Z")).unwrap();
        let events = reservation.cancel(ts("2025-01-18T11:00:00Z")).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn decline_only_applies_to_pending() {
        let mut pending = make_reservation(jan(20), hour(15, 0), hour(18, 0));
        let events = pending.decline(ts("2025-01-10T12:00:00Z")).unwrap();
        assert_eq!(pending.status(), ReservationStatus::Cancelled);
        assert_eq!(events[0].event_type(), "reservation.declined");

        let mut confirmed = confirmed(jan(20), hour(15, 0), hour(18, 0));
        assert_eq!(
            confirmed.decline(ts("2025-01-10T12:00:00Z")),
            Err(DomainError::ReservationNotPending)
        );
    }

    #[test]
    fn overlap_requires_same_space_and_date() {
        let space = SpaceId::new();
        let (a, _) = SpaceReservation::new(
            UserId::new(),
            space.clone(),
            jan(20),
            hour(15, 0),
            hour(18, 0),
            None,
            0,
            ts("2025-01-10T10:00:00Z"),
        )
        .unwrap();
        let (b, _) = SpaceReservation::new(
            UserId::new(),
            space,
            jan(20),
            hour(17, 0),
            hour(19, 0),
            None,
            0,
            ts("2025-01-10T10:00:00Z"),
        )
        .unwrap();
        assert!(a.overlaps(&b));

        let other_day = make_reservation(jan(21), hour(15, 0), hour(18, 0));
        assert!(!a.overlaps(&other_day));
    }

    #[test]
    fn back_to_back_slots_do_not_overlap() {
        let space = SpaceId::new();
        let (a, _) = SpaceReservation::new(
            UserId::new(),
            space.clone(),
            jan(20),
            hour(15, 0),
            hour(18, 0),
            None,
            0,
            ts("2025-01-10T10:00:00Z"),
        )
        .unwrap();
        let (b, _) = SpaceReservation::new(
            UserId::new(),
            space,
            jan(20),
            hour(18, 0),
            hour(20, 0),
            None,
            0,
            ts("2025-01-10T10:00:00Z"),
        )
        .unwrap();
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn cancelled_reservation_never_overlaps() {
        let space = SpaceId::new();
        let (mut a, _) = SpaceReservation::new(
            UserId::new(),
            space.clone(),
            jan(20),
            hour(15, 0),
            hour(18, 0),
            None,
            0,
            ts("2025-01-10T10:00:00Z"),
        )
        .unwrap();
        a.confirm(ts("2025-01-10T10:00:00Z")).unwrap();
        a.cancel(ts("2025-01-12T10:00:00Z")).unwrap();

        let (b, _) = SpaceReservation::new(
            UserId::new(),
            space,
            jan(20),
            hour(16, 0),
            hour(17, 0),
            None,
            0,
            ts("2025-01-10T10:00:00Z"),
        )
        .unwrap();
        assert!(!a.overlaps(&b));
    }
}
