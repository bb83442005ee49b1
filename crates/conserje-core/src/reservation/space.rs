use std::collections::BTreeSet;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarDate, DateConstraints};
use crate::ids::{BuildingId, SpaceId};

/// A shared amenity residents can book: event room, barbecue area, and so
/// on. `closed_weekdays` uses 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonSpace {
    id: SpaceId,
    building_id: BuildingId,
    name: String,
    description: String,
    capacity: u32,
    hourly_rate: Option<i64>,
    available_hours: Vec<NaiveTime>,
    closed_weekdays: BTreeSet<u8>,
    amenities: Vec<String>,
    is_active: bool,
}

impl CommonSpace {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        building_id: BuildingId,
        name: String,
        description: String,
        capacity: u32,
        hourly_rate: Option<i64>,
        available_hours: Vec<NaiveTime>,
        closed_weekdays: BTreeSet<u8>,
        amenities: Vec<String>,
    ) -> Self {
        Self {
            id: SpaceId::new(),
            building_id,
            name,
            description,
            capacity,
            hourly_rate,
            available_hours,
            closed_weekdays,
            amenities,
            is_active: true,
        }
    }

    /// The booking-calendar rules for this space: nothing in the past,
    /// nothing beyond the booking horizon, closed weekdays greyed out.
    pub fn constraints(&self, today: CalendarDate, horizon_days: u64) -> DateConstraints {
        let mut constraints = DateConstraints::new().with_max(today.plus_days(horizon_days));
        for weekday in &self.closed_weekdays {
            constraints = constraints.disable_weekday(*weekday);
        }
        constraints
    }

    pub fn allows_hour(&self, time: NaiveTime) -> bool {
        self.available_hours.contains(&time)
    }

    /// Fee for a slot, whole hours times the hourly rate. Free spaces cost
    /// nothing.
    pub fn fee_for(&self, start: NaiveTime, end: NaiveTime) -> i64 {
        let Some(rate) = self.hourly_rate else {
            return 0;
        };
        let hours = (end - start).num_hours();
        if hours > 0 {
            hours * rate
        } else {
            0
        }
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn id(&self) -> &SpaceId {
        &self.id
    }

    pub fn building_id(&self) -> &BuildingId {
        &self.building_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn hourly_rate(&self) -> Option<i64> {
        self.hourly_rate
    }

    pub fn available_hours(&self) -> &[NaiveTime] {
        &self.available_hours
    }

    pub fn amenities(&self) -> &[String] {
        &self.amenities
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DateError;

    fn hour(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn make_space(closed: &[u8]) -> CommonSpace {
        CommonSpace::new(
            BuildingId::new(),
            "Quincho".into(),
            "Espacio al aire libre con parrilla".into(),
            20,
            Some(15000),
            (10..=18).map(hour).collect(),
            closed.iter().copied().collect(),
            vec!["Parrilla".into(), "Mesas de picnic".into()],
        )
    }

    #[test]
    fn fee_is_hours_times_rate() {
        let space = make_space(&[]);
        assert_eq!(space.fee_for(hour(12), hour(16)), 60000);
        assert_eq!(space.fee_for(hour(12), hour(12)), 0);
    }

    #[test]
    fn space_without_rate_is_free() {
        let mut space = make_space(&[]);
        space.hourly_rate = None;
        assert_eq!(space.fee_for(hour(12), hour(16)), 0);
    }

    #[test]
    fn constraints_close_the_right_weekday() {
        let today = CalendarDate::new(2025, 1, 15).unwrap();
        let space = make_space(&[0]);
        let constraints = space.constraints(today, 60);
        // 2025-01-19 is a Sunday
        let sunday = CalendarDate::new(2025, 1, 19).unwrap();
        assert_eq!(
            constraints.check(sunday, today),
            Err(DateError::WeekdayUnavailable)
        );
    }

    #[test]
    fn constraints_cap_the_booking_horizon() {
        let today = CalendarDate::new(2025, 1, 15).unwrap();
        let constraints = make_space(&[]).constraints(today, 60);
        assert!(constraints.is_selectable(today.plus_days(60), today));
        assert_eq!(
            constraints.check(today.plus_days(61), today),
            Err(DateError::AfterMaximum)
        );
    }

    #[test]
    fn allows_only_listed_hours() {
        let space = make_space(&[]);
        assert!(space.allows_hour(hour(10)));
        assert!(!space.allows_hour(hour(9)));
        assert!(!space.allows_hour(NaiveTime::from_hms_opt(10, 30, 0).unwrap()));
    }
}
