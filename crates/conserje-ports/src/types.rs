use serde::{Deserialize, Serialize};

use conserje_core::calendar::CalendarDate;
use conserje_core::expense::ExpenseStatus;
use conserje_core::ids::{BuildingId, SpaceId, UserId};
use conserje_core::reservation::ReservationStatus;
use conserje_core::user::Role;
use conserje_core::visitor::VisitorStatus;

/// Reservation form input as typed, before domain validation. The date
/// accepts both the calendar's `YYYY-MM-DD` key and a hand-typed `d/m/y`.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub space_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
}

/// Visitor registration form input, before domain validation.
#[derive(Debug, Clone)]
pub struct NewVisitor {
    pub name: String,
    pub document_id: String,
    pub phone: String,
    pub visit_date: String,
    pub visit_time: String,
    pub notes: Option<String>,
}

/// Announcement form input. Kind and priority arrive as the select-box
/// values; unknown values fall back to general/medium.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub kind: String,
    pub priority: String,
}

/// Message form input. The category arrives as the select-box value;
/// unknown values fall back to general.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub subject: String,
    pub content: String,
    pub category: String,
}

/// Resident account form, filled in by administration.
#[derive(Debug, Clone)]
pub struct NewResident {
    pub email: String,
    pub name: String,
    pub apartment: String,
    pub phone: String,
}

/// Date bucket for the visitor list tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateScope {
    #[default]
    All,
    Today,
    Upcoming,
    Past,
}

#[derive(Debug, Clone, Default)]
pub struct VisitorFilter {
    pub host_id: Option<UserId>,
    pub status: Option<VisitorStatus>,
    pub scope: DateScope,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub user_id: Option<UserId>,
    pub space_id: Option<SpaceId>,
    pub status: Option<ReservationStatus>,
    pub date: Option<CalendarDate>,
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub user_id: Option<UserId>,
    pub status: Option<ExpenseStatus>,
}

/// The authenticated user, resolved once at login and passed explicitly to
/// every operation instead of being read from ambient session storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub name: String,
    pub role: Role,
    pub building_id: BuildingId,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// One month of the admin finance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub month: String,
    pub year: i32,
    pub billed: i64,
    pub collected: i64,
    pub outstanding: i64,
    pub paid_count: usize,
    pub pending_count: usize,
    pub overdue_count: usize,
}
