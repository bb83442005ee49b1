use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDate;
use crate::error::DomainError;
use crate::events::{DomainEvent, ExpenseOverdue, ExpensePaid};
use crate::ids::{BuildingId, ExpenseId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseStatus {
    Pending,
    Paid,
    Overdue,
}

/// A monthly common-expense charge issued to one resident. Amounts are
/// whole pesos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonExpense {
    id: ExpenseId,
    user_id: UserId,
    building_id: BuildingId,
    month: String,
    year: i32,
    amount: i64,
    description: String,
    status: ExpenseStatus,
    due_date: CalendarDate,
    paid_date: Option<CalendarDate>,
    created_at: DateTime<Utc>,
}

impl CommonExpense {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        building_id: BuildingId,
        month: String,
        year: i32,
        amount: i64,
        description: String,
        due_date: CalendarDate,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if amount <= 0 {
            return Err(DomainError::NonPositiveAmount);
        }
        Ok(Self {
            id: ExpenseId::new(),
            user_id,
            building_id,
            month,
            year,
            amount,
            description,
            status: ExpenseStatus::Pending,
            due_date,
            paid_date: None,
            created_at: now,
        })
    }

    pub fn pay(
        &mut self,
        paid_on: CalendarDate,
        now: DateTime<Utc>,
    ) -> Result<Vec<DomainEvent>, DomainError> {
        match self.status {
            ExpenseStatus::Paid => Err(DomainError::ExpenseAlreadyPaid),
            ExpenseStatus::Pending | ExpenseStatus::Overdue => {
                self.status = ExpenseStatus::Paid;
                self.paid_date = Some(paid_on);
                Ok(vec![DomainEvent::ExpensePaid(ExpensePaid {
                    expense_id: self.id.clone(),
                    user_id: self.user_id.clone(),
                    amount: self.amount,
                    occurred_at: now,
                })])
            }
        }
    }

    /// Flags a pending charge whose due date has passed. Total: anything
    /// already paid or flagged is left alone.
    pub fn mark_overdue(&mut self, today: CalendarDate, now: DateTime<Utc>) -> Vec<DomainEvent> {
        if self.status == ExpenseStatus::Pending && self.due_date < today {
            self.status = ExpenseStatus::Overdue;
            vec![DomainEvent::ExpenseOverdue(ExpenseOverdue {
                expense_id: self.id.clone(),
                user_id: self.user_id.clone(),
                occurred_at: now,
            })]
        } else {
            vec![]
        }
    }

    pub fn id(&self) -> &ExpenseId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn building_id(&self) -> &BuildingId {
        &self.building_id
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> ExpenseStatus {
        self.status
    }

    pub fn due_date(&self) -> CalendarDate {
        self.due_date
    }

    pub fn paid_date(&self) -> Option<CalendarDate> {
        self.paid_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        chrono::DateTime::parse_from_rfc3339("2025-01-05T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn make_expense() -> CommonExpense {
        CommonExpense::new(
            UserId::new(),
            BuildingId::new(),
            "Enero".into(),
            2025,
            85000,
            "Gastos comunes - Enero 2025".into(),
            date(2025, 1, 15),
            now(),
        )
        .unwrap()
    }

    #[test]
    fn new_expense_starts_pending() {
        let expense = make_expense();
        assert_eq!(expense.status(), ExpenseStatus::Pending);
        assert!(expense.paid_date().is_none());
    }

    #[test]
    fn zero_amount_rejected() {
        let result = CommonExpense::new(
            UserId::new(),
            BuildingId::new(),
            "Enero".into(),
            2025,
            0,
            "x".into(),
            date(2025, 1, 15),
            now(),
        );
        assert!(matches!(result, Err(DomainError::NonPositiveAmount)));
    }

    #[test]
    fn pay_records_date_and_event() {
        let mut expense = make_expense();
        let events = expense.pay(date(2025, 1, 10), now()).unwrap();
        assert_eq!(expense.status(), ExpenseStatus::Paid);
        assert_eq!(expense.paid_date(), Some(date(2025, 1, 10)));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "expense.paid");
    }

    #[test]
    fn paying_twice_fails() {
        let mut expense = make_expense();
        expense.pay(date(2025, 1, 10), now()).unwrap();
        let result = expense.pay(date(2025, 1, 11), now());
        assert_eq!(result, Err(DomainError::ExpenseAlreadyPaid));
    }

    #[test]
    fn overdue_expense_can_still_be_paid() {
        let mut expense = make_expense();
        expense.mark_overdue(date(2025, 1, 20), now());
        assert_eq!(expense.status(), ExpenseStatus::Overdue);
        let events = expense.pay(date(2025, 1, 21), now()).unwrap();
        assert_eq!(expense.status(), ExpenseStatus::Paid);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn mark_overdue_only_past_due_date() {
        let mut expense = make_expense();
        // Due date itself is not overdue yet
        assert!(expense.mark_overdue(date(2025, 1, 15), now()).is_empty());
        assert_eq!(expense.status(), ExpenseStatus::Pending);

        let events = expense.mark_overdue(date(2025, 1, 16), now());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "expense.overdue");
    }

    #[test]
    fn mark_overdue_is_idempotent() {
        let mut expense = make_expense();
        expense.mark_overdue(date(2025, 1, 20), now());
        assert!(expense.mark_overdue(date(2025, 1, 21), now()).is_empty());
    }
}
