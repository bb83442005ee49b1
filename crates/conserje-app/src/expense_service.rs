use async_trait::async_trait;
use chrono::{DateTime, Utc};

use conserje_core::calendar::CalendarDate;
use conserje_core::expense::{CommonExpense, ExpenseStatus};
use conserje_ports::error::{DeskError, PortError};
use conserje_ports::inbound::Billing;
use conserje_ports::outbound::{EventPublisher, ExpenseRepository};
use conserje_ports::types::{ExpenseFilter, MonthlySummary, Session};

use crate::error::AppError;

pub struct ExpenseService<E, EP>
where
    E: ExpenseRepository,
    EP: EventPublisher,
{
    expenses: E,
    events: EP,
}

impl<E, EP> ExpenseService<E, EP>
where
    E: ExpenseRepository,
    EP: EventPublisher,
{
    pub fn new(expenses: E, events: EP) -> Self {
        Self { expenses, events }
    }

    pub async fn pay(
        &self,
        session: &Session,
        expense_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut expense = self
            .expenses
            .find_by_id(expense_id)
            .await?
            .ok_or(AppError::Port(PortError::NotFound))?;
        if expense.user_id() != &session.user_id && !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let events = expense.pay(CalendarDate::from_instant(now), now)?;
        self.expenses.save(&expense).await?;
        self.events.publish(events).await?;
        Ok(())
    }

    pub async fn list(
        &self,
        session: &Session,
        mut filter: ExpenseFilter,
    ) -> Result<Vec<CommonExpense>, AppError> {
        if !session.is_admin() {
            filter.user_id = Some(session.user_id.clone());
        }
        Ok(self.expenses.find_by_filter(&filter).await?)
    }

    /// Sweeps pending charges whose due date has passed. Returns how many
    /// were flagged.
    pub async fn refresh_overdue(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let today = CalendarDate::from_instant(now);
        let pending = self
            .expenses
            .find_by_filter(&ExpenseFilter {
                status: Some(ExpenseStatus::Pending),
                ..Default::default()
            })
            .await?;

        let mut flagged = 0;
        let mut all_events = Vec::new();
        for mut expense in pending {
            let events = expense.mark_overdue(today, now);
            if !events.is_empty() {
                self.expenses.save(&expense).await?;
                all_events.extend(events);
                flagged += 1;
            }
        }
        if !all_events.is_empty() {
            self.events.publish(all_events).await?;
        }
        Ok(flagged)
    }

    /// The admin finance report for one billing month.
    pub async fn monthly_summary(
        &self,
        session: &Session,
        month: &str,
        year: i32,
    ) -> Result<MonthlySummary, AppError> {
        if !session.is_admin() {
            return Err(AppError::Forbidden);
        }
        let expenses = self.expenses.find_by_filter(&ExpenseFilter::default()).await?;

        let mut summary = MonthlySummary {
            month: month.to_string(),
            year,
            billed: 0,
            collected: 0,
            outstanding: 0,
            paid_count: 0,
            pending_count: 0,
            overdue_count: 0,
        };
        for expense in expenses
            .iter()
            .filter(|e| e.month() == month && e.year() == year)
        {
            summary.billed += expense.amount();
            match expense.status() {
                ExpenseStatus::Paid => {
                    summary.collected += expense.amount();
                    summary.paid_count += 1;
                }
                ExpenseStatus::Pending => {
                    summary.outstanding += expense.amount();
                    summary.pending_count += 1;
                }
                ExpenseStatus::Overdue => {
                    summary.outstanding += expense.amount();
                    summary.overdue_count += 1;
                }
            }
        }
        Ok(summary)
    }
}

#[async_trait]
impl<E, EP> Billing for ExpenseService<E, EP>
where
    E: ExpenseRepository,
    EP: EventPublisher,
{
    async fn pay(
        &self,
        session: &Session,
        expense_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError> {
        ExpenseService::pay(self, session, expense_id, now)
            .await
            .map_err(Into::into)
    }

    async fn list(
        &self,
        session: &Session,
        filter: ExpenseFilter,
    ) -> Result<Vec<CommonExpense>, DeskError> {
        ExpenseService::list(self, session, filter)
            .await
            .map_err(Into::into)
    }

    async fn refresh_overdue(&self, now: DateTime<Utc>) -> Result<usize, DeskError> {
        ExpenseService::refresh_overdue(self, now)
            .await
            .map_err(Into::into)
    }

    async fn monthly_summary(
        &self,
        session: &Session,
        month: &str,
        year: i32,
    ) -> Result<MonthlySummary, DeskError> {
        ExpenseService::monthly_summary(self, session, month, year)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conserje_core::error::DomainError;
    use conserje_core::events::DomainEvent;
    use conserje_core::ids::{BuildingId, UserId};
    use conserje_core::user::Role;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockExpenseRepo {
        expenses: Mutex<Vec<CommonExpense>>,
    }

    #[async_trait]
    impl ExpenseRepository for MockExpenseRepo {
        async fn save(&self, expense: &CommonExpense) -> Result<(), PortError> {
            let mut expenses = self.expenses.lock().unwrap();
            if let Some(pos) = expenses.iter().position(|e| e.id() == expense.id()) {
                expenses[pos] = expense.clone();
            } else {
                expenses.push(expense.clone());
            }
            Ok(())
        }
        async fn find_by_id(&self, id: &str) -> Result<Option<CommonExpense>, PortError> {
            let expenses = self.expenses.lock().unwrap();
            Ok(expenses.iter().find(|e| e.id().to_string() == id).cloned())
        }
        async fn find_by_filter(
            &self,
            filter: &ExpenseFilter,
        ) -> Result<Vec<CommonExpense>, PortError> {
            let expenses = self.expenses.lock().unwrap();
            Ok(expenses
                .iter()
                .filter(|e| filter.user_id.as_ref().map_or(true, |u| e.user_id() == u))
                .filter(|e| filter.status.map_or(true, |s| e.status() == s))
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct MockEventPublisher {
        events: Mutex<Vec<DomainEvent>>,
    }

    #[async_trait]
    impl EventPublisher for MockEventPublisher {
        async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), PortError> {
            self.events.lock().unwrap().extend(events);
            Ok(())
        }
    }

    fn ts(s: &str) -> DateTime<Utc> {
        chrono::DateTime::parse_from_rfc3339(s)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn session_for(user_id: UserId, role: Role) -> Session {
        Session {
            user_id,
            name: "x".into(),
            role,
            building_id: BuildingId::new(),
        }
    }

    fn make_expense(user_id: &UserId, amount: i64, due: CalendarDate) -> CommonExpense {
        CommonExpense::new(
            user_id.clone(),
            BuildingId::new(),
            "Enero".into(),
            2025,
            amount,
            "Gastos comunes - Enero 2025".into(),
            due,
            ts("2025-01-01T00:00:00Z"),
        )
        .unwrap()
    }

    fn due(day: u32) -> CalendarDate {
        CalendarDate::new(2025, 1, day).unwrap()
    }

    async fn seeded_service(
        user_id: &UserId,
    ) -> (ExpenseService<MockExpenseRepo, MockEventPublisher>, String) {
        let repo = MockExpenseRepo::default();
        let expense = make_expense(user_id, 85000, due(15));
        let id = expense.id().to_string();
        repo.save(&expense).await.unwrap();
        (
            ExpenseService::new(repo, MockEventPublisher::default()),
            id,
        )
    }

    #[tokio::test]
    async fn resident_pays_own_expense() {
        let user_id = UserId::new();
        let (svc, id) = seeded_service(&user_id).await;
        svc.pay(
            &session_for(user_id, Role::Resident),
            &id,
            ts("2025-01-10T12:00:00Z"),
        )
        .await
        .unwrap();

        let saved = svc.expenses.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(saved.status(), ExpenseStatus::Paid);
        assert_eq!(saved.paid_date().unwrap().key(), "2025-01-10");

        let events = svc.events.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "expense.paid");
    }

    #[tokio::test]
    async fn paying_someone_elses_expense_forbidden() {
        let owner = UserId::new();
        let (svc, id) = seeded_service(&owner).await;
        let result = svc
            .pay(
                &session_for(UserId::new(), Role::Resident),
                &id,
                ts("2025-01-10T12:00:00Z"),
            )
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn paying_twice_surfaces_domain_error() {
        let user_id = UserId::new();
        let (svc, id) = seeded_service(&user_id).await;
        let session = session_for(user_id, Role::Resident);
        svc.pay(&session, &id, ts("2025-01-10T12:00:00Z")).await.unwrap();
        let result = svc.pay(&session, &id, ts("2025-01-11T12:00:00Z")).await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::ExpenseAlreadyPaid))
        ));
    }

    #[tokio::test]
    async fn refresh_overdue_flags_only_past_due() {
        let user_id = UserId::new();
        let repo = MockExpenseRepo::default();
        repo.save(&make_expense(&user_id, 85000, due(15))).await.unwrap();
        repo.save(&make_expense(&user_id, 90000, due(25))).await.unwrap();
        let svc = ExpenseService::new(repo, MockEventPublisher::default());

        let flagged = svc.refresh_overdue(ts("2025-01-20T08:00:00Z")).await.unwrap();
        assert_eq!(flagged, 1);

        let overdue = svc
            .expenses
            .find_by_filter(&ExpenseFilter {
                status: Some(ExpenseStatus::Overdue),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].due_date().key(), "2025-01-15");

        // Second sweep finds nothing new
        let flagged = svc.refresh_overdue(ts("2025-01-21T08:00:00Z")).await.unwrap();
        assert_eq!(flagged, 0);
    }

    #[tokio::test]
    async fn monthly_summary_totals_by_status() {
        let juan = UserId::new();
        let ana = UserId::new();
        let repo = MockExpenseRepo::default();
        let mut paid = make_expense(&ana, 85000, due(15));
        paid.pay(due(10), ts("2025-01-10T00:00:00Z")).unwrap();
        repo.save(&paid).await.unwrap();
        repo.save(&make_expense(&juan, 85000, due(15))).await.unwrap();
        let svc = ExpenseService::new(repo, MockEventPublisher::default());

        let summary = svc
            .monthly_summary(&session_for(UserId::new(), Role::Admin), "Enero", 2025)
            .await
            .unwrap();
        assert_eq!(summary.billed, 170000);
        assert_eq!(summary.collected, 85000);
        assert_eq!(summary.outstanding, 85000);
        assert_eq!(summary.paid_count, 1);
        assert_eq!(summary.pending_count, 1);
        assert_eq!(summary.overdue_count, 0);
    }

    #[tokio::test]
    async fn monthly_summary_is_admin_only() {
        let user_id = UserId::new();
        let (svc, _) = seeded_service(&user_id).await;
        let result = svc
            .monthly_summary(&session_for(user_id, Role::Resident), "Enero", 2025)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn resident_list_is_scoped() {
        let juan = UserId::new();
        let ana = UserId::new();
        let repo = MockExpenseRepo::default();
        repo.save(&make_expense(&juan, 85000, due(15))).await.unwrap();
        repo.save(&make_expense(&ana, 85000, due(15))).await.unwrap();
        let svc = ExpenseService::new(repo, MockEventPublisher::default());

        let own = svc
            .list(&session_for(juan.clone(), Role::Resident), ExpenseFilter::default())
            .await
            .unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].user_id(), &juan);
    }
}
