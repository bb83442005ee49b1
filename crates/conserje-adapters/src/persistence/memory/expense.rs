use async_trait::async_trait;

use conserje_core::expense::CommonExpense;
use conserje_ports::error::PortError;
use conserje_ports::outbound::ExpenseRepository;
use conserje_ports::types::ExpenseFilter;

use super::{lock, MemoryStore};

#[async_trait]
impl ExpenseRepository for MemoryStore {
    async fn save(&self, expense: &CommonExpense) -> Result<(), PortError> {
        let mut expenses = lock(&self.inner.expenses)?;
        if let Some(pos) = expenses.iter().position(|e| e.id() == expense.id()) {
            expenses[pos] = expense.clone();
        } else {
            expenses.push(expense.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CommonExpense>, PortError> {
        let expenses = lock(&self.inner.expenses)?;
        Ok(expenses.iter().find(|e| e.id().to_string() == id).cloned())
    }

    async fn find_by_filter(
        &self,
        filter: &ExpenseFilter,
    ) -> Result<Vec<CommonExpense>, PortError> {
        let expenses = lock(&self.inner.expenses)?;
        let mut matched: Vec<CommonExpense> = expenses
            .iter()
            .filter(|e| filter.user_id.as_ref().map_or(true, |u| e.user_id() == u))
            .filter(|e| filter.status.map_or(true, |s| e.status() == s))
            .cloned()
            .collect();
        matched.sort_by_key(|e| e.due_date());
        Ok(matched)
    }
}
