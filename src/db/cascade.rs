use super::budgets::delete_budget_row;
use super::expenses::delete_expenses_for_budget;
use super::Database;
use crate::error::Result;

/// What a cascade delete actually removed. All zeros means there was nothing
/// left to delete, which is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CascadeOutcome {
    pub(crate) expenses_removed: usize,
    pub(crate) budget_removed: bool,
}

impl Database {
    /// Delete a budget's expenses, then the budget, in one transaction.
    ///
    /// If either step fails the transaction rolls back and nothing is
    /// removed, so the caller can simply retry.
    pub(crate) fn delete_budget_cascade(&mut self, budget_id: i64) -> Result<CascadeOutcome> {
        let tx = self.conn.transaction()?;
        let expenses_removed = delete_expenses_for_budget(&tx, budget_id)?;
        let budget_removed = delete_budget_row(&tx, budget_id)?;
        tx.commit()?;
        tracing::debug!(budget_id, expenses_removed, budget_removed, "cascade delete");
        Ok(CascadeOutcome {
            expenses_removed,
            budget_removed,
        })
    }
}
