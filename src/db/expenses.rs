use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{decimal_column, Database};
use crate::error::Result;
use crate::models::{Expense, ExpenseDraft};

const EXPENSE_COLUMNS: &str = "e.id, e.name, e.amount, e.budget_id, e.created_at";

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        name: row.get(1)?,
        amount: decimal_column(row, 2)?,
        budget_id: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Remove every expense of a budget. Zero rows is a normal outcome, so a
/// repeat call is a no-op.
pub(super) fn delete_expenses_for_budget(conn: &Connection, budget_id: i64) -> Result<usize> {
    Ok(conn.execute(
        "DELETE FROM expenses WHERE budget_id = ?1",
        params![budget_id],
    )?)
}

impl Database {
    /// Stamps `created_at` with today's date. The returned record carries the
    /// budget id as the store wrote it, confirming which budget owns the row.
    pub(crate) fn insert_expense(&self, budget_id: i64, draft: &ExpenseDraft) -> Result<Expense> {
        let created_at = Expense::today();
        let (id, stored_budget_id, created_at): (i64, i64, String) = self.conn.query_row(
            "INSERT INTO expenses (name, amount, budget_id, created_at)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, budget_id, created_at",
            params![draft.name, draft.amount.to_string(), budget_id, created_at],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
        tracing::debug!(id, budget_id = stored_budget_id, "inserted expense");
        Ok(Expense {
            id,
            name: draft.name.clone(),
            amount: draft.amount,
            budget_id: stored_budget_id,
            created_at,
        })
    }

    /// Returns false when no row had that id.
    pub(crate) fn delete_expense(&self, id: i64) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    pub(crate) fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {EXPENSE_COLUMNS} FROM expenses e WHERE e.id = ?1"),
                params![id],
                expense_from_row,
            )
            .optional()?)
    }

    /// Newest first by id. `created_at` is not used for ordering.
    pub(crate) fn get_expenses_for_budget(&self, budget_id: i64) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses e
             WHERE e.budget_id = ?1
             ORDER BY e.id DESC"
        ))?;
        let rows = stmt.query_map(params![budget_id], expense_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Every expense across the owner's budgets, newest first.
    pub(crate) fn get_expenses_for_owner(&self, owner: &str) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses e
             JOIN budgets b ON e.budget_id = b.id
             WHERE b.created_by = ?1
             ORDER BY e.id DESC"
        ))?;
        let rows = stmt.query_map(params![owner], expense_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}
