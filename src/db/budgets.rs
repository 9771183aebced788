use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{decimal_column, Database};
use crate::error::{Error, Result};
use crate::models::{Budget, BudgetDraft};

pub(super) const BUDGET_COLUMNS: &str = "id, name, amount, icon, created_by";

pub(super) fn budget_from_row(row: &Row<'_>) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: row.get(0)?,
        name: row.get(1)?,
        amount: decimal_column(row, 2)?,
        icon: row.get(3)?,
        created_by: row.get(4)?,
    })
}

/// Remove one budget row by id. Does not touch expenses: with foreign keys on
/// this fails while any expense still references the budget.
pub(super) fn delete_budget_row(conn: &Connection, id: i64) -> Result<bool> {
    let removed = conn.execute("DELETE FROM budgets WHERE id = ?1", params![id])?;
    Ok(removed > 0)
}

impl Database {
    /// The owner is stored exactly as given, so every owner-scoped query
    /// matches it byte for byte. A blank owner is rejected.
    pub(crate) fn insert_budget(&self, owner: &str, draft: &BudgetDraft) -> Result<Budget> {
        if owner.trim().is_empty() {
            return Err(Error::validation("Budget owner is required"));
        }
        let budget = self.conn.query_row(
            &format!(
                "INSERT INTO budgets (name, amount, icon, created_by)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING {BUDGET_COLUMNS}"
            ),
            params![draft.name, draft.amount.to_string(), draft.icon, owner],
            budget_from_row,
        )?;
        tracing::debug!(id = budget.id, owner, "inserted budget");
        Ok(budget)
    }

    /// Replace name, amount and icon. Only matches a budget the owner created.
    pub(crate) fn update_budget(
        &self,
        owner: &str,
        id: i64,
        draft: &BudgetDraft,
    ) -> Result<Budget> {
        self.conn
            .query_row(
                &format!(
                    "UPDATE budgets SET name = ?1, amount = ?2, icon = ?3
                     WHERE id = ?4 AND created_by = ?5
                     RETURNING {BUDGET_COLUMNS}"
                ),
                params![draft.name, draft.amount.to_string(), draft.icon, id, owner],
                budget_from_row,
            )
            .optional()?
            .ok_or_else(|| Error::budget_not_found(id))
    }

    pub(crate) fn get_budget_for_owner(&self, owner: &str, id: i64) -> Result<Option<Budget>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {BUDGET_COLUMNS} FROM budgets WHERE id = ?1 AND created_by = ?2"),
                params![id, owner],
                budget_from_row,
            )
            .optional()?)
    }
}
