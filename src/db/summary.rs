use rusqlite::{params, Row, ToSql};

use super::budgets::budget_from_row;
use super::{optional_decimal_column, Database};
use crate::error::Result;
use crate::models::{Budget, BudgetSummary};

// One row per (budget, expense) pair, or a single row with NULL expense
// columns for a budget that has none. Rows are grouped by budget id in
// `fold_summaries`, summing with Decimal rather than SQLite's float SUM.
const SUMMARY_SELECT: &str = "SELECT b.id, b.name, b.amount, b.icon, b.created_by, e.id, e.amount
     FROM budgets b
     LEFT JOIN expenses e ON e.budget_id = b.id";

struct SummaryRow {
    budget: Budget,
    expense: Option<rust_decimal::Decimal>,
}

fn summary_row(row: &Row<'_>) -> rusqlite::Result<SummaryRow> {
    let expense_id: Option<i64> = row.get(5)?;
    let expense = match expense_id {
        Some(_) => optional_decimal_column(row, 6)?,
        None => None,
    };
    Ok(SummaryRow {
        budget: budget_from_row(row)?,
        expense,
    })
}

/// Rows must arrive ordered by budget id so each group is contiguous.
/// A spend total outside the `Decimal` range is an `Error::Overflow`.
fn fold_summaries(rows: Vec<SummaryRow>) -> Result<Vec<BudgetSummary>> {
    let mut summaries: Vec<BudgetSummary> = Vec::new();
    for row in rows {
        let same_budget = summaries
            .last()
            .is_some_and(|s| s.budget.id == row.budget.id);
        if !same_budget {
            summaries.push(BudgetSummary::empty(row.budget));
        }
        if let (Some(amount), Some(current)) = (row.expense, summaries.last_mut()) {
            current.add_expense(amount)?;
        }
    }
    Ok(summaries)
}

impl Database {
    fn query_summaries(&self, filter: &str, args: &[&dyn ToSql]) -> Result<Vec<BudgetSummary>> {
        let sql = format!("{SUMMARY_SELECT} WHERE {filter} ORDER BY b.id DESC, e.id DESC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(args, summary_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        fold_summaries(rows)
    }

    /// `None` when the budget does not exist or belongs to someone else;
    /// the two cases are indistinguishable to the caller.
    pub(crate) fn get_budget_summary(&self, owner: &str, id: i64) -> Result<Option<BudgetSummary>> {
        let summaries =
            self.query_summaries("b.created_by = ?1 AND b.id = ?2", params![owner, id])?;
        Ok(summaries.into_iter().next())
    }

    pub(crate) fn get_budget_summaries(&self, owner: &str) -> Result<Vec<BudgetSummary>> {
        self.query_summaries("b.created_by = ?1", params![owner])
    }
}
