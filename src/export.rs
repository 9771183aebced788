use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::{Budget, Expense};

const HEADER: [&str; 5] = ["id", "name", "amount", "created_at", "budget"];

/// Write one row per expense, in the order given. Returns the row count.
pub(crate) fn write_expenses<W: Write>(out: W, budget: &Budget, expenses: &[Expense]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADER)?;
    for e in expenses {
        wtr.write_record([
            e.id.to_string(),
            e.name.clone(),
            e.amount.to_string(),
            e.created_at.clone(),
            budget.name.clone(),
        ])?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(expenses.len())
}

pub(crate) fn export_expenses(path: &Path, budget: &Budget, expenses: &[Expense]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let count = write_expenses(file, budget, expenses)?;
    tracing::info!(path = %path.display(), count, "exported expenses");
    Ok(count)
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
