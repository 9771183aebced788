use rust_decimal::Decimal;

use super::Budget;
use crate::error::{Error, Result};

/// A budget plus what has been spent against it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetSummary {
    pub(crate) budget: Budget,
    /// Zero, never absent, when the budget has no expenses.
    pub(crate) total_spend: Decimal,
    pub(crate) total_item: i64,
}

impl BudgetSummary {
    pub(crate) fn empty(budget: Budget) -> Self {
        Self {
            budget,
            total_spend: Decimal::ZERO,
            total_item: 0,
        }
    }

    /// Fails, leaving the summary unchanged, when the running total would
    /// leave the `Decimal` range.
    pub(crate) fn add_expense(&mut self, amount: Decimal) -> Result<()> {
        self.total_spend = self.total_spend.checked_add(amount).ok_or_else(|| {
            Error::overflow(format!("Spend total for budget {}", self.budget.id))
        })?;
        self.total_item += 1;
        Ok(())
    }

    /// `None` when budget minus spend is not representable.
    pub(crate) fn remaining(&self) -> Option<Decimal> {
        self.budget.amount.checked_sub(self.total_spend)
    }

    /// Share of the budget already spent, clamped to 0..=100.
    pub(crate) fn progress_percent(&self) -> Decimal {
        if self.budget.amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.total_spend
            .checked_div(self.budget.amount)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::ONE_HUNDRED, |pct| {
                pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
            })
    }
}

/// Dashboard totals across every budget an owner has.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Overview {
    pub(crate) total_budget: Decimal,
    pub(crate) total_spend: Decimal,
    pub(crate) budget_count: usize,
    pub(crate) expense_count: i64,
}

impl Overview {
    pub(crate) fn from_summaries(summaries: &[BudgetSummary]) -> Result<Self> {
        summaries.iter().try_fold(Self::default(), |mut acc, s| {
            acc.total_budget = acc
                .total_budget
                .checked_add(s.budget.amount)
                .ok_or_else(|| Error::overflow("Budget total"))?;
            acc.total_spend = acc
                .total_spend
                .checked_add(s.total_spend)
                .ok_or_else(|| Error::overflow("Spend total"))?;
            acc.budget_count += 1;
            acc.expense_count += s.total_item;
            Ok(acc)
        })
    }

    pub(crate) fn remaining(&self) -> Option<Decimal> {
        self.total_budget.checked_sub(self.total_spend)
    }
}
