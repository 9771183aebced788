use crate::db::{CascadeOutcome, Database};
use crate::error::{Error, Result};
use crate::models::{Budget, BudgetDraft, BudgetSummary, Expense, ExpenseDraft, Overview};
use crate::notify::{Notice, Notifier};

/// What the user is told after one mutating action.
struct Outcome {
    action: &'static str,
    success: &'static str,
    failure: &'static str,
}

const CREATE_BUDGET: Outcome = Outcome {
    action: "create budget",
    success: "Budget created successfully!",
    failure: "Failed to create budget. Please try again.",
};

const UPDATE_BUDGET: Outcome = Outcome {
    action: "update budget",
    success: "Budget updated successfully!",
    failure: "Failed to update budget. Please try again.",
};

const DELETE_BUDGET: Outcome = Outcome {
    action: "delete budget",
    success: "Budget Deleted!",
    failure: "Failed to delete budget. Please try again.",
};

const ADD_EXPENSE: Outcome = Outcome {
    action: "add expense",
    success: "New Expense Added!",
    failure: "Failed to add expense. Please try again.",
};

const DELETE_EXPENSE: Outcome = Outcome {
    action: "delete expense",
    success: "Expense Deleted!",
    failure: "Failed to delete expense.",
};

impl Outcome {
    fn failure_message(&self, err: &Error) -> String {
        match err {
            Error::Validation(msg) => msg.clone(),
            Error::NotFound { entity, .. } => format!("{entity} not found."),
            Error::Overflow(_) => format!("{err}."),
            Error::Store(_) => self.failure.to_string(),
        }
    }
}

/// Owner-scoped budgets and expenses on top of the store.
///
/// Every mutating call emits exactly one notice, success or failure. Reads
/// emit none. Nothing is retried here; a failed call can simply be repeated.
pub(crate) struct Ledger<N> {
    db: Database,
    notifier: N,
}

impl<N: Notifier> Ledger<N> {
    pub(crate) fn new(db: Database, notifier: N) -> Self {
        Self { db, notifier }
    }

    fn report<T>(&self, outcome: &Outcome, result: Result<T>) -> Result<T> {
        let notice = match &result {
            Ok(_) => {
                tracing::info!(action = outcome.action, "done");
                Notice::Success(outcome.success.to_string())
            }
            Err(e) => {
                tracing::warn!(
                    action = outcome.action,
                    error = %e,
                    retryable = e.is_retryable(),
                    "failed"
                );
                Notice::Failure(outcome.failure_message(e))
            }
        };
        self.notifier.notify(notice);
        result
    }

    fn owned_budget(&self, owner: &str, id: i64) -> Result<Budget> {
        self.db
            .get_budget_for_owner(owner, id)?
            .ok_or_else(|| Error::budget_not_found(id))
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn create_budget(
        &self,
        owner: &str,
        name: &str,
        amount: &str,
        icon: Option<&str>,
    ) -> Result<Budget> {
        let result = BudgetDraft::parse(name, amount, icon)
            .and_then(|draft| self.db.insert_budget(owner, &draft));
        self.report(&CREATE_BUDGET, result)
    }

    pub(crate) fn update_budget(
        &self,
        owner: &str,
        id: i64,
        name: &str,
        amount: &str,
        icon: Option<&str>,
    ) -> Result<Budget> {
        let result = BudgetDraft::parse(name, amount, icon)
            .and_then(|draft| self.db.update_budget(owner, id, &draft));
        self.report(&UPDATE_BUDGET, result)
    }

    /// Removes the budget and all of its expenses as one unit.
    pub(crate) fn delete_budget(&mut self, owner: &str, id: i64) -> Result<CascadeOutcome> {
        let result = self
            .owned_budget(owner, id)
            .and_then(|budget| self.db.delete_budget_cascade(budget.id));
        self.report(&DELETE_BUDGET, result)
    }

    pub(crate) fn budget_summary(&self, owner: &str, id: i64) -> Result<BudgetSummary> {
        self.db
            .get_budget_summary(owner, id)?
            .ok_or_else(|| Error::budget_not_found(id))
    }

    pub(crate) fn budget_summaries(&self, owner: &str) -> Result<Vec<BudgetSummary>> {
        self.db.get_budget_summaries(owner)
    }

    pub(crate) fn overview(&self, owner: &str) -> Result<Overview> {
        Overview::from_summaries(&self.budget_summaries(owner)?)
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn add_expense(
        &self,
        owner: &str,
        budget_id: i64,
        name: &str,
        amount: &str,
    ) -> Result<Expense> {
        let result = ExpenseDraft::parse(name, amount).and_then(|draft| {
            let mut summary = self.budget_summary(owner, budget_id)?;
            summary.add_expense(draft.amount).map_err(|_| {
                Error::validation("Expense amount would put the budget total out of range")
            })?;
            self.db.insert_expense(summary.budget.id, &draft)
        });
        self.report(&ADD_EXPENSE, result)
    }

    /// A missing expense, or one under another owner's budget, is reported
    /// as a failure notice and `Ok(false)` rather than an error.
    pub(crate) fn delete_expense(&self, owner: &str, id: i64) -> Result<bool> {
        let result = self.delete_owned_expense(owner, id);
        match result {
            Ok(false) => {
                tracing::warn!(id, "expense to delete not found");
                let notice = DELETE_EXPENSE.failure_message(&Error::expense_not_found(id));
                self.notifier.notify(Notice::Failure(notice));
                Ok(false)
            }
            other => self.report(&DELETE_EXPENSE, other),
        }
    }

    fn delete_owned_expense(&self, owner: &str, id: i64) -> Result<bool> {
        let Some(expense) = self.db.get_expense(id)? else {
            return Ok(false);
        };
        if self
            .db
            .get_budget_for_owner(owner, expense.budget_id)?
            .is_none()
        {
            return Ok(false);
        }
        self.db.delete_expense(id)
    }

    pub(crate) fn expenses(&self, owner: &str, budget_id: i64) -> Result<Vec<Expense>> {
        let budget = self.owned_budget(owner, budget_id)?;
        self.db.get_expenses_for_budget(budget.id)
    }

    pub(crate) fn all_expenses(&self, owner: &str) -> Result<Vec<Expense>> {
        self.db.get_expenses_for_owner(owner)
    }
}
