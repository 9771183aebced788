use rust_decimal::Decimal;

use super::{parse_amount, require_name};
use crate::error::Result;

/// `created_at` is a display date, not a sortable timestamp.
pub(crate) const CREATED_AT_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Expense {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) amount: Decimal,
    pub(crate) budget_id: i64,
    /// Format: "DD/MM/YYYY"
    pub(crate) created_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExpenseDraft {
    pub(crate) name: String,
    pub(crate) amount: Decimal,
}

impl ExpenseDraft {
    /// Expenses carry no sign or range constraint.
    pub(crate) fn parse(name: &str, amount: &str) -> Result<Self> {
        Ok(Self {
            name: require_name("Expense", name)?,
            amount: parse_amount("Expense", amount)?,
        })
    }
}

impl Expense {
    pub(crate) fn today() -> String {
        chrono::Local::now().format(CREATED_AT_FORMAT).to_string()
    }
}
