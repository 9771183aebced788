use rust_decimal::Decimal;

use super::{parse_amount, require_name};
use crate::error::{Error, Result};

/// Icon stored when the caller does not pick one.
pub(crate) const DEFAULT_ICON: &str = "😀";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Budget {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) amount: Decimal,
    pub(crate) icon: String,
    /// Owner identity; set once at creation.
    pub(crate) created_by: String,
}

/// The mutable fields of a budget, validated and ready to persist.
/// Used for both create and full-replace update.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetDraft {
    pub(crate) name: String,
    pub(crate) amount: Decimal,
    pub(crate) icon: String,
}

impl BudgetDraft {
    pub(crate) fn parse(name: &str, amount: &str, icon: Option<&str>) -> Result<Self> {
        let name = require_name("Budget", name)?;
        let amount = parse_amount("Budget", amount)?;
        if amount < Decimal::ZERO {
            return Err(Error::validation("Budget amount cannot be negative"));
        }
        Ok(Self {
            name,
            amount,
            icon: normalize_icon(icon),
        })
    }
}

fn normalize_icon(icon: Option<&str>) -> String {
    match icon.map(str::trim) {
        Some(i) if !i.is_empty() => i.to_string(),
        _ => DEFAULT_ICON.to_string(),
    }
}
