mod budget;
mod expense;
mod summary;

pub(crate) use budget::{Budget, BudgetDraft, DEFAULT_ICON};
pub(crate) use expense::{Expense, ExpenseDraft, CREATED_AT_FORMAT};
pub(crate) use summary::{BudgetSummary, Overview};

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Trim a label and reject it when nothing is left.
fn require_name(entity: &str, raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(Error::validation(format!("{entity} name is required")));
    }
    Ok(name.to_string())
}

/// Parse a user-entered amount. A `$` sign and thousands separators are
/// tolerated; anything else that is not a plain decimal is rejected.
fn parse_amount(entity: &str, raw: &str) -> Result<Decimal> {
    let cleaned = raw.trim().replace('$', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(Error::validation(format!("{entity} amount is required")));
    }
    let not_a_number = || Error::validation(format!("{entity} amount must be a number"));
    let plain = strip_thousands(cleaned).ok_or_else(not_a_number)?;
    Decimal::from_str(&plain)
        .or_else(|_| Decimal::from_scientific(&plain))
        .map_err(|_| not_a_number())
}

/// Drop commas that separate thousands in the integer part: `1,250.50`
/// becomes `1250.50`. `None` when a comma sits anywhere else, as in `1,5`.
fn strip_thousands(s: &str) -> Option<String> {
    if !s.contains(',') {
        return Some(s.to_string());
    }
    let unsigned = s.trim_start_matches(['-', '+']);
    let sign = &s[..s.len() - unsigned.len()];
    let (int_part, rest) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };
    if rest.contains(',') {
        return None;
    }

    let mut groups = int_part.split(',');
    let lead = groups.next()?;
    let all_digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());
    if !(1..=3).contains(&lead.len()) || !all_digits(lead) {
        return None;
    }
    let mut digits = lead.to_string();
    for group in groups {
        if group.len() != 3 || !all_digits(group) {
            return None;
        }
        digits.push_str(group);
    }
    Some(format!("{sign}{digits}{rest}"))
}
