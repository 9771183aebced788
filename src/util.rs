use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Dollars with comma-grouped thousands and cents, e.g. `-$1,234.50`.
/// Rounds half to even, so a value that rounds to zero has no sign.
pub(crate) fn format_amount(val: Decimal) -> String {
    let cents = val.round_dp(2);
    let sign = if cents.is_sign_negative() && !cents.is_zero() { "-" } else { "" };
    let text = format!("{:.2}", cents.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{frac}")
}

/// Keep at most `max` chars, the last being `…` when anything was cut.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some(_) if max == 0 => String::new(),
        Some(_) => {
            let keep = s.char_indices().nth(max - 1).map_or(s.len(), |(i, _)| i);
            format!("{}…", &s[..keep])
        }
    }
}

/// Text progress bar for a 0..=100 percentage, `width` cells wide.
pub(crate) fn progress_bar(percent: Decimal, width: usize) -> String {
    let pct = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let filled = (pct * Decimal::from(width) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
#[path = "util_tests.rs"]
mod tests;
