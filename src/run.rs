mod cli;

pub(crate) use cli::as_cli;

use anyhow::{Context, Result};

use crate::config::Config;

/// Pull `flag <value>` out of an argument list, returning the value and the
/// remaining arguments in order.
pub(crate) fn take_flag(args: &[String], flag: &str) -> Result<(Option<String>, Vec<String>)> {
    let mut value = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == flag {
            let v = iter
                .next()
                .with_context(|| format!("{flag} needs a value"))?;
            value = Some(v.clone());
        } else {
            rest.push(arg.clone());
        }
    }
    Ok((value, rest))
}

/// `--as` wins over `SPENDWISE_OWNER`.
pub(crate) fn resolve_owner(flag: Option<String>, config: &Config) -> Result<String> {
    flag.map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .or_else(|| config.owner.clone())
        .context("No owner given. Use --as <owner> or set SPENDWISE_OWNER")
}

pub(crate) fn parse_id(raw: &str, what: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid {what} id: {raw}"))
}
