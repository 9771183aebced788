use anyhow::Result;
use rust_decimal::Decimal;
use std::path::PathBuf;

use super::{parse_id, resolve_owner, take_flag};
use crate::config::Config;
use crate::ledger::Ledger;
use crate::models::{BudgetSummary, Expense, DEFAULT_ICON};
use crate::notify::Notifier;
use crate::util::{format_amount, progress_bar, truncate};

pub(crate) fn as_cli<N: Notifier>(
    args: &[String],
    config: &Config,
    ledger: &mut Ledger<N>,
) -> Result<()> {
    let (owner_flag, args) = take_flag(args.get(1..).unwrap_or(&[]), "--as")?;
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendwise {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            let owner = resolve_owner(owner_flag, config)?;
            match other {
                "budgets" | "b" => cli_budgets(&owner, ledger),
                "budget" => cli_budget(&args[1..], &owner, ledger),
                "expense" | "e" => cli_expense(&args[1..], &owner, ledger),
                "expenses" => cli_expenses(&args[1..], &owner, ledger),
                "export" => cli_export(&args[1..], &owner, ledger),
                _ => {
                    print_usage();
                    anyhow::bail!("Unknown command: {other}");
                }
            }
        }
    }
}

fn print_usage() {
    println!("Spendwise - budgets and expenses");
    println!();
    println!("Usage: spendwise [--as <owner>] <command>");
    println!();
    println!("Commands:");
    println!("  budgets                                 List budgets with spend totals");
    println!("  budget new <name> <amount>              Create a budget");
    println!("    --icon <emoji>                        Icon to show (default: {DEFAULT_ICON})");
    println!("  budget show <id>                        Show a budget and its expenses");
    println!("  budget edit <id> <name> <amount>        Replace a budget's name, amount and icon");
    println!("  budget delete <id>                      Delete a budget and all its expenses");
    println!("  expense add <budget-id> <name> <amount> Add an expense to a budget");
    println!("  expense delete <id>                     Delete one expense");
    println!("  expenses [budget-id]                    List expenses, newest first");
    println!("  export <budget-id> [path]               Export a budget's expenses to CSV");
    println!("  --help, -h                              Show this help");
    println!("  --version, -V                           Show version");
    println!();
    println!("The owner defaults to $SPENDWISE_OWNER.");
}

fn cli_budgets<N: Notifier>(owner: &str, ledger: &Ledger<N>) -> Result<()> {
    let summaries = ledger.budget_summaries(owner)?;
    if summaries.is_empty() {
        println!("No budgets");
        return Ok(());
    }

    println!(
        "{:<5} {:<22} {:>12} {:>12} {:>12} {:>5}",
        "ID", "Name", "Budget", "Spent", "Remaining", "Items"
    );
    println!("{}", "─".repeat(73));
    for s in &summaries {
        print_summary_row(s);
    }

    let overview = ledger.overview(owner)?;
    println!("{}", "─".repeat(73));
    println!(
        "{:<28} {:>12} {:>12} {:>12} {:>5}",
        format!("{} budgets", overview.budget_count),
        format_amount(overview.total_budget),
        format_amount(overview.total_spend),
        remaining_amount(overview.remaining()),
        overview.expense_count,
    );
    Ok(())
}

fn print_summary_row(s: &BudgetSummary) {
    let label = format!("{} {}", s.budget.icon, s.budget.name);
    println!(
        "{:<5} {:<22} {:>12} {:>12} {:>12} {:>5}",
        s.budget.id,
        truncate(&label, 22),
        format_amount(s.budget.amount),
        format_amount(s.total_spend),
        remaining_amount(s.remaining()),
        s.total_item,
    );
}

fn remaining_amount(remaining: Option<Decimal>) -> String {
    remaining.map_or_else(|| "n/a".to_string(), format_amount)
}

fn cli_budget<N: Notifier>(args: &[String], owner: &str, ledger: &mut Ledger<N>) -> Result<()> {
    let (icon, args) = take_flag(args, "--icon")?;
    let sub: Vec<&str> = args.iter().map(String::as_str).collect();
    match sub.as_slice() {
        ["new", name, amount] => {
            let budget = ledger.create_budget(owner, name, amount, icon.as_deref())?;
            println!("  id: {}", budget.id);
            Ok(())
        }
        ["show", id] => {
            let id = parse_id(id, "budget")?;
            let summary = ledger.budget_summary(owner, id)?;
            let expenses = ledger.expenses(owner, id)?;
            print_budget_detail(&summary, &expenses);
            Ok(())
        }
        ["edit", id, name, amount] => {
            let id = parse_id(id, "budget")?;
            ledger.update_budget(owner, id, name, amount, icon.as_deref())?;
            Ok(())
        }
        ["delete", id] => {
            let id = parse_id(id, "budget")?;
            let outcome = ledger.delete_budget(owner, id)?;
            println!("  {} expense(s) removed", outcome.expenses_removed);
            Ok(())
        }
        _ => anyhow::bail!(
            "Usage: spendwise budget new <name> <amount> [--icon <emoji>] | show <id> | edit <id> <name> <amount> [--icon <emoji>] | delete <id>"
        ),
    }
}

fn print_budget_detail(summary: &BudgetSummary, expenses: &[Expense]) {
    let b = &summary.budget;
    println!("{} {} (#{})", b.icon, b.name, b.id);
    println!("{}", "─".repeat(40));
    println!("  Budget:     {}", format_amount(b.amount));
    println!("  Spent:      {}", format_amount(summary.total_spend));
    println!("  Remaining:  {}", remaining_amount(summary.remaining()));
    println!(
        "  Progress:   {} {:.0}%",
        progress_bar(summary.progress_percent(), 20),
        summary.progress_percent()
    );
    println!("  Items:      {}", summary.total_item);

    if !expenses.is_empty() {
        println!();
        print_expense_table(expenses);
    }
}

fn print_expense_table(expenses: &[Expense]) {
    println!("{:<6} {:<24} {:>12} {:<10}", "ID", "Name", "Amount", "Date");
    for e in expenses {
        println!(
            "{:<6} {:<24} {:>12} {:<10}",
            e.id,
            truncate(&e.name, 24),
            format_amount(e.amount),
            e.created_at,
        );
    }
}

fn cli_expense<N: Notifier>(args: &[String], owner: &str, ledger: &Ledger<N>) -> Result<()> {
    let sub: Vec<&str> = args.iter().map(String::as_str).collect();
    match sub.as_slice() {
        ["add", budget_id, name, amount] => {
            let budget_id = parse_id(budget_id, "budget")?;
            let expense = ledger.add_expense(owner, budget_id, name, amount)?;
            println!("  id: {} (budget {})", expense.id, expense.budget_id);
            Ok(())
        }
        ["delete", id] => {
            let id = parse_id(id, "expense")?;
            if !ledger.delete_expense(owner, id)? {
                anyhow::bail!("Nothing deleted");
            }
            Ok(())
        }
        _ => anyhow::bail!(
            "Usage: spendwise expense add <budget-id> <name> <amount> | delete <id>"
        ),
    }
}

fn cli_expenses<N: Notifier>(args: &[String], owner: &str, ledger: &Ledger<N>) -> Result<()> {
    let expenses = match args.first() {
        Some(id) => ledger.expenses(owner, parse_id(id, "budget")?)?,
        None => ledger.all_expenses(owner)?,
    };
    if expenses.is_empty() {
        println!("No expenses");
        return Ok(());
    }
    print_expense_table(&expenses);
    Ok(())
}

fn cli_export<N: Notifier>(args: &[String], owner: &str, ledger: &Ledger<N>) -> Result<()> {
    let Some(raw_id) = args.first() else {
        anyhow::bail!("Usage: spendwise export <budget-id> [path]");
    };
    let budget_id = parse_id(raw_id, "budget")?;
    let summary = ledger.budget_summary(owner, budget_id)?;
    let expenses = ledger.expenses(owner, budget_id)?;

    let output_path = args.get(1).map_or_else(
        || home_dir().join(format!("spendwise-budget-{budget_id}.csv")),
        |p| expand_home(p),
    );

    let count = crate::export::export_expenses(&output_path, &summary.budget, &expenses)?;
    if count == 0 {
        println!(
            "No expenses in {}; wrote header only to {}",
            summary.budget.name,
            output_path.display()
        );
    } else {
        println!("Exported {count} expenses to {}", output_path.display());
    }
    Ok(())
}

fn home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map_or_else(|| PathBuf::from("."), |dirs| dirs.home_dir().to_path_buf())
}

/// A leading `~/` means the home directory.
fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None => PathBuf::from(path),
    }
}
