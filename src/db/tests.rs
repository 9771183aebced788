#![allow(clippy::unwrap_used)]

use super::budgets::delete_budget_row;
use super::expenses::delete_expenses_for_budget;
use super::*;
use crate::error::Error;
use crate::models::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn budget_draft(name: &str, amount: &str) -> BudgetDraft {
    BudgetDraft::parse(name, amount, None).unwrap()
}

fn expense_draft(name: &str, amount: &str) -> ExpenseDraft {
    ExpenseDraft::parse(name, amount).unwrap()
}

fn add_expenses(db: &Database, budget_id: i64, amounts: &[&str]) -> Vec<Expense> {
    amounts
        .iter()
        .enumerate()
        .map(|(i, amt)| {
            db.insert_expense(budget_id, &expense_draft(&format!("Item {i}"), amt))
                .unwrap()
        })
        .collect()
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_database_has_current_version() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);
}

#[test]
fn test_reopen_file_database_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendwise.db");
    let timeout = std::time::Duration::from_millis(500);

    let id = {
        let db = Database::open(&path, timeout).unwrap();
        db.insert_budget("u1", &budget_draft("Travel", "900")).unwrap().id
    };

    let db = Database::open(&path, timeout).unwrap();
    assert_eq!(db.schema_version().unwrap(), schema::CURRENT_VERSION);
    let budget = db.get_budget_for_owner("u1", id).unwrap().unwrap();
    assert_eq!(budget.name, "Travel");
    assert_eq!(budget.amount, dec!(900));
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_insert_budget_returns_record() {
    let db = Database::open_in_memory().unwrap();
    let draft = BudgetDraft::parse("Groceries", "500", Some("🛒")).unwrap();
    let budget = db.insert_budget("u1", &draft).unwrap();

    assert!(budget.id > 0);
    assert_eq!(budget.name, "Groceries");
    assert_eq!(budget.amount, dec!(500));
    assert_eq!(budget.icon, "🛒");
    assert_eq!(budget.created_by, "u1");
}

#[test]
fn test_insert_budget_default_icon_persisted() {
    let db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("Rent", "1200")).unwrap();
    let fetched = db.get_budget_for_owner("u1", budget.id).unwrap().unwrap();
    assert_eq!(fetched.icon, DEFAULT_ICON);
}

#[test]
fn test_insert_budget_requires_owner() {
    let db = Database::open_in_memory().unwrap();
    let err = db.insert_budget("  ", &budget_draft("Rent", "1")).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(db.get_budget_summaries("").unwrap().is_empty());
}

#[test]
fn test_owner_is_matched_exactly_as_stored() {
    let db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget(" u1 ", &budget_draft("Padded", "10")).unwrap();
    assert_eq!(budget.created_by, " u1 ");
    add_expenses(&db, budget.id, &["4"]);

    assert!(db.get_budget_for_owner(" u1 ", budget.id).unwrap().is_some());
    let summary = db.get_budget_summary(" u1 ", budget.id).unwrap().unwrap();
    assert_eq!(summary.total_item, 1);
    assert_eq!(db.get_budget_summaries(" u1 ").unwrap().len(), 1);
    assert_eq!(db.get_expenses_for_owner(" u1 ").unwrap().len(), 1);
    let updated = db
        .update_budget(" u1 ", budget.id, &budget_draft("Renamed", "20"))
        .unwrap();
    assert_eq!(updated.created_by, " u1 ");

    // A differently spelled owner is someone else.
    assert!(db.get_budget_for_owner("u1", budget.id).unwrap().is_none());
    assert!(db.get_budget_summary("u1", budget.id).unwrap().is_none());
}

#[test]
fn test_insert_budget_keeps_decimal_precision() {
    let db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("Fees", "0.10")).unwrap();
    let fetched = db.get_budget_for_owner("u1", budget.id).unwrap().unwrap();
    assert_eq!(fetched.amount, dec!(0.10));
}

#[test]
fn test_get_budget_scoped_by_owner() {
    let db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("Rent", "1200")).unwrap();

    assert!(db.get_budget_for_owner("u1", budget.id).unwrap().is_some());
    assert!(db.get_budget_for_owner("u2", budget.id).unwrap().is_none());
    assert!(db.get_budget_for_owner("u1", 99999).unwrap().is_none());
}

#[test]
fn test_update_budget_replaces_fields() {
    let db = Database::open_in_memory().unwrap();
    let budget = db
        .insert_budget("u1", &BudgetDraft::parse("Food", "300", Some("🍔")).unwrap())
        .unwrap();

    let updated = db
        .update_budget("u1", budget.id, &budget_draft("Dining", "450.50"))
        .unwrap();
    assert_eq!(updated.id, budget.id);
    assert_eq!(updated.name, "Dining");
    assert_eq!(updated.amount, dec!(450.50));
    assert_eq!(updated.icon, DEFAULT_ICON);
    assert_eq!(updated.created_by, "u1");

    let fetched = db.get_budget_for_owner("u1", budget.id).unwrap().unwrap();
    assert_eq!(fetched, updated);
}

#[test]
fn test_update_budget_not_found() {
    let db = Database::open_in_memory().unwrap();
    let err = db
        .update_budget("u1", 42, &budget_draft("Ghost", "1"))
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { entity: "Budget", id: 42 }));
}

#[test]
fn test_update_budget_other_owner_is_not_found() {
    let db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("Rent", "1200")).unwrap();

    let err = db
        .update_budget("u2", budget.id, &budget_draft("Hijacked", "1"))
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));

    let untouched = db.get_budget_for_owner("u1", budget.id).unwrap().unwrap();
    assert_eq!(untouched.name, "Rent");
}

#[test]
fn test_delete_budget_row_with_expenses_violates_foreign_key() {
    let db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("Rent", "1200")).unwrap();
    add_expenses(&db, budget.id, &["10"]);

    let err = delete_budget_row(&db.conn, budget.id).unwrap_err();
    assert!(matches!(err, Error::Store(_)));
    assert!(err.is_retryable());
    assert!(db.get_budget_for_owner("u1", budget.id).unwrap().is_some());
}

#[test]
fn test_delete_budget_row_missing_is_false() {
    let db = Database::open_in_memory().unwrap();
    assert!(!delete_budget_row(&db.conn, 7).unwrap());
}

// ── Expenses ──────────────────────────────────────────────────

#[test]
fn test_insert_expense_returns_owning_budget() {
    let db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("Groceries", "500")).unwrap();

    let expense = db
        .insert_expense(budget.id, &expense_draft("Milk", "4"))
        .unwrap();
    assert!(expense.id > 0);
    assert_eq!(expense.budget_id, budget.id);
    assert_eq!(expense.name, "Milk");
    assert_eq!(expense.amount, dec!(4));
    assert!(chrono::NaiveDate::parse_from_str(&expense.created_at, CREATED_AT_FORMAT).is_ok());

    let fetched = db.get_expense(expense.id).unwrap().unwrap();
    assert_eq!(fetched, expense);
}

#[test]
fn test_insert_expense_unknown_budget_is_store_error() {
    let db = Database::open_in_memory().unwrap();
    let err = db
        .insert_expense(12345, &expense_draft("Orphan", "1"))
        .unwrap_err();
    assert!(matches!(err, Error::Store(_)));
    assert!(db.get_expenses_for_budget(12345).unwrap().is_empty());
}

#[test]
fn test_list_expenses_newest_id_first() {
    let db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("Groceries", "500")).unwrap();
    let inserted = add_expenses(&db, budget.id, &["1", "2", "3"]);

    let listed: Vec<i64> = db
        .get_expenses_for_budget(budget.id)
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(
        listed,
        vec![inserted[2].id, inserted[1].id, inserted[0].id]
    );
}

#[test]
fn test_list_expenses_only_for_that_budget() {
    let db = Database::open_in_memory().unwrap();
    let a = db.insert_budget("u1", &budget_draft("A", "10")).unwrap();
    let b = db.insert_budget("u1", &budget_draft("B", "10")).unwrap();
    add_expenses(&db, a.id, &["1", "2"]);
    add_expenses(&db, b.id, &["3"]);

    let listed = db.get_expenses_for_budget(a.id).unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|e| e.budget_id == a.id));
}

#[test]
fn test_ids_not_reused_after_delete() {
    let db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("A", "10")).unwrap();
    let first = add_expenses(&db, budget.id, &["1"]).remove(0);
    assert!(db.delete_expense(first.id).unwrap());

    let second = add_expenses(&db, budget.id, &["2"]).remove(0);
    assert!(second.id > first.id);
}

#[test]
fn test_delete_expense() {
    let db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("A", "10")).unwrap();
    let expenses = add_expenses(&db, budget.id, &["1", "2"]);

    assert!(db.delete_expense(expenses[0].id).unwrap());
    assert!(db.get_expense(expenses[0].id).unwrap().is_none());
    assert_eq!(db.get_expenses_for_budget(budget.id).unwrap().len(), 1);
}

#[test]
fn test_delete_missing_expense_is_false() {
    let db = Database::open_in_memory().unwrap();
    assert!(!db.delete_expense(404).unwrap());
}

#[test]
fn test_delete_expenses_for_budget_is_idempotent() {
    let db = Database::open_in_memory().unwrap();
    let a = db.insert_budget("u1", &budget_draft("A", "10")).unwrap();
    let b = db.insert_budget("u1", &budget_draft("B", "10")).unwrap();
    add_expenses(&db, a.id, &["1", "2", "3"]);
    add_expenses(&db, b.id, &["4"]);

    assert_eq!(delete_expenses_for_budget(&db.conn, a.id).unwrap(), 3);
    assert_eq!(delete_expenses_for_budget(&db.conn, a.id).unwrap(), 0);
    assert_eq!(db.get_expenses_for_budget(b.id).unwrap().len(), 1);
}

#[test]
fn test_expenses_for_owner_spans_budgets() {
    let db = Database::open_in_memory().unwrap();
    let a = db.insert_budget("u1", &budget_draft("A", "10")).unwrap();
    let b = db.insert_budget("u1", &budget_draft("B", "10")).unwrap();
    let other = db.insert_budget("u2", &budget_draft("C", "10")).unwrap();
    let e1 = add_expenses(&db, a.id, &["1"]).remove(0);
    let e2 = add_expenses(&db, b.id, &["2"]).remove(0);
    add_expenses(&db, other.id, &["3"]);

    let ids: Vec<i64> = db
        .get_expenses_for_owner("u1")
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![e2.id, e1.id]);
}

#[test]
fn test_corrupt_amount_is_store_error() {
    let db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("A", "10")).unwrap();
    db.conn
        .execute(
            "UPDATE budgets SET amount = 'lots' WHERE id = ?1",
            rusqlite::params![budget.id],
        )
        .unwrap();

    let err = db.get_budget_for_owner("u1", budget.id).unwrap_err();
    assert!(matches!(
        err,
        Error::Store(rusqlite::Error::FromSqlConversionFailure(2, _, _))
    ));
}

// ── Summaries ─────────────────────────────────────────────────

#[test]
fn test_summary_without_expenses_is_zero() {
    let db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("Empty", "100")).unwrap();

    let summary = db.get_budget_summary("u1", budget.id).unwrap().unwrap();
    assert_eq!(summary.budget, budget);
    assert_eq!(summary.total_spend, Decimal::ZERO);
    assert_eq!(summary.total_item, 0);
}

#[test]
fn test_summary_sums_mixed_signs() {
    let db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("Mixed", "100")).unwrap();
    add_expenses(&db, budget.id, &["10.10", "-2.05", "0.01", "30"]);

    let summary = db.get_budget_summary("u1", budget.id).unwrap().unwrap();
    assert_eq!(summary.total_spend, dec!(38.06));
    assert_eq!(summary.total_item, 4);
}

#[test]
fn test_summary_is_exact_for_cents() {
    let db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("Coins", "1")).unwrap();
    let amounts = vec!["0.1"; 10];
    add_expenses(&db, budget.id, &amounts);

    let summary = db.get_budget_summary("u1", budget.id).unwrap().unwrap();
    assert_eq!(summary.total_spend, dec!(1.0));
    assert_eq!(summary.total_item, 10);
}

#[test]
fn test_summary_out_of_range_is_an_error() {
    let db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("Huge", "1")).unwrap();
    let fine = db.insert_budget("u1", &budget_draft("Fine", "1")).unwrap();
    add_expenses(
        &db,
        budget.id,
        &["70000000000000000000000000000", "70000000000000000000000000000"],
    );

    let err = db.get_budget_summary("u1", budget.id).unwrap_err();
    assert!(matches!(err, Error::Overflow(_)));
    assert!(!err.is_retryable());
    assert!(matches!(
        db.get_budget_summaries("u1").unwrap_err(),
        Error::Overflow(_)
    ));

    // Other budgets are unaffected, and the expenses can still be listed.
    assert!(db.get_budget_summary("u1", fine.id).unwrap().is_some());
    assert_eq!(db.get_expenses_for_budget(budget.id).unwrap().len(), 2);
}

#[test]
fn test_summary_other_owner_is_none() {
    let db = Database::open_in_memory().unwrap();
    let theirs = db.insert_budget("u2", &budget_draft("Private", "100")).unwrap();
    add_expenses(&db, theirs.id, &["50"]);

    assert!(db.get_budget_summary("u1", theirs.id).unwrap().is_none());
    assert!(db.get_budget_summary("u1", 99999).unwrap().is_none());
}

#[test]
fn test_summaries_for_owner() {
    let db = Database::open_in_memory().unwrap();
    let a = db.insert_budget("u1", &budget_draft("A", "100")).unwrap();
    let b = db.insert_budget("u1", &budget_draft("B", "200")).unwrap();
    let c = db.insert_budget("u1", &budget_draft("C", "300")).unwrap();
    let other = db.insert_budget("u2", &budget_draft("X", "1")).unwrap();
    add_expenses(&db, a.id, &["1", "2"]);
    add_expenses(&db, c.id, &["5"]);
    add_expenses(&db, other.id, &["99"]);

    let summaries = db.get_budget_summaries("u1").unwrap();
    let ids: Vec<i64> = summaries.iter().map(|s| s.budget.id).collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);

    assert_eq!(summaries[0].total_spend, dec!(5));
    assert_eq!(summaries[0].total_item, 1);
    assert_eq!(summaries[1].total_spend, Decimal::ZERO);
    assert_eq!(summaries[1].total_item, 0);
    assert_eq!(summaries[2].total_spend, dec!(3));
    assert_eq!(summaries[2].total_item, 2);
}

#[test]
fn test_summaries_for_unknown_owner_is_empty() {
    let db = Database::open_in_memory().unwrap();
    db.insert_budget("u1", &budget_draft("A", "100")).unwrap();
    assert!(db.get_budget_summaries("nobody").unwrap().is_empty());
}

// ── Cascade delete ────────────────────────────────────────────

#[test]
fn test_cascade_removes_budget_and_expenses() {
    let mut db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("Trip", "800")).unwrap();
    let keep = db.insert_budget("u1", &budget_draft("Keep", "10")).unwrap();
    add_expenses(&db, budget.id, &["100", "200"]);
    add_expenses(&db, keep.id, &["1"]);

    let outcome = db.delete_budget_cascade(budget.id).unwrap();
    assert_eq!(
        outcome,
        CascadeOutcome {
            expenses_removed: 2,
            budget_removed: true,
        }
    );
    assert!(db.get_budget_for_owner("u1", budget.id).unwrap().is_none());
    assert!(db.get_expenses_for_budget(budget.id).unwrap().is_empty());
    assert_eq!(db.get_expenses_for_budget(keep.id).unwrap().len(), 1);
}

#[test]
fn test_cascade_without_expenses_still_removes_budget() {
    let mut db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("Empty", "1")).unwrap();

    let outcome = db.delete_budget_cascade(budget.id).unwrap();
    assert_eq!(outcome.expenses_removed, 0);
    assert!(outcome.budget_removed);
}

#[test]
fn test_cascade_twice_is_noop() {
    let mut db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("Trip", "800")).unwrap();
    add_expenses(&db, budget.id, &["100"]);

    db.delete_budget_cascade(budget.id).unwrap();
    let second = db.delete_budget_cascade(budget.id).unwrap();
    assert_eq!(
        second,
        CascadeOutcome {
            expenses_removed: 0,
            budget_removed: false,
        }
    );
}

#[test]
fn test_cascade_rolls_back_when_budget_delete_fails() {
    let mut db = Database::open_in_memory().unwrap();
    let budget = db.insert_budget("u1", &budget_draft("Locked", "50")).unwrap();
    add_expenses(&db, budget.id, &["5", "6"]);
    db.conn
        .execute_batch(
            "CREATE TRIGGER block_budget_delete BEFORE DELETE ON budgets
             BEGIN SELECT RAISE(ABORT, 'budget locked'); END;",
        )
        .unwrap();

    let err = db.delete_budget_cascade(budget.id).unwrap_err();
    assert!(err.is_retryable());
    // Step one was rolled back along with step two.
    assert_eq!(db.get_expenses_for_budget(budget.id).unwrap().len(), 2);

    db.conn
        .execute_batch("DROP TRIGGER block_budget_delete;")
        .unwrap();
    let outcome = db.delete_budget_cascade(budget.id).unwrap();
    assert_eq!(outcome.expenses_removed, 2);
    assert!(outcome.budget_removed);
}

#[test]
fn test_groceries_scenario() {
    let mut db = Database::open_in_memory().unwrap();
    let budget = db
        .insert_budget("u1", &budget_draft("Groceries", "500"))
        .unwrap();
    db.insert_expense(budget.id, &expense_draft("Milk", "4"))
        .unwrap();
    db.insert_expense(budget.id, &expense_draft("Bread", "3"))
        .unwrap();

    let summary = db.get_budget_summary("u1", budget.id).unwrap().unwrap();
    assert_eq!(summary.budget.name, "Groceries");
    assert_eq!(summary.budget.amount, dec!(500));
    assert_eq!(summary.total_spend, dec!(7));
    assert_eq!(summary.total_item, 2);

    db.delete_budget_cascade(budget.id).unwrap();
    assert!(db.get_budget_summary("u1", budget.id).unwrap().is_none());
    assert!(db.get_expenses_for_budget(budget.id).unwrap().is_empty());
}
