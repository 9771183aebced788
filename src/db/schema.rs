pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS budgets (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    amount      TEXT NOT NULL,
    icon        TEXT NOT NULL,
    created_by  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_budgets_owner ON budgets(created_by);

-- No ON DELETE CASCADE: expenses are removed explicitly before their budget.
CREATE TABLE IF NOT EXISTS expenses (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    amount      TEXT NOT NULL,
    budget_id   INTEGER NOT NULL REFERENCES budgets(id),
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_expenses_budget ON expenses(budget_id);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
