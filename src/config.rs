use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

const DB_ENV: &str = "SPENDWISE_DB";
const BUSY_TIMEOUT_ENV: &str = "SPENDWISE_BUSY_TIMEOUT_MS";
const OWNER_ENV: &str = "SPENDWISE_OWNER";

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    /// How long a store round trip may wait on a lock before failing.
    pub(crate) busy_timeout: Duration,
    /// Fallback owner identity when `--as` is not given.
    pub(crate) owner: Option<String>,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = match lookup(DB_ENV).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };

        let busy_timeout = match lookup(BUSY_TIMEOUT_ENV) {
            Some(raw) => {
                let ms: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{BUSY_TIMEOUT_ENV} must be milliseconds, got '{raw}'"))?;
                Duration::from_millis(ms)
            }
            None => Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
        };

        let owner = lookup(OWNER_ENV)
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty());

        Ok(Self {
            db_path,
            busy_timeout,
            owner,
        })
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "spendwise", "Spendwise")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("spendwise.db"))
}
