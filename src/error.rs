use thiserror::Error;

/// Errors raised by the store and the ledger service.
///
/// `Validation` is always raised before the store is touched. `NotFound` covers
/// both a missing row and a row that belongs to another owner.
#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A total that cannot be represented as a `Decimal`.
    #[error("{0} is out of range")]
    Overflow(String),

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn overflow(what: impl Into<String>) -> Self {
        Self::Overflow(what.into())
    }

    pub(crate) fn budget_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Budget",
            id,
        }
    }

    pub(crate) fn expense_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Expense",
            id,
        }
    }

    /// Only store round trips can succeed on a plain retry.
    pub(crate) fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
