//! Error taxonomy, one enum per subsystem.

/// Store-layer errors for report/drug/reaction fetches.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("store fetch timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
}

/// Query-level errors surfaced by the engine.
///
/// Integrity violations (a link without a role code, a missing report row)
/// are not errors: the affected row is skipped and logged. An empty result
/// set is a valid outcome, not an error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueryError {
    /// Rejected before any store access is attempted.
    #[error("query needs at least 2 distinct drugs, got {got}")]
    InvalidQuery { got: usize },

    /// A store fetch failed after retries; the whole query aborts because
    /// partial evidence cannot be trusted for ranking.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Cooperative cancellation observed without partial-result opt-in.
    #[error("query cancelled before completion")]
    Cancelled,

    #[error("worker pool initialization failed: {reason}")]
    WorkerPool { reason: String },
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type QueryResult<T> = Result<T, QueryError>;
