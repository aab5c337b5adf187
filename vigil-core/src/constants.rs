/// Vigil system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bounded worker pool size for store fetches and intersections.
pub const DEFAULT_WORKER_THREADS: usize = 4;

/// Default per-fetch timeout (milliseconds).
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;

/// Default maximum retries for a failed store fetch.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay for exponential retry backoff (milliseconds).
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 100;

/// Number of reaction types reported in the query summary.
pub const TOP_REACTION_COUNT: usize = 10;
