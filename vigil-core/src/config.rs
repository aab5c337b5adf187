use serde::{Deserialize, Serialize};

use crate::constants;

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Bounded worker pool size. Zero means one worker.
    pub worker_threads: usize,
    /// Per-fetch timeout (milliseconds), enforced by the store wrapper.
    pub fetch_timeout_ms: u64,
    /// Maximum retries for a failed store fetch before the query aborts.
    pub max_retries: u32,
    /// Base delay for exponential backoff between retries (milliseconds).
    pub retry_backoff_ms: u64,
    /// When true, a cancelled query returns the reports already enriched
    /// instead of failing. Default is all-or-nothing.
    pub partial_results: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_threads: constants::DEFAULT_WORKER_THREADS,
            fetch_timeout_ms: constants::DEFAULT_FETCH_TIMEOUT_MS,
            max_retries: constants::DEFAULT_MAX_RETRIES,
            retry_backoff_ms: constants::DEFAULT_RETRY_BACKOFF_MS,
            partial_results: false,
        }
    }
}

impl EngineConfig {
    /// Parse a config from TOML; missing keys fall back to defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}
