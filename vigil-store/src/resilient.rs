//! Resilience wrapper: per-fetch timeout plus bounded retry with
//! exponential backoff.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use vigil_core::config::EngineConfig;
use vigil_core::errors::{StoreError, StoreResult};
use vigil_core::models::{DrugId, DrugInfo, DrugLink, Reaction, ReportId};
use vigil_core::traits::ReportStore;

/// Wraps any `ReportStore` so that every fetch is bounded by a timeout and
/// transient failures are retried with exponential backoff before the error
/// surfaces to the engine.
///
/// Each attempt runs on a helper thread so the caller can give up at the
/// deadline; a fetch that outlives its deadline finishes in the background
/// and its result is dropped.
pub struct Resilient<S> {
    inner: Arc<S>,
    timeout: Duration,
    max_retries: u32,
    backoff: Duration,
}

impl<S: ReportStore + 'static> Resilient<S> {
    pub fn new(inner: S, config: &EngineConfig) -> Self {
        Self {
            inner: Arc::new(inner),
            timeout: Duration::from_millis(config.fetch_timeout_ms),
            max_retries: config.max_retries,
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    fn fetch<T, F>(&self, op: &'static str, call: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: Fn(&S) -> StoreResult<T> + Send + Sync + 'static,
    {
        let call = Arc::new(call);
        let mut last_err = StoreError::Unavailable {
            reason: "no attempt made".to_string(),
        };

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.backoff * 2u32.pow(attempt - 1);
                std::thread::sleep(delay);
                debug!(op, attempt, "retrying store fetch");
            }

            let (tx, rx) = mpsc::channel();
            let inner = Arc::clone(&self.inner);
            let call = Arc::clone(&call);
            std::thread::spawn(move || {
                let _ = tx.send(call(&inner));
            });

            match rx.recv_timeout(self.timeout) {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) => {
                    warn!(op, attempt, error = %e, "store fetch failed");
                    last_err = e;
                }
                Err(_) => {
                    warn!(op, attempt, timeout_ms = self.timeout.as_millis() as u64, "store fetch timed out");
                    last_err = StoreError::Timeout {
                        timeout_ms: self.timeout.as_millis() as u64,
                    };
                }
            }
        }

        Err(last_err)
    }
}

impl<S: ReportStore + 'static> ReportStore for Resilient<S> {
    fn reports_for_drug(&self, drug: &DrugId) -> StoreResult<std::collections::BTreeSet<ReportId>> {
        let drug = drug.clone();
        self.fetch("reports_for_drug", move |s| s.reports_for_drug(&drug))
    }

    fn links_for_report(&self, report: &ReportId) -> StoreResult<Vec<DrugLink>> {
        let report = report.clone();
        self.fetch("links_for_report", move |s| s.links_for_report(&report))
    }

    fn reactions_for_report(&self, report: &ReportId) -> StoreResult<Vec<Reaction>> {
        let report = report.clone();
        self.fetch("reactions_for_report", move |s| {
            s.reactions_for_report(&report)
        })
    }

    fn seriousness_for_report(&self, report: &ReportId) -> StoreResult<Option<bool>> {
        let report = report.clone();
        self.fetch("seriousness_for_report", move |s| {
            s.seriousness_for_report(&report)
        })
    }

    fn drug_info(&self, drug: &DrugId) -> StoreResult<Option<DrugInfo>> {
        let drug = drug.clone();
        self.fetch("drug_info", move |s| s.drug_info(&drug))
    }
}
