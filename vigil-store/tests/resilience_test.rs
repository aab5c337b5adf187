//! Resilience wrapper behavior: retry on transient failure, timeout surfacing,
//! bounded retry exhaustion.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use vigil_core::config::EngineConfig;
use vigil_core::errors::{StoreError, StoreResult};
use vigil_core::models::{DrugId, DrugInfo, DrugLink, Reaction, ReportId};
use vigil_core::traits::ReportStore;
use vigil_store::Resilient;

/// Fails the first `failures` fetches, then succeeds.
struct FlakyStore {
    failures: usize,
    calls: AtomicUsize,
}

impl FlakyStore {
    fn new(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
        }
    }
}

impl ReportStore for FlakyStore {
    fn reports_for_drug(&self, _drug: &DrugId) -> StoreResult<BTreeSet<ReportId>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.failures {
            return Err(StoreError::Unavailable {
                reason: "connection refused".to_string(),
            });
        }
        let mut set = BTreeSet::new();
        set.insert(ReportId::new("r1"));
        Ok(set)
    }

    fn links_for_report(&self, _report: &ReportId) -> StoreResult<Vec<DrugLink>> {
        Ok(vec![])
    }

    fn reactions_for_report(&self, _report: &ReportId) -> StoreResult<Vec<Reaction>> {
        Ok(vec![])
    }

    fn seriousness_for_report(&self, _report: &ReportId) -> StoreResult<Option<bool>> {
        Ok(None)
    }

    fn drug_info(&self, _drug: &DrugId) -> StoreResult<Option<DrugInfo>> {
        Ok(None)
    }
}

/// Sleeps longer than any test timeout on every fetch.
struct StuckStore;

impl ReportStore for StuckStore {
    fn reports_for_drug(&self, _drug: &DrugId) -> StoreResult<BTreeSet<ReportId>> {
        std::thread::sleep(Duration::from_secs(5));
        Ok(BTreeSet::new())
    }

    fn links_for_report(&self, _report: &ReportId) -> StoreResult<Vec<DrugLink>> {
        Ok(vec![])
    }

    fn reactions_for_report(&self, _report: &ReportId) -> StoreResult<Vec<Reaction>> {
        Ok(vec![])
    }

    fn seriousness_for_report(&self, _report: &ReportId) -> StoreResult<Option<bool>> {
        Ok(None)
    }

    fn drug_info(&self, _drug: &DrugId) -> StoreResult<Option<DrugInfo>> {
        Ok(None)
    }
}

fn fast_config(max_retries: u32) -> EngineConfig {
    EngineConfig {
        fetch_timeout_ms: 50,
        max_retries,
        retry_backoff_ms: 1,
        ..EngineConfig::default()
    }
}

#[test]
fn transient_failure_is_retried_to_success() {
    let store = Resilient::new(FlakyStore::new(2), &fast_config(3));
    let reports = store.reports_for_drug(&DrugId::new("a")).unwrap();
    assert_eq!(reports.len(), 1);
}

#[test]
fn retry_budget_exhaustion_surfaces_the_error() {
    let store = Resilient::new(FlakyStore::new(10), &fast_config(2));
    let err = store.reports_for_drug(&DrugId::new("a")).unwrap_err();
    assert!(matches!(err, StoreError::Unavailable { .. }));
}

#[test]
fn slow_fetch_surfaces_timeout() {
    let store = Resilient::new(StuckStore, &fast_config(0));
    let err = store.reports_for_drug(&DrugId::new("a")).unwrap_err();
    assert!(matches!(err, StoreError::Timeout { timeout_ms: 50 }));
}
