use std::collections::BTreeSet;

use crate::errors::StoreResult;
use crate::models::{DrugId, DrugInfo, DrugLink, Reaction, ReportId};

/// Read-only capability over the adverse-event report store.
///
/// A single injected store is threaded through every pipeline stage;
/// connection pooling and transport belong to the implementor. All methods
/// may be called from multiple worker threads at once, and implementations
/// are expected to bound each fetch with a timeout (see
/// `vigil_store::Resilient`) so a slow backend surfaces
/// [`StoreError::Timeout`](crate::errors::StoreError) instead of blocking
/// the query indefinitely.
pub trait ReportStore: Send + Sync {
    /// Ids of every report linking the given drug. Ordered for
    /// reproducible intersection results.
    fn reports_for_drug(&self, drug: &DrugId) -> StoreResult<BTreeSet<ReportId>>;

    /// Every drug link row on a report, with its causal role.
    fn links_for_report(&self, report: &ReportId) -> StoreResult<Vec<DrugLink>>;

    /// Reaction rows on a report.
    fn reactions_for_report(&self, report: &ReportId) -> StoreResult<Vec<Reaction>>;

    /// Seriousness flag for a report. `None` means the report row is
    /// missing, which the engine treats as an integrity violation (the
    /// report is dropped and logged, the query continues).
    fn seriousness_for_report(&self, report: &ReportId) -> StoreResult<Option<bool>>;

    /// Display metadata for a drug. Used by the calling layer for UI
    /// enrichment only; the ranking pipeline never calls this.
    fn drug_info(&self, drug: &DrugId) -> StoreResult<Option<DrugInfo>>;
}
