//! QueryEngine: orchestrates the full pipeline over one injected store.
//!
//! Stage order: subset generation → candidate retrieval → per-report
//! enrichment (roles, seriousness, reactions) → global normalization and
//! ordering. Per-drug and per-report fetches run on a bounded worker pool;
//! the engine holds no state between queries.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use vigil_core::cancel::CancellationToken;
use vigil_core::config::EngineConfig;
use vigil_core::errors::{QueryError, QueryResult};
use vigil_core::models::DrugId;
use vigil_core::traits::ReportStore;

use crate::candidates::{self, Candidate};
use crate::characterization;
use crate::combinations::Combinations;
use crate::ranking::{self, Enriched, QueryOutcome};
use crate::reactions;
use crate::scoring;

/// The query orchestrator. Borrows the store for its lifetime and owns a
/// bounded worker pool sized from config.
pub struct QueryEngine<'a> {
    store: &'a dyn ReportStore,
    config: EngineConfig,
    pool: rayon::ThreadPool,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a dyn ReportStore, config: EngineConfig) -> QueryResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads.max(1))
            .build()
            .map_err(|e| QueryError::WorkerPool {
                reason: e.to_string(),
            })?;
        Ok(Self {
            store,
            config,
            pool,
        })
    }

    /// Run a full query without cancellation.
    pub fn execute(&self, drug_ids: &[DrugId]) -> QueryResult<QueryOutcome> {
        self.execute_with_cancel(drug_ids, &CancellationToken::new())
    }

    /// Run a full query under a cooperative cancellation token.
    ///
    /// Once cancellation is observed no new fetches are issued. The default
    /// is all-or-nothing ([`QueryError::Cancelled`]); with
    /// `config.partial_results` the reports already fully enriched are
    /// ranked and returned instead.
    pub fn execute_with_cancel(
        &self,
        drug_ids: &[DrugId],
        token: &CancellationToken,
    ) -> QueryResult<QueryOutcome> {
        // Validation happens before any store access.
        let combos = Combinations::new(drug_ids)?;
        let query_len = combos.query_len();
        debug!(query_len, "query accepted");

        self.pool.install(|| {
            let candidates = match candidates::gather(self.store, combos, token) {
                Ok(candidates) => candidates,
                Err(QueryError::Cancelled) if self.config.partial_results => {
                    info!("cancelled during candidate retrieval, returning empty partial result");
                    return Ok(QueryOutcome::default());
                }
                Err(e) => return Err(e),
            };
            info!(candidates = candidates.len(), "candidate retrieval complete");

            if candidates.is_empty() {
                // No match is a valid, empty outcome.
                return Ok(QueryOutcome::default());
            }

            let enriched = self.enrich(candidates, token)?;
            let outcome = ranking::rank(enriched, query_len);
            info!(
                ranked = outcome.ranked.len(),
                strong = outcome.strong_count,
                "ranking complete"
            );
            Ok(outcome)
        })
    }

    /// Fetch roles, seriousness, and reactions for every candidate, in
    /// parallel. Order is preserved so downstream ranking stays
    /// deterministic.
    fn enrich(
        &self,
        candidates: Vec<Candidate>,
        token: &CancellationToken,
    ) -> QueryResult<Vec<Enriched>> {
        let partial = self.config.partial_results;
        let enriched: Vec<Option<Enriched>> = candidates
            .into_par_iter()
            .map(|candidate| {
                if token.is_cancelled() {
                    return if partial {
                        Ok(None)
                    } else {
                        Err(QueryError::Cancelled)
                    };
                }

                let links = self.store.links_for_report(&candidate.report_id)?;
                let serious = match self.store.seriousness_for_report(&candidate.report_id)? {
                    Some(flag) => flag,
                    None => {
                        warn!(
                            report = %candidate.report_id,
                            "report row missing seriousness, dropping candidate"
                        );
                        return Ok(None);
                    }
                };
                let rows = self.store.reactions_for_report(&candidate.report_id)?;

                let roles =
                    characterization::resolve(&candidate.report_id, links, &candidate.matched);
                let breakdown = scoring::score(&roles);
                let reactions = reactions::summarize(rows);

                Ok(Some(Enriched {
                    report_id: candidate.report_id,
                    matched: candidate.matched,
                    roles,
                    serious,
                    reactions,
                    breakdown,
                }))
            })
            .collect::<QueryResult<Vec<_>>>()?;

        Ok(enriched.into_iter().flatten().collect())
    }
}
