//! Candidate retrieval: report-set intersections per combination, with
//! first-seen dedup so the largest matching subset wins.

use std::collections::{BTreeSet, HashMap, HashSet};

use rayon::prelude::*;
use tracing::debug;

use vigil_core::cancel::CancellationToken;
use vigil_core::errors::{QueryError, QueryResult};
use vigil_core::models::{DrugId, ReportId};
use vigil_core::traits::ReportStore;

use crate::combinations::Combinations;

/// A report together with the largest query subset known to co-occur on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub report_id: ReportId,
    pub matched: Vec<DrugId>,
}

/// Walk the subset sequence and collect each matching report exactly once.
///
/// The per-drug report set is fetched once per distinct drug (concurrently);
/// every combination's intersection is then computed locally. Intersections
/// within one size run in parallel, but merging into the seen set happens on
/// this thread in generator order — that single-writer merge is the only
/// mutation point, which is what guarantees both the at-most-once invariant
/// and a deterministic winner when several same-size combinations match the
/// same report.
pub(crate) fn gather(
    store: &dyn ReportStore,
    combos: Combinations,
    token: &CancellationToken,
) -> QueryResult<Vec<Candidate>> {
    let per_drug: Vec<(DrugId, BTreeSet<ReportId>)> = combos
        .query()
        .par_iter()
        .map(|drug| {
            if token.is_cancelled() {
                return Err(QueryError::Cancelled);
            }
            let reports = store.reports_for_drug(drug)?;
            Ok((drug.clone(), reports))
        })
        .collect::<QueryResult<Vec<_>>>()?;
    debug!(drugs = per_drug.len(), "per-drug report sets fetched");

    let by_drug: HashMap<&DrugId, &BTreeSet<ReportId>> =
        per_drug.iter().map(|(drug, set)| (drug, set)).collect();

    let mut seen: HashSet<ReportId> = HashSet::new();
    let mut candidates: Vec<Candidate> = Vec::new();

    let mut stream = combos.peekable();
    while let Some(size) = stream.peek().map(Vec::len) {
        if token.is_cancelled() {
            return Err(QueryError::Cancelled);
        }

        let mut batch: Vec<Vec<DrugId>> = Vec::new();
        while stream.peek().is_some_and(|subset| subset.len() == size) {
            if let Some(subset) = stream.next() {
                batch.push(subset);
            }
        }

        let intersections: Vec<(Vec<DrugId>, Vec<ReportId>)> = batch
            .into_par_iter()
            .map(|combo| {
                let reports = intersect(&combo, &by_drug);
                (combo, reports)
            })
            .collect();

        // Reports claimed at this size are invisible to every smaller size.
        for (combo, reports) in intersections {
            for report_id in reports {
                if seen.insert(report_id.clone()) {
                    candidates.push(Candidate {
                        report_id,
                        matched: combo.clone(),
                    });
                }
            }
        }
    }

    debug!(candidates = candidates.len(), "candidate dedup complete");
    Ok(candidates)
}

/// Reports linking every drug in the combination, in report-id order.
fn intersect(
    combo: &[DrugId],
    by_drug: &HashMap<&DrugId, &BTreeSet<ReportId>>,
) -> Vec<ReportId> {
    let mut sets: Vec<&BTreeSet<ReportId>> = Vec::with_capacity(combo.len());
    for drug in combo {
        match by_drug.get(drug) {
            Some(set) if !set.is_empty() => sets.push(set),
            _ => return Vec::new(),
        }
    }
    let Some((first, rest)) = sets.split_first() else {
        return Vec::new();
    };
    first
        .iter()
        .filter(|report| rest.iter().all(|set| set.contains(*report)))
        .cloned()
        .collect()
}
