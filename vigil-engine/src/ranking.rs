//! Final ranking: cross-result normalization, final score, total ordering,
//! and summary statistics. Runs once over the complete candidate set —
//! normalization needs global context, not per-report context.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use vigil_core::constants::TOP_REACTION_COUNT;
use vigil_core::models::{DrugId, ReportId};

use crate::characterization::DrugRoles;
use crate::reactions::ReactionSummary;
use crate::scoring::ScoreBreakdown;

/// One report after enrichment, before normalization.
#[derive(Debug, Clone)]
pub(crate) struct Enriched {
    pub report_id: ReportId,
    pub matched: Vec<DrugId>,
    pub roles: DrugRoles,
    pub serious: bool,
    pub reactions: ReactionSummary,
    pub breakdown: ScoreBreakdown,
}

/// A fully scored, normalized, and ranked report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredReport {
    pub report_id: ReportId,
    /// The largest query subset co-occurring on this report.
    pub matched: Vec<DrugId>,
    pub roles: DrugRoles,
    pub serious: bool,
    pub reactions: ReactionSummary,
    pub breakdown: ScoreBreakdown,
    /// `|queried| / n`: fraction of the query this report covers. Distinct
    /// from `breakdown.report_relevance`, which measures coverage of the
    /// report's own drug list.
    pub query_relevance: f64,
    /// Characterization score relative to the result-set maximum; 0.0 when
    /// the maximum itself is 0 (degenerate normalization fallback).
    pub characterization_norm: f64,
    /// Severity relative to the result-set maximum; same zero fallback.
    pub severity_norm: f64,
    pub final_score: f64,
}

/// Ranked results plus summary statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub ranked: Vec<ScoredReport>,
    /// Reaction-type frequencies within the strong subset, at most
    /// [`TOP_REACTION_COUNT`] entries, count descending then name ascending.
    pub top_reactions: Vec<(String, u64)>,
    /// Reports with `indicator == 1.0`.
    pub strong_count: usize,
    /// Strong reports that are also serious.
    pub serious_strong_count: usize,
}

impl QueryOutcome {
    /// Fraction of ranked reports in the strong subset; 0.0 when empty.
    pub fn strong_fraction(&self) -> f64 {
        if self.ranked.is_empty() {
            0.0
        } else {
            self.strong_count as f64 / self.ranked.len() as f64
        }
    }

    /// Fraction of ranked reports both strong and serious; 0.0 when empty.
    pub fn serious_fraction(&self) -> f64 {
        if self.ranked.is_empty() {
            0.0
        } else {
            self.serious_strong_count as f64 / self.ranked.len() as f64
        }
    }
}

/// Normalize, score, and order the complete result set.
pub(crate) fn rank(enriched: Vec<Enriched>, query_len: usize) -> QueryOutcome {
    let max_characterization = enriched
        .iter()
        .map(|e| e.breakdown.characterization_score)
        .fold(0.0, f64::max);
    let max_severity = enriched
        .iter()
        .map(|e| e.reactions.severity)
        .max()
        .unwrap_or(0);

    let mut ranked: Vec<ScoredReport> = enriched
        .into_iter()
        .map(|e| {
            let characterization_norm = if max_characterization > 0.0 {
                e.breakdown.characterization_score / max_characterization
            } else {
                0.0
            };
            let severity_norm = if max_severity > 0 {
                f64::from(e.reactions.severity) / f64::from(max_severity)
            } else {
                0.0
            };
            let query_relevance = e.roles.queried.len() as f64 / query_len as f64;
            let seriousness = if e.serious { 1.0 } else { 0.0 };
            let final_score = query_relevance
                * (seriousness
                    + characterization_norm
                    + e.breakdown.characterization_ratio
                    + e.breakdown.report_relevance
                    + e.breakdown.indicator
                    + severity_norm);

            ScoredReport {
                report_id: e.report_id,
                matched: e.matched,
                roles: e.roles,
                serious: e.serious,
                reactions: e.reactions,
                breakdown: e.breakdown,
                query_relevance,
                characterization_norm,
                severity_norm,
                final_score,
            }
        })
        .collect();

    // Stable sort over an already-deterministic candidate order, so ties
    // beyond the full key keep a reproducible ranking.
    ranked.sort_by(|a, b| {
        ranking_key(b)
            .partial_cmp(&ranking_key(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut counts: HashMap<&str, u64> = HashMap::new();
    let mut strong_count = 0;
    let mut serious_strong_count = 0;
    for report in &ranked {
        if report.breakdown.indicator == 1.0 {
            strong_count += 1;
            if report.serious {
                serious_strong_count += 1;
            }
            for reaction in &report.reactions.reactions {
                *counts.entry(reaction.reaction_type.as_str()).or_default() += 1;
            }
        }
    }
    let mut top_reactions: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    top_reactions.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_reactions.truncate(TOP_REACTION_COUNT);

    QueryOutcome {
        ranked,
        top_reactions,
        strong_count,
        serious_strong_count,
    }
}

/// Descending tie-break sequence, compared left to right.
fn ranking_key(report: &ScoredReport) -> [f64; 8] {
    [
        report.final_score,
        report.query_relevance,
        report.breakdown.indicator,
        if report.serious { 1.0 } else { 0.0 },
        report.breakdown.report_relevance,
        report.severity_norm,
        report.characterization_norm,
        report.breakdown.characterization_ratio,
    ]
}
