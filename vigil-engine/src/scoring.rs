//! Per-report sub-scores: a pure function of the role maps.
//!
//! Everything here is request-scoped arithmetic — no store access, no
//! shared state. Cross-result normalization happens later, in `ranking`.

use serde::{Deserialize, Serialize};

use crate::characterization::DrugRoles;

/// Sub-scores for one report, before cross-result normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Σ role weight over every linked drug, queried and external.
    pub characterization_score: f64,
    /// `characterization_score / (characterization_score + external weight)`;
    /// 1.0 when the denominator is zero.
    pub characterization_ratio: f64,
    /// `|queried| / (|queried| + |external|)`: how much of the report's
    /// drug list the query covers. 0.0 for a report with no usable links.
    pub report_relevance: f64,
    /// 1.0 — a queried drug is the primary suspect and no external drug is;
    /// 0.5 — both or neither side holds a primary suspect;
    /// 0.0 — only an external drug is the primary suspect.
    pub indicator: f64,
}

/// Score one report's role maps.
pub fn score(roles: &DrugRoles) -> ScoreBreakdown {
    let queried_weight: f64 = roles.queried.values().map(|c| c.weight()).sum();
    let external_weight: f64 = roles.external.values().map(|c| c.weight()).sum();
    let characterization_score = queried_weight + external_weight;

    let denominator = characterization_score + external_weight;
    let characterization_ratio = if denominator == 0.0 {
        1.0
    } else {
        characterization_score / denominator
    };

    let linked = roles.queried.len() + roles.external.len();
    let report_relevance = if linked == 0 {
        0.0
    } else {
        roles.queried.len() as f64 / linked as f64
    };

    let queried_suspect = roles.queried.values().any(|c| c.is_primary_suspect());
    let competing_suspect = roles.external.values().any(|c| c.is_primary_suspect());
    let indicator =
        (f64::from(queried_suspect as u8) - f64::from(competing_suspect as u8) + 1.0) / 2.0;

    ScoreBreakdown {
        characterization_score,
        characterization_ratio,
        report_relevance,
        indicator,
    }
}
