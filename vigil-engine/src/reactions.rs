//! Reaction aggregation: outcome filtering plus ordinal severity.

use serde::{Deserialize, Serialize};

use vigil_core::models::Reaction;

/// The scored reactions of one report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionSummary {
    /// Reactions with a known, scored outcome, in store order.
    pub reactions: Vec<Reaction>,
    /// Σ (outcome code − 1) over the included reactions. Worse clinical
    /// outcome ⇒ larger contribution.
    pub severity: u32,
}

/// Filter out unknown and null outcomes and sum the ordinal severity.
///
/// Zero qualifying reactions yield severity 0 and an empty list — a valid
/// summary, not an error.
pub fn summarize(rows: Vec<Reaction>) -> ReactionSummary {
    let mut included = Vec::with_capacity(rows.len());
    let mut severity = 0u32;
    for reaction in rows {
        match reaction.outcome {
            Some(outcome) if outcome.is_scored() => {
                severity += outcome.severity_points();
                included.push(reaction);
            }
            _ => {}
        }
    }
    ReactionSummary {
        reactions: included,
        severity,
    }
}
