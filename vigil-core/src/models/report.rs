use serde::{Deserialize, Serialize};

use super::codes::{Characterization, ReactionOutcome};
use super::ids::{DrugId, ReportId};

/// Optional patient demographics attached to a report row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub patient_onset_age: Option<f64>,
    /// 1 = male, 2 = female per the source coding; kept opaque here.
    pub patient_sex: Option<u8>,
    pub patient_weight: Option<f64>,
}

/// An adverse-event report row as stored.
///
/// The engine only ever fetches the seriousness flag; the full row is the
/// ingestion side's entity and the seed unit for test stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    /// Clinically serious outcome flag.
    pub serious: bool,
    pub demographics: Option<Demographics>,
}

impl Report {
    pub fn new(id: impl Into<ReportId>, serious: bool) -> Self {
        Self {
            id: id.into(),
            serious,
            demographics: None,
        }
    }
}

/// Drug↔report association row with the drug's causal role.
///
/// `characterization` is `None` when the store row carried a missing or
/// unrecognized code; such rows are skipped and logged downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugLink {
    pub drug: DrugId,
    pub characterization: Option<Characterization>,
}

impl DrugLink {
    pub fn new(drug: impl Into<DrugId>, characterization: Characterization) -> Self {
        Self {
            drug: drug.into(),
            characterization: Some(characterization),
        }
    }
}

/// A single reaction row: reaction type plus its clinical outcome.
///
/// `outcome` is `None` when the store row had a null outcome; such rows are
/// excluded from severity scoring but are not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub reaction_type: String,
    pub outcome: Option<ReactionOutcome>,
}

impl Reaction {
    pub fn new(reaction_type: impl Into<String>, outcome: ReactionOutcome) -> Self {
        Self {
            reaction_type: reaction_type.into(),
            outcome: Some(outcome),
        }
    }
}

/// Display metadata for a drug, consumed by the calling layer for UI
/// enrichment. The ranking pipeline never reads this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugInfo {
    pub display_name: String,
    pub label_warning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_with_nested_enums() {
        let link = DrugLink::new("d1", Characterization::PrimarySuspect);
        let json = serde_json::to_string(&link).unwrap();
        assert!(json.contains("primary_suspect"));

        let back: DrugLink = serde_json::from_str(&json).unwrap();
        assert_eq!(back, link);
    }

    #[test]
    fn null_outcome_deserializes() {
        let r: Reaction = serde_json::from_str(r#"{"reaction_type":"Nausea","outcome":null}"#).unwrap();
        assert_eq!(r.outcome, None);
    }
}
