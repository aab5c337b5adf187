//! Role resolution: which linked drugs belong to the matched query subset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use vigil_core::models::{Characterization, DrugId, DrugLink, ReportId};

/// A report's drug links split into the matched query subset (`queried`)
/// and everything else on the report (`external`).
///
/// An empty external map is valid; a drug with no link row is absent from
/// both maps. Ordered maps keep serialized output and iteration stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrugRoles {
    pub queried: BTreeMap<DrugId, Characterization>,
    pub external: BTreeMap<DrugId, Characterization>,
}

/// Partition link rows against the report's matched subset.
///
/// Rows whose characterization code was missing or unrecognized are skipped
/// and logged; they never abort the query.
pub fn resolve(report_id: &ReportId, links: Vec<DrugLink>, matched: &[DrugId]) -> DrugRoles {
    let mut roles = DrugRoles::default();
    for link in links {
        let Some(role) = link.characterization else {
            warn!(
                report = %report_id,
                drug = %link.drug,
                "link row missing characterization code, skipping"
            );
            continue;
        };
        if matched.contains(&link.drug) {
            roles.queried.insert(link.drug, role);
        } else {
            roles.external.insert(link.drug, role);
        }
    }
    roles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rid() -> ReportId {
        ReportId::new("r1")
    }

    #[test]
    fn links_split_by_matched_subset() {
        let links = vec![
            DrugLink::new("a", Characterization::PrimarySuspect),
            DrugLink::new("b", Characterization::Concomitant),
            DrugLink::new("x", Characterization::SecondarySuspect),
        ];
        let matched = vec![DrugId::new("a"), DrugId::new("b")];
        let roles = resolve(&rid(), links, &matched);

        assert_eq!(roles.queried.len(), 2);
        assert_eq!(roles.external.len(), 1);
        assert_eq!(
            roles.queried[&DrugId::new("a")],
            Characterization::PrimarySuspect
        );
    }

    #[test]
    fn empty_external_map_is_valid() {
        let links = vec![DrugLink::new("a", Characterization::PrimarySuspect)];
        let roles = resolve(&rid(), links, &[DrugId::new("a")]);
        assert!(roles.external.is_empty());
    }

    #[test]
    fn missing_code_rows_are_skipped() {
        let links = vec![
            DrugLink {
                drug: DrugId::new("a"),
                characterization: None,
            },
            DrugLink::new("b", Characterization::Interacting),
        ];
        let roles = resolve(&rid(), links, &[DrugId::new("a"), DrugId::new("b")]);
        assert!(!roles.queried.contains_key(&DrugId::new("a")));
        assert!(roles.queried.contains_key(&DrugId::new("b")));
    }

    #[test]
    fn unlinked_query_drug_is_absent_from_both_maps() {
        let roles = resolve(&rid(), vec![], &[DrugId::new("a"), DrugId::new("b")]);
        assert!(roles.queried.is_empty());
        assert!(roles.external.is_empty());
    }
}
