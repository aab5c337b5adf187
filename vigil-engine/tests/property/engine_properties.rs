use std::collections::BTreeSet;

use proptest::prelude::*;

use vigil_core::config::EngineConfig;
use vigil_core::models::{
    Characterization, DrugId, DrugLink, Reaction, ReactionOutcome, Report, ReportId,
};
use vigil_engine::{QueryEngine, QueryOutcome, ScoredReport};
use vigil_store::MemStore;

const DRUG_POOL: [&str; 6] = ["d0", "d1", "d2", "d3", "d4", "d5"];
const REACTION_POOL: [&str; 3] = ["Nausea", "Rash", "Dizziness"];

/// One generated report: seriousness, (drug index, characterization code)
/// links, (reaction index, optional outcome code) rows.
type ReportSpec = (bool, Vec<(usize, u8)>, Vec<(usize, Option<u8>)>);

fn arb_report() -> impl Strategy<Value = ReportSpec> {
    (
        any::<bool>(),
        prop::collection::vec((0usize..DRUG_POOL.len(), 1u8..=4), 0..5),
        prop::collection::vec((0usize..REACTION_POOL.len(), prop::option::of(1u8..=6)), 0..4),
    )
}

fn arb_case() -> impl Strategy<Value = (Vec<ReportSpec>, Vec<usize>)> {
    (
        prop::collection::vec(arb_report(), 0..8),
        prop::sample::subsequence(vec![0usize, 1, 2, 3, 4, 5], 2..=4),
    )
}

fn build_store(reports: &[ReportSpec]) -> MemStore {
    let mut store = MemStore::new();
    for (i, (serious, links, reactions)) in reports.iter().enumerate() {
        let links = links
            .iter()
            .map(|(drug, code)| {
                DrugLink::new(
                    DRUG_POOL[*drug],
                    Characterization::from_code(i64::from(*code)).unwrap(),
                )
            })
            .collect();
        let reactions = reactions
            .iter()
            .map(|(name, code)| Reaction {
                reaction_type: REACTION_POOL[*name].to_string(),
                outcome: code.and_then(|c| ReactionOutcome::from_code(i64::from(c))),
            })
            .collect();
        store.insert_report(Report::new(format!("r{i}"), *serious), links, reactions);
    }
    store
}

fn run(reports: &[ReportSpec], query: &[usize]) -> QueryOutcome {
    let store = build_store(reports);
    let engine = QueryEngine::new(&store, EngineConfig::default()).unwrap();
    let query: Vec<DrugId> = query.iter().map(|i| DrugId::new(DRUG_POOL[*i])).collect();
    engine.execute(&query).unwrap()
}

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

proptest! {
    /// No report appears twice, whatever subset sizes it matched at.
    #[test]
    fn each_report_is_ranked_at_most_once((reports, query) in arb_case()) {
        let outcome = run(&reports, &query);
        let ids: BTreeSet<&ReportId> =
            outcome.ranked.iter().map(|r| &r.report_id).collect();
        prop_assert_eq!(ids.len(), outcome.ranked.len());
    }

    /// The matched subset is the maximal one: exactly the query drugs that
    /// appear on the report, and only when at least two of them do.
    #[test]
    fn matched_subset_is_maximal((reports, query) in arb_case()) {
        let outcome = run(&reports, &query);
        let query_set: BTreeSet<&str> =
            query.iter().map(|i| DRUG_POOL[*i]).collect();

        for (i, (_, links, _)) in reports.iter().enumerate() {
            let linked: BTreeSet<&str> =
                links.iter().map(|(d, _)| DRUG_POOL[*d]).collect();
            let expected: BTreeSet<&str> =
                query_set.intersection(&linked).copied().collect();
            let id = ReportId::new(format!("r{i}"));
            let ranked = outcome.ranked.iter().find(|r| r.report_id == id);

            if expected.len() >= 2 {
                let report = ranked.expect("co-occurring report missing from results");
                let matched: BTreeSet<&str> =
                    report.matched.iter().map(|d| d.as_str()).collect();
                prop_assert_eq!(&matched, &expected);
                let roles: BTreeSet<&str> =
                    report.roles.queried.keys().map(|d| d.as_str()).collect();
                prop_assert_eq!(&roles, &expected);
            } else {
                prop_assert!(ranked.is_none());
            }
        }
    }

    /// Every per-report score stays inside its documented range.
    #[test]
    fn scores_stay_in_range((reports, query) in arb_case()) {
        let outcome = run(&reports, &query);
        for r in &outcome.ranked {
            prop_assert!([0.0, 0.5, 1.0].contains(&r.breakdown.indicator));
            prop_assert!((0.0..=1.0).contains(&r.breakdown.characterization_ratio));
            prop_assert!((0.0..=1.0).contains(&r.breakdown.report_relevance));
            prop_assert!((0.0..=1.0).contains(&r.characterization_norm));
            prop_assert!((0.0..=1.0).contains(&r.severity_norm));
            prop_assert!(r.query_relevance > 0.0 && r.query_relevance <= 1.0);
            prop_assert!(r.final_score >= 0.0);
        }
    }

    /// The ranking is totally ordered under the descending tie-break key.
    #[test]
    fn ranking_order_is_consistent((reports, query) in arb_case()) {
        let outcome = run(&reports, &query);
        for pair in outcome.ranked.windows(2) {
            prop_assert!(ranking_key(&pair[0]) >= ranking_key(&pair[1]));
        }
    }

    /// Re-running the same query yields a byte-for-byte identical outcome.
    #[test]
    fn queries_are_deterministic((reports, query) in arb_case()) {
        let first = run(&reports, &query);
        let second = run(&reports, &query);
        prop_assert_eq!(first, second);
    }
}
