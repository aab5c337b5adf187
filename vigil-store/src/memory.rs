//! In-memory ReportStore, the reference backend for tests and demos.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use vigil_core::errors::StoreResult;
use vigil_core::models::{DrugId, DrugInfo, DrugLink, Reaction, Report, ReportId};
use vigil_core::traits::ReportStore;

/// In-memory report store. Seed it before sharing with the engine; reads
/// are lock-free and safe from any number of worker threads.
#[derive(Debug, Default)]
pub struct MemStore {
    reports: HashMap<ReportId, Report>,
    links: HashMap<ReportId, Vec<DrugLink>>,
    reactions: HashMap<ReportId, Vec<Reaction>>,
    by_drug: HashMap<DrugId, BTreeSet<ReportId>>,
    drug_info: HashMap<DrugId, DrugInfo>,
    /// Total fetches served, across all trait methods. Lets tests assert
    /// that invalid queries never touch the store.
    fetches: AtomicUsize,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one report together with its drug links and reaction rows.
    /// The per-drug report index is maintained from the links.
    pub fn insert_report(&mut self, report: Report, links: Vec<DrugLink>, reactions: Vec<Reaction>) {
        let id = report.id.clone();
        for link in &links {
            self.by_drug
                .entry(link.drug.clone())
                .or_default()
                .insert(id.clone());
        }
        self.links.insert(id.clone(), links);
        self.reactions.insert(id.clone(), reactions);
        self.reports.insert(id, report);
    }

    /// Seed display metadata for a drug.
    pub fn insert_drug_info(&mut self, drug: impl Into<DrugId>, info: DrugInfo) {
        self.drug_info.insert(drug.into(), info);
    }

    /// Number of fetches served since construction.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    fn tick(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }
}

impl ReportStore for MemStore {
    fn reports_for_drug(&self, drug: &DrugId) -> StoreResult<BTreeSet<ReportId>> {
        self.tick();
        Ok(self.by_drug.get(drug).cloned().unwrap_or_default())
    }

    fn links_for_report(&self, report: &ReportId) -> StoreResult<Vec<DrugLink>> {
        self.tick();
        Ok(self.links.get(report).cloned().unwrap_or_default())
    }

    fn reactions_for_report(&self, report: &ReportId) -> StoreResult<Vec<Reaction>> {
        self.tick();
        Ok(self.reactions.get(report).cloned().unwrap_or_default())
    }

    fn seriousness_for_report(&self, report: &ReportId) -> StoreResult<Option<bool>> {
        self.tick();
        Ok(self.reports.get(report).map(|r| r.serious))
    }

    fn drug_info(&self, drug: &DrugId) -> StoreResult<Option<DrugInfo>> {
        self.tick();
        Ok(self.drug_info.get(drug).cloned())
    }
}
