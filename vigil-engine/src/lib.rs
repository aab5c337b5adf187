//! # vigil-engine
//!
//! The retrieval + scoring/ranking engine. Given a set of drug ids it finds
//! adverse-event reports mentioning those drugs together (largest
//! co-occurring subset first), scores each report on how strongly the
//! queried drugs — rather than other drugs on the same report — are
//! implicated in the observed reactions, normalizes across the full result
//! set, and returns an ordered ranking plus summary statistics.
//!
//! Pipeline: subset generation → candidate retrieval → per-report role
//! resolution + scoring + reaction aggregation → global normalization and
//! ordering. The store is an injected read-only capability
//! ([`vigil_core::ReportStore`]); the engine owns no persistent state.

pub mod candidates;
pub mod characterization;
pub mod combinations;
pub mod engine;
pub mod ranking;
pub mod reactions;
pub mod scoring;

pub use engine::QueryEngine;
pub use ranking::{QueryOutcome, ScoredReport};
