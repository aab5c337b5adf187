//! # vigil-core
//!
//! Foundation crate for the vigil adverse-event relevance engine.
//! Defines the report/drug/reaction model, the store capability trait,
//! errors, config, and constants. Every other crate in the workspace
//! depends on this.

pub mod cancel;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cancel::CancellationToken;
pub use config::EngineConfig;
pub use errors::{QueryError, QueryResult, StoreError, StoreResult};
pub use models::{
    Characterization, DrugId, DrugInfo, DrugLink, Reaction, ReactionOutcome, Report, ReportId,
};
pub use traits::ReportStore;
