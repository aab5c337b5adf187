//! Model types shared across the workspace.
//!
//! Store rows carry numeric role and outcome codes; those are translated
//! into the closed enums here at the store boundary, never inside the
//! scoring pipeline.

mod codes;
mod ids;
mod report;

pub use codes::{Characterization, ReactionOutcome};
pub use ids::{DrugId, ReportId};
pub use report::{Demographics, DrugInfo, DrugLink, Reaction, Report};
