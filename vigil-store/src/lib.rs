//! # vigil-store
//!
//! `ReportStore` implementations: an in-memory reference store (the test
//! backend) and a resilience wrapper adding per-fetch timeouts and bounded
//! retry with exponential backoff. Production backends (Postgres, etc.) are
//! external collaborators implementing the same trait.

mod memory;
mod resilient;

pub use memory::MemStore;
pub use resilient::Resilient;
