//! Public facade crate for `webscout`.
//!
//! This crate intentionally contains no logic. It re-exports the collaborator
//! contracts from `webscout-core` and the planning engine from
//! `webscout-orchestrator`.

pub use webscout_core::*;
pub use webscout_orchestrator::*;
