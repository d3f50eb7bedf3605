//! Research-workflow planning: classify a query's intent and suggest which
//! information-gathering tools to invoke, in what order, with what
//! parameters.
//!
//! The orchestrator is purely computational. It performs no I/O and executes
//! nothing: the returned [`WorkflowPlan`] is a recommendation for an
//! execution layer that implements the `webscout-core` tool contracts.
//! `parallel_group` on a step declares independence to that layer; it does
//! not schedule anything here. The tool catalog and classifier rule tables
//! are immutable after first use, so concurrent [`suggest_tools`] calls are
//! safe without locking.

pub mod catalog;
pub mod context;
pub mod intent;
pub mod workflow;

pub use catalog::{catalog, lookup, ResourceCost, ToolDescriptor};
pub use context::ResearchContext;
pub use intent::{classify, Intent, IntentKind};
pub use workflow::{build, WorkflowPlan, WorkflowStep};

#[derive(thiserror::Error, Debug)]
pub enum PlanError {
    /// The query produced zero usable intents (empty, whitespace-only, or
    /// matching no trigger vocabulary). Surfaced directly; retrying the same
    /// query cannot help.
    #[error("no usable intent could be classified from the query")]
    EmptyIntent,
    /// A workflow template references a tool missing from the catalog. This
    /// is an internal defect, fatal at construction time.
    #[error("workflow template references unknown tool: {0}")]
    UnknownTool(String),
}

/// The sole top-level operation: query + context in, complete plan out.
///
/// Pure function of its inputs plus the static catalog/rule tables; no
/// partial plans are ever returned.
pub fn suggest_tools(query: &str, context: &ResearchContext) -> Result<WorkflowPlan, PlanError> {
    let intents = intent::classify(query);
    workflow::build(&intents, context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unusable_queries_fail_with_empty_intent() {
        for q in ["", "   ", "purple monkey dishwasher"] {
            let err = suggest_tools(q, &ResearchContext::default()).unwrap_err();
            assert!(matches!(err, PlanError::EmptyIntent), "query={q:?}");
        }
    }

    #[test]
    fn suggest_tools_reports_the_same_primary_as_classify() {
        let q = "How can I integrate mobile payments with LidgiCash API in Cameroon?";
        let plan = suggest_tools(q, &ResearchContext::default()).unwrap();
        let intents = classify(q);
        assert_eq!(plan.primary_intent.kind, intents[0].kind);
        assert_eq!(plan.secondary_intents.len(), intents.len() - 1);
    }
}
