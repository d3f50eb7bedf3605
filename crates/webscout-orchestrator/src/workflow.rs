use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::catalog::{self, ToolDescriptor};
use crate::context::ResearchContext;
use crate::intent::{Intent, IntentKind};
use crate::PlanError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// 1-based, contiguous. Parallel-group siblings still get distinct,
    /// increasing numbers; skipped candidates consume nothing.
    pub step: usize,
    pub tool: String,
    pub purpose: String,
    pub suggested_parameters: BTreeMap<String, Value>,
    /// Catalog snapshot taken at build time. Later catalog changes must not
    /// retroactively alter an already-built plan.
    pub tool_details: ToolDescriptor,
    /// Steps sharing a group are independent and may run concurrently.
    pub parallel_group: Option<usize>,
    /// True for live-web tools the executor should be ready to substitute
    /// on failure; false for purely derived steps.
    pub has_fallback: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowPlan {
    pub primary_intent: Intent,
    pub secondary_intents: Vec<Intent>,
    pub workflow: Vec<WorkflowStep>,
}

enum SkipRule {
    /// Omit the step when the context already carries a usable URL (no need
    /// to search for what the caller already has).
    WhenUrlsKnown,
}

enum Expand {
    Single,
    /// One step per compared entity, all in one parallel group. Degrades to
    /// a single ungrouped step when fewer than two entities were detected.
    PerEntity,
}

enum ParamRule {
    SearchLimit,
    ScrapeTarget,
    CrawlBounds,
    SummaryFocus,
    DeepDiveTarget,
}

struct CandidateStep {
    tool: &'static str,
    purpose: &'static str,
    skip: Option<SkipRule>,
    expand: Expand,
    params: ParamRule,
    has_fallback: bool,
}

const DOCUMENTATION: &[CandidateStep] = &[
    CandidateStep {
        tool: catalog::SEARCH_WEB,
        purpose: "Locate the official documentation portal",
        skip: Some(SkipRule::WhenUrlsKnown),
        expand: Expand::Single,
        params: ParamRule::SearchLimit,
        has_fallback: true,
    },
    CandidateStep {
        tool: catalog::CRAWL_DOCS,
        purpose: "Walk the documentation tree and collect pages",
        skip: None,
        expand: Expand::Single,
        params: ParamRule::CrawlBounds,
        has_fallback: true,
    },
    CandidateStep {
        tool: catalog::SUMMARIZE_PAGE,
        purpose: "Produce a structured overview of what the documentation covers",
        skip: None,
        expand: Expand::Single,
        params: ParamRule::SummaryFocus,
        has_fallback: false,
    },
];

const INTEGRATION: &[CandidateStep] = &[
    CandidateStep {
        tool: catalog::SEARCH_WEB,
        purpose: "Find integration guides and API references",
        skip: Some(SkipRule::WhenUrlsKnown),
        expand: Expand::Single,
        params: ParamRule::SearchLimit,
        has_fallback: true,
    },
    CandidateStep {
        tool: catalog::SCRAPE_URL,
        purpose: "Extract setup and authentication details from the best source",
        skip: None,
        expand: Expand::Single,
        params: ParamRule::ScrapeTarget,
        has_fallback: true,
    },
    CandidateStep {
        tool: catalog::SUMMARIZE_PAGE,
        purpose: "Condense the findings into actionable integration steps",
        skip: None,
        expand: Expand::Single,
        params: ParamRule::SummaryFocus,
        has_fallback: false,
    },
];

const COMPARISON: &[CandidateStep] = &[
    CandidateStep {
        tool: catalog::SEARCH_WEB,
        purpose: "Gather sources on a compared option",
        skip: None,
        expand: Expand::PerEntity,
        params: ParamRule::SearchLimit,
        has_fallback: true,
    },
    CandidateStep {
        tool: catalog::SCRAPE_URL,
        purpose: "Extract details from the strongest sources",
        skip: None,
        expand: Expand::Single,
        params: ParamRule::ScrapeTarget,
        has_fallback: true,
    },
    CandidateStep {
        tool: catalog::SUMMARIZE_PAGE,
        purpose: "Synthesize a side-by-side comparison",
        skip: None,
        expand: Expand::Single,
        params: ParamRule::SummaryFocus,
        has_fallback: false,
    },
];

const DEEP_RESEARCH: &[CandidateStep] = &[
    CandidateStep {
        tool: catalog::SEARCH_WEB,
        purpose: "Cast a wide net across sources",
        skip: Some(SkipRule::WhenUrlsKnown),
        expand: Expand::Single,
        params: ParamRule::SearchLimit,
        has_fallback: true,
    },
    CandidateStep {
        tool: catalog::CRAWL_DOCS,
        purpose: "Crawl the most promising sites for depth",
        skip: None,
        expand: Expand::Single,
        params: ParamRule::CrawlBounds,
        has_fallback: true,
    },
    CandidateStep {
        tool: catalog::DEEP_DIVE,
        purpose: "Read and condense the highest-value pages",
        skip: None,
        expand: Expand::Single,
        params: ParamRule::DeepDiveTarget,
        has_fallback: true,
    },
];

const TROUBLESHOOTING: &[CandidateStep] = &[
    CandidateStep {
        tool: catalog::SEARCH_WEB,
        purpose: "Find reports of the same problem and candidate fixes",
        skip: Some(SkipRule::WhenUrlsKnown),
        expand: Expand::Single,
        params: ParamRule::SearchLimit,
        has_fallback: true,
    },
    CandidateStep {
        tool: catalog::SCRAPE_URL,
        purpose: "Extract the accepted fix from the best match",
        skip: None,
        expand: Expand::Single,
        params: ParamRule::ScrapeTarget,
        has_fallback: true,
    },
    CandidateStep {
        tool: catalog::SUMMARIZE_PAGE,
        purpose: "Summarize probable causes and fixes",
        skip: None,
        expand: Expand::Single,
        params: ParamRule::SummaryFocus,
        has_fallback: false,
    },
];

fn template_for(kind: IntentKind) -> &'static [CandidateStep] {
    match kind {
        IntentKind::Documentation => DOCUMENTATION,
        IntentKind::Integration => INTEGRATION,
        IntentKind::Comparison => COMPARISON,
        IntentKind::DeepResearch => DEEP_RESEARCH,
        IntentKind::Troubleshooting => TROUBLESHOOTING,
    }
}

/// Cross-intent knobs: secondary intents tune parameters but never reorder
/// the primary template.
struct Tuning {
    deep: bool,
    entity_count: usize,
}

fn tuning_for(intents: &[Intent]) -> Tuning {
    Tuning {
        deep: intents.iter().any(|i| i.kind == IntentKind::DeepResearch),
        entity_count: intents.iter().map(|i| i.entities.len()).max().unwrap_or(0),
    }
}

const PER_ENTITY_SEARCH_LIMIT: usize = 4;

fn search_limit(tuning: &Tuning) -> usize {
    let mut limit = 5 + 2 * tuning.entity_count.saturating_sub(1);
    if tuning.deep {
        limit = limit.max(10);
    }
    // Keep parity with what search backends will accept anyway.
    limit.clamp(1, 20)
}

fn crawl_bounds(tuning: &Tuning) -> (usize, usize) {
    if tuning.deep {
        (3, 25)
    } else {
        (2, 10)
    }
}

fn should_skip(rule: &SkipRule, context: &ResearchContext) -> bool {
    match rule {
        SkipRule::WhenUrlsKnown => context.has_usable_url(),
    }
}

fn suggested_parameters(
    rule: &ParamRule,
    tuning: &Tuning,
    primary: &Intent,
    context: &ResearchContext,
    entity: Option<&str>,
) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();
    match rule {
        ParamRule::SearchLimit => {
            let limit = if entity.is_some() {
                PER_ENTITY_SEARCH_LIMIT
            } else {
                search_limit(tuning)
            };
            out.insert("limit".to_string(), json!(limit));
            if let Some(e) = entity {
                out.insert("focus".to_string(), json!(e));
            }
            if let Some(l) = &context.language {
                out.insert("language".to_string(), json!(l));
            }
            if let Some(c) = &context.country {
                out.insert("country".to_string(), json!(c));
            }
        }
        ParamRule::ScrapeTarget => {
            // When no URL is known the executor feeds the top search result;
            // emitting a placeholder would fabricate a value we do not have.
            if let Some(u) = context.first_usable_url() {
                out.insert("url".to_string(), json!(u));
            }
        }
        ParamRule::CrawlBounds => {
            let (depth, max_pages) = crawl_bounds(tuning);
            out.insert("depth".to_string(), json!(depth));
            out.insert("max_pages".to_string(), json!(max_pages));
            if let Some(u) = context.first_usable_url() {
                out.insert("root_url".to_string(), json!(u));
            }
        }
        ParamRule::SummaryFocus => {
            if !primary.keywords.is_empty() {
                let focus: Vec<&str> = primary.keywords.iter().take(3).map(|s| s.as_str()).collect();
                out.insert("focus".to_string(), json!(focus.join(", ")));
            }
        }
        ParamRule::DeepDiveTarget => {
            if let Some(u) = context.first_usable_url() {
                out.insert("url".to_string(), json!(u));
            }
        }
    }
    out
}

fn make_step(
    step: usize,
    cand: &CandidateStep,
    tuning: &Tuning,
    primary: &Intent,
    context: &ResearchContext,
    parallel_group: Option<usize>,
    entity: Option<&str>,
) -> Result<WorkflowStep, PlanError> {
    let details = catalog::lookup(cand.tool)
        .ok_or_else(|| PlanError::UnknownTool(cand.tool.to_string()))?;
    let purpose = match entity {
        Some(e) => format!("{}: {}", cand.purpose, e),
        None => cand.purpose.to_string(),
    };
    Ok(WorkflowStep {
        step,
        tool: cand.tool.to_string(),
        purpose,
        suggested_parameters: suggested_parameters(&cand.params, tuning, primary, context, entity),
        tool_details: details.clone(),
        parallel_group,
        has_fallback: cand.has_fallback,
    })
}

/// Build a plan from ranked intents and context.
///
/// Deterministic: identical `(intents, context)` produce byte-identical
/// plans. Either a complete, internally consistent plan comes back or the
/// call fails outright, never with a partial plan.
pub fn build(intents: &[Intent], context: &ResearchContext) -> Result<WorkflowPlan, PlanError> {
    let Some(primary) = intents.first() else {
        return Err(PlanError::EmptyIntent);
    };
    let tuning = tuning_for(intents);

    let mut workflow: Vec<WorkflowStep> = Vec::new();
    let mut next_group = 1usize;
    for cand in template_for(primary.kind) {
        if let Some(rule) = &cand.skip {
            if should_skip(rule, context) {
                continue;
            }
        }
        match cand.expand {
            Expand::PerEntity if primary.entities.len() >= 2 => {
                let group = next_group;
                next_group += 1;
                for entity in &primary.entities {
                    workflow.push(make_step(
                        workflow.len() + 1,
                        cand,
                        &tuning,
                        primary,
                        context,
                        Some(group),
                        Some(entity.as_str()),
                    )?);
                }
            }
            _ => {
                workflow.push(make_step(
                    workflow.len() + 1,
                    cand,
                    &tuning,
                    primary,
                    context,
                    None,
                    None,
                )?);
            }
        }
    }

    Ok(WorkflowPlan {
        primary_intent: primary.clone(),
        secondary_intents: intents[1..].to_vec(),
        workflow,
    })
}
