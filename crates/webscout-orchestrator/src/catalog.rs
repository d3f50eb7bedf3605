use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const SEARCH_WEB: &str = "search_web";
pub const SCRAPE_URL: &str = "scrape_url";
pub const CRAWL_DOCS: &str = "crawl_docs";
pub const SUMMARIZE_PAGE: &str = "summarize_page";
pub const DEEP_DIVE: &str = "deep_dive";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCost {
    Fast,
    Medium,
    Slow,
}

impl ResourceCost {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceCost::Fast => "fast",
            ResourceCost::Medium => "medium",
            ResourceCost::Slow => "slow",
        }
    }
}

/// A catalog entry. Plans embed a clone of this (not a reference), so a plan
/// stays self-describing even if the catalog definition changes in a later
/// release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub resource_cost: ResourceCost,
    pub estimated_duration: String,
    pub best_for: Vec<String>,
}

fn descriptor(
    name: &str,
    resource_cost: ResourceCost,
    estimated_duration: &str,
    best_for: &[&str],
) -> ToolDescriptor {
    ToolDescriptor {
        name: name.to_string(),
        resource_cost,
        estimated_duration: estimated_duration.to_string(),
        best_for: best_for.iter().map(|s| s.to_string()).collect(),
    }
}

static CATALOG: OnceLock<Vec<ToolDescriptor>> = OnceLock::new();

/// The full tool registry, loaded once per process and read-only after that.
pub fn catalog() -> &'static [ToolDescriptor] {
    CATALOG.get_or_init(|| {
        vec![
            descriptor(
                SEARCH_WEB,
                ResourceCost::Fast,
                "1-3s",
                &[
                    "finding sources for an unfamiliar topic",
                    "locating official documentation",
                    "discovering recent discussions",
                ],
            ),
            descriptor(
                SCRAPE_URL,
                ResourceCost::Medium,
                "2-5s",
                &[
                    "extracting the full text of a known page",
                    "pulling structured sections out of documentation",
                ],
            ),
            descriptor(
                CRAWL_DOCS,
                ResourceCost::Slow,
                "10-60s",
                &[
                    "covering a documentation site end to end",
                    "collecting many related pages in one pass",
                ],
            ),
            descriptor(
                SUMMARIZE_PAGE,
                ResourceCost::Fast,
                "1-2s",
                &[
                    "condensing already-fetched content",
                    "producing key points from a document",
                ],
            ),
            descriptor(
                DEEP_DIVE,
                ResourceCost::Slow,
                "15-45s",
                &[
                    "reading a high-value page in full",
                    "exhaustive single-source analysis",
                ],
            ),
        ]
    })
}

pub fn lookup(name: &str) -> Option<&'static ToolDescriptor> {
    catalog().iter().find(|t| t.name == name)
}
