use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Research-goal categories the classifier can recognize.
///
/// Declaration order is the tie-break order: when two intents score equally,
/// the one declared first wins. Keep new variants at the end unless they
/// should outrank existing ones on ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Documentation,
    Integration,
    Comparison,
    DeepResearch,
    Troubleshooting,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Documentation => "documentation",
            IntentKind::Integration => "integration",
            IntentKind::Comparison => "comparison",
            IntentKind::DeepResearch => "deep_research",
            IntentKind::Troubleshooting => "troubleshooting",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    #[serde(rename = "type")]
    pub kind: IntentKind,
    /// Normalized score in [0, 1].
    pub confidence: f64,
    /// Human-readable evidence, most specific first (phrase matches before
    /// single-keyword matches).
    pub reasons: Vec<String>,
    /// The exact subset of this intent's trigger vocabulary found in the
    /// query (case-insensitive, deduplicated).
    pub keywords: BTreeSet<String>,
    /// Compared-entity names detected in the query ("A vs B vs C"). Empty
    /// for non-comparative intents. Carried here so the builder can scale
    /// parameters and spawn per-entity steps without re-parsing the query.
    pub entities: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum Weight {
    Strong,
    Medium,
    Weak,
}

impl Weight {
    fn value(self) -> f64 {
        match self {
            Weight::Strong => 3.0,
            Weight::Medium => 2.0,
            Weight::Weak => 1.0,
        }
    }
}

struct IntentDef {
    kind: IntentKind,
    label: &'static str,
    /// Trigger vocabulary. Single words match whole tokens; multi-word
    /// entries match as contiguous token runs.
    keywords: &'static [(&'static str, Weight)],
}

// A single strong keyword (3/8) cannot saturate confidence on its own.
const CALIBRATION: f64 = 8.0;
// A lone weak keyword is not evidence; discard below this raw score.
const MIN_RAW_SCORE: f64 = 2.0;

const DEFINITIONS: &[IntentDef] = &[
    IntentDef {
        kind: IntentKind::Documentation,
        label: "documentation",
        keywords: &[
            ("api reference", Weight::Strong),
            ("getting started", Weight::Strong),
            ("documentation", Weight::Strong),
            ("docs", Weight::Medium),
            ("guide", Weight::Medium),
            ("reference", Weight::Medium),
            ("manual", Weight::Medium),
            ("tutorial", Weight::Medium),
            ("examples", Weight::Weak),
        ],
    },
    IntentDef {
        kind: IntentKind::Integration,
        label: "integration",
        keywords: &[
            ("set up", Weight::Medium),
            ("integrate", Weight::Strong),
            ("integration", Weight::Strong),
            ("api", Weight::Medium),
            ("sdk", Weight::Medium),
            ("implement", Weight::Medium),
            ("setup", Weight::Medium),
            ("webhook", Weight::Medium),
            ("connect", Weight::Weak),
        ],
    },
    IntentDef {
        kind: IntentKind::Comparison,
        label: "comparison",
        keywords: &[
            ("pros and cons", Weight::Strong),
            ("compare", Weight::Strong),
            ("comparison", Weight::Strong),
            ("vs", Weight::Strong),
            ("versus", Weight::Strong),
            ("difference", Weight::Medium),
            ("differences", Weight::Medium),
            ("alternative", Weight::Medium),
            ("alternatives", Weight::Medium),
            ("better", Weight::Weak),
        ],
    },
    IntentDef {
        kind: IntentKind::DeepResearch,
        label: "deep-research",
        keywords: &[
            ("everything about", Weight::Strong),
            ("deep dive", Weight::Strong),
            ("in depth", Weight::Strong),
            ("comprehensive", Weight::Strong),
            ("research", Weight::Medium),
            ("analysis", Weight::Medium),
            ("analyze", Weight::Medium),
            ("detailed", Weight::Medium),
            ("thorough", Weight::Medium),
            ("deep", Weight::Weak),
            ("complete", Weight::Weak),
        ],
    },
    IntentDef {
        kind: IntentKind::Troubleshooting,
        label: "troubleshooting",
        keywords: &[
            ("not working", Weight::Strong),
            ("troubleshoot", Weight::Strong),
            ("error", Weight::Medium),
            ("fix", Weight::Medium),
            ("debug", Weight::Medium),
            ("issue", Weight::Medium),
            ("broken", Weight::Medium),
            ("fails", Weight::Weak),
            ("failing", Weight::Weak),
            ("problem", Weight::Weak),
        ],
    },
];

/// Matching-only normalization: lowercase, every non-alphanumeric character
/// is a token separator, runs collapse to single spaces. Lossy on purpose;
/// never used for display.
fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_space = true;
    for ch in s.chars() {
        if ch.is_alphanumeric() {
            for lc in ch.to_lowercase() {
                out.push(lc);
            }
            last_space = false;
        } else if !last_space {
            out.push(' ');
            last_space = true;
        }
    }
    out.trim_end().to_string()
}

fn keyword_matches(normalized: &str, keyword: &str) -> bool {
    if keyword.contains(' ') {
        // Phrase: must appear as a contiguous token run, not merely as
        // separately-present tokens.
        let padded = format!(" {normalized} ");
        padded.contains(&format!(" {keyword} "))
    } else {
        normalized.split(' ').any(|t| t == keyword)
    }
}

/// Classify a free-text query into a ranked intent list.
///
/// Ordered by descending confidence; ties keep `IntentKind` declaration
/// order (the definition table is scanned in order and the sort is stable).
/// Empty, whitespace-only, and zero-match queries yield an empty list.
pub fn classify(query: &str) -> Vec<Intent> {
    let normalized = normalize(query);
    if normalized.is_empty() {
        return Vec::new();
    }
    let entities = compared_entities(query);

    let mut out = Vec::new();
    for def in DEFINITIONS {
        let mut raw = 0.0;
        let mut phrases: Vec<&str> = Vec::new();
        let mut words: Vec<&str> = Vec::new();
        let mut keywords = BTreeSet::new();
        for &(kw, weight) in def.keywords {
            if keyword_matches(&normalized, kw) {
                raw += weight.value();
                keywords.insert(kw.to_string());
                if kw.contains(' ') {
                    phrases.push(kw);
                } else {
                    words.push(kw);
                }
            }
        }
        if raw < MIN_RAW_SCORE {
            continue;
        }

        let mut reasons = Vec::new();
        for p in &phrases {
            reasons.push(format!("query contains the phrase \"{p}\""));
        }
        if !words.is_empty() {
            reasons.push(format!("matched {} keywords: {}", def.label, words.join(", ")));
        }

        out.push(Intent {
            kind: def.kind,
            confidence: (raw / CALIBRATION).min(1.0),
            reasons,
            keywords,
            entities: if def.kind == IntentKind::Comparison {
                entities.clone()
            } else {
                Vec::new()
            },
        });
    }

    out.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    out
}

// Words that end an entity name when they trail the last compared segment.
const TRAILING_STOPWORDS: &[&str] = &[
    "for", "in", "with", "to", "on", "about", "among", "across", "against", "when", "as",
];

// Words stripped from the front of the first compared segment.
const LEADING_FILLER: &[&str] = &[
    "compare", "comparing", "comparison", "difference", "differences", "between", "of", "the",
    "a", "an", "what", "whats", "is", "which", "should", "i", "use", "choose", "pick", "best",
    "please", "help", "me",
];

const MAX_ENTITIES: usize = 5;

fn clean_word(w: &str) -> String {
    w.trim_matches(|c: char| !c.is_alphanumeric() && c != '.' && c != '-' && c != '_')
        .to_string()
}

fn finish_entity(words: &[String]) -> Option<String> {
    let name = words.join(" ");
    let name = name
        .trim_matches(|c: char| c.is_whitespace() || ",.?!;:\"'".contains(c))
        .to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Detect compared-entity names in the raw (un-normalized) query so the
/// original casing survives into purpose strings and parameters.
///
/// Handles "A vs B vs C" / "A versus B" directly, and "compare A and B"
/// phrasing as a fallback. Returns an empty vec when no comparison structure
/// is present.
pub fn compared_entities(query: &str) -> Vec<String> {
    let words: Vec<&str> = query.split_whitespace().collect();
    let norm = |w: &str| clean_word(w).to_lowercase();
    let is_vs = |w: &str| {
        let t = norm(w);
        t == "vs" || t == "versus"
    };

    let mut groups: Vec<Vec<String>> = vec![Vec::new()];
    let mut any_sep = false;
    for w in &words {
        if is_vs(w) {
            any_sep = true;
            groups.push(Vec::new());
        } else if let Some(last) = groups.last_mut() {
            let cw = clean_word(w);
            if !cw.is_empty() {
                last.push(cw);
            }
        }
    }
    if !any_sep {
        return compare_conjunction_entities(&words);
    }
    entities_from_groups(groups)
}

fn entities_from_groups(mut groups: Vec<Vec<String>>) -> Vec<String> {
    let n = groups.len();
    if n < 2 {
        return Vec::new();
    }
    // First segment: everything before the name is filler ("Compare X ...").
    // Never strip the segment down to nothing: in "A vs B" the entity "A"
    // collides with the article "a".
    if let Some(first) = groups.first_mut() {
        while first.len() > 1 && LEADING_FILLER.contains(&first[0].to_lowercase().as_str()) {
            first.remove(0);
        }
    }
    // Last segment: the name ends at the first trailing stopword
    // ("... MTN Mobile Money for Cameroon merchants").
    if let Some(last) = groups.last_mut() {
        if let Some(pos) = last
            .iter()
            .position(|w| TRAILING_STOPWORDS.contains(&w.to_lowercase().as_str()))
        {
            last.truncate(pos);
        }
    }

    let mut out: Vec<String> = Vec::new();
    for g in &groups {
        if let Some(name) = finish_entity(g) {
            if !out.contains(&name) {
                out.push(name);
            }
        }
    }
    out.truncate(MAX_ENTITIES);
    out
}

/// "compare A and B [and C]" / "difference between A and B" phrasing.
fn compare_conjunction_entities(words: &[&str]) -> Vec<String> {
    let lowered: Vec<String> = words.iter().map(|w| clean_word(w).to_lowercase()).collect();
    let trigger = lowered
        .iter()
        .position(|w| matches!(w.as_str(), "compare" | "comparing" | "between"));
    let Some(start) = trigger else {
        return Vec::new();
    };

    let mut groups: Vec<Vec<String>> = vec![Vec::new()];
    for w in &words[start + 1..] {
        let t = clean_word(w).to_lowercase();
        if t == "and" || t == "with" {
            groups.push(Vec::new());
        } else if TRAILING_STOPWORDS.contains(&t.as_str()) {
            break;
        } else if let Some(last) = groups.last_mut() {
            let cw = clean_word(w);
            if !cw.is_empty() {
                last.push(cw);
            }
        }
    }
    let out = entities_from_groups(groups);
    // A single segment here means the "and/with" structure never appeared;
    // that is not a comparison set.
    if out.len() < 2 {
        Vec::new()
    } else {
        out
    }
}
