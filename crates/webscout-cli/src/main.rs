use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use webscout_orchestrator::{catalog, suggest_tools, PlanError, ResearchContext, WorkflowPlan};

#[derive(Parser, Debug)]
#[command(name = "webscout")]
#[command(about = "Suggest which research tools to run next for a query", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Suggest a tool workflow for a research query (json by default).
    Suggest(SuggestCmd),
    /// Print the tool catalog (json by default).
    Catalog(CatalogCmd),
    /// Print version info (json).
    Version(VersionCmd),
}

#[derive(clap::Args, Debug)]
struct SuggestCmd {
    /// The research query to plan for.
    query: String,
    /// URL already known to be relevant (repeatable).
    #[arg(long)]
    known_url: Vec<String>,
    /// Preferred result language hint for search steps (e.g. "en").
    #[arg(long, env = "WEBSCOUT_LANGUAGE")]
    language: Option<String>,
    /// Country hint for search steps (e.g. "cm").
    #[arg(long, env = "WEBSCOUT_COUNTRY")]
    country: Option<String>,
    /// Output format. Allowed: json, text
    #[arg(long, default_value = "json")]
    output: String,
}

#[derive(clap::Args, Debug)]
struct CatalogCmd {
    /// Output format. Allowed: json, text
    #[arg(long, default_value = "json")]
    output: String,
}

#[derive(clap::Args, Debug)]
struct VersionCmd {}

fn error_code(err: &PlanError) -> &'static str {
    match err {
        PlanError::EmptyIntent => "empty_intent",
        PlanError::UnknownTool(_) => "unknown_tool",
    }
}

fn param_display(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_plan_text(plan: &WorkflowPlan) -> String {
    let mut out = String::new();
    let primary = &plan.primary_intent;
    out.push_str(&format!(
        "intent: {} ({:.0}%)\n",
        primary.kind.as_str(),
        primary.confidence * 100.0
    ));
    if let Some(r) = primary.reasons.first() {
        out.push_str(&format!("  reason: {r}\n"));
    }
    for s in &plan.secondary_intents {
        out.push_str(&format!(
            "secondary: {} ({:.0}%)\n",
            s.kind.as_str(),
            s.confidence * 100.0
        ));
    }
    out.push_str("workflow:\n");
    for step in &plan.workflow {
        let mut tags = String::new();
        if let Some(g) = step.parallel_group {
            tags.push_str(&format!(" [group {g}]"));
        }
        if step.has_fallback {
            tags.push_str(" [fallback]");
        }
        out.push_str(&format!("  step {}: {}{}\n", step.step, step.tool, tags));
        out.push_str(&format!("      purpose: {}\n", step.purpose));
        if !step.suggested_parameters.is_empty() {
            let params = step
                .suggested_parameters
                .iter()
                .map(|(k, v)| format!("{k}={}", param_display(v)))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("      parameters: {params}\n"));
        }
        out.push_str(&format!(
            "      cost: {} / {}\n",
            step.tool_details.resource_cost.as_str(),
            step.tool_details.estimated_duration
        ));
    }
    out
}

fn run_suggest(args: SuggestCmd) -> Result<()> {
    // Reject malformed --known-url up front: silently skipping a typo'd URL
    // would quietly re-enable the search step the caller meant to avoid.
    for u in &args.known_url {
        webscout_core::parse_url(u).map_err(|e| anyhow::anyhow!("--known-url: {e}"))?;
    }
    let context = ResearchContext {
        known_urls: args.known_url,
        language: args.language,
        country: args.country,
    };

    match suggest_tools(&args.query, &context) {
        Ok(plan) => {
            match args.output.to_ascii_lowercase().as_str() {
                "text" => print!("{}", render_plan_text(&plan)),
                _ => {
                    let mut payload = serde_json::Map::new();
                    payload.insert("schema_version".to_string(), json!(1));
                    payload.insert("query".to_string(), json!(args.query));
                    if let serde_json::Value::Object(plan_obj) = serde_json::to_value(&plan)? {
                        payload.extend(plan_obj);
                    }
                    println!("{}", serde_json::Value::Object(payload));
                }
            }
            Ok(())
        }
        Err(e) => {
            let payload = json!({
                "ok": false,
                "error": { "code": error_code(&e), "message": e.to_string() },
            });
            println!("{payload}");
            std::process::exit(2);
        }
    }
}

fn run_catalog(args: CatalogCmd) -> Result<()> {
    match args.output.to_ascii_lowercase().as_str() {
        "text" => {
            for t in catalog() {
                println!(
                    "{} ({} / {})",
                    t.name,
                    t.resource_cost.as_str(),
                    t.estimated_duration
                );
                for b in &t.best_for {
                    println!("  - {b}");
                }
            }
        }
        _ => {
            let payload = json!({
                "schema_version": 1,
                "tools": catalog(),
            });
            println!("{payload}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Suggest(args) => run_suggest(args),
        Commands::Catalog(args) => run_catalog(args),
        Commands::Version(_) => {
            let payload = json!({
                "schema_version": 1,
                "name": "webscout",
                "version": env!("CARGO_PKG_VERSION"),
            });
            println!("{payload}");
            Ok(())
        }
    }
}
