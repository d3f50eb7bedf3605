use webscout_orchestrator::catalog::{CRAWL_DOCS, SCRAPE_URL, SEARCH_WEB};
use webscout_orchestrator::{suggest_tools, IntentKind, ResearchContext};

#[test]
fn unknown_topic_integration_query_starts_with_search() {
    let plan = suggest_tools(
        "How can I integrate mobile payments with LidgiCash API in Cameroon?",
        &ResearchContext::default(),
    )
    .unwrap();

    assert_eq!(plan.primary_intent.kind, IntentKind::Integration);
    assert!(plan.primary_intent.confidence > 0.0);
    assert_eq!(plan.workflow[0].tool, SEARCH_WEB);
    assert_eq!(plan.workflow[0].step, 1);
}

#[test]
fn known_documentation_url_skips_search() {
    let ctx = ResearchContext::with_known_urls(["https://lidgicash.cm/documentation"]);
    let plan = suggest_tools("LidgiCash API complete documentation and integration guide", &ctx)
        .unwrap();

    let first = &plan.workflow[0];
    assert!(
        first.tool == SCRAPE_URL || first.tool == CRAWL_DOCS,
        "expected a fetch-known-URL step first, got {}",
        first.tool
    );
    assert_eq!(first.step, 1);
    let nums: Vec<usize> = plan.workflow.iter().map(|s| s.step).collect();
    assert_eq!(nums, (1..=plan.workflow.len()).collect::<Vec<_>>());
}

#[test]
fn three_way_comparison_runs_per_entity_searches_in_parallel() {
    let plan = suggest_tools(
        "Compare PostgreSQL vs MySQL vs SQLite for embedded analytics",
        &ResearchContext::default(),
    )
    .unwrap();

    assert_eq!(plan.primary_intent.kind, IntentKind::Comparison);
    let grouped: Vec<_> = plan
        .workflow
        .iter()
        .filter(|s| s.parallel_group.is_some())
        .collect();
    assert_eq!(grouped.len(), 3);
    let group = grouped[0].parallel_group;
    assert!(grouped.iter().all(|s| s.parallel_group == group));

    let mut steps: Vec<usize> = grouped.iter().map(|s| s.step).collect();
    let sorted = steps.clone();
    steps.dedup();
    assert_eq!(steps, sorted, "grouped steps must keep distinct numbers");
}

#[test]
fn comprehensive_wording_raises_search_and_crawl_budgets() {
    let baseline = suggest_tools(
        "How can I integrate mobile payments with LidgiCash API in Cameroon?",
        &ResearchContext::default(),
    )
    .unwrap();
    let deep = suggest_tools(
        "Research everything about mobile payment integration in Cameroon - comprehensive analysis",
        &ResearchContext::default(),
    )
    .unwrap();

    let search_limit = |plan: &webscout_orchestrator::WorkflowPlan| {
        plan.workflow
            .iter()
            .find(|s| s.tool == SEARCH_WEB)
            .and_then(|s| s.suggested_parameters.get("limit"))
            .and_then(|v| v.as_u64())
            .expect("search step with limit")
    };
    assert!(search_limit(&deep) > search_limit(&baseline));

    let crawl = deep
        .workflow
        .iter()
        .find(|s| s.tool == CRAWL_DOCS)
        .expect("deep plan crawls");
    assert!(crawl.suggested_parameters.get("depth").and_then(|v| v.as_u64()) >= Some(3));
    assert!(crawl.suggested_parameters.get("max_pages").and_then(|v| v.as_u64()) >= Some(25));
}
