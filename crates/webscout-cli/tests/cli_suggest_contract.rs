fn run_suggest(args: &[&str]) -> std::process::Output {
    let bin = assert_cmd::cargo::cargo_bin!("webscout");
    std::process::Command::new(bin)
        .arg("suggest")
        .args(args)
        // Keep the contract hermetic against ambient hint variables.
        .env_remove("WEBSCOUT_LANGUAGE")
        .env_remove("WEBSCOUT_COUNTRY")
        .output()
        .expect("run webscout suggest")
}

#[test]
fn suggest_emits_a_plan_payload() {
    let out = run_suggest(&["How can I integrate mobile payments with LidgiCash API in Cameroon?"]);
    assert!(out.status.success(), "suggest failed: {out:?}");

    let s = String::from_utf8_lossy(&out.stdout);
    let v: serde_json::Value = serde_json::from_str(&s).expect("parse suggest json");

    assert_eq!(v["schema_version"].as_u64(), Some(1));
    assert_eq!(v["primary_intent"]["type"].as_str(), Some("integration"));
    let workflow = v["workflow"].as_array().expect("workflow array");
    assert!(!workflow.is_empty());
    assert_eq!(workflow[0]["step"].as_u64(), Some(1));
    assert_eq!(workflow[0]["tool"].as_str(), Some("search_web"));
    // Steps embed a catalog snapshot.
    assert!(workflow[0]["tool_details"]["resource_cost"].is_string());
}

#[test]
fn known_url_reshapes_the_plan() {
    let out = run_suggest(&[
        "LidgiCash API complete documentation and integration guide",
        "--known-url",
        "https://lidgicash.cm/documentation",
    ]);
    assert!(out.status.success(), "suggest failed: {out:?}");

    let s = String::from_utf8_lossy(&out.stdout);
    let v: serde_json::Value = serde_json::from_str(&s).expect("parse suggest json");
    let workflow = v["workflow"].as_array().expect("workflow array");
    assert_eq!(workflow[0]["step"].as_u64(), Some(1));
    assert_ne!(workflow[0]["tool"].as_str(), Some("search_web"));
}

#[test]
fn empty_query_exits_nonzero_with_structured_error() {
    let out = run_suggest(&["   "]);
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(2));

    let s = String::from_utf8_lossy(&out.stdout);
    let v: serde_json::Value = serde_json::from_str(&s).expect("parse error json");
    assert_eq!(v["ok"].as_bool(), Some(false));
    assert_eq!(v["error"]["code"].as_str(), Some("empty_intent"));
}

#[test]
fn malformed_known_url_is_rejected() {
    let out = run_suggest(&["LidgiCash API integration", "--known-url", "not a url"]);
    assert!(!out.status.success());
}
