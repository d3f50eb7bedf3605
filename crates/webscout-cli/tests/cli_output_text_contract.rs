use predicates::prelude::*;

#[test]
fn suggest_text_output_lists_numbered_steps() {
    assert_cmd::Command::cargo_bin("webscout")
        .expect("binary built")
        .env_remove("WEBSCOUT_LANGUAGE")
        .env_remove("WEBSCOUT_COUNTRY")
        .args([
            "suggest",
            "How can I integrate mobile payments with LidgiCash API in Cameroon?",
            "--output",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("intent: integration"))
        .stdout(predicate::str::contains("step 1: search_web"))
        .stdout(predicate::str::contains("cost: fast / "));
}

#[test]
fn comparison_text_output_marks_parallel_groups() {
    assert_cmd::Command::cargo_bin("webscout")
        .expect("binary built")
        .env_remove("WEBSCOUT_LANGUAGE")
        .env_remove("WEBSCOUT_COUNTRY")
        .args([
            "suggest",
            "Compare LidgiCash vs Orange Money vs MTN Mobile Money for merchants",
            "--output",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[group 1]"))
        .stdout(predicate::str::contains("Orange Money"));
}

#[test]
fn catalog_text_output_lists_every_tool() {
    assert_cmd::Command::cargo_bin("webscout")
        .expect("binary built")
        .args(["catalog", "--output", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("search_web"))
        .stdout(predicate::str::contains("crawl_docs"))
        .stdout(predicate::str::contains("deep_dive"));
}
