#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{blockscope_cmd, fixture};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn json_stdout(args: &[&str]) -> Value {
    let output = blockscope_cmd()
        .arg("--input")
        .arg(fixture("pages.json"))
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("stdout should be JSON")
}

#[test]
fn sections_json_lists_flattened_blocks() {
    let report = json_stdout(&["sections", "/", "--json"]);

    assert_eq!(report["page"]["name"], "Home");
    let sections = report["sections"].as_array().unwrap();
    let paths: Vec<_> = sections.iter().map(|s| s["path"].as_str().unwrap()).collect();
    assert_eq!(paths, ["0", "1", "1.0", "1.1"]);

    assert_eq!(sections[0]["type"], "@builder.io/sdk:Element");
    assert_eq!(sections[0]["componentName"], "Hero");
    assert_eq!(sections[3]["type"], "Button");
    assert_eq!(sections[3]["text"], "Sign up");
    assert_eq!(sections[3]["childrenCount"], 0);
    assert_eq!(report["summary"]["totalSections"], 4);
    assert_eq!(report["summary"]["maxDepth"], 1);
}

#[test]
fn sections_found_by_targeting_value() {
    let report = json_stdout(&["sections", "/pricing", "--json"]);
    assert_eq!(report["page"]["name"], "Pricing");
    assert_eq!(report["page"]["url"], "/pricing");
    assert_eq!(report["summary"]["totalSections"], 2);
}

#[test]
fn sections_text_respects_limit() {
    blockscope_cmd()
        .arg("--input")
        .arg(fixture("pages.json"))
        .args(["sections", "Home", "--text", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page: Home (/)"))
        .stdout(predicate::str::contains("(showing 2 of 4)"))
        .stdout(predicate::str::contains("Sign up").not());
}

#[test]
fn sections_of_page_without_blocks() {
    let report = json_stdout(&["sections", "Draft", "--json"]);
    assert_eq!(report["page"]["url"], "/draft");
    assert_eq!(report["sections"].as_array().unwrap().len(), 0);
    assert_eq!(report["summary"]["maxDepth"], 0);
    assert_eq!(report["summary"]["averageChildren"], 0.0);
}

#[test]
fn unknown_page_exits_not_found() {
    blockscope_cmd()
        .arg("--input")
        .arg(fixture("pages.json"))
        .args(["sections", "/nope", "--json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Page not found: '/nope'"));
}

#[test]
fn find_exact_reports_every_page() {
    let report = json_stdout(&["find", "Text", "--json"]);

    assert_eq!(report["searchCriteria"], "Text");
    assert_eq!(report["mode"], "exact");
    assert_eq!(report["totalPagesAnalyzed"], 3);
    assert_eq!(report["totalPagesFound"], 2);

    let home = &report["pages"][0];
    assert_eq!(home["page"]["name"], "Home");
    assert_eq!(home["matchCount"], 1);
    assert_eq!(home["matchingSections"][0]["path"], "1.0");
    assert_eq!(home["matchingSections"][0]["depth"], 1);
}

#[test]
fn find_by_component_name_and_modes() {
    let report = json_stdout(&["find", "Hero", "--json"]);
    assert_eq!(report["totalPagesFound"], 1);

    let report = json_stdout(&["find", "hero", "--json"]);
    assert_eq!(report["totalPagesFound"], 0);

    let report = json_stdout(&["find", "hero", "--mode", "ignore-case", "--json"]);
    assert_eq!(report["totalPagesFound"], 1);

    let report = json_stdout(&["find", "^pricing", "--mode", "regex", "--json"]);
    assert_eq!(report["pages"][0]["page"]["name"], "Pricing");
}

#[test]
fn find_empty_identifier_matches_nothing() {
    let report = json_stdout(&["find", "", "--json"]);
    assert_eq!(report["totalPagesFound"], 0);
    assert_eq!(report["pages"].as_array().unwrap().len(), 0);
}

#[test]
fn find_invalid_regex_exits_invalid_query() {
    blockscope_cmd()
        .arg("--input")
        .arg(fixture("pages.json"))
        .args(["find", "(unclosed", "--mode", "regex"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid section pattern"));
}

#[test]
fn server_query_requires_api() {
    blockscope_cmd()
        .arg("--input")
        .arg(fixture("pages.json"))
        .args(["find", "Text", "--server-query"])
        .assert()
        .code(2);
}

#[test]
fn inventory_jsonl_has_one_entry_per_type() {
    let output = blockscope_cmd()
        .arg("--input")
        .arg(fixture("pages.json"))
        .args(["inventory", "--jsonl"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let entries: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0]["type"], "Text");
    assert_eq!(entries[0]["count"], 2);
    assert_eq!(entries[0]["pages"], serde_json::json!(["Home", "Pricing"]));
}

#[test]
fn pages_text_shows_urls() {
    blockscope_cmd()
        .arg("--input")
        .arg(fixture("pages.json"))
        .args(["pages", "--text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 pages"))
        .stdout(predicate::str::contains("Pricing (/pricing)"))
        .stdout(predicate::str::contains("Draft (/draft) [draft]"));
}

#[test]
fn save_writes_report_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reports").join("home.json");

    blockscope_cmd()
        .arg("--input")
        .arg(fixture("pages.json"))
        .args(["sections", "/", "--json", "--save"])
        .arg(&path)
        .assert()
        .success();

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["kind"], "sections");
    assert_eq!(saved["report"]["page"]["name"], "Home");
}

#[test]
fn missing_input_file_exits_not_found() {
    let dir = tempdir().unwrap();
    blockscope_cmd()
        .arg("--input")
        .arg(dir.path().join("absent.json"))
        .args(["pages", "--json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to load pages"));
}

#[test]
fn missing_config_file_is_usage_error() {
    let dir = tempdir().unwrap();
    blockscope_cmd()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("--input")
        .arg(fixture("pages.json"))
        .args(["pages", "--json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn completions_generate_script() {
    blockscope_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blockscope"));
}
