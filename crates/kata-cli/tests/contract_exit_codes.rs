#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn corpus_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../problems")
}

fn kata(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kata").unwrap();
    cmd.current_dir(cwd).env_remove("KATA_FILTER");
    cmd
}

fn read_summary_json(path: &Path) -> Value {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("summary missing at {}", path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in summary")
}

fn write_problem(root: &Path, name: &str, descriptor: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("solution.rs"), "").unwrap();
    fs::write(dir.join("testcases.json"), descriptor).unwrap();
}

fn two_sum_descriptor(function: &str, output: Value) -> String {
    json!({
        "function": function,
        "params": ["nums", "target"],
        "paramTypes": ["", ""],
        "returnType": "",
        "cases": [
            {"input": [[2, 7, 11, 15], 9], "output": output},
            {"input": [[3, 3], 6], "output": [0, 1]}
        ]
    })
    .to_string()
}

#[test]
fn contract_corpus_passes_with_exit_0() {
    let dir = tempdir().unwrap();
    let summary = dir.path().join("summary.json");
    kata(dir.path())
        .arg("run")
        .arg("--problems")
        .arg(corpus_root())
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success();

    let v = read_summary_json(&summary);
    assert_eq!(v["exit_code"], 0);
    assert_eq!(v["reason_code"], "OK");
    assert_eq!(v["counts"]["failed"], 0);
    assert_eq!(v["counts"]["suite_errors"], 0);
    assert!(v["counts"]["passed"].as_u64().unwrap() > 0);
}

#[test]
fn contract_filter_from_env_restricts_run() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("run.json");
    kata(dir.path())
        .env("KATA_FILTER", "reverse")
        .arg("run")
        .arg("--problems")
        .arg(corpus_root())
        .arg("--json")
        .arg(&out)
        .assert()
        .success();

    let v: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v["problems"], json!(["0007-reverse-integer"]));
    let results = v["results"].as_array().unwrap();
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r["status"] == "pass"));
}

#[test]
fn contract_list_prints_discovered_problems() {
    let dir = tempdir().unwrap();
    kata(dir.path())
        .arg("list")
        .arg("--problems")
        .arg(corpus_root())
        .arg("--filter")
        .arg("two")
        .assert()
        .success()
        .stdout(predicate::str::contains("0001-two-sum"))
        .stdout(predicate::str::contains("0002-add-two-numbers"))
        .stdout(predicate::str::contains("0007-reverse-integer").not());
}

#[test]
fn contract_case_mismatch_exits_1() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("problems");
    write_problem(&corpus, "0001-two-sum", &two_sum_descriptor("twoSum", json!([1, 0])));
    let summary = dir.path().join("summary.json");
    let junit = dir.path().join("junit.xml");

    kata(dir.path())
        .arg("run")
        .arg("--problems")
        .arg(&corpus)
        .arg("--summary")
        .arg(&summary)
        .arg("--junit")
        .arg(&junit)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("0001-two-sum/case_0"));

    let v = read_summary_json(&summary);
    assert_eq!(v["reason_code"], "E_TEST_FAILED");
    assert_eq!(v["counts"]["failed"], 1);
    assert_eq!(v["counts"]["passed"], 1);
    let xml = fs::read_to_string(&junit).unwrap();
    assert!(xml.contains(r#"failures="1""#));
}

#[test]
fn contract_missing_export_exits_2() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("problems");
    write_problem(&corpus, "0001-two-sum", &two_sum_descriptor("doesNotExist", json!([0, 1])));
    let summary = dir.path().join("summary.json");

    kata(dir.path())
        .arg("run")
        .arg("--problems")
        .arg(&corpus)
        .arg("--summary")
        .arg(&summary)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("function_not_found"));

    let v = read_summary_json(&summary);
    assert_eq!(v["reason_code"], "E_SUITE_LOAD");
    assert_eq!(v["counts"]["passed"], 0);
}

#[test]
fn contract_suite_error_outranks_case_failure() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("problems");
    write_problem(&corpus, "0001-two-sum", &two_sum_descriptor("twoSum", json!([9, 9])));
    write_problem(&corpus, "0007-reverse-integer", "{ not json");

    kata(dir.path())
        .arg("run")
        .arg("--problems")
        .arg(&corpus)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("malformed_schema"))
        .stderr(predicate::str::contains("0001-two-sum/case_0"));
}

#[test]
fn contract_unregistered_problem_exits_2() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("problems");
    write_problem(&corpus, "9999-not-in-registry", &two_sum_descriptor("twoSum", json!([0, 1])));

    kata(dir.path())
        .arg("run")
        .arg("--problems")
        .arg(&corpus)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("module_not_registered"));
}

#[test]
fn contract_empty_corpus() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("problems");
    fs::create_dir_all(&corpus).unwrap();

    kata(dir.path())
        .arg("run")
        .arg("--problems")
        .arg(&corpus)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("E_NO_PROBLEMS"));

    kata(dir.path())
        .arg("run")
        .arg("--problems")
        .arg(&corpus)
        .arg("--allow-empty")
        .assert()
        .success();
}

#[test]
fn contract_config_file_is_honoured() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("kata.yaml"),
        format!(
            "version: 1\nproblems_dir: {}\nfilter: zigzag\nparallel: 1\n",
            corpus_root().display()
        ),
    )
    .unwrap();

    kata(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout("0006-zigzag-conversion\n");
}

#[test]
fn contract_bad_config_version_exits_2() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("custom.yaml");
    fs::write(&cfg, "version: 2\n").unwrap();
    let summary = dir.path().join("summary.json");

    kata(dir.path())
        .arg("run")
        .arg("--config")
        .arg(&cfg)
        .arg("--summary")
        .arg(&summary)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported config version"));

    let v = read_summary_json(&summary);
    assert_eq!(v["reason_code"], "E_CONFIG");
}

#[test]
fn contract_missing_corpus_root_exits_2() {
    let dir = tempdir().unwrap();
    kata(dir.path())
        .arg("run")
        .arg("--problems")
        .arg(dir.path().join("nope"))
        .assert()
        .code(2);
}

#[test]
fn contract_unwritable_report_still_writes_summary() {
    let dir = tempdir().unwrap();
    let summary = dir.path().join("summary.json");

    kata(dir.path())
        .env("KATA_FILTER", "reverse")
        .arg("run")
        .arg("--problems")
        .arg(corpus_root())
        .arg("--json")
        .arg(dir.path().join("missing-dir").join("run.json"))
        .arg("--summary")
        .arg(&summary)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to write"));

    let v = read_summary_json(&summary);
    assert_eq!(v["reason_code"], "E_CONFIG");
    assert_eq!(v["exit_code"], 2);
}
