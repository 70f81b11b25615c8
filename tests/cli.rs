//! CLI behavior tests: regeneration, exit codes, runner log format.

use assert_cmd::Command;
use html_report::proto::{ProtoSpec, ProtoSpecResult, ProtoSuiteResult};
use predicates::prelude::*;
use prost::Message as _;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn report_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_html-report"));
    cmd.env_remove("html-report_action")
        .env_remove("plugin_connection_port")
        .env_remove("GAUGE_HTML_REPORT_THEME_PATH")
        .env_remove("RUST_LOG");
    cmd
}

fn theme(dir: &Path) -> PathBuf {
    let theme = dir.join("theme");
    fs::create_dir_all(theme.join("assets/css")).unwrap();
    fs::create_dir_all(theme.join("assets/js")).unwrap();
    fs::write(theme.join("assets/css/style.css"), "body{}").unwrap();
    fs::write(theme.join("assets/js/main.js"), "// main").unwrap();
    theme
}

fn snapshot(dir: &Path) -> PathBuf {
    let psr = ProtoSuiteResult {
        project_name: "cli-project".into(),
        environment: "default".into(),
        execution_time: 113_000,
        success_rate: 100.0,
        spec_results: vec![ProtoSpecResult {
            proto_spec: Some(ProtoSpec {
                spec_heading: "Checkout".into(),
                file_name: dir.join("specs/checkout.spec").to_string_lossy().into_owned(),
                tags: vec!["cart".into()],
                ..Default::default()
            }),
            ..Default::default()
        }],
        ..Default::default()
    };
    let path = dir.join("last_run_result");
    fs::write(&path, psr.encode_to_vec()).unwrap();
    path
}

#[test]
fn regenerates_report_from_snapshot() {
    let dir = TempDir::new().unwrap();
    let input = snapshot(dir.path());
    let out = dir.path().join("report");

    report_cmd()
        .current_dir(dir.path())
        .env("GAUGE_PROJECT_ROOT", dir.path())
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .arg("--theme")
        .arg(theme(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"logLevel\":\"info\""))
        .stdout(predicate::str::contains("Successfully generated html-report to =>"));

    let index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("Project: cli-project"));
    assert!(out.join("specs/checkout.html").is_file());
    assert!(out.join("css/style.css").is_file());
    let search = fs::read_to_string(out.join("js/search_index.js")).unwrap();
    assert!(search.contains("\"cart\":[\"specs/checkout.html\"]"));
}

#[test]
fn short_flags_are_accepted() {
    let dir = TempDir::new().unwrap();
    let input = snapshot(dir.path());
    let out = dir.path().join("short");

    report_cmd()
        .env("GAUGE_PROJECT_ROOT", dir.path())
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .arg("-t")
        .arg(theme(dir.path()))
        .assert()
        .success();
    assert!(out.join("index.html").is_file());
}

#[test]
fn theme_from_environment_is_used() {
    let dir = TempDir::new().unwrap();
    let input = snapshot(dir.path());
    let out = dir.path().join("report");

    report_cmd()
        .env("GAUGE_HTML_REPORT_THEME_PATH", theme(dir.path()))
        .env("GAUGE_PROJECT_ROOT", dir.path())
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    assert!(out.join("js/main.js").is_file());
}

#[test]
fn missing_input_exit_2() {
    let dir = TempDir::new().unwrap();
    report_cmd()
        .arg("--input")
        .arg(dir.path().join("does-not-exist"))
        .arg("--output")
        .arg(dir.path().join("report"))
        .arg("--theme")
        .arg(theme(dir.path()))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn input_without_output_exit_2() {
    let dir = TempDir::new().unwrap();
    let input = snapshot(dir.path());
    report_cmd()
        .arg("--input")
        .arg(&input)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--output"));
}

#[test]
fn missing_theme_exit_2() {
    let dir = TempDir::new().unwrap();
    let input = snapshot(dir.path());
    report_cmd()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("report"))
        .arg("--theme")
        .arg(dir.path().join("no-theme"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Theme directory not found"));
    assert!(!dir.path().join("report").exists());
}

#[test]
fn corrupt_snapshot_exit_2() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("last_run_result");
    fs::write(&input, [0xff, 0xff, 0xff]).unwrap();
    report_cmd()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("report"))
        .arg("--theme")
        .arg(theme(dir.path()))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("decode"));
}

#[test]
fn execution_without_port_exit_2() {
    report_cmd()
        .env("html-report_action", "execution")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("plugin_connection_port"));
}

#[test]
fn setup_action_is_a_no_op() {
    report_cmd()
        .env("html-report_action", "setup")
        .assert()
        .success();
}

#[test]
fn no_action_prints_usage() {
    report_cmd()
        .assert()
        .success()
        .stderr(predicate::str::contains("--input"));
}
