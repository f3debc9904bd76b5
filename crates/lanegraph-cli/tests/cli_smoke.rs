use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("lanegraph-cli"));
    cmd.current_dir(repo_root()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_renders_svg_to_out_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("model.svg");

    let output = cli()
        .args([
            "render",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture("yolov8n.yaml").to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("model.svg"), "{stdout}");

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"id="yolov8n""#));
    let leftovers: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn cli_renders_mermaid_next_to_the_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("tall_neck.yaml");
    fs::copy(fixture("tall_neck.yaml"), &input).expect("copy fixture");

    cli()
        .args([
            "render",
            "--format",
            "mermaid",
            "--theme",
            "dark",
            input.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let mmd = fs::read_to_string(input.with_extension("mmd")).expect("read mmd");
    assert!(mmd.starts_with("flowchart LR\n"));
    assert!(mmd.contains("classDef backbone fill:#1E1E1E"));
}

#[test]
fn cli_reads_stdin_and_writes_stdout() {
    let text = fs::read_to_string(fixture("backbone_only.yaml")).unwrap();
    let assert = assert_cmd::Command::new(assert_cmd::cargo_bin!("lanegraph-cli"))
        .args(["render", "--theme", "no-such-theme", "-"])
        .write_stdin(text)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.starts_with("<svg "));
    // Unknown themes fall back to the default palette.
    assert!(stdout.contains("font-family: Times New Roman, serif;"));
}

#[test]
fn cli_parse_prints_model_json() {
    let output = cli()
        .args(["parse", "--pretty", "--show", "all"])
        .arg(fixture("yolov8n.yaml"))
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["primary_len"], 10);
    assert_eq!(value["nodes"].as_array().map(Vec::len), Some(23));
    assert_eq!(value["nodes"][22]["lane"], "terminal");
}

#[test]
fn cli_layout_honours_overrides() {
    let output = cli()
        .args(["layout", "--set", "layout.node_width=180"])
        .arg(fixture("backbone_only.yaml"))
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["nodes"][0]["width"], 180.0);
    assert_eq!(value["nodes"][0]["x"], 20.0);
}

#[test]
fn cli_lists_themes() {
    let output = cli().arg("themes").output().expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let names: Vec<&str> = stdout.lines().collect();
    assert_eq!(names.len(), 9);
    assert_eq!(names[0], "paper");
}

#[test]
fn cli_usage_errors_exit_with_2() {
    cli().arg("--bogus").assert().code(2);
    cli().args(["render", "--format", "png"]).assert().code(2);
    cli().args(["parse", "--show", "colour"]).assert().code(2);
}

#[test]
fn cli_failures_exit_with_1_and_write_nothing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("never.svg");

    cli()
        .args(["render", "--out", out.to_string_lossy().as_ref(), "missing.yaml"])
        .assert()
        .code(1);
    assert!(!out.exists());

    cli()
        .args(["render", "--strict", "--out", out.to_string_lossy().as_ref()])
        .arg(fixture("messy.yaml"))
        .assert()
        .code(1);
    assert!(!out.exists());

    cli()
        .args(["render", "--set", "layout.node_width=wide", "--out"])
        .arg(&out)
        .arg(fixture("yolov8n.yaml"))
        .assert()
        .code(1);
    assert!(!out.exists());
}

#[test]
fn cli_refuses_to_overwrite_its_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("model.mmd");
    let original = fs::read_to_string(fixture("backbone_only.yaml")).unwrap();
    fs::write(&input, &original).expect("write input");

    let output = cli()
        .args(["render", "--format", "mermaid"])
        .arg(&input)
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("is the input file"), "{stderr}");
    assert_eq!(fs::read_to_string(&input).unwrap(), original);

    cli()
        .args(["render", "--out"])
        .arg(&input)
        .arg(&input)
        .assert()
        .code(1);
    assert_eq!(fs::read_to_string(&input).unwrap(), original);
}
