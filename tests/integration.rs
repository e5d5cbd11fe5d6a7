use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn cmsite_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("cmsite");
    path
}

fn write_config(root: &Path, bucket_name: &str) -> PathBuf {
    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[stack]
name = "CodeMappingStack"
description = "Vector storage for EHR code-field mapping"

[vector_bucket]
name = "{}"

[vector_index]
name = "code-mapping-vector-index"
dimension = 1024
distance_metric = "cosine"
"#,
        bucket_name
    );

    let config_path = config_dir.join("cmsite.toml");
    fs::write(&config_path, config_content).unwrap();
    config_path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let config_path = write_config(tmp.path(), "code-mapping-vector-bucket");
    (tmp, config_path)
}

fn run_cmsite(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = cmsite_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run cmsite binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn synth_to_value(config_path: &Path) -> serde_json::Value {
    let (stdout, stderr, success) = run_cmsite(config_path, &["synth"]);
    assert!(success, "synth failed: stderr={}", stderr);
    serde_json::from_str(&stdout).expect("synth stdout is not valid JSON")
}

#[test]
fn test_synth_manifest_shape() {
    let (_tmp, config_path) = setup_test_env();
    let template = synth_to_value(&config_path);

    let resources = template["Resources"].as_object().unwrap();
    assert_eq!(resources.len(), 2);
    assert_eq!(
        resources["VectorBucket"]["Type"],
        "AWS::S3Vectors::VectorBucket"
    );
    assert_eq!(resources["VectorIndex"]["Type"], "AWS::S3Vectors::Index");

    let index_props = &resources["VectorIndex"]["Properties"];
    assert_eq!(index_props["VectorBucketName"], "code-mapping-vector-bucket");
    assert_eq!(index_props["IndexName"], "code-mapping-vector-index");
    assert_eq!(index_props["DataType"], "float32");
    assert_eq!(index_props["Dimension"], 1024);
    assert_eq!(index_props["DistanceMetric"], "cosine");

    let depends_on = resources["VectorIndex"]["DependsOn"].as_array().unwrap();
    assert_eq!(depends_on.len(), 1);
    assert_eq!(depends_on[0], "VectorBucket");

    let outputs = template["Outputs"].as_object().unwrap();
    assert_eq!(
        outputs["VectorBucketName"]["Export"]["Name"],
        "CodeMappingStackVectorBucketName"
    );
    assert_eq!(
        outputs["VectorIndexArn"]["Value"]["Fn::GetAtt"],
        serde_json::json!(["VectorIndex", "IndexArn"])
    );
}

#[test]
fn test_renaming_bucket_propagates_everywhere() {
    let tmp = TempDir::new().unwrap();

    let before_path = write_config(tmp.path(), "code-mapping-vector-bucket");
    let before = synth_to_value(&before_path);

    let renamed_path = write_config(tmp.path(), "renamed-vector-bucket");
    let after = synth_to_value(&renamed_path);

    assert_eq!(
        after["Resources"]["VectorIndex"]["Properties"]["VectorBucketName"],
        "renamed-vector-bucket"
    );
    assert_eq!(after["Outputs"]["VectorBucketName"]["Value"], "renamed-vector-bucket");
    assert_ne!(
        before["Resources"]["VectorIndex"]["Properties"]["VectorBucketName"],
        after["Resources"]["VectorIndex"]["Properties"]["VectorBucketName"]
    );
}

#[test]
fn test_synth_output_skips_unchanged_file() {
    let (tmp, config_path) = setup_test_env();
    let out_path = tmp.path().join("out/template.json");
    let out = out_path.to_str().unwrap();

    let (_, stderr, success) = run_cmsite(&config_path, &["synth", "--output", out]);
    assert!(success, "first synth failed: {}", stderr);
    assert!(stderr.contains("wrote"));
    assert!(out_path.exists());

    let (_, stderr, success) = run_cmsite(&config_path, &["synth", "--output", out]);
    assert!(success, "second synth failed: {}", stderr);
    assert!(stderr.contains("unchanged"));
}

#[test]
fn test_synth_check_detects_staleness() {
    let (tmp, config_path) = setup_test_env();
    let out_path = tmp.path().join("out/template.json");
    let out = out_path.to_str().unwrap();

    // Missing file: check fails.
    let (_, _, success) = run_cmsite(&config_path, &["synth", "--output", out, "--check"]);
    assert!(!success);

    // Freshly written file: check passes.
    run_cmsite(&config_path, &["synth", "--output", out]);
    let (_, stderr, success) = run_cmsite(&config_path, &["synth", "--output", out, "--check"]);
    assert!(success, "check after synth failed: {}", stderr);
    assert!(stderr.contains("up to date"));

    // Renamed bucket: the written manifest is stale.
    let renamed_path = write_config(tmp.path(), "renamed-vector-bucket");
    let (_, stderr, success) = run_cmsite(&renamed_path, &["synth", "--output", out, "--check"]);
    assert!(!success);
    assert!(stderr.contains("stale"));
}

#[test]
fn test_validate_reports_creation_order() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, stderr, success) = run_cmsite(&config_path, &["validate"]);
    assert!(success, "validate failed: {}", stderr);
    assert!(stdout.contains("VectorBucket"));
    assert!(stdout.contains("VectorIndex"));
    assert!(stdout.contains("ok"));

    // The bucket line comes before the index line (creation order).
    let bucket_pos = stdout.find("AWS::S3Vectors::VectorBucket").unwrap();
    let index_pos = stdout.find("AWS::S3Vectors::Index").unwrap();
    assert!(bucket_pos < index_pos);
}

#[test]
fn test_validate_rejects_bad_bucket_name() {
    let tmp = TempDir::new().unwrap();
    let config_path = write_config(tmp.path(), "Bad_Bucket_Name");
    let (_, stderr, success) = run_cmsite(&config_path, &["validate"]);
    assert!(!success);
    assert!(stderr.contains("vector_bucket"));
}

#[test]
fn test_outputs_json_format() {
    let (_tmp, config_path) = setup_test_env();
    let (stdout, stderr, success) = run_cmsite(&config_path, &["outputs", "--format", "json"]);
    assert!(success, "outputs failed: {}", stderr);

    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "VectorBucketName");
    assert_eq!(rows[0]["value"], "code-mapping-vector-bucket");
    assert_eq!(rows[1]["name"], "VectorIndexArn");
    assert_eq!(rows[1]["export"], "CodeMappingStackVectorIndexArn");
}

#[test]
fn test_missing_config_fails_infra_commands() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.toml");
    let (_, stderr, success) = run_cmsite(&missing, &["synth"]);
    assert!(!success);
    assert!(stderr.contains("config"));
}
