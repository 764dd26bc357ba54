//! CLI integration tests.
//!
//! Uses `assert_cmd` to spawn the `grist` binary and verify exit codes,
//! stdout content, and the files a generation run writes.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn grist() -> Command {
    cargo_bin_cmd!("grist")
}

#[test]
fn help_exits_0_with_description() {
    grist()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "procure-to-pay dataset synthesizer",
        ));
}

#[test]
fn version_exits_0() {
    grist()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("grist"));
}

#[test]
fn packs_lists_builtin_scenarios() {
    grist()
        .arg("packs")
        .assert()
        .success()
        .stdout(predicate::str::contains("smoke"))
        .stdout(predicate::str::contains("quarterly-audit"))
        .stdout(predicate::str::contains("fraud-heavy"));
}

#[test]
fn generate_writes_csvs_and_manifest() {
    let dir = TempDir::new().unwrap();
    grist()
        .args(["generate", "--seed", "42", "--vendors", "40", "--pos", "150"])
        .args(["--out", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("seed: 42"));

    for name in [
        "vendors.csv",
        "pr_headers.csv",
        "pr_lines.csv",
        "purchase_orders.csv",
        "grns.csv",
        "invoices.csv",
        "payments.csv",
        "quotations.csv",
        "contracts.csv",
        "role_assignments.csv",
        "workflow_logs.csv",
        "change_logs.csv",
        "anomaly_truth.csv",
        "manifest.json",
    ] {
        assert!(dir.path().join(name).exists(), "missing {}", name);
    }

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("manifest.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["seed"], "42");
    assert_eq!(manifest["row_counts"]["vendors"], 40);
    assert_eq!(manifest["row_counts"]["purchase_orders"], 150);

    let vendors = fs::read_to_string(dir.path().join("vendors.csv")).unwrap();
    // Header plus one line per vendor.
    assert_eq!(vendors.lines().count(), 41);
    assert!(vendors.starts_with("vendor_id,vendor_name,"));
}

#[test]
fn same_seed_rewrites_identical_files() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    for dir in [&dir_a, &dir_b] {
        grist()
            .args(["generate", "--seed", "punchcard", "--vendors", "30", "--pos", "100"])
            .args(["--out", dir.path().to_str().unwrap(), "--quiet"])
            .assert()
            .success();
    }
    for name in ["vendors.csv", "invoices.csv", "anomaly_truth.csv", "manifest.json"] {
        let a = fs::read(dir_a.path().join(name)).unwrap();
        let b = fs::read(dir_b.path().join(name)).unwrap();
        assert_eq!(a, b, "{} differs between identical runs", name);
    }
}

#[test]
fn pack_run_plants_anomalies() {
    let dir = TempDir::new().unwrap();
    grist()
        .args(["generate", "--pack", "fraud-heavy", "--vendors", "60", "--pos", "200"])
        .args(["--out", dir.path().to_str().unwrap(), "--quiet"])
        .assert()
        .success();
    let truth = fs::read_to_string(dir.path().join("anomaly_truth.csv")).unwrap();
    assert!(truth.lines().count() > 1, "expected planted anomalies");
    assert!(truth.contains("ANM-00001"));
}

#[test]
fn generate_json_output_prints_manifest() {
    let dir = TempDir::new().unwrap();
    let assert = grist()
        .args(["generate", "--seed", "7", "--vendors", "25", "--pos", "80"])
        .args(["--out", dir.path().to_str().unwrap(), "--output", "json"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(manifest["seed"], "7");
    assert!(manifest["etag"].as_str().unwrap().len() == 64);
}

#[test]
fn verify_reports_clean_run() {
    grist()
        .args(["verify", "--seed", "42", "--vendors", "40", "--pos", "150", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("violations: 0"));
}

#[test]
fn unknown_pack_is_a_usage_error() {
    grist()
        .args(["generate", "--pack", "galactic"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown pack"));
}

#[test]
fn oversize_request_is_a_usage_error() {
    grist()
        .args(["generate", "--vendors", "50001"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exceeds the limit"));
}

#[test]
fn pack_and_config_are_mutually_exclusive() {
    grist()
        .args(["generate", "--pack", "smoke", "--config", "grist.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("mutually exclusive"));
}

#[test]
fn config_file_drives_the_run() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("run.toml");
    fs::write(
        &config_path,
        "seed = \"toml-run\"\nvendor_count = 20\npo_count = 60\n\n[anomalies]\nmissing_tax_id_pct = 10.0\n",
    )
    .unwrap();
    let out = dir.path().join("out");
    grist()
        .args(["generate", "--config", config_path.to_str().unwrap()])
        .args(["--out", out.to_str().unwrap(), "--quiet"])
        .assert()
        .success();
    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("manifest.json")).unwrap()).unwrap();
    assert_eq!(manifest["seed"], "toml-run");
    assert_eq!(manifest["row_counts"]["vendors"], 20);
    assert!(manifest["truth_record_total"].as_u64().unwrap() >= 1);
}
