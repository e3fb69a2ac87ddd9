//! End-to-end tests for the `credrec` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BASE: &str = "\
PO #,DESCRIPTION,CREDIT AMT
Q101 ONMK A RBT,Credit memo: A - Q1,5.00
Q102 ONMK B RBT,Credit memo: B - Q1,7.00
";

const COMPARER: &str = "\
PO #,DESCRIPTION,CREDIT AMT
q101onmk a rbt,Credit memo: A - Q1,5.00
Q103 ONMK C RBT,,3.00
";

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("base.csv"), BASE).unwrap();
    fs::write(dir.path().join("comparer.csv"), COMPARER).unwrap();
    dir
}

/// Command isolated from the user's config directory.
fn credrec(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("credrec").unwrap();
    cmd.current_dir(dir).env("XDG_CONFIG_HOME", dir.join("config"));
    cmd
}

#[test]
fn test_compare_writes_report() {
    let dir = workspace();

    credrec(dir.path())
        .args(["compare", "base.csv", "comparer.csv", "-o", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 missing in comparer, 1 missing in base, 2 total"));

    let report = fs::read_to_string(dir.path().join("out/Missing_Credit_Report.csv")).unwrap();
    assert_eq!(
        report,
        "\
PO #,DESCRIPTION,CREDIT AMT,Missing In,Drug Category,Quarter Key
Q102 ONMK B RBT,Credit memo: B - Q1,7.00,Comparer,b,q102
Q103 ONMK C RBT,,3.00,Base,c,q103
"
    );
}

#[test]
fn test_compare_json_format() {
    let dir = workspace();

    credrec(dir.path())
        .args(["compare", "base.csv", "comparer.csv", "-f", "json"])
        .assert()
        .success();

    let json = fs::read_to_string(dir.path().join("Missing_Credit_Report.json")).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["Missing In"], "Comparer");
}

#[test]
fn test_compare_missing_po_column_fails() {
    let dir = workspace();
    fs::write(dir.path().join("bad.csv"), "ACCOUNT,CREDIT AMT\n1,5.00\n").unwrap();

    credrec(dir.path())
        .args(["compare", "bad.csv", "comparer.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required column: PO #"));

    assert!(!dir.path().join("Missing_Credit_Report.csv").exists());
}

#[test]
fn test_compare_dry_run_phone() {
    let dir = workspace();

    credrec(dir.path())
        .args(["compare", "base.csv", "comparer.csv", "--phone", "+15551234567", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report sent to phone +15551234567 via outbox"));

    let messages: Vec<_> = fs::read_dir(dir.path().join("outbox")).unwrap().collect();
    assert_eq!(messages.len(), 1);
}

#[test]
fn test_compare_rejects_bad_recipient_before_work() {
    let dir = workspace();

    credrec(dir.path())
        .args(["compare", "base.csv", "comparer.csv", "--email", "not-an-address"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid email recipient"));

    assert!(!dir.path().join("Missing_Credit_Report.csv").exists());
}

#[test]
fn test_compare_without_provider_reports_delivery_failure() {
    let dir = workspace();

    credrec(dir.path())
        .args(["compare", "base.csv", "comparer.csv", "--email", "ap@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Delivery failed"));

    // Report is still written before delivery is attempted.
    assert!(dir.path().join("Missing_Credit_Report.csv").exists());
}

#[test]
fn test_diff_without_common_columns() {
    let dir = workspace();
    fs::write(dir.path().join("a.csv"), "A,B\n1,2\n").unwrap();
    fs::write(dir.path().join("c.csv"), "C,D\n3,4\n").unwrap();

    credrec(dir.path())
        .args(["diff", "a.csv", "c.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No common columns found"));
}

#[test]
fn test_diff_writes_missing_rows() {
    let dir = workspace();

    credrec(dir.path())
        .args(["diff", "base.csv", "comparer.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 comparer rows missing from base"));

    let report = fs::read_to_string(dir.path().join("Missing_Credit_Report.csv")).unwrap();
    assert!(report.starts_with("ACCOUNT,PO #,DESCRIPTION,CREDIT AMT,DRUG LETTER,DRUG NAME,QUARTER KEY\n"));
}

#[test]
fn test_sort_writes_both_files() {
    let dir = workspace();

    credrec(dir.path())
        .args(["sort", "base.csv", "comparer.csv"])
        .assert()
        .success();

    let sorted = fs::read_to_string(dir.path().join("sorted_comparer.csv")).unwrap();
    let mut lines = sorted.lines();
    assert_eq!(
        lines.next(),
        Some("PO #,DESCRIPTION,CREDIT AMT,Identifier,Quarter Key,Drug Category")
    );
    assert_eq!(lines.next(), Some("q101onmk a rbt,Credit memo: A - Q1,5.00,q101 onmk arbt,q101,a"));
    assert!(dir.path().join("sorted_base.csv").exists());
}

#[test]
fn test_preview_limits_rows() {
    let dir = workspace();

    credrec(dir.path())
        .args(["preview", "base.csv", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Q101 ONMK A RBT"))
        .stdout(predicate::str::contains("Q102").not())
        .stdout(predicate::str::contains("showing 1 of 2 rows"));
}

#[test]
fn test_send_dry_run_email() {
    let dir = workspace();

    credrec(dir.path())
        .args(["compare", "base.csv", "comparer.csv"])
        .assert()
        .success();

    credrec(dir.path())
        .args(["send", "Missing_Credit_Report.csv", "--email", "ap@example.com", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded report with 2 rows"))
        .stdout(predicate::str::contains("Report sent to email ap@example.com via outbox"));
}

#[test]
fn test_send_requires_recipient() {
    let dir = workspace();

    credrec(dir.path())
        .args(["send", "Missing_Credit_Report.csv"])
        .assert()
        .failure();
}

#[test]
fn test_report_name_ignores_config() {
    let dir = workspace();
    let config = dir.path().join("credrec.json");
    let config = config.to_str().unwrap();

    credrec(dir.path())
        .args(["-c", config, "config", "set", "report.report_file", "renamed.csv"])
        .assert()
        .success();

    credrec(dir.path())
        .args(["-c", config, "compare", "base.csv", "comparer.csv"])
        .assert()
        .success();

    assert!(dir.path().join("Missing_Credit_Report.csv").exists());
    assert!(!dir.path().join("renamed.csv").exists());
}

#[test]
fn test_config_set_then_get() {
    let dir = workspace();
    let config = dir.path().join("credrec.json");
    let config = config.to_str().unwrap();

    credrec(dir.path())
        .args(["-c", config, "config", "set", "report.preview_rows", "5"])
        .assert()
        .success();

    credrec(dir.path())
        .args(["-c", config, "config", "get", "report.preview_rows"])
        .assert()
        .success()
        .stdout(predicate::str::diff("5\n"));
}
