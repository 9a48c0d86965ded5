// Integration tests for the `loom` binary: the --json stdout contract and the
// exit-code registry.
//
// stdout from --json commands must be exactly one JSON value; diagnostics and
// logs go to stderr.
//
// Run with: cargo test -p loomledger-cli --test json_contract_tests -- --nocapture

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const AS_OF: &str = "2026-10-19";

/// Runs `loom` with a scratch config dir so the developer's own
/// `finance.toml` never leaks into a test.
fn loom(scratch: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_loom"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"))
        .env("XDG_CONFIG_HOME", scratch)
        .env("HOME", scratch)
        .env_remove("LOOM_FIXTURES")
        .env_remove("LOOM_CONFIG")
        .env_remove("LOOM_LOG");
    cmd
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../finance/tests/fixtures").join(name)
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("spawn loom")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Assert stdout is a single, parseable JSON value with no extra lines.
fn assert_single_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let trimmed = stdout.trim();
    assert!(!trimmed.is_empty(), "stdout should not be empty\nstderr: {}", stderr(output));
    serde_json::from_str(trimmed)
        .unwrap_or_else(|e| panic!("stdout must be one JSON value.\nParse error: {e}\nstdout:\n{trimmed}"))
}

// ===========================================================================
// loom summary
// ===========================================================================

#[test]
fn summary_json_on_builtin_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(loom(dir.path()).args(["summary", "--json", "--as-of", AS_OF]));
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let val = assert_single_json(&out);
    assert_eq!(val["as_of"], AS_OF);
    assert_eq!(val["total_revenue"], 58200.0);
    assert_eq!(val["total_expenses"], 40342.0);
    assert_eq!(val["net_profit"], 17858.0);
    assert_eq!(val["outstanding_payments"], 36800.0);
    assert_eq!(val["overdue_count"], 3);
    assert_eq!(val["monthly_data"].as_array().unwrap().len(), 6);
    assert_eq!(val["monthly_data"][5]["month"], "2026-10");

    let categories: Vec<&str> = val["expense_breakdown"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["category"].as_str().unwrap())
        .collect();
    assert_eq!(
        categories,
        ["Labor", "Raw Materials", "Utilities", "Equipment & Maintenance", "Miscellaneous"]
    );
}

#[test]
fn debug_logging_stays_off_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(loom(dir.path())
        .env("LOOM_LOG", "debug")
        .args(["summary", "--json", "--as-of", AS_OF]));
    assert!(out.status.success());
    assert_single_json(&out);
}

#[test]
fn summary_human_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(loom(dir.path()).args(["summary", "--as-of", AS_OF]));
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("58,200.00"));
    assert!(stdout.contains("Oct 2026"));
}

#[test]
fn config_months_shape_the_series() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(loom(dir.path()).args([
        "summary",
        "--json",
        "--as-of",
        AS_OF,
        "--config",
        fixture("estimate.toml").to_str().unwrap(),
    ]));
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let val = assert_single_json(&out);
    assert_eq!(val["monthly_data"].as_array().unwrap().len(), 3);
}

// ===========================================================================
// loom check
// ===========================================================================

#[test]
fn check_builtin_dataset_is_consistent() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(loom(dir.path()).args(["check", "--json", "--as-of", AS_OF]));
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));

    let val = assert_single_json(&out);
    assert_eq!(val["status"], "consistent");
    assert_eq!(val["score"], 100.0);
    assert_eq!(val["issues"].as_array().unwrap().len(), 0);
}

#[test]
fn check_drifted_reference_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference.json");
    std::fs::write(&reference, r#"{"revenue": 58200, "expenses": 40341, "profit": 17858}"#).unwrap();

    let out = run(loom(dir.path()).args([
        "check",
        "--json",
        "--as-of",
        AS_OF,
        "--reference",
        reference.to_str().unwrap(),
    ]));
    assert_eq!(out.status.code(), Some(3));

    let val = assert_single_json(&out);
    assert_eq!(val["status"], "inconsistent");
    assert_eq!(val["score"], 66.7);
    assert_eq!(
        val["issues"][0],
        "expenses mismatch: computed 40342 vs reference 40341 (difference 1)"
    );
    assert!(!stderr(&out).contains("error:"), "JSON mode keeps stderr quiet");
}

#[test]
fn check_human_mode_reports_drift() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(loom(dir.path()).args([
        "check",
        "--as-of",
        AS_OF,
        "--fixtures",
        fixture("single-invoice.json").to_str().unwrap(),
    ]));
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("expenses mismatch"));
    assert!(stderr(&out).contains("error: computed totals disagree"));
}

#[test]
fn check_without_reference_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures = dir.path().join("bare.json");
    std::fs::write(&fixtures, r#"{"employees": []}"#).unwrap();

    let out = run(loom(dir.path()).args(["check", "--fixtures", fixtures.to_str().unwrap()]));
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("hint:"));
}

// ===========================================================================
// Input validation exit codes
// ===========================================================================

#[test]
fn duplicate_ids_reject_fixtures() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures = dir.path().join("dup.json");
    std::fs::write(
        &fixtures,
        r#"{"employees": [
            {"id": "E-1", "name": "A", "salary": 100, "paid": 0},
            {"id": "E-1", "name": "B", "salary": 100, "paid": 0}
        ]}"#,
    )
    .unwrap();

    let out = run(loom(dir.path()).args(["summary", "--json", "--fixtures", fixtures.to_str().unwrap()]));
    assert_eq!(out.status.code(), Some(4));
    assert!(out.stdout.is_empty());
    assert!(stderr(&out).contains("duplicate employee id 'E-1'"));
}

#[test]
fn invalid_config_exits_5() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("finance.toml");
    std::fs::write(&config, "months = 0\n").unwrap();

    let out = run(loom(dir.path()).args(["summary", "--config", config.to_str().unwrap()]));
    assert_eq!(out.status.code(), Some(5));
    assert!(stderr(&out).contains("months must be between 1 and 36"));

    let out = run(loom(dir.path()).args(["config", "validate", config.to_str().unwrap()]));
    assert_eq!(out.status.code(), Some(5));
}

// dirs::config_dir honours XDG_CONFIG_HOME on Linux only.
#[cfg(target_os = "linux")]
#[test]
fn user_config_dir_is_picked_up() {
    let dir = tempfile::tempdir().unwrap();
    let user_dir = dir.path().join("loomledger");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(user_dir.join("finance.toml"), "months = 2\n").unwrap();

    let out = run(loom(dir.path()).args(["summary", "--json", "--as-of", AS_OF]));
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let val = assert_single_json(&out);
    assert_eq!(val["monthly_data"].as_array().unwrap().len(), 2);
}

// ===========================================================================
// loom export / alerts / report / fixtures
// ===========================================================================

#[test]
fn export_writes_long_format_csv() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("summary.csv");
    let out = run(loom(dir.path()).args([
        "export",
        "--as-of",
        AS_OF,
        "-o",
        csv_path.to_str().unwrap(),
    ]));
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("section,label,metric,value"));
    assert_eq!(lines.next(), Some("totals,2026-10-19,total_revenue,58200"));
    assert!(csv.contains("breakdown,Raw Materials,amount,6342"));
}

#[test]
fn alerts_json_lists_overdue_first() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(loom(dir.path()).args(["alerts", "--json", "--as-of", AS_OF]));
    assert!(out.status.success());

    let val = assert_single_json(&out);
    let alerts = val.as_array().expect("alerts array");
    assert_eq!(alerts.len(), 7);
    assert_eq!(alerts[0]["kind"], "overdue_invoice");
    assert_eq!(alerts[0]["entity_id"], "INV-2026-002");
    assert_eq!(alerts[6]["kind"], "unpaid_salary");
}

#[test]
fn report_orders_counts_every_status() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(loom(dir.path()).args(["report", "orders", "--json"]));
    assert!(out.status.success());

    let val = assert_single_json(&out);
    assert_eq!(val["total_orders"], 8);
    assert_eq!(val["by_status"]["completed"], 3);
    assert_eq!(val["by_status"]["cancelled"], 1);
}

#[test]
fn report_inventory_reads_dashboard_fields() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(loom(dir.path()).args([
        "report",
        "inventory",
        "--json",
        "--fixtures",
        fixture("workshop.json").to_str().unwrap(),
    ]));
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let val = assert_single_json(&out);
    assert_eq!(val["total_value"], 4000.0);
    assert_eq!(val["low_stock"][0]["id"], "F-2");
}

#[test]
fn fixtures_output_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(&mut loom(dir.path()).arg("fixtures"));
    assert!(out.status.success());

    let path = dir.path().join("seed.json");
    std::fs::write(&path, &out.stdout).unwrap();

    let out = run(loom(dir.path()).args([
        "check",
        "--json",
        "--as-of",
        AS_OF,
        "--fixtures",
        path.to_str().unwrap(),
    ]));
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
}

// ===========================================================================
// loom apply
// ===========================================================================

#[test]
fn apply_reports_rejections_and_writes_store() {
    let dir = tempfile::tempdir().unwrap();
    let batch = dir.path().join("batch.json");
    std::fs::write(
        &batch,
        r#"[
            {"command": "record_payment", "invoice_id": "INV-2026-002", "amount": 5000},
            {"command": "record_payment", "invoice_id": "INV-2026-001", "amount": 1},
            {"command": "restock", "item_id": "FAB-002", "quantity": 50}
        ]"#,
    )
    .unwrap();
    let written = dir.path().join("after.json");

    let out = run(loom(dir.path()).args([
        "apply",
        batch.to_str().unwrap(),
        "--json",
        "--write",
        written.to_str().unwrap(),
    ]));
    assert_eq!(out.status.code(), Some(6));

    let val = assert_single_json(&out);
    assert_eq!(val["applied"], 2);
    assert_eq!(val["rejected"], 1);
    assert_eq!(val["skipped"], 0);
    assert_eq!(val["results"][1]["accepted"], false);

    // The payment moved revenue away from the curated reference.
    let out = run(loom(dir.path()).args([
        "check",
        "--json",
        "--as-of",
        AS_OF,
        "--fixtures",
        written.to_str().unwrap(),
    ]));
    assert_eq!(out.status.code(), Some(3));
    let val = assert_single_json(&out);
    assert_eq!(val["checks"][0]["computed"], 63200.0);
}

#[test]
fn apply_fail_fast_skips_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let batch = dir.path().join("batch.json");
    std::fs::write(
        &batch,
        r#"[
            {"command": "pay_employee", "employee_id": "E-404", "amount": 10},
            {"command": "pay_employee", "employee_id": "E-002", "amount": 2000}
        ]"#,
    )
    .unwrap();

    let out = run(loom(dir.path()).args(["apply", batch.to_str().unwrap(), "--json", "--fail-fast"]));
    assert_eq!(out.status.code(), Some(6));
    let val = assert_single_json(&out);
    assert_eq!(val["applied"], 0);
    assert_eq!(val["skipped"], 1);
}

#[test]
fn apply_malformed_batch_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let batch = dir.path().join("batch.json");
    std::fs::write(&batch, r#"[{"command": "refund_everything"}]"#).unwrap();

    let out = run(loom(dir.path()).args(["apply", batch.to_str().unwrap()]));
    assert_eq!(out.status.code(), Some(2));
}
