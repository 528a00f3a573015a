use assert_cmd::Command;
use predicates::prelude::*;

const FIXTURE: &str = "employee,vendor,department,category,date,amount\n\
Ana Ruiz,Delta Airlines,Sales,Travel,2025-01-10,500.00\n\
Ana Ruiz,Delta Airlines,Sales,Travel,2025-01-10,400.00\n\
Ben Ito,Cafe Uno,Sales,Meals,2025-01-11,80.00\n\
Cy Ono,Staples,HR,Office Supplies,2025-02-15,120.00\n\
Dee Park,,Marketing,Software,03/05/25,300.00\n";

fn write_fixture(dir: &tempfile::TempDir) -> String {
    let path = dir.path().join("expenses.csv");
    std::fs::write(&path, FIXTURE).unwrap();
    path.to_string_lossy().to_string()
}

fn cmd() -> Command {
    Command::cargo_bin("spendcheck").unwrap()
}

#[test]
fn test_vendors_flags_dominant_vendor() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir);
    // Delta carries $900 of $1,400 total spend
    cmd()
        .args(["vendors", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Delta Airlines"))
        .stdout(predicate::str::contains("Hard-High"))
        .stdout(predicate::str::contains("Unknown"));
}

#[test]
fn test_vendors_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir);
    let output = cmd()
        .args(["vendors", &file, "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(parsed["rows"].as_array().unwrap().len() >= 4);
    assert_eq!(parsed["rows"][0]["vendor"], "Delta Airlines");
    assert!(parsed["rows"][0]["percent_of_total"].as_f64().unwrap() > 30.0);
}

#[test]
fn test_same_day_detects_repeat_purchases() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir);
    cmd()
        .args(["same-day", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana Ruiz"))
        .stdout(predicate::str::contains("Delta Airlines"))
        .stdout(predicate::str::contains("$900.00"));
}

#[test]
fn test_policy_reports_meals_and_daily_travel() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir);
    cmd()
        .args(["policy", &file])
        .assert()
        .success()
        // Ben's $80 meal breaks the $55 ceiling
        .stdout(predicate::str::contains("Ben Ito"))
        // Ana's two flights total $900 against the $855 daily cap
        .stdout(predicate::str::contains("$900.00"))
        .stderr(predicate::str::contains("violation"));
}

#[test]
fn test_policy_respects_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir);
    let config = dir.path().join("config.json");
    std::fs::write(
        &config,
        r#"{"policy": {"meals_per_txn": 1000.0, "travel_per_employee_day": 855.0,
            "training_per_txn": 1400.0, "office_supplies_per_txn": 650.0,
            "software_per_txn": 2000.0}}"#,
    )
    .unwrap();
    cmd()
        .args(["policy", &file, "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Meals per transaction (limit $1,000.00)"))
        .stdout(predicate::str::contains("no violations"));
}

#[test]
fn test_monthly_lists_each_month() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir);
    cmd()
        .args(["monthly", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-01"))
        .stdout(predicate::str::contains("2025-02"))
        .stdout(predicate::str::contains("2025-03"));
}

#[test]
fn test_departments_overview() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir);
    cmd()
        .args(["departments", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sales"))
        .stdout(predicate::str::contains("HR"))
        .stdout(predicate::str::contains("Marketing"));
}

#[test]
fn test_drilldown_scopes_to_department() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir);
    cmd()
        .args(["drilldown", &file, "--department", "Sales"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Drilldown: Sales"))
        .stdout(predicate::str::contains("Spend by Employee"))
        .stderr(predicate::str::contains("No Training spend found for Sales"));
}

#[test]
fn test_drilldown_unknown_department_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir);
    cmd()
        .args(["drilldown", &file, "--department", "Legal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No transactions for department: Legal"));
}

#[test]
fn test_benchmarks_renders_heatmap() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir);
    cmd()
        .args(["benchmarks", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deviation from Expected Benchmark"))
        .stdout(predicate::str::contains("Benchmark Tier Midpoints"));
}

#[test]
fn test_missing_column_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(
        &path,
        "employee,vendor,department,date,amount\nAna Ruiz,Delta,Sales,2025-01-10,10.00\n",
    )
    .unwrap();
    cmd()
        .args(["vendors", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing column 'category'"));
}

#[test]
fn test_invalid_amount_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad_amount.csv");
    std::fs::write(
        &path,
        "employee,vendor,department,category,date,amount\n\
         Ana Ruiz,Delta,Sales,Travel,2025-01-10,lots\n",
    )
    .unwrap();
    cmd()
        .args(["monthly", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
}

#[test]
fn test_missing_file_reports_io_error() {
    cmd()
        .args(["vendors", "/nonexistent/expenses.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
