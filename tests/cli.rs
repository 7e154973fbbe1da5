//! End-to-end tests driving the `ledger` binary against a temporary data directory

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ledger(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ledger").unwrap();
    cmd.env("LEDGER_CLI_DATA_DIR", data_dir)
        .env_remove("LEDGER_CLI_FILE")
        .env_remove("RUST_LOG");
    cmd
}

/// Run `add` and return the short id printed for the new transaction
fn add(data_dir: &Path, args: &[&str]) -> String {
    let output = ledger(data_dir).arg("add").args(args).output().unwrap();
    assert!(
        output.status.success(),
        "add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("ID:"))
        .map(|id| id.trim().to_string())
        .unwrap()
}

fn seed(data_dir: &Path) {
    add(data_dir, &["income", "2000", "Paycheck", "-c", "Salary", "-d", "2025-03-01"]);
    add(data_dir, &["expense", "350", "Groceries", "-c", "Food", "-d", "2025-03-02"]);
    add(data_dir, &["expense", "100", "Train tickets", "-c", "Travel", "-d", "2025-03-03"]);
}

#[test]
fn test_add_and_list() {
    let temp = TempDir::new().unwrap();
    let id = add(
        temp.path(),
        &["expense", "12.5", "Lunch downtown", "-c", "food", "-n", "with team"],
    );
    assert!(id.starts_with("txn-"));

    ledger(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch downtown"))
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("-$12.50"))
        .stdout(predicate::str::contains("Showing 1-1 of 1 (page 1 of 1)"));

    assert!(temp.path().join("ledger.json").exists());
}

#[test]
fn test_add_rejects_invalid_input() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .args(["add", "expense", "10", "ab", "-c", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Description must be at least 3 characters long.",
        ));

    ledger(temp.path())
        .args(["add", "expense", "1000001", "Big purchase", "-c", "Shopping"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount cannot exceed $1,000,000."));

    ledger(temp.path())
        .args(["add", "income", "10", "Coffee", "-c", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not valid for Income"));

    ledger(temp.path())
        .args(["add", "expense", "-5", "Negative", "-c", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid amount greater than 0"));

    // Nothing was written
    assert!(!temp.path().join("ledger.json").exists());
}

#[test]
fn test_show_edit_delete() {
    let temp = TempDir::new().unwrap();
    let id = add(
        temp.path(),
        &["expense", "5", "Coffee beans", "-c", "Food", "-d", "2025-01-10"],
    );

    ledger(temp.path())
        .args(["edit", &id, "--amount", "7.5", "--description", "Espresso beans"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated transaction"));

    ledger(temp.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Espresso beans"))
        .stdout(predicate::str::contains("$7.50"))
        .stdout(predicate::str::contains("Updated:"));

    ledger(temp.path())
        .args(["edit", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));

    ledger(temp.path())
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Espresso beans"));

    ledger(temp.path())
        .args(["show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction not found"));
}

#[test]
fn test_list_filters_and_pages() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    ledger(temp.path())
        .args(["list", "--type", "expense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Paycheck").not());

    ledger(temp.path())
        .args(["list", "--search", "TRAIN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Train tickets"))
        .stdout(predicate::str::contains("Groceries").not());

    ledger(temp.path())
        .args(["list", "--page-size", "2", "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paycheck"))
        .stdout(predicate::str::contains("Showing 3-3 of 3 (page 2 of 2)"));

    ledger(temp.path())
        .args(["list", "--page-size", "2", "--page", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("past the end"));

    ledger(temp.path())
        .args(["list", "--category", "Bills"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn test_stats_breakdown_trend() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    ledger(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("$2,000.00"))
        .stdout(predicate::str::contains("$1,550.00"))
        .stdout(predicate::str::contains("78%"));

    let output = ledger(temp.path()).arg("breakdown").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let food = stdout.find("Food").unwrap();
    let travel = stdout.find("Travel").unwrap();
    assert!(food < travel);

    let output = ledger(temp.path()).arg("trend").output().unwrap();
    assert!(output.status.success());
    // header, rule, twelve months, rule, total
    assert_eq!(String::from_utf8(output.stdout).unwrap().lines().count(), 16);
}

#[test]
fn test_categories() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .args(["categories", "--type", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("Freelance"));

    seed(temp.path());
    ledger(temp.path())
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::diff("Salary\nFood\nTravel\n"));
}

#[test]
fn test_report() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    ledger(temp.path())
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("EXPENSE TRACKER REPORT\n"))
        .stdout(predicate::str::contains("Total Income: 2000.00"))
        .stdout(predicate::str::contains("Savings Rate: 78%"))
        .stdout(predicate::str::contains("1. Food: 350.00"))
        .stdout(predicate::str::contains("2. Travel: 100.00"));

    let csv_path = temp.path().join("monthly.csv");
    ledger(temp.path())
        .args(["report", "--output"])
        .arg(&csv_path)
        .assert()
        .success();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("Month,Income,Expenses,Net\n"));
    assert_eq!(csv.lines().count(), 13);
}

#[test]
fn test_export_and_import_round_trip() {
    let source = TempDir::new().unwrap();
    seed(source.path());

    let backup = source.path().join("backup.json");
    ledger(source.path())
        .args(["export", "--output"])
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 transactions"));

    let document = std::fs::read_to_string(&backup).unwrap();
    assert!(document.contains("\"exportDate\""));
    assert!(document.contains("\"version\": \"1.0\""));

    let target = TempDir::new().unwrap();
    add(target.path(), &["expense", "9", "Existing", "-c", "Other"]);

    ledger(target.path())
        .arg("import")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 3 transactions (merge). Ledger now has 4."));

    ledger(target.path())
        .arg("import")
        .arg(&backup)
        .args(["--mode", "replace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ledger now has 3."));

    ledger(target.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Existing").not());
}

#[test]
fn test_import_rejects_malformed_document() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), &["expense", "9", "Existing", "-c", "Other"]);

    let bad = temp.path().join("bad.json");
    std::fs::write(&bad, r#"{"items": []}"#).unwrap();

    ledger(temp.path())
        .arg("import")
        .arg(&bad)
        .args(["--mode", "replace"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid file format"));

    ledger(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Existing"));
}

#[test]
fn test_export_csv_and_yaml() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    let csv_path = temp.path().join("txns.csv");
    ledger(temp.path())
        .args(["export", "--format", "csv", "--output"])
        .arg(&csv_path)
        .assert()
        .success();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("ID,Type,Date,Description,Category,Amount,Notes,Created At,Updated At"));
    assert_eq!(csv.lines().count(), 4);

    let yaml_path = temp.path().join("ledger.yaml");
    ledger(temp.path())
        .args(["export", "--format", "yaml", "--output"])
        .arg(&yaml_path)
        .assert()
        .success();

    let other = TempDir::new().unwrap();
    ledger(other.path())
        .arg("import")
        .arg(&yaml_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ledger now has 3."));
}

#[test]
fn test_clear_requires_confirmation() {
    let temp = TempDir::new().unwrap();
    seed(temp.path());

    ledger(temp.path())
        .arg("clear")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    ledger(temp.path())
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 3 transactions."));

    ledger(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn test_file_override() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("elsewhere").join("books.json");

    let output = ledger(temp.path())
        .arg("--file")
        .arg(&file)
        .args(["add", "income", "50", "Refund from shop", "-c", "Refund"])
        .output()
        .unwrap();
    assert!(output.status.success());

    assert!(file.exists());
    assert!(!temp.path().join("ledger.json").exists());
}

#[test]
fn test_audit_log_records_mutations() {
    let temp = TempDir::new().unwrap();
    let id = add(temp.path(), &["expense", "5", "Coffee beans", "-c", "Food"]);
    ledger(temp.path())
        .args(["edit", &id, "--amount", "7.5"])
        .assert()
        .success();

    ledger(temp.path())
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Transaction"))
        .stdout(predicate::str::contains("amount: 5.0 -> 7.5"));
}

#[test]
fn test_config_shows_paths() {
    let temp = TempDir::new().unwrap();

    ledger(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("ledger.json"))
        .stdout(predicate::str::contains("Page size:         10"));
}
