use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn file(&self) -> PathBuf {
        self.dir.path().join("ledger.csv")
    }

    fn tally(&self) -> Command {
        let mut cmd = Command::cargo_bin("tally").unwrap();
        cmd.env("TALLY_DATA_DIR", self.dir.path().join("config"))
            .env_remove("TALLY_FILE")
            .env_remove("TALLY_LOG")
            .arg("--file")
            .arg(self.file());
        cmd
    }

    fn add(&self, description: &str, amount: &str, kind: &str, category: &str) {
        self.tally()
            .args(["add", description, amount, "-t", kind, "-c", category])
            .args(["-d", "2025-01-15"])
            .assert()
            .success();
    }

    fn ids(&self) -> Vec<String> {
        read_ids(&self.file())
    }
}

fn read_ids(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .skip(1)
        .filter_map(|line| line.split(',').next().map(str::to_string))
        .collect()
}

#[test]
fn add_then_list_shows_transaction() {
    let env = Env::new();
    env.add("Salary", "1000.00", "income", "Work");

    env.tally()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("$1000.00"))
        .stdout(predicate::str::contains("Showing 1 transactions"));

    let contents = fs::read_to_string(env.file()).unwrap();
    assert!(contents.starts_with("ID,Date,Description,Amount,Type,Category\n"));
    assert!(contents.contains(",2025-01-15,Salary,1000.00,INCOME,Work"));
}

#[test]
fn summary_reports_totals() {
    let env = Env::new();
    env.add("Salary", "1000.00", "income", "Work");
    env.add("Groceries", "75.50", "expense", "Food");
    env.add("Utilities", "60.00", "expense", "Bills");

    env.tally()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("$1000.00"))
        .stdout(predicate::str::contains("$135.50"))
        .stdout(predicate::str::contains("$864.50"))
        .stdout(predicate::str::contains("1 income, 2 expense"));
}

#[test]
fn summary_of_empty_file_is_zero() {
    let env = Env::new();

    env.tally()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("$0.00"));
}

#[test]
fn invalid_amount_is_rejected() {
    let env = Env::new();

    env.tally()
        .args(["add", "Coffee", "abc", "-t", "expense", "-c", "Food"])
        .assert()
        .failure();

    assert!(!env.file().exists());
}

#[test]
fn oversized_amount_is_rejected() {
    let env = Env::new();

    env.tally()
        .args(["add", "Windfall", "50000000000000000000000000000", "-t", "income", "-c", "Misc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));

    assert!(!env.file().exists());
}

#[test]
fn unknown_type_is_rejected() {
    let env = Env::new();

    env.tally()
        .args(["add", "Gift", "10.00", "-t", "transfer", "-c", "Misc"])
        .assert()
        .failure();
}

#[test]
fn delete_requires_force() {
    let env = Env::new();
    env.add("Groceries", "75.50", "expense", "Food");
    let id = env.ids().remove(0);

    env.tally()
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
    assert_eq!(env.ids().len(), 1);

    env.tally()
        .args(["delete", &id, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted transaction"));
    assert!(env.ids().is_empty());
}

#[test]
fn edit_changes_only_given_fields() {
    let env = Env::new();
    env.add("Groceries", "75.50", "expense", "Food");
    let id = env.ids().remove(0);

    env.tally()
        .args(["edit", &id, "--amount", "80.25"])
        .assert()
        .success();

    env.tally()
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("$80.25"))
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Food"));
}

#[test]
fn unknown_id_fails() {
    let env = Env::new();
    env.add("Groceries", "75.50", "expense", "Food");

    env.tally().args(["show", "does-not-exist"]).assert().failure();
    env.tally()
        .args(["delete", "does-not-exist", "--force"])
        .assert()
        .failure();
    assert_eq!(env.ids().len(), 1);
}

#[test]
fn malformed_rows_are_skipped() {
    let env = Env::new();
    fs::write(
        env.file(),
        "ID,Date,Description,Amount,Type,Category\n\
         a1,2025-01-15,Salary,1000.00,INCOME,Work\n\
         broken,row\n\
         a2,2025-01-16,Rent,abc,EXPENSE,Home\n",
    )
    .unwrap();

    env.tally()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1 transactions"));
}

#[test]
fn config_shows_paths() {
    let env = Env::new();

    env.tally()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("ledger.csv"));
}
