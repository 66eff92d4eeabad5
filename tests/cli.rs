use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn split(dir: &TempDir, user: &str) -> Command {
    let mut cmd = Command::cargo_bin("split").unwrap();
    cmd.env("BUDGET_SPLIT_DATA_DIR", dir.path())
        .env("BUDGET_SPLIT_USER", user);
    cmd
}

#[test]
fn structure_show_starts_at_defaults() {
    let dir = TempDir::new().unwrap();

    split(&dir, "ana")
        .args(["structure", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Necesidades"))
        .stdout(predicate::str::contains("50.00%"))
        .stdout(predicate::str::contains("30.00%"))
        .stdout(predicate::str::contains("20.00%"))
        .stdout(predicate::str::contains("Ready to save."));
}

#[test]
fn moving_necesidades_rescales_the_rest() {
    let dir = TempDir::new().unwrap();

    split(&dir, "ana")
        .args(["structure", "edit", "--set", "Necesidades=70"])
        .assert()
        .success()
        .stdout(predicate::str::contains("70.00%"))
        .stdout(predicate::str::contains("18.00%"))
        .stdout(predicate::str::contains("12.00%"))
        .stdout(predicate::str::contains("Saved budget structure for ana."));

    split(&dir, "ana")
        .args(["structure", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("18.00%"))
        .stdout(predicate::str::contains("12.00%"));
}

#[test]
fn preset_applies_exactly() {
    let dir = TempDir::new().unwrap();

    split(&dir, "ana")
        .args(["structure", "edit", "--preset", "60-20-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("60.00%"))
        .stdout(predicate::str::contains("Ready to save."));
}

#[test]
fn ninety_nine_percent_is_refused() {
    let dir = TempDir::new().unwrap();

    split(&dir, "ana")
        .args(["structure", "edit", "--preset", "50,30,19"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must sum to exactly 100%"))
        .stderr(predicate::str::contains("99.00%"));

    split(&dir, "ana")
        .args(["structure", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50.00%"))
        .stdout(predicate::str::contains("19.00%").not());
}

#[test]
fn dry_run_does_not_save() {
    let dir = TempDir::new().unwrap();

    split(&dir, "ana")
        .args(["structure", "edit", "--preset", "70-20-10", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run: nothing saved."));

    split(&dir, "ana")
        .args(["structure", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("70.00%").not());
}

#[test]
fn income_projects_onto_categories() {
    let dir = TempDir::new().unwrap();

    split(&dir, "ana")
        .args(["income", "add", "Salary", "10000"])
        .assert()
        .success();

    split(&dir, "ana")
        .args(["budget", "create", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$10000.00"));

    split(&dir, "ana")
        .args(["structure", "show", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$5000.00"))
        .stdout(predicate::str::contains("$3000.00"))
        .stdout(predicate::str::contains("$2000.00"));

    split(&dir, "ana")
        .args(["report", "comparison", "--month", "2025-01", "--csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2025-01,Necesidades,50.00,5000.00,0.00,0.00,0.00,5000.00",
        ));
}

#[test]
fn explicit_income_flag_projects_without_budget() {
    let dir = TempDir::new().unwrap();

    split(&dir, "ana")
        .args(["structure", "show", "--income", "10000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$5000.00"));
}

#[test]
fn missing_user_is_an_error_until_login() {
    let dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("split").unwrap();
    cmd.env("BUDGET_SPLIT_DATA_DIR", dir.path())
        .env_remove("BUDGET_SPLIT_USER")
        .args(["structure", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No user signed in"));

    let mut cmd = Command::cargo_bin("split").unwrap();
    cmd.env("BUDGET_SPLIT_DATA_DIR", dir.path())
        .env_remove("BUDGET_SPLIT_USER")
        .args(["login", "ana"])
        .assert()
        .success();

    let mut cmd = Command::cargo_bin("split").unwrap();
    cmd.env("BUDGET_SPLIT_DATA_DIR", dir.path())
        .env_remove("BUDGET_SPLIT_USER")
        .args(["structure", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget structure for ana"));
}

#[test]
fn family_roles_guard_other_users_data() {
    let dir = TempDir::new().unwrap();

    split(&dir, "luis")
        .args(["--owner", "ana", "structure", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Access denied"));

    split(&dir, "ana")
        .args(["family", "add", "luis", "--role", "viewer"])
        .assert()
        .success();

    split(&dir, "luis")
        .args(["--owner", "ana", "structure", "show"])
        .assert()
        .success();

    split(&dir, "luis")
        .args(["--owner", "ana", "structure", "edit", "--preset", "60-20-20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot edit data owned by ana"));
}

#[test]
fn audit_records_structure_changes() {
    let dir = TempDir::new().unwrap();

    split(&dir, "ana")
        .args(["structure", "edit", "--preset", "60-20-20"])
        .assert()
        .success();

    split(&dir, "ana")
        .args(["audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Percentages"))
        .stdout(predicate::str::contains("by ana"));
}
