#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn quill_cmd(db: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("quill"));
    cmd.env("QUILL_DB_PATH", db.as_os_str()).env_remove("QUILL_LOG");
    cmd
}

#[test]
fn test_exit_immediately_creates_database() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("quill.db");

    quill_cmd(&db)
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Choose an option:"))
        .stdout(predicate::str::contains("9. Generate Revenue Report by Genre"))
        .stdout(predicate::str::contains("Exiting."));

    assert!(db.exists());
}

#[test]
fn test_end_of_input_is_a_clean_exit() {
    let temp = TempDir::new().unwrap();

    quill_cmd(&temp.path().join("quill.db"))
        .write_stdin("seven\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice. Please try again."));
}

#[test]
fn test_seeded_catalog_listing() {
    let temp = TempDir::new().unwrap();

    quill_cmd(&temp.path().join("quill.db"))
        .arg("--seed")
        .write_stdin("3\nJane Austen\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded demo data"))
        .stdout(predicate::str::contains(
            "Title: Emma, Author: Jane Austen, Genre: Classic, Price: 5.50, QuantityInStock: 9",
        ));
}

#[test]
fn test_sales_persist_between_runs() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("shop.db");

    // Customer 1 buys three copies of book 1 (Dune, 9.99).
    quill_cmd(&db)
        .arg("--seed")
        .write_stdin("6\n1\n1\n3\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Price: 29.97"));

    quill_cmd(&db)
        .arg("--seed")
        .write_stdin("8\n9\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("demo data not loaded"))
        .stdout(predicate::str::contains(
            "Customer: Alice Martin, Book Title: Dune, Date of Sale:",
        ))
        .stdout(predicate::str::contains(
            "Genre: Science Fiction, Total Revenue: 29.97",
        ));
}

#[test]
fn test_logs_stay_off_stdout() {
    let temp = TempDir::new().unwrap();

    quill_cmd(&temp.path().join("quill.db"))
        .args(["--log", "info"])
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Opening database").not())
        .stderr(predicate::str::contains("Opening database"));
}
