#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn bookshelf_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bookshelf").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn test_piped_session_persists_to_working_dir() {
    let temp = TempDir::new().unwrap();

    bookshelf_cmd(&temp)
        .write_stdin("1\nDune\nHerbert\n1965\n5\n1\nchecked-out\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Book 'Dune' added with id 1."))
        .stdout(predicate::str::contains("Status of book 1 changed to 'checked-out'."))
        .stdout(predicate::str::contains("Goodbye!"));

    let content = fs::read_to_string(temp.path().join("library.json")).unwrap();
    assert!(content.contains("\"title\": \"Dune\""));
    assert!(content.contains("\"status\": \"checked-out\""));

    // A second run sees the first run's catalog, then empties it.
    bookshelf_cmd(&temp)
        .write_stdin("4\n2\n1\n4\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "id: 1, title: Dune, author: Herbert, year: 1965, status: checked-out",
        ))
        .stdout(predicate::str::contains("Book with id 1 removed."))
        .stdout(predicate::str::contains("The library is empty."));

    assert_eq!(fs::read_to_string(temp.path().join("library.json")).unwrap(), "[]");
}

#[test]
fn test_invalid_input_keeps_running() {
    let temp = TempDir::new().unwrap();

    bookshelf_cmd(&temp)
        .write_stdin("7\n1\nDune\nHerbert\nsoon\n2\nx\n3\nasimov\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice. Please try again."))
        .stdout(predicate::str::contains("Year must be a number."))
        .stdout(predicate::str::contains("Invalid input, id must be a number."))
        .stdout(predicate::str::contains("No books found."));

    assert!(!temp.path().join("library.json").exists());
}

#[test]
fn test_corrupt_catalog_is_fatal() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("library.json"), "not json").unwrap();

    bookshelf_cmd(&temp)
        .write_stdin("6\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Loading library.json"));
}
