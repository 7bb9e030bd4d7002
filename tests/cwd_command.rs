#![cfg(unix)]

use predicates::prelude::{PredicateBooleanExt, predicate};

#[path = "support/mod.rs"]
mod support;
use support::{cura_sync, fresh_cura_dir};

#[test]
fn cwd_prints_exactly_the_directory() {
    let (td, dir) = fresh_cura_dir();

    cura_sync(&dir, td.path())
        .arg("cwd")
        .assert()
        .success()
        .stdout(format!("{}\n", dir.display()));
}

#[test]
fn no_subcommand_prints_banner_and_help() {
    let (td, dir) = fresh_cura_dir();

    cura_sync(&dir, td.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(dir.display().to_string()))
        .stdout(predicate::str::contains("not under version control"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn banner_detects_existing_repository() {
    let (td, dir) = fresh_cura_dir();
    git2::Repository::init(&dir).unwrap();

    cura_sync(&dir, td.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("git repository"))
        .stdout(predicate::str::contains("not under version control").not());
}

#[test]
fn help_subcommand_prints_usage() {
    let (td, dir) = fresh_cura_dir();

    cura_sync(&dir, td.path())
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("Status:").not());
}
