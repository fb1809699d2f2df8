#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("popular"))
        .stdout(predicate::str::contains("search"));
}

#[test]
fn test_movie_missing_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.arg("movie")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_search_missing_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_popular_page_out_of_range() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.args(["popular", "--page", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--page"));
}

#[test]
fn test_popular_without_credentials() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.env_remove("TMDB_API_KEY")
        .env_remove("TMDB_API_TOKEN")
        .arg("--dir")
        .arg(dir.path())
        .arg("popular")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB_API_KEY or TMDB_API_TOKEN"));
}

#[test]
fn test_config_init_writes_defaults() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["config", "init"])
        .assert()
        .success();

    // Assert
    let content = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(content.contains("[tmdb]"));
    assert!(content.contains("language = \"en-US\""));
    assert!(content.contains("debounce_ms = 300"));
}

#[test]
fn test_config_init_refuses_existing_file() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "").unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_completions_bash() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("moviedeck");
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("moviedeck"));
}
