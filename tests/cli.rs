//! Integration tests driving the docsift binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;
use tempfile::TempDir;

static FIXTURE_DIR: OnceLock<TempDir> = OnceLock::new();

fn docsift() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_docsift"));
    // Keep user config out of the tests
    cmd.env("XDG_CONFIG_HOME", fixture_dir().join("config"))
        .env("HOME", fixture_dir())
        .env_remove("BROWSER")
        .env_remove("RUST_LOG");
    cmd
}

fn corpus_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/corpus.json")
}

fn fixture_dir() -> &'static Path {
    FIXTURE_DIR
        .get_or_init(|| TempDir::new().expect("Failed to create temp dir"))
        .path()
}

/// Build the fixture index once and return its path
fn index_path() -> PathBuf {
    static INDEX: OnceLock<PathBuf> = OnceLock::new();
    INDEX
        .get_or_init(|| {
            let path = fixture_dir().join("search-index.json");
            let output = docsift()
                .arg("build")
                .arg(corpus_path())
                .arg("--output")
                .arg(&path)
                .arg("--quiet")
                .output()
                .expect("Failed to run docsift build");
            assert_success(&output, "docsift build");
            path
        })
        .clone()
}

fn assert_success(output: &Output, what: &str) {
    if !output.status.success() {
        panic!(
            "{} failed: {}\nstdout: {}",
            what,
            String::from_utf8_lossy(&output.stderr),
            String::from_utf8_lossy(&output.stdout)
        );
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_build_writes_index() {
    let index = index_path();
    let content = std::fs::read_to_string(&index).unwrap();
    assert!(content.starts_with(r#"{"bigrams":{"#));
    assert!(content.contains(r#""weights":["#));
}

#[test]
fn test_build_js_module() {
    let path = fixture_dir().join("js").join("search-index.js");
    let output = docsift()
        .arg("build")
        .arg(corpus_path())
        .arg("-o")
        .arg(&path)
        .arg("--quiet")
        .output()
        .unwrap();
    assert_success(&output, "docsift build js");

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("export default {"));
    assert!(content.trim_end().ends_with("};"));
}

#[test]
fn test_query_json() {
    let output = docsift()
        .args(["query", "fetch", "--json", "-n", "2", "-i"])
        .arg(index_path())
        .output()
        .unwrap();
    assert_success(&output, "docsift query");

    let hits: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let hits = hits.as_array().unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["url"], "/ActiveSupport/Cache/Store.html#method-i-fetch");
    assert_eq!(hits[0]["owner"], "ActiveSupport::Cache::Store");
}

#[test]
fn test_query_plain_no_results() {
    let output = docsift()
        .args(["query", "qqqq", "--no-color", "-i"])
        .arg(index_path())
        .output()
        .unwrap();
    assert_success(&output, "docsift query");
    assert_eq!(stdout(&output).trim(), "No results.");
}

#[test]
fn test_query_plain_output() {
    let output = docsift()
        .args(["query", "--no-color", "-i"])
        .arg(index_path())
        .arg("HWIA")
        .output()
        .unwrap();
    assert_success(&output, "docsift query");
    let first = stdout(&output).lines().next().unwrap_or_default().to_string();
    assert!(first.starts_with("ActiveSupport::HashWithIndifferentAccess  "));
    assert!(first.ends_with("/ActiveSupport/HashWithIndifferentAccess.html"));
}

#[test]
fn test_search_lucky_prints_url() {
    let output = docsift()
        .args(["search", "--lucky", "fetch", "-i"])
        .arg(index_path())
        .output()
        .unwrap();
    assert_success(&output, "docsift search --lucky");
    assert_eq!(
        stdout(&output).trim(),
        "/ActiveSupport/Cache/Store.html#method-i-fetch"
    );
}

#[test]
fn test_search_deep_link() {
    let output = docsift()
        .args(["search", "--link", "https://api.example/?q=controller%5Fname", "-i"])
        .arg(index_path())
        .output()
        .unwrap();
    assert_success(&output, "docsift search --link");
    assert_eq!(
        stdout(&output).trim(),
        "/ActionController/Metal.html#method-c-controller_name"
    );
}

#[test]
fn test_stats() {
    let output = docsift()
        .arg("stats")
        .arg(index_path())
        .output()
        .unwrap();
    assert_success(&output, "docsift stats");

    let text = stdout(&output);
    assert!(text.contains("Entries:          10"));
    assert!(text.contains("  Members:        5"));
}

#[test]
fn test_missing_index_fails() {
    let output = docsift()
        .args(["stats", "does-not-exist.json"])
        .current_dir(fixture_dir())
        .output()
        .unwrap();
    assert!(!output.status.success());
}
