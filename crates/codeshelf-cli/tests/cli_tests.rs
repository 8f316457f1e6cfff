//! CLI integration tests
//!
//! Run the built `codeshelf` binary against a scratch database.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct Shelf {
    _dir: TempDir,
    db_path: PathBuf,
}

impl Shelf {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("store.db");
        Self { _dir: dir, db_path }
    }

    fn run(&self, args: &[&str]) -> Output {
        run_in(&self.db_path, args)
    }

    fn stdout(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "codeshelf {:?} failed. Stderr: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}

fn run_in(db_path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_codeshelf"))
        .env("CODESHELF_LOG", "test")
        .env_remove("CODESHELF_DB")
        .arg("--db")
        .arg(db_path)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_create_then_list_then_toggle_then_favorites() {
    let shelf = Shelf::new();

    let created = shelf.stdout(&["create", "--title", "foo", "--code", "print(1)", "--lang", "py"]);
    assert_eq!(created.trim(), "Created snippet 1");

    let listed = shelf.stdout(&["list", "--lang", "py"]);
    assert_eq!(listed, "Filter: py\n   1   foo [py]\n");

    let toggled = shelf.stdout(&["toggle", "1"]);
    assert_eq!(toggled.trim(), "Snippet 1 favorite: on");

    let favorites = shelf.stdout(&["list", "--favorites"]);
    assert_eq!(favorites, "Filter: Favorites\n   1 * foo [py]\n");
}

#[test]
fn test_list_json_reports_label_and_snippets() {
    let shelf = Shelf::new();
    shelf.stdout(&["create", "--title", "needle", "--code", "x"]);
    shelf.stdout(&["create", "--title", "hay", "--code", "y"]);

    let json = shelf.stdout(&["list", "--search", "needle", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["active_filter"], "Search: needle");
    assert_eq!(value["snippets"].as_array().unwrap().len(), 1);
    assert_eq!(value["snippets"][0]["title"], "needle");
    assert_eq!(value["snippets"][0]["is_favorite"], false);
}

#[test]
fn test_create_with_blank_title_exits_2_and_adds_nothing() {
    let shelf = Shelf::new();

    let output = shelf.run(&["create", "--title", "   ", "--code", "x"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("title:"));

    assert_eq!(shelf.stdout(&["list"]), "No snippets found.\n");
}

#[test]
fn test_show_missing_exits_3() {
    let shelf = Shelf::new();

    let output = shelf.run(&["show", "42"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Snippet not found: 42"));
}

#[test]
fn test_edit_prefills_unspecified_fields() {
    let shelf = Shelf::new();
    shelf.stdout(&["create", "--title", "old", "--code", "keep()", "--lang", "go"]);
    shelf.stdout(&["toggle", "1"]);

    assert_eq!(shelf.stdout(&["edit", "1", "--title", "new"]).trim(), "Updated snippet 1");

    let shown = shelf.stdout(&["show", "1"]);
    assert_eq!(shown, "#1 new\nlanguage: go\nfavorite: yes\n\nkeep()\n");
}

#[test]
fn test_edit_missing_exits_3() {
    let shelf = Shelf::new();
    let output = shelf.run(&["edit", "5", "--title", "x"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_toggle_missing_succeeds_without_change() {
    let shelf = Shelf::new();
    let output = shelf.stdout(&["toggle", "8"]);
    assert_eq!(output.trim(), "Snippet 8 not found; nothing changed");
}

#[test]
fn test_delete_requires_confirmation() {
    let shelf = Shelf::new();
    shelf.stdout(&["create", "--title", "bye", "--code", "rm"]);

    let preview = shelf.stdout(&["delete", "1"]);
    assert!(preview.contains("Re-run with --yes"));
    assert!(shelf.stdout(&["list"]).contains("bye"));

    assert_eq!(shelf.stdout(&["delete", "1", "--yes"]).trim(), "Deleted snippet 1");
    assert_eq!(
        shelf.stdout(&["delete", "1", "--yes"]).trim(),
        "Snippet 1 was already gone"
    );

    let output = shelf.run(&["delete", "1"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_unknown_log_profile_exits_2() {
    let shelf = Shelf::new();
    let output = shelf.run(&["--log", "loud", "list"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("loud"));
}

#[test]
fn test_db_path_from_environment() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("env.db");

    let output = Command::new(env!("CARGO_BIN_EXE_codeshelf"))
        .env("CODESHELF_LOG", "test")
        .env("CODESHELF_DB", &db_path)
        .args(["create", "--title", "t", "--code", "c"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM snippets", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_default_log_profile_has_no_debug_output() {
    let shelf = Shelf::new();

    let output = Command::new(env!("CARGO_BIN_EXE_codeshelf"))
        .env_remove("CODESHELF_LOG")
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(&shelf.db_path)
        .args(["create", "--title", "t", "--code", "c"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Created snippet 1");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("DEBUG"), "unexpected debug output: {}", stderr);
    for line in stderr.lines() {
        let event: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(event["level"], "INFO");
    }
}
