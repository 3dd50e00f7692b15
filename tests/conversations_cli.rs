//! Integration tests for `lexbr conversations`.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

/// Seeds a transcript document with two conversations.
fn seed_conversations(dir: &TempDir) {
    fs::write(
        dir.path().join("conversations.json"),
        json!({
            "1": {
                "title": "Conversa 1",
                "messages": [
                    {
                        "user": "O que é usucapião?",
                        "model": "Usucapião é...",
                        "links": ["https://stj.jus.br/jurisprudencia/456"]
                    }
                ]
            },
            "2": {
                "title": "Contratos",
                "messages": [
                    { "user": "Pergunta pendente" }
                ]
            }
        })
        .to_string(),
    )
    .unwrap();
}

fn read_doc(dir: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(dir.join("conversations.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_conversations_list() {
    let dir = TempDir::new().unwrap();
    seed_conversations(&dir);

    cargo_bin_cmd!("lexbr")
        .env("LEXBR_HOME", dir.path())
        .args(["conversations", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* 1  Conversa 1  (1 turns)"))
        .stdout(predicate::str::contains("  2  Contratos  (1 turns)"));
}

#[test]
fn test_conversations_show_with_links() {
    let dir = TempDir::new().unwrap();
    seed_conversations(&dir);

    cargo_bin_cmd!("lexbr")
        .env("LEXBR_HOME", dir.path())
        .args(["conversations", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### You"))
        .stdout(predicate::str::contains("O que é usucapião?"))
        .stdout(predicate::str::contains("### Assistant"))
        .stdout(predicate::str::contains("- https://stj.jus.br/jurisprudencia/456"));
}

#[test]
fn test_conversations_show_marks_pending_turn() {
    let dir = TempDir::new().unwrap();
    seed_conversations(&dir);

    cargo_bin_cmd!("lexbr")
        .env("LEXBR_HOME", dir.path())
        .args(["conversations", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### Assistant (pending)"));
}

#[test]
fn test_conversations_show_missing_id_fails() {
    let dir = TempDir::new().unwrap();
    seed_conversations(&dir);

    cargo_bin_cmd!("lexbr")
        .env("LEXBR_HOME", dir.path())
        .args(["conversations", "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_conversations_new_with_title() {
    let dir = TempDir::new().unwrap();
    seed_conversations(&dir);

    cargo_bin_cmd!("lexbr")
        .env("LEXBR_HOME", dir.path())
        .args(["conversations", "new", "--title", "Tributário"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created conversation 3 (Tributário)"));

    let doc = read_doc(dir.path());
    assert_eq!(doc["3"]["title"], "Tributário");
}

#[test]
fn test_conversations_rename_persists() {
    let dir = TempDir::new().unwrap();
    seed_conversations(&dir);

    cargo_bin_cmd!("lexbr")
        .env("LEXBR_HOME", dir.path())
        .args(["conversations", "rename", "2", "Direito do trabalho"])
        .assert()
        .success();

    let doc = read_doc(dir.path());
    assert_eq!(doc["2"]["title"], "Direito do trabalho");
    // Other conversations untouched.
    assert_eq!(doc["1"]["title"], "Conversa 1");
}

#[test]
fn test_conversations_rename_missing_id_fails() {
    let dir = TempDir::new().unwrap();
    seed_conversations(&dir);

    cargo_bin_cmd!("lexbr")
        .env("LEXBR_HOME", dir.path())
        .args(["conversations", "rename", "99", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_conversations_delete_persists() {
    let dir = TempDir::new().unwrap();
    seed_conversations(&dir);

    cargo_bin_cmd!("lexbr")
        .env("LEXBR_HOME", dir.path())
        .args(["conversations", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted conversation 1"));

    let doc = read_doc(dir.path());
    assert!(doc.get("1").is_none());
    assert!(doc.get("2").is_some());
}

#[test]
fn test_deleting_every_conversation_bootstraps_a_fresh_one() {
    let dir = TempDir::new().unwrap();
    seed_conversations(&dir);

    for id in ["1", "2"] {
        cargo_bin_cmd!("lexbr")
            .env("LEXBR_HOME", dir.path())
            .args(["conversations", "delete", id])
            .assert()
            .success();
    }

    // Never zero conversations: a fresh one exists, with a never-reused id.
    let doc = read_doc(dir.path());
    let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["3"]);
    assert_eq!(doc["3"]["title"], "Conversa 3");
    assert_eq!(doc["3"]["messages"].as_array().unwrap().len(), 0);
}

#[test]
fn test_corrupt_document_degrades_to_bootstrap() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("conversations.json"), "{ not json").unwrap();

    cargo_bin_cmd!("lexbr")
        .env("LEXBR_HOME", dir.path())
        .args(["conversations", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* 1  Conversa 1  (0 turns)"));
}
