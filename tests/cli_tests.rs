//! Integration tests for the wikiform CLI
//!
//! These tests run the wikiform binary and verify output, exit codes, and
//! the JSON error envelope.

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use tempfile::tempdir;

/// Get a Command for wikiform
fn wikiform() -> Command {
    cargo_bin_cmd!("wikiform")
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    wikiform()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: wikiform"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("normalize"));
}

#[test]
fn test_version_flag() {
    wikiform()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wikiform"));
}

#[test]
fn test_subcommand_help() {
    wikiform()
        .args(["parse", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Parse page text into its structured record",
        ));
}

// ============================================================================
// Exit codes
// ============================================================================

#[test]
fn test_unknown_format_exit_code_2() {
    wikiform()
        .args(["--format", "invalid", "parse"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_file_exit_code_1() {
    wikiform()
        .args(["parse", "/no/such/file"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_invalid_document_exit_code_3() {
    wikiform()
        .args(["generate"])
        .write_stdin("[1, 2, 3]")
        .assert()
        .code(3);
}

#[test]
fn test_json_error_envelope() {
    wikiform()
        .args(["--format", "json", "generate"])
        .write_stdin("not a document")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"invalid_document\""));
}

// ============================================================================
// parse
// ============================================================================

#[test]
fn test_parse_stdin_json() {
    wikiform()
        .args(["--format", "json", "parse"])
        .write_stdin(".schema Book\n\n    #!yaml/schema\n    author: AK\n\nHello\nthere?")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"item_type\": \"Book\""))
        .stdout(predicate::str::contains("\"author\": \"AK\""))
        .stdout(predicate::str::contains("\"body\": \"Hello\\nthere?\""));
}

#[test]
fn test_parse_file_human() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("page.txt");
    std::fs::write(&path, "s1::---\nHello\n\ns1::---\nThere\n").unwrap();

    wikiform()
        .arg("parse")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("item type: Article"))
        .stdout(predicate::str::contains("sections: s1 (x2)"));
}

// ============================================================================
// generate
// ============================================================================

#[test]
fn test_generate_from_json() {
    wikiform()
        .arg("generate")
        .write_stdin(r#"{"item_type": "Book", "body": "X"}"#)
        .assert()
        .success()
        .stdout(predicate::str::diff(".schema Book\n\nX\n"));
}

#[test]
fn test_generate_from_yaml() {
    wikiform()
        .arg("generate")
        .write_stdin("item_type: Book\nbody: X\n")
        .assert()
        .success()
        .stdout(predicate::str::diff(".schema Book\n\nX\n"));
}

#[test]
fn test_generate_omits_default_item_type() {
    wikiform()
        .arg("generate")
        .write_stdin(r#"{"body": "X"}"#)
        .assert()
        .success()
        .stdout(predicate::str::diff("X\n"));
}

// ============================================================================
// normalize
// ============================================================================

#[test]
fn test_normalize_canonicalizes_sections() {
    wikiform()
        .arg("normalize")
        .write_stdin("s1::---\nHello\n\ns1::---\nThere\n")
        .assert()
        .success()
        .stdout(predicate::str::diff("s1::---\n\nHello\n\ns1::---\n\nThere\n"));
}

#[test]
fn test_normalize_is_stable_on_canonical_input() {
    let canonical = ".schema Book\n\n    #!yaml/schema\n    author: AK\n\nHello\nthere?";
    wikiform()
        .arg("normalize")
        .write_stdin(canonical)
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", canonical)));
}

// ============================================================================
// metadata
// ============================================================================

#[test]
fn test_metadata_extracts_recognized_keys() {
    wikiform()
        .args(["metadata", "--key", "pub", "--key", "schema"])
        .write_stdin(".pub Test\n.schema Book\n\nHello")
        .assert()
        .success()
        .stdout(predicate::str::diff("pub: Test\nschema: Book\n"));
}

#[test]
fn test_metadata_bare_key_is_a_flag_in_json() {
    wikiform()
        .args(["--format", "json", "metadata", "--key", "pub"])
        .write_stdin(".pub\nHello")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pub\": true"));
}

#[test]
fn test_metadata_requires_a_key() {
    wikiform()
        .arg("metadata")
        .write_stdin(".pub\nHello")
        .assert()
        .code(2);
}

// ============================================================================
// describe
// ============================================================================

#[test]
fn test_describe_strips_structure() {
    wikiform()
        .arg("describe")
        .write_stdin(".schema Book\n\n    #!yaml/schema\n    author: AK\n\nThe opening line.\nMore text.")
        .assert()
        .success()
        .stdout(predicate::str::diff("The opening line.\n"));
}

#[test]
fn test_describe_honors_length() {
    wikiform()
        .args(["describe", "--length", "20"])
        .write_stdin("word ".repeat(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("..."));
}
