//! End-to-end CLI tests for chatlens.
//!
//! These tests run the actual binary against fixture uploads and check
//! the files it writes.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use std::fs;
use std::io::{Cursor, Write};
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

// ============================================================================
// Test Fixtures
// ============================================================================

const TRANSCRIPT: &str = "\
15/01/2024, 10:30 - Messages and calls are end-to-end encrypted.
15/01/2024, 10:30 - Alice: Hello!
15/01/2024, 10:31 - Alice: How are you?
15/01/2024, 10:32 - Bob: <Media omitted>
16/01/2024, 09:00 - Bob: PTT-20240116-WA0002.opus (file attached)
16/01/2024, 09:01 - Alice: Nice voice note";

fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    fs::write(dir.path().join("chat.txt"), TRANSCRIPT).unwrap();
    fs::write(dir.path().join("empty.txt"), "").unwrap();
    fs::write(dir.path().join("notes.txt"), "just some notes\nnothing else").unwrap();
    fs::write(dir.path().join("chat.pdf"), b"%PDF-1.4").unwrap();

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.start_file("_chat.txt", options).unwrap();
    writer.write_all(TRANSCRIPT.as_bytes()).unwrap();
    writer.start_file("IMG-20240115-WA0001.jpg", options).unwrap();
    writer.write_all(b"jpeg").unwrap();
    writer.start_file("PTT-20240116-WA0002.opus", options).unwrap();
    writer.write_all(b"opus").unwrap();
    let bytes = writer.finish().unwrap().into_inner();
    fs::write(dir.path().join("chat.zip"), bytes).unwrap();

    dir
}

fn chatlens_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatlens"));
    Command::from_std(cmd)
}

fn fixture(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_text_upload_to_csv() {
    let fixtures = setup_fixtures();
    let output = output_path(&fixtures, "out.csv");

    chatlens_cmd()
        .args([&fixture(&fixtures, "chat.txt"), "-o", output.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Done"))
        .stdout(predicate::str::contains("Found 5 messages"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("Author;Content\n"));
    assert!(content.contains("Alice;\"Hello!\nHow are you?\""));
    assert!(!content.contains("end-to-end encrypted"));
}

#[test]
fn test_zip_upload_links_media() {
    let fixtures = setup_fixtures();
    let output = output_path(&fixtures, "out.json");

    chatlens_cmd()
        .args([&fixture(&fixtures, "chat.zip"), "-o", output.to_str().unwrap(), "-m"])
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let items = value.as_array().unwrap();

    let bob_media: Vec<_> = items.iter().filter(|m| m["author"] == "Bob").collect();
    assert_eq!(bob_media[0]["type"], "image");
    assert_eq!(bob_media[0]["fileName"], "IMG-20240115-WA0001.jpg");
    assert_eq!(bob_media[1]["type"], "audio");
}

#[test]
fn test_format_flag_adjusts_default_output() {
    let fixtures = setup_fixtures();

    chatlens_cmd()
        .current_dir(fixtures.path())
        .args(["chat.txt", "-f", "jsonl"])
        .assert()
        .success();

    let content = fs::read_to_string(fixtures.path().join("chat.jsonl")).unwrap();
    assert_eq!(content.lines().count(), 4);
}

// ============================================================================
// Filters and flags
// ============================================================================

#[test]
fn test_filters() {
    let fixtures = setup_fixtures();
    let output = output_path(&fixtures, "out.jsonl");

    chatlens_cmd()
        .args([
            &fixture(&fixtures, "chat.txt"),
            "-o",
            output.to_str().unwrap(),
            "--after",
            "2024-01-16",
            "--from",
            "alice",
            "-t",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Filtered:  1 messages"));

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains(r#""timestamp":"16/01/2024, 09:01""#));
}

#[test]
fn test_kind_filter_and_no_merge() {
    let fixtures = setup_fixtures();
    let output = output_path(&fixtures, "out.csv");

    chatlens_cmd()
        .args([
            &fixture(&fixtures, "chat.txt"),
            "-o",
            output.to_str().unwrap(),
            "--kind",
            "text",
            "--no-merge",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping merge"));

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().count(), 4);
    assert!(!content.contains("PTT-"));
}

#[test]
fn test_ask_writes_request() {
    let fixtures = setup_fixtures();
    let output = output_path(&fixtures, "out.csv");
    let request = output_path(&fixtures, "question.json");

    chatlens_cmd()
        .env_remove("CHATLENS_API_KEY")
        .args([
            &fixture(&fixtures, "chat.zip"),
            "-o",
            output.to_str().unwrap(),
            "--ask",
            "Who sent the photo?",
            "--request-out",
            request.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 images"));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&request).unwrap()).unwrap();
    assert_eq!(value["query"], "Who sent the photo?");
    assert!(value["chatLog"].as_str().unwrap().contains("Bob: <attached: IMG-20240115-WA0001.jpg>"));
    assert!(
        value["images"][0]["dataUri"]
            .as_str()
            .unwrap()
            .starts_with("data:image/jpeg;base64,")
    );
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn test_empty_transcript_fails() {
    let fixtures = setup_fixtures();

    for name in ["empty.txt", "notes.txt"] {
        chatlens_cmd()
            .current_dir(fixtures.path())
            .arg(fixture(&fixtures, name))
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "The file appears to be empty or in an unsupported format.",
            ));
    }
}

#[test]
fn test_unsupported_upload_fails() {
    let fixtures = setup_fixtures();

    chatlens_cmd()
        .current_dir(fixtures.path())
        .arg(fixture(&fixtures, "chat.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported upload"));
}

#[test]
fn test_missing_file_fails() {
    chatlens_cmd()
        .arg("/nonexistent/chat.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_invalid_arguments() {
    let fixtures = setup_fixtures();

    chatlens_cmd()
        .args([&fixture(&fixtures, "chat.txt"), "--after", "15/01/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));

    chatlens_cmd()
        .args([&fixture(&fixtures, "chat.txt"), "--kind", "sticker"])
        .assert()
        .failure();

    chatlens_cmd()
        .args([&fixture(&fixtures, "chat.txt"), "-f", "xml"])
        .assert()
        .failure();
}

#[test]
fn test_help_and_version() {
    chatlens_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--ask"));

    chatlens_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
