//! Integration tests for chatlens.
//!
//! These tests exercise the full pipeline: upload extraction, parsing,
//! filtering, merging and question assembly.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//! ```

use std::io::{Cursor, Write};

use chatlens::analysis::{
    AnalysisRequest, Analyst, AnswerService, ChatStore, JsonFileStore, render_chat_log,
};
use chatlens::archive::ChatExport;
use chatlens::config::{AnalysisConfig, ArchiveConfig};
use chatlens::core::{ChatStats, FilterConfig, apply_filters, merge_consecutive};
use chatlens::{ChatLogParser, MessageType, parse_chat};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

// ============================================================================
// Fixtures
// ============================================================================

const ANDROID_TRANSCRIPT: &str = "\
15/01/2024, 10:30 - Messages and calls are end-to-end encrypted.
15/01/2024, 10:30 - Alice: Good morning!
15/01/2024, 10:31 - Alice: IMG-20240115-WA0001.jpg (file attached)
Sunrise from the balcony
15/01/2024, 10:32 - Bob: <Media omitted>
15/01/2024, 10:33 - Bob: Nice one
16/01/2024, 09:00 - Alice: PTT-20240116-WA0002.opus (file attached)
16/01/2024, 09:05 - Bob: <Media omitted>";

const IOS_TRANSCRIPT: &str = "\
[1/15/24, 10:30:12 AM] Alice: Hey
[1/15/24, 10:31:40 AM] Bob: <attached: 00000002-PHOTO-2024-01-15-10-31-40.jpg>
[1/15/24, 10:32:05 AM] Alice: where is that?
second line
[1/15/24, 10:33:00 PM] Bob: \u{200E}image omitted";

fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

// ============================================================================
// Plain text uploads
// ============================================================================

#[test]
fn test_android_transcript_without_archive() {
    let messages = parse_chat(ANDROID_TRANSCRIPT, &[]);

    // The encryption notice has no "Author:" part and precedes any message.
    assert_eq!(messages.len(), 6);
    assert_eq!(messages[0].author(), "Alice");

    assert_eq!(messages[1].kind(), MessageType::Image);
    assert_eq!(messages[1].file_name(), Some("IMG-20240115-WA0001.jpg"));
    assert_eq!(messages[1].content(), "Sunrise from the balcony");

    assert_eq!(messages[2].kind(), MessageType::MediaMissing);
    assert_eq!(messages[2].content(), "<Media omitted>");
    assert!(messages[2].file_name().is_none());

    assert_eq!(messages[4].kind(), MessageType::Audio);
    assert_eq!(messages[5].kind(), MessageType::MediaMissing);
}

#[test]
fn test_ios_transcript() {
    let messages = parse_chat(IOS_TRANSCRIPT, &["IMG-extra.jpg"]);

    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].timestamp(), "1/15/24, 10:30:12 AM");
    assert_eq!(messages[1].kind(), MessageType::Image);
    assert_eq!(
        messages[1].file_name(),
        Some("00000002-PHOTO-2024-01-15-10-31-40.jpg")
    );
    assert_eq!(messages[2].content(), "where is that?\nsecond line");

    // Unnamed marker takes the queued name; the explicit one above did not.
    assert_eq!(messages[3].kind(), MessageType::Image);
    assert_eq!(messages[3].file_name(), Some("IMG-extra.jpg"));
}

#[test]
fn test_text_upload_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("WhatsApp Chat with Bob.txt");
    std::fs::write(&path, IOS_TRANSCRIPT).unwrap();

    let export = ChatExport::from_path(&path).unwrap();
    assert_eq!(export.name, "WhatsApp Chat with Bob");
    assert!(export.attachments.is_empty());

    let messages = ChatLogParser::new().parse_export(&export);
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[3].kind(), MessageType::MediaMissing);
}

// ============================================================================
// Zip uploads
// ============================================================================

#[test]
fn test_zip_upload_links_queue_in_archive_order() {
    let bytes = build_zip(&[
        ("_chat.txt", ANDROID_TRANSCRIPT.as_bytes()),
        ("IMG-20240115-WA0001.jpg", b"jpeg-bytes"),
        ("VID-20240115-WA0003.mp4", b"mp4"),
        ("PTT-20240116-WA0002.opus", b"opus"),
        ("STK-20240116-WA0004.webp", b"webp"),
    ]);

    let export = ChatExport::from_zip_bytes("chat", &bytes, &ArchiveConfig::default()).unwrap();
    assert_eq!(export.attachments.len(), 4);

    let messages = ChatLogParser::new().parse_export(&export);

    // Explicit names never consume the queue, so the two <Media omitted>
    // markers take the first two archive entries in order.
    assert_eq!(messages[2].kind(), MessageType::Image);
    assert_eq!(messages[2].file_name(), Some("IMG-20240115-WA0001.jpg"));
    assert_eq!(messages[5].kind(), MessageType::Video);
    assert_eq!(messages[5].file_name(), Some("VID-20240115-WA0003.mp4"));

    assert_eq!(
        export.attachment_data("IMG-20240115-WA0001.jpg"),
        Some(&b"jpeg-bytes"[..])
    );
}

#[test]
fn test_zip_upload_from_disk_with_folder() {
    let bytes = build_zip(&[
        ("export/", b""),
        ("__MACOSX/._chat.txt", b"junk"),
        ("export/_chat.txt", IOS_TRANSCRIPT.as_bytes()),
        ("export/IMG-1.jpg", b"x"),
    ]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.zip");
    std::fs::write(&path, bytes).unwrap();

    let export = ChatExport::from_path(&path).unwrap();
    assert_eq!(export.attachments.len(), 1);

    let messages = ChatLogParser::new().parse_export(&export);
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[3].kind(), MessageType::Image);
    assert!(export.attachment(messages[3].file_name().unwrap()).is_some());
}

#[test]
fn test_zip_without_transcript_is_rejected() {
    let bytes = build_zip(&[("IMG-1.jpg", b"x")]);
    let err = ChatExport::from_zip_bytes("chat", &bytes, &ArchiveConfig::default()).unwrap_err();
    assert!(err.is_invalid_format());
}

#[test]
fn test_unsupported_upload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.pdf");
    std::fs::write(&path, b"%PDF-1.4").unwrap();

    let err = ChatExport::from_path(&path).unwrap_err();
    assert!(err.is_unsupported_upload());
}

// ============================================================================
// Post-processing
// ============================================================================

#[test]
fn test_filters_by_date_author_and_kind() {
    let messages = parse_chat(ANDROID_TRANSCRIPT, &[]);

    let day_one = apply_filters(
        messages.clone(),
        &FilterConfig::new().with_date_to("2024-01-15").unwrap(),
    );
    assert_eq!(day_one.len(), 4);

    let alice = apply_filters(messages.clone(), &FilterConfig::new().with_author("alice"));
    assert!(alice.iter().all(|m| m.author() == "Alice"));
    assert_eq!(alice.len(), 3);

    let media = apply_filters(
        messages,
        &FilterConfig::new()
            .with_kind(MessageType::Image)
            .with_kind(MessageType::Audio),
    );
    assert_eq!(media.len(), 2);
}

#[test]
fn test_merge_keeps_media_separate() {
    let text = "[t1] Alice: one\n[t2] Alice: two\n[t3] Alice: <attached: a.jpg>\n[t4] Alice: three";
    let merged = merge_consecutive(parse_chat(text, &[]));

    assert_eq!(merged.len(), 3);
    assert_eq!(merged[0].content(), "one\ntwo");
    assert_eq!(merged[1].kind(), MessageType::Image);
    assert_eq!(merged[2].content(), "three");
}

#[test]
fn test_stats() {
    let stats = ChatStats::collect(&parse_chat(ANDROID_TRANSCRIPT, &[]));
    assert_eq!(stats.total, 6);
    assert_eq!(stats.authors(), vec!["Alice", "Bob"]);
    assert_eq!(stats.missing_media, 2);
    assert_eq!(stats.media(), 2);
    assert_eq!(stats.first_timestamp.as_deref(), Some("15/01/2024, 10:30"));
}

// ============================================================================
// Question assembly
// ============================================================================

#[test]
fn test_question_request_from_zip() {
    let bytes = build_zip(&[
        ("_chat.txt", IOS_TRANSCRIPT.as_bytes()),
        ("00000002-PHOTO-2024-01-15-10-31-40.jpg", b"photo"),
        ("IMG-extra.jpg", b"extra"),
    ]);
    let export = ChatExport::from_zip_bytes("chat", &bytes, &ArchiveConfig::default()).unwrap();
    let messages = ChatLogParser::new().parse_export(&export);

    let config = AnalysisConfig::new("key").with_max_images(1);
    let request = AnalysisRequest::for_chat(
        &messages,
        |name| export.attachment_data(name),
        "Where was the photo taken?",
        &config,
    );

    assert_eq!(request.chat_log, render_chat_log(&messages));
    assert_eq!(request.images.len(), 1);
    assert_eq!(
        request.images[0].file_name,
        "00000002-PHOTO-2024-01-15-10-31-40.jpg"
    );
    assert!(request.images[0].data_uri.starts_with("data:image/jpeg;base64,"));

    let prompt = request.render_prompt();
    assert!(prompt.contains("Chat Log:\n1/15/24, 10:30:12 AM - Alice: Hey\n"));
    assert!(prompt.ends_with("Question:\nWhere was the photo taken?"));
}

// ============================================================================
// Saved sessions
// ============================================================================

struct Echo;

impl AnswerService for Echo {
    fn answer(&self, request: &AnalysisRequest) -> chatlens::Result<String> {
        Ok(format!("re: {}", request.query))
    }
}

#[test]
fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = build_zip(&[
        ("_chat.txt", ANDROID_TRANSCRIPT.as_bytes()),
        ("IMG-20240115-WA0001.jpg", b"jpeg"),
    ]);
    let export = ChatExport::from_zip_bytes("chat", &bytes, &ArchiveConfig::default()).unwrap();
    let messages = ChatLogParser::new().parse_export(&export);

    let mut analyst = Analyst::new(Echo, AnalysisConfig::new("key"));
    analyst.ask(AnalysisRequest::new(render_chat_log(&messages), "who?"));
    {
        let mut store = JsonFileStore::new(dir.path());
        store.save_chat(&export, &messages).unwrap();
        store.save_conversation(analyst.history()).unwrap();
    }

    let store = JsonFileStore::new(dir.path());
    let chat = store.latest_chat().unwrap().unwrap();
    assert_eq!(chat.messages, messages);
    assert_eq!(chat.export.attachment_data("IMG-20240115-WA0001.jpg"), Some(&b"jpeg"[..]));

    let turns = store.latest_conversation().unwrap().unwrap();
    let mut resumed = Analyst::with_history(Echo, AnalysisConfig::new("key"), turns);
    assert_eq!(resumed.last_answer(), Some("re: who?"));
    resumed.ask(AnalysisRequest::new(render_chat_log(&chat.messages), "when?"));
    assert_eq!(resumed.history().len(), 4);
}
