//! Attachment classification by file extension.
//!
//! Each media group is a fixed allow-list of extensions. Matching is
//! case-insensitive; anything not on a list is a generic `file`.

use crate::message::MessageType;

/// Image extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "heic", "heif", "tif", "tiff",
];

/// Video extensions.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "mkv", "avi", "3gp", "m4v"];

/// Audio extensions.
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "ogg", "oga", "opus", "wav", "m4a", "aac", "amr", "flac", "weba",
];

/// Returns the lowercased extension of `file_name`, without the dot.
///
/// Names without a dot, or ending in one, have no extension.
///
/// # Example
///
/// ```rust
/// use chatlens::media::extension;
///
/// assert_eq!(extension("PTT-20240115-WA0003.OPUS").as_deref(), Some("opus"));
/// assert_eq!(extension("README"), None);
/// ```
pub fn extension(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let (_, ext) = base.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Classifies an attachment name into a message type.
///
/// # Example
///
/// ```rust
/// use chatlens::MessageType;
/// use chatlens::media::classify_file_name;
///
/// assert_eq!(classify_file_name("photo.JPG"), MessageType::Image);
/// assert_eq!(classify_file_name("clip.mp3"), MessageType::Audio);
/// assert_eq!(classify_file_name("report.pdf"), MessageType::File);
/// ```
pub fn classify_file_name(file_name: &str) -> MessageType {
    let Some(ext) = extension(file_name) else {
        return MessageType::File;
    };
    let ext = ext.as_str();

    if IMAGE_EXTENSIONS.contains(&ext) {
        MessageType::Image
    } else if VIDEO_EXTENSIONS.contains(&ext) {
        MessageType::Video
    } else if AUDIO_EXTENSIONS.contains(&ext) {
        MessageType::Audio
    } else {
        MessageType::File
    }
}

/// Returns the MIME type used when an attachment is sent inline.
pub fn mime_type(file_name: &str) -> &'static str {
    match extension(file_name).as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        Some("tif" | "tiff") => "image/tiff",
        Some("mp3") => "audio/mpeg",
        Some("ogg" | "oga") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("wav") => "audio/wav",
        Some("m4a") => "audio/mp4",
        Some("aac") => "audio/aac",
        Some("amr") => "audio/amr",
        Some("flac") => "audio/flac",
        Some("weba") => "audio/webm",
        Some("mp4" | "m4v") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        Some("3gp") => "video/3gpp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
