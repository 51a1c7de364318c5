//! Media-marker detection in message bodies.
//!
//! Exporters flag non-text payloads in a handful of ways:
//!
//! - `IMG-20240115-WA0001.jpg (file attached)` (Android, localized phrase)
//! - `(file attached) photo.jpg`
//! - `<attached: 00000012-PHOTO-2024-01-15.jpg>` (iOS)
//! - `<Media omitted>`, `image omitted`, ... (no filename at all)
//! - `This message was deleted` and its translations
//!
//! Every form is anchored at the start of the body, so a user typing
//! "check out photo.jpg" is never mistaken for an attachment. The omitted
//! and deleted phrases must make up the whole body: exporters never put a
//! caption next to them, and "Video omitted from the final cut" is text.
//!
//! The Android form has no delimiter before the file name, and names may
//! contain spaces, so `here is the report.pdf (file attached)` yields the
//! name `here is the report.pdf`. The parser narrows such names down
//! against the archive's file list when one is available.

use std::sync::LazyLock;

use regex::Regex;

use super::bidi::BIDI_CLASS;

/// Localized "(file attached)" phrases.
const ATTACHED_PHRASES: &[&str] = &[
    "file attached",
    "archivo adjunto",
    "fichier joint",
    "Datei angehängt",
    "arquivo anexado",
    "file allegato",
    "файл прикреплён",
    "файл прикреплен",
    "ملف مرفق",
    "dosya ekli",
];

/// Phrases standing in for media the exporter left out.
const OMITTED_PHRASES: &[&str] = &[
    "<Media omitted>",
    "<Médias omis>",
    "<Multimedia omitido>",
    "<Medien ausgeschlossen>",
    "<Mídia oculta>",
    "<Media omessi>",
    "<Без медиафайлов>",
    "<الوسائط محذوفة>",
    "<تم استبعاد الوسائط>",
    "<Medya dahil edilmedi>",
    "image omitted",
    "video omitted",
    "audio omitted",
    "GIF omitted",
    "sticker omitted",
    "document omitted",
    "imagen omitida",
    "video omitido",
    "audio omitido",
    "изображение отсутствует",
    "аудиофайл отсутствует",
    "видео отсутствует",
    "تم استبعاد الصورة",
    "تم استبعاد الفيديو",
    "تم استبعاد الصوت",
];

/// Phrases replacing a deleted message.
const DELETED_PHRASES: &[&str] = &[
    "This message was deleted",
    "You deleted this message",
    "Se eliminó este mensaje",
    "Eliminaste este mensaje",
    "Ce message a été supprimé",
    "Vous avez supprimé ce message",
    "Diese Nachricht wurde gelöscht",
    "Du hast diese Nachricht gelöscht",
    "Это сообщение удалено",
    "Вы удалили это сообщение",
    "تم حذف هذه الرسالة",
    "لقد حذفت هذه الرسالة",
];

/// A recognized media marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatch {
    /// Attachment name spelled out in the body, if any.
    pub file_name: Option<String>,
    /// Body text left after removing the marker, trimmed.
    pub caption: String,
    /// `true` when the marker stands for an attachment whose name has to
    /// come from the archive's file list.
    pub consumes_attachment: bool,
}

impl MarkerMatch {
    fn named(name: &str, caption: &str) -> Self {
        Self {
            file_name: Some(name.trim().to_string()),
            caption: caption.trim().to_string(),
            consumes_attachment: false,
        }
    }

    fn unnamed(caption: &str, consumes_attachment: bool) -> Self {
        Self {
            file_name: None,
            caption: caption.trim().to_string(),
            consumes_attachment,
        }
    }
}

fn alternation(phrases: &[&str]) -> String {
    phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|")
}

struct Patterns {
    name_then_phrase: Regex,
    phrase_then_name: Regex,
    ios_attached: Regex,
    omitted: Regex,
    deleted: Regex,
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| {
    let b = BIDI_CLASS;
    let attached = alternation(ATTACHED_PHRASES);
    let omitted = alternation(OMITTED_PHRASES);
    let deleted = alternation(DELETED_PHRASES);
    let compile = |pattern: String| Regex::new(&pattern).expect("media marker pattern is valid");

    Patterns {
        name_then_phrase: compile(format!(
            r"^(?:{b}|\s)*(?P<name>[^\s<>(].*?\.[A-Za-z0-9]{{1,5}}){b}*\s*\((?i:{attached})\)(?P<caption>.*)$"
        )),
        phrase_then_name: compile(format!(
            r"^(?:{b}|\s)*\((?i:{attached})\)(?:\s+(?P<name>[^\s<>(]+\.[A-Za-z0-9]{{1,5}})(?:\s|$))?(?P<caption>.*)$"
        )),
        ios_attached: compile(format!(
            r"^(?:{b}|\s)*<attached:\s*(?P<name>[^>]*?[^\s>])\s*>(?P<caption>.*)$"
        )),
        omitted: compile(format!(r"^(?:{b}|\s)*(?i:{omitted})\.?(?:{b}|\s)*$")),
        deleted: compile(format!(r"^(?:{b}|\s)*(?i:{deleted})\.?(?:{b}|\s)*$")),
    }
});

/// Detector for the media markers exporters write into message bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaMarker;

impl MediaMarker {
    /// Inspects the start of `body` for a media marker.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatlens::parsing::MediaMarker;
    ///
    /// let m = MediaMarker::detect("(file attached) photo.jpg").unwrap();
    /// assert_eq!(m.file_name.as_deref(), Some("photo.jpg"));
    /// assert_eq!(m.caption, "");
    ///
    /// let m = MediaMarker::detect("<Media omitted>").unwrap();
    /// assert!(m.file_name.is_none());
    /// assert!(m.consumes_attachment);
    ///
    /// assert!(MediaMarker::detect("check out photo.jpg").is_none());
    /// ```
    pub fn detect(body: &str) -> Option<MarkerMatch> {
        let p = &*PATTERNS;

        if let Some(caps) = p.ios_attached.captures(body) {
            return Some(MarkerMatch::named(&caps["name"], &caps["caption"]));
        }

        if let Some(caps) = p.phrase_then_name.captures(body) {
            let caption = &caps["caption"];
            return Some(match caps.name("name") {
                Some(name) => MarkerMatch::named(name.as_str(), caption),
                None => MarkerMatch::unnamed(caption, true),
            });
        }

        if let Some(caps) = p.name_then_phrase.captures(body) {
            return Some(MarkerMatch::named(&caps["name"], &caps["caption"]));
        }

        if p.omitted.is_match(body) {
            return Some(MarkerMatch::unnamed("", true));
        }

        p.deleted
            .is_match(body)
            .then(|| MarkerMatch::unnamed("", false))
    }
}
