//! Chat export parsing.
//!
//! Auto-detects the source platform of a raw transcript and yields the
//! canonical message sequence. The parser is total on any UTF-8 input: it
//! never errors on content, only on invalid encoding. Malformed lines merge
//! into the previous message as continuations or become diagnostics; they
//! are never silently lost.

use analysis_core::{AnalysisError, ChatMessage, Diagnostic, Platform};
use chrono::{DateTime, Utc};

mod detect;
mod discord;
mod generic;
mod imessage;
mod telegram;
mod timestamp;
mod whatsapp;

/// Result of one parse run.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedConversation {
    pub format: Platform,
    pub messages: Vec<ChatMessage>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Substrings that mark a line as a media placeholder, matched
/// case-insensitively.
const MEDIA_MARKERS: &[&str] = &[
    "<media omitted>",
    "image omitted",
    "video omitted",
    "audio omitted",
    "sticker omitted",
    "gif omitted",
    "document omitted",
    "(file attached)",
    "[photo]",
    "[sticker]",
    "[video]",
    "[voice message]",
];

/// Parse a raw transcript, detecting the format unless a hint pins it.
pub fn parse(raw: &str, hint: Option<Platform>) -> ParsedConversation {
    let format = hint.unwrap_or_else(|| detect::detect_format(raw));
    let (messages, mut diagnostics) = match format {
        Platform::Whatsapp => whatsapp::parse(raw),
        Platform::Telegram => telegram::parse(raw),
        Platform::Discord => discord::parse(raw),
        Platform::Imessage => imessage::parse(raw),
        Platform::Generic => generic::parse(raw),
    };

    if messages.iter().any(|m| m.timestamp.is_some()) {
        diagnostics.push(Diagnostic::new(
            analysis_core::DiagnosticKind::TimezoneAssumedUtc,
            "export carries no zone information; naive timestamps interpreted as UTC",
        ));
    }

    tracing::debug!(
        format = format.as_str(),
        messages = messages.len(),
        diagnostics = diagnostics.len(),
        "parsed transcript"
    );

    ParsedConversation {
        format,
        messages,
        diagnostics,
    }
}

/// Parse from raw bytes. The only fatal parser error is invalid UTF-8.
pub fn parse_bytes(raw: &[u8], hint: Option<Platform>) -> Result<ParsedConversation, AnalysisError> {
    let text = std::str::from_utf8(raw).map_err(|_| AnalysisError::BadEncoding)?;
    Ok(parse(text, hint))
}

/// Serialise messages in the Generic format. `parse(to_generic(m))`
/// reproduces the same sender/text sequence.
pub fn to_generic(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.sender, m.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build a canonical message: trims the sender, strips direction marks the
/// exporters embed, and flags media placeholders.
pub(crate) fn finish_message(
    sender: &str,
    text: String,
    timestamp: Option<DateTime<Utc>>,
    platform: Platform,
) -> ChatMessage {
    let text = text
        .replace(['\u{200e}', '\u{200f}'], "")
        .trim()
        .to_string();
    let is_media = {
        let lowered = text.to_lowercase();
        MEDIA_MARKERS.iter().any(|marker| lowered.contains(marker))
    };
    ChatMessage {
        timestamp,
        sender: sender.trim().to_string(),
        text,
        platform,
        is_media,
    }
}

/// Short prefix of a line for diagnostics, safe on any UTF-8.
pub(crate) fn preview(line: &str) -> String {
    line.chars().take(40).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::DiagnosticKind;
    use chrono::Timelike;

    #[test]
    fn test_whatsapp_minimal_transcript() {
        let raw = "12/31/2023, 10:30 PM - Alice: I'm feeling great today! 😊\n\
                   12/31/2023, 10:31 PM - Bob: Awesome!";
        let parsed = parse(raw, None);

        assert_eq!(parsed.format, Platform::Whatsapp);
        assert_eq!(parsed.messages.len(), 2);
        assert_eq!(parsed.messages[0].sender, "Alice");
        assert_eq!(parsed.messages[0].text, "I'm feeling great today! 😊");
        assert_eq!(parsed.messages[1].sender, "Bob");
        let ts = parsed.messages[0].timestamp.unwrap();
        assert_eq!((ts.hour(), ts.minute()), (22, 30));
    }

    #[test]
    fn test_timezone_assumption_is_diagnosed() {
        let raw = "12/31/2023, 10:30 PM - Alice: hello there friend";
        let parsed = parse(raw, None);
        assert!(parsed
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::TimezoneAssumedUtc));
    }

    #[test]
    fn test_unknown_shape_falls_back_to_generic() {
        let raw = "Alice: hello\nBob: hi there\nAlice: how are you";
        let parsed = parse(raw, None);
        assert_eq!(parsed.format, Platform::Generic);
        assert_eq!(parsed.messages.len(), 3);
        assert!(parsed.messages.iter().all(|m| m.timestamp.is_none()));
    }

    #[test]
    fn test_hint_overrides_detection() {
        let raw = "Alice: hello\nBob: hi";
        let parsed = parse(raw, Some(Platform::Generic));
        assert_eq!(parsed.format, Platform::Generic);
    }

    #[test]
    fn test_empty_input_yields_empty_sequence() {
        let parsed = parse("", None);
        assert_eq!(parsed.format, Platform::Generic);
        assert!(parsed.messages.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_the_only_fatal_error() {
        let err = parse_bytes(&[0xff, 0xfe, 0x41], None).unwrap_err();
        assert!(matches!(err, AnalysisError::BadEncoding));

        let ok = parse_bytes(b"Alice: hello", None).unwrap();
        assert_eq!(ok.messages.len(), 1);
    }

    #[test]
    fn test_generic_round_trip() {
        let raw = "Alice: hello there\nBob: hi back\nAlice: multi word reply";
        let first = parse(raw, None);
        let serialised = to_generic(&first.messages);
        let second = parse(&serialised, Some(Platform::Generic));

        let pairs = |p: &ParsedConversation| {
            p.messages
                .iter()
                .map(|m| (m.sender.clone(), m.text.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(pairs(&first), pairs(&second));
    }

    #[test]
    fn test_media_placeholder_flags() {
        let raw = "12/31/2023, 10:30 PM - Alice: <Media omitted>\n\
                   12/31/2023, 10:31 PM - Bob: real text";
        let parsed = parse(raw, None);
        assert!(parsed.messages[0].is_media);
        assert_eq!(parsed.messages[0].text, "<Media omitted>");
        assert!(!parsed.messages[1].is_media);
    }
}
