//! Telegram exports: plain-text `DD.MM.YYYY HH:MM:SS - Name: text` lines and
//! Telegram Desktop JSON (`{"messages": [{date, from, text}, ...]}` or a bare
//! array of such objects).

use crate::{finish_message, preview, timestamp};
use analysis_core::{ChatMessage, Diagnostic, DiagnosticKind, Platform};
use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub(crate) static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{4}) (\d{1,2}):(\d{2}):(\d{2}) - ([^:]+): (.*)$")
        .expect("telegram header regex")
});

/// True when the raw input is a Telegram Desktop JSON export.
pub(crate) fn looks_like_json_export(raw: &str) -> bool {
    let trimmed = raw.trim_start();
    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        return false;
    }
    let Ok(value) = serde_json::from_str::<Value>(raw) else {
        return false;
    };
    message_items(&value).is_some_and(|items| {
        items
            .first()
            .and_then(Value::as_object)
            .is_some_and(|obj| obj.contains_key("from") || obj.contains_key("date"))
    })
}

fn message_items(value: &Value) -> Option<&Vec<Value>> {
    value
        .get("messages")
        .and_then(Value::as_array)
        .or_else(|| value.as_array())
}

pub(crate) fn parse(raw: &str) -> (Vec<ChatMessage>, Vec<Diagnostic>) {
    if looks_like_json_export(raw) {
        return parse_json(raw);
    }
    parse_text(raw)
}

fn parse_text(raw: &str) -> (Vec<ChatMessage>, Vec<Diagnostic>) {
    let mut messages = Vec::new();
    let mut diagnostics = Vec::new();
    let mut current: Option<(String, String, Option<DateTime<Utc>>)> = None;

    for line in raw.lines() {
        if let Some(caps) = HEADER.captures(line) {
            if let Some((sender, text, ts)) = current.take() {
                messages.push(finish_message(&sender, text, ts, Platform::Telegram));
            }
            let ts = (|| {
                let day: u32 = caps[1].parse().ok()?;
                let month: u32 = caps[2].parse().ok()?;
                let year: i32 = caps[3].parse().ok()?;
                let date = timestamp::resolve_date_day_first(day, month, year)?;
                timestamp::assemble(
                    date,
                    caps[4].parse().ok()?,
                    caps[5].parse().ok()?,
                    caps[6].parse().ok()?,
                )
            })();
            if ts.is_none() {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::ParserSkip,
                    format!("unparsable timestamp: {}", preview(line)),
                ));
            }
            current = Some((caps[7].to_string(), caps[8].to_string(), ts));
        } else if line.trim().is_empty() {
            continue;
        } else if let Some((_, text, _)) = current.as_mut() {
            text.push('\n');
            text.push_str(line);
        } else {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::ParserSkip,
                format!("orphan continuation: {}", preview(line)),
            ));
        }
    }
    if let Some((sender, text, ts)) = current.take() {
        messages.push(finish_message(&sender, text, ts, Platform::Telegram));
    }

    (messages, diagnostics)
}

fn parse_json(raw: &str) -> (Vec<ChatMessage>, Vec<Diagnostic>) {
    let mut messages = Vec::new();
    let mut diagnostics = Vec::new();

    let Ok(value) = serde_json::from_str::<Value>(raw) else {
        return (messages, diagnostics);
    };
    let Some(items) = message_items(&value) else {
        return (messages, diagnostics);
    };

    for item in items {
        let Some(obj) = item.as_object() else {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::ParserSkip,
                "non-object entry in messages array",
            ));
            continue;
        };
        let Some(sender) = obj.get("from").and_then(Value::as_str) else {
            // Service messages carry no sender.
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::ParserSkip,
                "message entry without sender",
            ));
            continue;
        };
        let ts = obj.get("date").and_then(Value::as_str).and_then(parse_date);
        let text = extract_text(item);
        let json_media = obj.contains_key("photo")
            || obj.contains_key("file")
            || obj.contains_key("media_type");

        let mut message = finish_message(sender, text, ts, Platform::Telegram);
        message.is_media |= json_media;
        messages.push(message);
    }

    (messages, diagnostics)
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Telegram JSON renders formatted text as an array of plain strings and
/// entity objects; flatten both shapes.
fn extract_text(item: &Value) -> String {
    match item.get("text") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(parts)) => parts
            .iter()
            .map(|part| match part {
                Value::String(text) => text.as_str(),
                other => other.get("text").and_then(Value::as_str).unwrap_or(""),
            })
            .collect(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_text_export() {
        let raw = "31.12.2023 22:30:00 - Alice: hello\n31.12.2023 22:31:05 - Bob: hi";
        let (messages, _) = parse(raw);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, "Alice");
        assert_eq!(messages[1].timestamp.unwrap().second(), 5);
        assert!(messages.iter().all(|m| m.platform == Platform::Telegram));
    }

    #[test]
    fn test_json_export_object_form() {
        let raw = r#"{"name": "chat", "messages": [
            {"date": "2023-12-31T22:30:00", "from": "Alice", "text": "hello"},
            {"date": "2023-12-31T22:31:00", "from": "Bob", "text": "hi"}
        ]}"#;
        let (messages, _) = parse(raw);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "hello");
        assert_eq!(messages[0].timestamp.unwrap().hour(), 22);
    }

    #[test]
    fn test_json_entity_array_text_flattens() {
        let raw = r#"[{"date": "2023-12-31T22:30:00", "from": "Alice",
            "text": ["see ", {"type": "link", "text": "this"}, " now"]}]"#;
        let (messages, _) = parse(raw);
        assert_eq!(messages[0].text, "see this now");
    }

    #[test]
    fn test_json_service_entry_is_diagnosed() {
        let raw = r#"{"messages": [
            {"date": "2023-12-31T22:30:00", "text": "joined the group"},
            {"date": "2023-12-31T22:31:00", "from": "Bob", "text": "hi"}
        ]}"#;
        let (messages, diagnostics) = parse(raw);
        assert_eq!(messages.len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::ParserSkip);
    }

    #[test]
    fn test_json_photo_marks_media() {
        let raw = r#"[{"date": "2023-12-31T22:30:00", "from": "Alice",
            "photo": "photos/file_1.jpg", "text": ""}]"#;
        let (messages, _) = parse(raw);
        assert!(messages[0].is_media);
    }
}
