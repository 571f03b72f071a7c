//! WhatsApp text exports.
//!
//! `12/31/2023, 10:30 PM - Alice: text` and its regional variants: `.`/`-`
//! date separators, two-digit years, optional seconds, optional AM/PM,
//! optional square brackets around the timestamp.

use crate::{finish_message, preview, timestamp};
use analysis_core::{ChatMessage, Diagnostic, DiagnosticKind, Platform};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub(crate) static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\[?(\d{1,2})[./-](\d{1,2})[./-](\d{2,4}),? (\d{1,2}):(\d{2})(?::(\d{2}))?\s?([AP]M)?\]? [-–] ([^:]+): (.*)$",
    )
    .expect("whatsapp header regex")
});

/// Detection probe. Stricter than the parse grammar: real WhatsApp exports
/// put a comma after the date, which keeps Telegram's dotted text lines from
/// tying with this format during detection.
pub(crate) static DETECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\[?(\d{1,2})[./-](\d{1,2})[./-](\d{2,4}), (\d{1,2}):(\d{2})(?::(\d{2}))?\s?([AP]M)?\]? [-–] [^:]+: ",
    )
    .expect("whatsapp detection regex")
});

pub(crate) fn parse(raw: &str) -> (Vec<ChatMessage>, Vec<Diagnostic>) {
    let mut messages = Vec::new();
    let mut diagnostics = Vec::new();
    let mut current: Option<(String, String, Option<DateTime<Utc>>)> = None;

    for line in raw.lines() {
        if let Some(caps) = HEADER.captures(line) {
            if let Some((sender, text, ts)) = current.take() {
                messages.push(finish_message(&sender, text, ts, Platform::Whatsapp));
            }
            let ts = header_timestamp(&caps);
            if ts.is_none() {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::ParserSkip,
                    format!("unparsable timestamp: {}", preview(line)),
                ));
            }
            current = Some((caps[8].to_string(), caps[9].to_string(), ts));
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
        messages.push(finish_message(&sender, text, ts, Platform::Whatsapp));
    }

    (messages, diagnostics)
}

fn header_timestamp(caps: &Captures) -> Option<DateTime<Utc>> {
    let a: u32 = caps[1].parse().ok()?;
    let b: u32 = caps[2].parse().ok()?;
    let year = timestamp::full_year(caps[3].parse().ok()?);
    let date = timestamp::resolve_date(a, b, year)?;
    let hour: u32 = caps[4].parse().ok()?;
    let minute: u32 = caps[5].parse().ok()?;
    let second: u32 = caps
        .get(6)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let meridiem = caps.get(7).map(|m| m.as_str());
    timestamp::assemble(date, timestamp::to_24h(hour, meridiem), minute, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_us_export_with_meridiem() {
        let raw = "12/31/2023, 10:30 PM - Alice: happy new year";
        let (messages, _) = parse(raw);
        assert_eq!(messages.len(), 1);
        let ts = messages[0].timestamp.unwrap();
        assert_eq!((ts.month(), ts.day(), ts.hour(), ts.minute()), (12, 31, 22, 30));
    }

    #[test]
    fn test_european_export_with_dots_and_short_year() {
        let raw = "31.12.23, 22:30 - Alice: frohes neues";
        let (messages, _) = parse(raw);
        let ts = messages[0].timestamp.unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day(), ts.hour()), (2023, 12, 31, 22));
    }

    #[test]
    fn test_seconds_are_optional() {
        let raw = "12/31/2023, 10:30:45 PM - Alice: precise";
        let (messages, _) = parse(raw);
        assert_eq!(messages[0].timestamp.unwrap().second(), 45);
    }

    #[test]
    fn test_continuation_lines_merge() {
        let raw = "12/31/2023, 10:30 PM - Alice: first line\nsecond line\nthird line\n\
                   12/31/2023, 10:31 PM - Bob: reply";
        let (messages, _) = parse(raw);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "first line\nsecond line\nthird line");
    }

    #[test]
    fn test_orphan_continuation_is_diagnosed() {
        let raw = "stray line before any header\n12/31/2023, 10:30 PM - Alice: hi";
        let (messages, diagnostics) = parse(raw);
        assert_eq!(messages.len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::ParserSkip);
    }

    #[test]
    fn test_colon_in_body_stays_in_body() {
        let raw = "12/31/2023, 10:30 PM - Alice: note: remember this";
        let (messages, _) = parse(raw);
        assert_eq!(messages[0].sender, "Alice");
        assert_eq!(messages[0].text, "note: remember this");
    }
}
