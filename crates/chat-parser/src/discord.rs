//! Discord exports: `Name — DD/MM/YYYY HH:MM` headers with the body on the
//! following lines, running until the next header.

use crate::{finish_message, preview, timestamp};
use analysis_core::{ChatMessage, Diagnostic, DiagnosticKind, Platform};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub(crate) static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?) [—–-] (\d{1,2})/(\d{1,2})/(\d{4}) (\d{1,2}):(\d{2})$")
        .expect("discord header regex")
});

pub(crate) fn parse(raw: &str) -> (Vec<ChatMessage>, Vec<Diagnostic>) {
    let mut messages = Vec::new();
    let mut diagnostics = Vec::new();
    let mut current: Option<(String, String, Option<DateTime<Utc>>)> = None;

    for line in raw.lines() {
        if let Some(caps) = HEADER.captures(line) {
            if let Some((sender, text, ts)) = current.take() {
                messages.push(finish_message(&sender, text, ts, Platform::Discord));
            }
            let ts = header_timestamp(&caps);
            if ts.is_none() {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::ParserSkip,
                    format!("unparsable timestamp: {}", preview(line)),
                ));
            }
            current = Some((caps[1].to_string(), String::new(), ts));
        } else if line.trim().is_empty() {
            continue;
        } else if let Some((_, text, _)) = current.as_mut() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(line);
        } else {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::ParserSkip,
                format!("orphan continuation: {}", preview(line)),
            ));
        }
    }
    if let Some((sender, text, ts)) = current.take() {
        messages.push(finish_message(&sender, text, ts, Platform::Discord));
    }

    (messages, diagnostics)
}

fn header_timestamp(caps: &Captures) -> Option<DateTime<Utc>> {
    let day: u32 = caps[2].parse().ok()?;
    let month: u32 = caps[3].parse().ok()?;
    let year: i32 = caps[4].parse().ok()?;
    let date = timestamp::resolve_date_day_first(day, month, year)?;
    timestamp::assemble(date, caps[5].parse().ok()?, caps[6].parse().ok()?, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_header_and_body() {
        let raw = "Alice — 31/12/2023 22:30\nhello there\n\nBob — 31/12/2023 22:31\nhey";
        let (messages, _) = parse(raw);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, "Alice");
        assert_eq!(messages[0].text, "hello there");
        let ts = messages[0].timestamp.unwrap();
        assert_eq!((ts.day(), ts.month(), ts.hour()), (31, 12, 22));
    }

    #[test]
    fn test_multi_line_body_runs_to_next_header() {
        let raw = "Alice — 01/06/2024 09:15\nfirst\nsecond\nthird\nBob — 01/06/2024 09:16\nok";
        let (messages, _) = parse(raw);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "first\nsecond\nthird");
    }

    #[test]
    fn test_hyphen_separator_variant() {
        let raw = "Alice - 31/12/2023 22:30\nhello";
        let (messages, _) = parse(raw);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, "Alice");
    }

    #[test]
    fn test_empty_body_is_preserved() {
        let raw = "Alice — 31/12/2023 22:30\nBob — 31/12/2023 22:31\nhey";
        let (messages, _) = parse(raw);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "");
    }
}
