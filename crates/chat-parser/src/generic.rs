//! Generic `Name: text` dialogue with no timestamps; parse order is the
//! canonical order.

use crate::{finish_message, preview};
use analysis_core::{ChatMessage, Diagnostic, DiagnosticKind, Platform};
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^:\n]{1,64}): (.*)$").expect("generic header regex"));

pub(crate) fn parse(raw: &str) -> (Vec<ChatMessage>, Vec<Diagnostic>) {
    let mut messages = Vec::new();
    let mut diagnostics = Vec::new();
    let mut current: Option<(String, String)> = None;

    for line in raw.lines() {
        if let Some(caps) = HEADER.captures(line) {
            if let Some((sender, text)) = current.take() {
                messages.push(finish_message(&sender, text, None, Platform::Generic));
            }
            current = Some((caps[1].to_string(), caps[2].to_string()));
        } else if line.trim().is_empty() {
            continue;
        } else if let Some((_, text)) = current.as_mut() {
            text.push('\n');
            text.push_str(line);
        } else {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::ParserSkip,
                format!("orphan continuation: {}", preview(line)),
            ));
        }
    }
    if let Some((sender, text)) = current.take() {
        messages.push(finish_message(&sender, text, None, Platform::Generic));
    }

    (messages, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let raw = "Alice: one\nBob: two\nAlice: three";
        let (messages, _) = parse(raw);
        let senders: Vec<&str> = messages.iter().map(|m| m.sender.as_str()).collect();
        assert_eq!(senders, ["Alice", "Bob", "Alice"]);
        assert!(messages.iter().all(|m| m.timestamp.is_none()));
    }

    #[test]
    fn test_continuation_merges_into_previous() {
        let raw = "Alice: first\nstill the first message\nBob: second";
        let (messages, _) = parse(raw);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "first\nstill the first message");
    }

    #[test]
    fn test_leading_noise_is_diagnosed() {
        let raw = "no colon here\nAlice: hi";
        let (messages, diagnostics) = parse(raw);
        assert_eq!(messages.len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::ParserSkip);
    }
}
