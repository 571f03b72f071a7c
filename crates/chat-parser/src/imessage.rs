//! iMessage exports: a `Month DD, YYYY HH:MM[:SS] AM|PM` date line, a
//! `From: Name` line, then the body until the next date line.

use crate::{finish_message, preview};
use analysis_core::{ChatMessage, Diagnostic, DiagnosticKind, Platform};
use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(January|February|March|April|May|June|July|August|September|October|November|December) \d{1,2}, \d{4} \d{1,2}:\d{2}(?::\d{2})? (AM|PM)$",
    )
    .expect("imessage header regex")
});

static FROM_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^From: (.+)$").expect("imessage sender regex"));

const LAYOUTS: &[&str] = &["%B %d, %Y %I:%M:%S %p", "%B %d, %Y %I:%M %p"];

fn header_timestamp(line: &str) -> Option<DateTime<Utc>> {
    LAYOUTS.iter().find_map(|layout| {
        NaiveDateTime::parse_from_str(line, layout)
            .ok()
            .map(|naive| naive.and_utc())
    })
}

pub(crate) fn parse(raw: &str) -> (Vec<ChatMessage>, Vec<Diagnostic>) {
    let mut messages = Vec::new();
    let mut diagnostics = Vec::new();
    let mut pending_ts: Option<Option<DateTime<Utc>>> = None;
    let mut current: Option<(String, String, Option<DateTime<Utc>>)> = None;

    for line in raw.lines() {
        if HEADER.is_match(line) {
            if let Some((sender, text, ts)) = current.take() {
                messages.push(finish_message(&sender, text, ts, Platform::Imessage));
            }
            if pending_ts.is_some() {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::ParserSkip,
                    "date line without a sender line",
                ));
            }
            let ts = header_timestamp(line);
            if ts.is_none() {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::ParserSkip,
                    format!("unparsable timestamp: {}", preview(line)),
                ));
            }
            pending_ts = Some(ts);
        } else if let Some(caps) = FROM_LINE.captures(line) {
            match pending_ts.take() {
                Some(ts) => current = Some((caps[1].to_string(), String::new(), ts)),
                // A From: line with no preceding date line reads as body.
                None => match current.as_mut() {
                    Some((_, text, _)) => {
                        if !text.is_empty() {
                            text.push('\n');
                        }
                        text.push_str(line);
                    }
                    None => diagnostics.push(Diagnostic::new(
                        DiagnosticKind::ParserSkip,
                        format!("orphan continuation: {}", preview(line)),
                    )),
                },
            }
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
        messages.push(finish_message(&sender, text, ts, Platform::Imessage));
    }
    if pending_ts.is_some() {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::ParserSkip,
            "date line without a sender line",
        ));
    }

    (messages, diagnostics)
}
