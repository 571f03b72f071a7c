//! Format detection over the first 200 non-empty lines.

use crate::{discord, imessage, telegram, whatsapp};
use analysis_core::Platform;
use regex::Regex;

const DETECTION_WINDOW: usize = 200;

/// Share of scanned lines a format's header grammar must match to win.
const MIN_MATCH_SHARE: usize = 10; // percent

fn count_matches(header: &Regex, lines: &[&str]) -> usize {
    lines.iter().filter(|line| header.is_match(line)).count()
}

/// Pick the format whose header grammar matches the most scanned lines.
/// The winner needs at least 10% of the scanned lines, or any match at all
/// when every other format scores zero. Ties keep the precedence order
/// whatsapp > telegram > discord > imessage. Anything else is generic.
pub(crate) fn detect_format(raw: &str) -> Platform {
    if telegram::looks_like_json_export(raw) {
        return Platform::Telegram;
    }

    let lines: Vec<&str> = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(DETECTION_WINDOW)
        .collect();
    if lines.is_empty() {
        return Platform::Generic;
    }

    let counts = [
        (Platform::Whatsapp, count_matches(&whatsapp::DETECT, &lines)),
        (Platform::Telegram, count_matches(&telegram::HEADER, &lines)),
        (Platform::Discord, count_matches(&discord::HEADER, &lines)),
        (Platform::Imessage, count_matches(&imessage::HEADER, &lines)),
    ];

    // Strict comparison keeps the earlier (higher-precedence) entry on ties.
    let (best, best_count) = counts
        .iter()
        .fold((Platform::Generic, 0usize), |acc, &(format, count)| {
            if count > acc.1 {
                (format, count)
            } else {
                acc
            }
        });

    if best_count == 0 {
        return Platform::Generic;
    }
    let others_zero = counts
        .iter()
        .filter(|(format, _)| *format != best)
        .all(|(_, count)| *count == 0);
    if others_zero || best_count * 100 >= lines.len() * MIN_MATCH_SHARE {
        best
    } else {
        Platform::Generic
    }
}
