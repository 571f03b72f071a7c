//! Emoji extraction and polarity aggregation.

use crate::lexicon::EMOJI_POLARITY;
use analysis_core::SentimentLabel;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

static POLARITY_TABLE: Lazy<HashMap<&'static str, (i8, f64)>> = Lazy::new(|| {
    EMOJI_POLARITY
        .iter()
        .map(|&(emoji, polarity, weight)| (emoji, (polarity, weight)))
        .collect()
});

/// Aggregate emoji signal for one text run.
#[derive(Debug, Clone, PartialEq)]
pub struct EmojiSignal {
    pub has_emojis: bool,
    pub count: usize,
    /// Canonical sequence → occurrences, in first-appearance order.
    pub per_emoji: Vec<(String, usize)>,
    pub label: SentimentLabel,
    pub confidence: f64,
}

impl EmojiSignal {
    fn empty() -> Self {
        Self {
            has_emojis: false,
            count: 0,
            per_emoji: Vec::new(),
            label: SentimentLabel::Neutral,
            confidence: 0.0,
        }
    }
}

/// True when the scalar falls in one of the Unicode emoji blocks the engine
/// recognises.
fn is_emoji_scalar(c: char) -> bool {
    matches!(u32::from(c),
        0x1F300..=0x1F5FF   // symbols & pictographs
        | 0x1F600..=0x1F64F // emoticons
        | 0x1F680..=0x1F6FF // transport & map
        | 0x1F900..=0x1F9FF // supplemental symbols
        | 0x1FA70..=0x1FAFF // extended-A
        | 0x1F1E6..=0x1F1FF // regional indicators
        | 0x2600..=0x26FF   // misc symbols
        | 0x2700..=0x27BF   // dingbats
    )
}

/// Polarity contribution for one grapheme cluster. ZWJ sequences and
/// variation selectors resolve through the leading scalar; unknown emojis
/// score 0.
fn polarity_of(cluster: &str) -> f64 {
    if let Some(&(polarity, weight)) = POLARITY_TABLE.get(cluster) {
        return f64::from(polarity) * weight;
    }
    let mut lead = [0u8; 4];
    if let Some(c) = cluster.chars().next() {
        let lead_str: &str = c.encode_utf8(&mut lead);
        if let Some(&(polarity, weight)) = POLARITY_TABLE.get(lead_str) {
            return f64::from(polarity) * weight;
        }
    }
    0.0
}

/// Extract every emoji cluster from `text` and fold the polarity table over
/// them. The full cluster (ZWJ sequence included) is the canonical count key.
pub fn analyze(text: &str) -> EmojiSignal {
    let mut per_emoji: Vec<(String, usize)> = Vec::new();
    let mut sum = 0.0;
    let mut count = 0usize;

    for cluster in text.graphemes(true) {
        let leads_with_emoji = cluster.chars().next().is_some_and(is_emoji_scalar);
        if !leads_with_emoji {
            continue;
        }
        count += 1;
        sum += polarity_of(cluster);
        match per_emoji.iter_mut().find(|(key, _)| key == cluster) {
            Some(entry) => entry.1 += 1,
            None => per_emoji.push((cluster.to_string(), 1)),
        }
    }

    if count == 0 {
        return EmojiSignal::empty();
    }

    let label = if sum > 0.0 {
        SentimentLabel::Positive
    } else if sum < 0.0 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };
    let confidence = (sum.abs() / f64::max(3.0, count as f64)).min(1.0);

    EmojiSignal {
        has_emojis: true,
        count,
        per_emoji,
        label,
        confidence,
    }
}
