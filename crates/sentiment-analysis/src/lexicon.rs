//! Frozen lexicon and pattern tables.
//!
//! These lists are the single source of truth for lexical scoring. They are
//! read-only, shared process-wide, and pinned by tests; changing an entry
//! changes calibrated output everywhere.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Positive unigrams (47 entries).
pub const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "awesome", "amazing", "wonderful", "fantastic", "excellent", "love", "loved",
    "happy", "glad", "excited", "fun", "nice", "sweet", "cute", "beautiful", "best", "better",
    "perfect", "cool", "brilliant", "lovely", "enjoy", "enjoyed", "laugh", "smile", "proud",
    "thankful", "grateful", "blessed", "win", "winning", "success", "yay", "hooray", "congrats",
    "congratulations", "delighted", "thrilled", "cheerful", "positive", "hope", "hopeful",
    "relaxed", "calm", "peaceful",
];

/// Negative unigrams (49 entries).
pub const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "sad", "unhappy", "angry", "mad", "upset", "hate",
    "hated", "annoyed", "annoying", "frustrated", "frustrating", "worried", "worry", "anxious",
    "anxiety", "stressed", "stress", "depressed", "depressing", "lonely", "alone", "hurt", "pain",
    "painful", "cry", "crying", "cried", "tired", "exhausted", "sick", "worst", "worse", "fail",
    "failed", "failure", "lost", "losing", "broken", "miserable", "hopeless", "scared", "afraid",
    "fear", "disappointed", "disappointing",
];

/// Tokens that carry no sentiment on their own. A message that normalises to
/// one of these short-circuits to neutral.
pub const FILLER_TOKENS: &[&str] = &[
    "ok", "okay", "k", "kk", "yeah", "yep", "yup", "nah", "nope", "hmm", "hm", "mhm", "huh", "oh",
    "ah", "um", "uh", "lol", "lmao", "haha", "hehe", "sure", "fine", "right", "idk", "brb", "gtg",
    "np",
];

/// Multi-word phrases scored at double weight. Matched as substrings of the
/// lowercased text with apostrophes normalised.
pub const POSITIVE_PATTERNS: &[&str] = &[
    "can't wait",
    "cant wait",
    "looking forward",
    "feel good",
    "feel great",
    "feel better",
    "feeling good",
    "feeling great",
    "feeling better",
    "so happy",
    "so excited",
    "love this",
    "love it",
    "love you",
    "well done",
    "good news",
    "great news",
    "thank you",
    "made my day",
];

pub const NEGATIVE_PATTERNS: &[&str] = &[
    "went wrong",
    "had enough",
    "fed up",
    "can't stand",
    "cant stand",
    "feel bad",
    "feel sad",
    "feeling bad",
    "feeling down",
    "so tired",
    "so sad",
    "don't care",
    "dont care",
    "give up",
    "giving up",
    "bad news",
    "worst day",
    "sick of",
];

/// Emoji polarity table: scalar → (polarity, weight). Keys are single
/// scalars; ZWJ/variation sequences resolve through their leading scalar.
pub const EMOJI_POLARITY: &[(&str, i8, f64)] = &[
    // positive
    ("😊", 1, 1.0),
    ("😀", 1, 1.0),
    ("😃", 1, 1.0),
    ("😄", 1, 1.0),
    ("😁", 1, 1.0),
    ("🙂", 1, 1.0),
    ("😍", 1, 1.5),
    ("🥰", 1, 1.5),
    ("😘", 1, 1.0),
    ("☺", 1, 1.0),
    ("😇", 1, 1.0),
    ("😎", 1, 1.0),
    ("🤗", 1, 1.0),
    ("❤", 1, 1.5),
    ("💕", 1, 1.0),
    ("💖", 1, 1.0),
    ("✨", 1, 1.0),
    ("🎉", 1, 1.0),
    ("🥳", 1, 1.0),
    ("👍", 1, 1.0),
    ("🙌", 1, 1.0),
    ("💪", 1, 1.0),
    ("🌟", 1, 1.0),
    ("💯", 1, 1.0),
    ("🔥", 1, 0.75),
    ("😂", 1, 0.75),
    ("🤣", 1, 0.75),
    // neutral
    ("🤔", 0, 0.0),
    ("😐", 0, 0.0),
    ("😑", 0, 0.0),
    ("😶", 0, 0.0),
    ("🙃", 0, 0.0),
    ("😴", 0, 0.0),
    ("🤷", 0, 0.0),
    // negative
    ("😢", -1, 1.0),
    ("😭", -1, 1.5),
    ("😞", -1, 1.0),
    ("😔", -1, 1.0),
    ("😟", -1, 1.0),
    ("☹", -1, 1.0),
    ("🙁", -1, 1.0),
    ("😠", -1, 1.0),
    ("😡", -1, 1.5),
    ("🤬", -1, 1.5),
    ("💔", -1, 1.5),
    ("😩", -1, 1.0),
    ("😫", -1, 1.0),
    ("😖", -1, 1.0),
    ("😣", -1, 1.0),
    ("😨", -1, 1.0),
    ("😰", -1, 1.0),
    ("😥", -1, 1.0),
    ("😓", -1, 1.0),
    ("👎", -1, 1.0),
    ("😒", -1, 1.0),
    ("😕", -1, 1.0),
    ("😤", -1, 1.0),
    ("🥺", -1, 1.0),
    ("😱", -1, 1.0),
];

pub static POSITIVE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| POSITIVE_WORDS.iter().copied().collect());

pub static NEGATIVE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| NEGATIVE_WORDS.iter().copied().collect());

pub static FILLER_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| FILLER_TOKENS.iter().copied().collect());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_list_sizes_are_pinned() {
        assert_eq!(POSITIVE_WORDS.len(), 47);
        assert_eq!(NEGATIVE_WORDS.len(), 49);
    }

    #[test]
    fn test_word_lists_are_disjoint() {
        for w in NEGATIVE_WORDS {
            assert!(!POSITIVE_SET.contains(w), "{w} is in both word lists");
        }
        for w in FILLER_TOKENS {
            assert!(
                !POSITIVE_SET.contains(w) && !NEGATIVE_SET.contains(w),
                "{w} is both filler and sentiment-bearing"
            );
        }
    }

    #[test]
    fn test_emoji_table_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for (emoji, _, _) in EMOJI_POLARITY {
            assert!(seen.insert(*emoji), "{emoji} appears twice");
        }
    }
}
