use analysis_core::{ClassifierOutput, EmojiAnalysis, SentimentLabel, SentimentResult};
use unicode_segmentation::UnicodeSegmentation;

pub mod emoji;
pub mod lexicon;

pub use emoji::{analyze as analyze_emojis, EmojiSignal};

use lexicon::{FILLER_SET, NEGATIVE_PATTERNS, NEGATIVE_SET, POSITIVE_PATTERNS, POSITIVE_SET};

/// Minimum sentiment-token density for a non-neutral label: roughly one
/// sentiment token per twelve words.
const MIN_TRIGGER_RATIO: f64 = 0.08;

/// Lexical fallback scorer.
///
/// Runs nine ordered phases over a text run: filler short-circuit, unigram
/// hits, multi-word patterns, punctuation amplifiers, density threshold,
/// emoji integration, classifier override, last-resort detection, and a
/// final confidence clamp. Deterministic for a given input; all tables are
/// read-only process-wide statics.
pub struct SentimentAnalysisEngine;

impl SentimentAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score one text run, optionally folding in a neural classifier result.
    /// `emotions` is populated only when `classifier_hint` is present.
    pub fn score(
        &self,
        text: &str,
        classifier_hint: Option<&ClassifierOutput>,
    ) -> SentimentResult {
        let emoji = emoji::analyze(text);
        let normalized = text.replace('\u{2019}', "'");
        let lowered = normalized.to_lowercase();

        // Phase 1: filler short-circuit. With emojis present the text falls
        // through neutrally so the emoji phases can still speak.
        let bare = lowered.trim().trim_matches(|c: char| !c.is_alphanumeric());
        let is_filler = FILLER_SET.contains(bare);
        if is_filler && !emoji.has_emojis {
            return SentimentResult {
                label: SentimentLabel::Neutral,
                confidence: 0.55,
                emotions: None,
                emoji_analysis: None,
            };
        }

        let words: Vec<&str> = lowered.unicode_words().collect();
        let word_count = words.len();
        let question_marks = normalized.matches('?').count();

        let mut pos = 0.0f64;
        let mut neg = 0.0f64;

        if !is_filler {
            // Phase 2: unigram hits.
            for word in &words {
                if POSITIVE_SET.contains(word) {
                    pos += 1.0;
                } else if NEGATIVE_SET.contains(word) {
                    neg += 1.0;
                }
            }

            // Phase 3: multi-word patterns at double weight.
            for pattern in POSITIVE_PATTERNS {
                pos += 2.0 * lowered.matches(pattern).count() as f64;
            }
            for pattern in NEGATIVE_PATTERNS {
                neg += 2.0 * lowered.matches(pattern).count() as f64;
            }

            // Phase 4: punctuation amplifiers.
            if normalized.trim_end().ends_with('!') {
                pos += 1.0;
            }
            if question_marks >= 2 {
                neg += 1.0;
            }
            if has_shouting_run(&normalized) {
                if pos > neg {
                    pos *= 1.25;
                } else if neg > pos {
                    neg *= 1.25;
                }
            }
        }

        // Phase 5: density threshold.
        let ratio = (pos + neg) / word_count.max(1) as f64;
        let mut label = if pos > neg {
            SentimentLabel::Positive
        } else if neg > pos {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        if ratio < MIN_TRIGGER_RATIO {
            label = SentimentLabel::Neutral;
        }
        let mut confidence = if label == SentimentLabel::Neutral {
            0.5
        } else {
            0.5 + 0.08 * (pos - neg).abs()
        };

        // Phase 6: emoji agreement bonus.
        if label != SentimentLabel::Neutral && emoji.has_emojis && emoji.label == label {
            confidence += 0.35 * emoji.confidence;
        }

        // Phase 7: classifier override. A neutral hint is not a hit; only a
        // non-neutral label counts as the classifier firing.
        let mut emotions = None;
        let mut classifier_fired = false;
        if let Some(hint) = classifier_hint {
            emotions = Some(hint.emotion_scores.clone());
            if hint.label == SentimentLabel::Neutral {
                if emoji.confidence > 0.6 && emoji.label != SentimentLabel::Neutral {
                    label = emoji.label;
                    confidence = confidence.max(emoji.confidence);
                }
            } else {
                classifier_fired = true;
                label = hint.label;
                confidence = hint.confidence.max(confidence * 0.9);
            }
        }

        // Phase 8: last-resort detection when no words, patterns, or
        // classifier hit fired.
        if !classifier_fired
            && pos == 0.0
            && neg == 0.0
            && label == SentimentLabel::Neutral
        {
            if normalized.contains('!') {
                label = SentimentLabel::Positive;
                confidence = 0.52;
            } else if question_marks >= 2 {
                label = SentimentLabel::Negative;
                confidence = 0.52;
            } else if emoji.has_emojis && emoji.label != SentimentLabel::Neutral {
                label = emoji.label;
                confidence = 0.52 + 0.35 * emoji.confidence;
            }
        }

        // Phase 9: calibration and clamp.
        if label == SentimentLabel::Neutral {
            confidence = f64::max(0.5, 1.0 - (pos + neg) / (word_count as f64 + 1.0));
        }
        confidence = confidence.clamp(0.0, 1.0);

        let emoji_analysis = emoji.has_emojis.then(|| EmojiAnalysis {
            label: emoji.label,
            confidence: emoji.confidence,
            has_emojis: true,
        });

        SentimentResult {
            label,
            confidence,
            emotions,
            emoji_analysis,
        }
    }
}

impl Default for SentimentAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// An all-caps alphabetic run of four or more letters reads as shouting.
fn has_shouting_run(text: &str) -> bool {
    text.unicode_words()
        .any(|word| word.chars().count() >= 4 && word.chars().all(|c| c.is_uppercase()))
}
