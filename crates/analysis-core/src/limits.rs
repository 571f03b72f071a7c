//! Engine-wide limits and fixed thresholds.
//!
//! Every tunable the analysis pipeline depends on lives here so that the
//! parser, aggregator, red-flag detector, and API layer agree on one set of
//! numbers.

/// Maximum length of a single message submitted for sentiment analysis.
pub const MAX_MESSAGE_CHARS: usize = 5_000;

/// Maximum size of a raw conversation upload.
pub const MAX_BULK_BYTES: usize = 5 * 1024 * 1024;

/// Minimum number of characters (after trimming) for a conversation import.
pub const MIN_CHARS_FOR_IMPORT: usize = 10;

/// Budget for a single neural-classifier call before falling back to
/// lexical scoring.
pub const CLASSIFIER_TIMEOUT_MS: u64 = 2_000;

/// Silence gap after which the next message counts as a new conversation
/// initiation.
pub const CONVERSATION_GAP_HOURS: i64 = 6;

/// Sender-switch deltas above this cap are not response times.
pub const RESPONSE_TIME_CAP_HOURS: i64 = 24;

/// Red-flag thresholds.
pub const MESSAGE_IMBALANCE_RATIO: f64 = 3.0;
pub const SLOW_RESPONSE_MINUTES: f64 = 180.0;
pub const FREQUENCY_DROP_RATIO: f64 = 0.5;
pub const ONE_SIDED_INITIATION_RATIO: f64 = 4.0;
pub const LOW_ENGAGEMENT_AVG_CHARS: f64 = 20.0;
