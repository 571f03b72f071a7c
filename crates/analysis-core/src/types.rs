use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source platform of a parsed conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Platform {
    Whatsapp,
    Telegram,
    Discord,
    Imessage,
    Generic,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Whatsapp => "whatsapp",
            Platform::Telegram => "telegram",
            Platform::Discord => "discord",
            Platform::Imessage => "imessage",
            Platform::Generic => "generic",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "whatsapp" => Some(Platform::Whatsapp),
            "telegram" => Some(Platform::Telegram),
            "discord" => Some(Platform::Discord),
            "imessage" => Some(Platform::Imessage),
            "generic" => Some(Platform::Generic),
            _ => None,
        }
    }
}

/// A single message in the canonical sequence. Immutable after parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatMessage {
    /// UTC instant, or `None` when the source format carries no timestamp.
    /// Messages without timestamps retain parse order.
    pub timestamp: Option<DateTime<Utc>>,
    /// Trimmed sender name, case preserved.
    pub sender: String,
    /// Message body; the stripped placeholder text for media lines.
    pub text: String,
    pub platform: Platform,
    /// Set when the source marked the line as an attachment/sticker/omitted
    /// media.
    pub is_media: bool,
}

/// Sentiment polarity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "positive" => Some(SentimentLabel::Positive),
            "negative" => Some(SentimentLabel::Negative),
            "neutral" => Some(SentimentLabel::Neutral),
            _ => None,
        }
    }
}

/// Closed set of emotions a classifier may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,
    Neutral,
    Optimism,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Disgust,
        Emotion::Neutral,
        Emotion::Optimism,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Disgust => "disgust",
            Emotion::Neutral => "neutral",
            Emotion::Optimism => "optimism",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Emotion::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == name.trim().to_lowercase())
    }
}

/// Emoji contribution to a message's sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EmojiAnalysis {
    #[serde(rename = "sentiment")]
    pub label: SentimentLabel,
    pub confidence: f64,
    pub has_emojis: bool,
}

/// Result of scoring one text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Calibrated confidence in `[0, 1]`.
    pub confidence: f64,
    /// Present only when a neural classifier contributed to the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotions: Option<BTreeMap<Emotion, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji_analysis: Option<EmojiAnalysis>,
}

/// Output of a neural classifier adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOutput {
    pub label: SentimentLabel,
    pub confidence: f64,
    pub emotion_scores: BTreeMap<Emotion, f64>,
}

/// Role of a participant relative to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ParticipantRole {
    #[serde(rename = "self")]
    SelfUser,
    #[serde(rename = "other")]
    Other,
}

impl ParticipantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::SelfUser => "self",
            ParticipantRole::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Participant {
    pub name: String,
    pub role: ParticipantRole,
    pub message_count: usize,
    /// Mean message length in characters.
    pub average_length: f64,
}

/// Time span covered by a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `floor((end - start) / 24h) + 1`; at least 1 whenever any message
    /// carries a timestamp.
    pub duration_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LongestMessage {
    pub sender: String,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BasicStats {
    pub total_messages: usize,
    pub average_message_length: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longest_message: Option<LongestMessage>,
    pub messages_per_participant: BTreeMap<String, usize>,
}

/// Message counts keyed by weekday, serialised with capitalised day names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DayOfWeekDistribution {
    #[serde(rename = "Monday")]
    pub monday: usize,
    #[serde(rename = "Tuesday")]
    pub tuesday: usize,
    #[serde(rename = "Wednesday")]
    pub wednesday: usize,
    #[serde(rename = "Thursday")]
    pub thursday: usize,
    #[serde(rename = "Friday")]
    pub friday: usize,
    #[serde(rename = "Saturday")]
    pub saturday: usize,
    #[serde(rename = "Sunday")]
    pub sunday: usize,
}

impl DayOfWeekDistribution {
    pub fn increment(&mut self, weekday: chrono::Weekday) {
        match weekday {
            chrono::Weekday::Mon => self.monday += 1,
            chrono::Weekday::Tue => self.tuesday += 1,
            chrono::Weekday::Wed => self.wednesday += 1,
            chrono::Weekday::Thu => self.thursday += 1,
            chrono::Weekday::Fri => self.friday += 1,
            chrono::Weekday::Sat => self.saturday += 1,
            chrono::Weekday::Sun => self.sunday += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.monday
            + self.tuesday
            + self.wednesday
            + self.thursday
            + self.friday
            + self.saturday
            + self.sunday
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HourCount {
    pub hour: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessagingPatterns {
    /// Index = UTC hour of day.
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<usize>))]
    pub hourly_distribution: [usize; 24],
    pub day_of_week_distribution: DayOfWeekDistribution,
    /// Top 5 hours by count desc, hour asc on ties; zero-count hours omitted.
    pub most_active_hours: Vec<HourCount>,
    /// Messages per day over the covered period.
    pub frequency_per_participant: BTreeMap<String, f64>,
}

/// Response-time summary for one participant, in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ResponseTimeStats {
    pub average_minutes: f64,
    pub median_minutes: f64,
    pub fastest_minutes: f64,
    pub slowest_minutes: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BackAndForthMetrics {
    pub total_exchanges: usize,
    pub average_exchange_length: f64,
    pub longest_exchange: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EngagementMetrics {
    pub response_time_analysis: BTreeMap<String, ResponseTimeStats>,
    pub conversation_initiations: BTreeMap<String, usize>,
    pub back_and_forth_metrics: BackAndForthMetrics,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SentimentRatios {
    pub positive_ratio: f64,
    pub neutral_ratio: f64,
    pub negative_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SentimentRollup {
    pub per_participant: BTreeMap<String, SentimentRatios>,
    pub overall: SentimentRatios,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EmojiCount {
    pub emoji: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ParticipantEmojiStats {
    pub total_emojis: usize,
    pub emojis_per_message: f64,
    /// Top 10 emoji sequences by count; ties keep first-appearance order.
    pub most_used_emojis: Vec<EmojiCount>,
}

/// Rule identifiers for red flags and warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum FindingKind {
    MessageImbalance,
    SlowResponses,
    FrequencyDrop,
    OneSidedInitiation,
    LowEngagement,
    HighNegativeSentiment,
    NightActivitySkew,
    BurstSilence,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::MessageImbalance => "message_imbalance",
            FindingKind::SlowResponses => "slow_responses",
            FindingKind::FrequencyDrop => "frequency_drop",
            FindingKind::OneSidedInitiation => "one_sided_initiation",
            FindingKind::LowEngagement => "low_engagement",
            FindingKind::HighNegativeSentiment => "high_negative_sentiment",
            FindingKind::NightActivitySkew => "night_activity_skew",
            FindingKind::BurstSilence => "burst_silence",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub severity: Severity,
    pub description: String,
    pub suggestion: String,
}

/// Three-valued derived health label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum HealthIndicator {
    Healthy,
    Moderate,
    Concerning,
}

impl HealthIndicator {
    /// Derivation is fixed: `concerning` iff two or more red flags or any
    /// high-severity red flag; `moderate` iff any red flag or two or more
    /// warnings; else `healthy`.
    pub fn derive(red_flags: &[Finding], warnings: &[Finding]) -> Self {
        let any_high = red_flags.iter().any(|f| f.severity == Severity::High);
        if red_flags.len() >= 2 || any_high {
            HealthIndicator::Concerning
        } else if !red_flags.is_empty() || warnings.len() >= 2 {
            HealthIndicator::Moderate
        } else {
            HealthIndicator::Healthy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthIndicator::Healthy => "healthy",
            HealthIndicator::Moderate => "moderate",
            HealthIndicator::Concerning => "concerning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RedFlagReport {
    pub red_flags: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub total_red_flags: usize,
    pub total_warnings: usize,
    pub overall_health: HealthIndicator,
}

impl Default for RedFlagReport {
    fn default() -> Self {
        Self {
            red_flags: Vec::new(),
            warnings: Vec::new(),
            total_red_flags: 0,
            total_warnings: 0,
            overall_health: HealthIndicator::Healthy,
        }
    }
}

/// Root analysis record for one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatAnalysis {
    pub format_detected: Platform,
    pub total_messages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<ChatPeriod>,
    pub participants: BTreeMap<String, Participant>,
    pub basic_stats: BasicStats,
    pub messaging_patterns: MessagingPatterns,
    pub engagement_metrics: EngagementMetrics,
    pub sentiment_analysis: SentimentRollup,
    pub emoji_stats: BTreeMap<String, ParticipantEmojiStats>,
    pub red_flags: RedFlagReport,
}

/// Non-fatal anomaly kinds surfaced alongside results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum DiagnosticKind {
    ParserSkip,
    TimezoneAssumedUtc,
    NoScoredMessages,
    ClassifierFallback,
    SinkError,
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}
