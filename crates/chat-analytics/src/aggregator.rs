//! Conversation aggregation.
//!
//! Folds the canonical message sequence into the `ChatAnalysis` record:
//! basic stats, participants, temporal distributions, engagement metrics,
//! sentiment rollups, and emoji stats. Red-flag detection runs separately
//! over the finished aggregate.

use analysis_core::limits::{CONVERSATION_GAP_HOURS, RESPONSE_TIME_CAP_HOURS};
use analysis_core::{
    BackAndForthMetrics, BasicStats, ChatAnalysis, ChatMessage, ChatPeriod, DayOfWeekDistribution,
    Diagnostic, DiagnosticKind, EmojiCount, EngagementMetrics, HourCount, LongestMessage,
    MessagingPatterns, Participant, ParticipantEmojiStats, ParticipantRole, Platform,
    RedFlagReport, ResponseTimeStats, SentimentLabel, SentimentRatios, SentimentRollup,
};
use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use std::collections::BTreeMap;

/// Per-day activity the red-flag rules need beyond the `ChatAnalysis`
/// schema itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityProfile {
    /// Message count per calendar day from the first to the last timestamped
    /// message, zero days included. Empty when no message has a timestamp.
    pub daily_counts: Vec<usize>,
    /// Share of messages containing a question mark.
    pub question_message_ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedConversation {
    pub analysis: ChatAnalysis,
    pub activity: ActivityProfile,
    pub diagnostics: Vec<Diagnostic>,
}

/// Pure, synchronous aggregator. One label slot per message index; `None`
/// marks media and otherwise unscored messages.
pub struct Aggregator;

impl Aggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(
        &self,
        messages: &[ChatMessage],
        format: Platform,
        self_name: Option<&str>,
        labels: &[Option<SentimentLabel>],
    ) -> AggregatedConversation {
        debug_assert_eq!(messages.len(), labels.len());
        let mut diagnostics = Vec::new();

        let period = compute_period(messages);
        let participants = compute_participants(messages, self_name);
        let basic_stats = compute_basic_stats(messages);
        let messaging_patterns = compute_patterns(messages, &participants, period.as_ref());
        let engagement_metrics = compute_engagement(messages);
        let sentiment_analysis = compute_sentiment_rollup(messages, labels, &mut diagnostics);
        let emoji_stats = compute_emoji_stats(messages, &participants);
        let activity = compute_activity(messages);

        tracing::debug!(
            total = messages.len(),
            participants = participants.len(),
            "aggregated conversation"
        );

        AggregatedConversation {
            analysis: ChatAnalysis {
                format_detected: format,
                total_messages: messages.len(),
                period,
                participants,
                basic_stats,
                messaging_patterns,
                engagement_metrics,
                sentiment_analysis,
                emoji_stats,
                red_flags: RedFlagReport::default(),
            },
            activity,
            diagnostics,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

fn compute_participants(
    messages: &[ChatMessage],
    self_name: Option<&str>,
) -> BTreeMap<String, Participant> {
    let mut counts: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for message in messages {
        let entry = counts.entry(message.sender.clone()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += message.text.chars().count();
    }

    // At most one participant takes the self role, resolved in message order
    // so case-variant duplicates cannot both claim it.
    let self_sender = self_name.and_then(|name| {
        messages
            .iter()
            .find(|m| names_match(&m.sender, name))
            .map(|m| m.sender.clone())
    });

    counts
        .into_iter()
        .map(|(name, (message_count, total_chars))| {
            let role = if self_sender.as_deref() == Some(name.as_str()) {
                ParticipantRole::SelfUser
            } else {
                ParticipantRole::Other
            };
            let average_length = if message_count > 0 {
                total_chars as f64 / message_count as f64
            } else {
                0.0
            };
            (
                name.clone(),
                Participant {
                    name,
                    role,
                    message_count,
                    average_length,
                },
            )
        })
        .collect()
}

fn compute_basic_stats(messages: &[ChatMessage]) -> BasicStats {
    let total_messages = messages.len();
    let total_chars: usize = messages.iter().map(|m| m.text.chars().count()).sum();
    let average_message_length = if total_messages > 0 {
        total_chars as f64 / total_messages as f64
    } else {
        0.0
    };

    let mut messages_per_participant: BTreeMap<String, usize> = BTreeMap::new();
    for message in messages {
        *messages_per_participant
            .entry(message.sender.clone())
            .or_insert(0) += 1;
    }

    let longest_message = messages
        .iter()
        .max_by(|a, b| {
            let len_a = a.text.chars().count();
            let len_b = b.text.chars().count();
            len_a
                .cmp(&len_b)
                // Ties prefer the earlier timestamp, then the lexicographically
                // smaller sender; max_by keeps the later element on Equal, so
                // invert the tie-break ordering.
                .then_with(|| timestamp_order(b.timestamp, a.timestamp))
                .then_with(|| b.sender.cmp(&a.sender))
        })
        .map(|m| LongestMessage {
            sender: m.sender.clone(),
            length: m.text.chars().count(),
        });

    BasicStats {
        total_messages,
        average_message_length,
        longest_message,
        messages_per_participant,
    }
}

/// Orders timestamps with `None` sorting after any concrete instant.
fn timestamp_order(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

fn compute_period(messages: &[ChatMessage]) -> Option<ChatPeriod> {
    let timestamps: Vec<DateTime<Utc>> = messages.iter().filter_map(|m| m.timestamp).collect();
    let start = *timestamps.iter().min()?;
    let end = *timestamps.iter().max()?;
    let duration_days = (end - start).num_seconds() / 86_400 + 1;
    Some(ChatPeriod {
        start,
        end,
        duration_days,
    })
}

fn compute_patterns(
    messages: &[ChatMessage],
    participants: &BTreeMap<String, Participant>,
    period: Option<&ChatPeriod>,
) -> MessagingPatterns {
    let mut hourly_distribution = [0usize; 24];
    let mut day_of_week_distribution = DayOfWeekDistribution::default();

    for message in messages {
        if let Some(ts) = message.timestamp {
            hourly_distribution[ts.hour() as usize] += 1;
            day_of_week_distribution.increment(ts.date_naive().weekday());
        }
    }

    let mut most_active_hours: Vec<HourCount> = hourly_distribution
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(hour, &count)| HourCount {
            hour: hour as u32,
            count,
        })
        .collect();
    most_active_hours.sort_by(|a, b| b.count.cmp(&a.count).then(a.hour.cmp(&b.hour)));
    most_active_hours.truncate(5);

    let period_days = period.map(|p| p.duration_days).unwrap_or(0).max(1);
    let frequency_per_participant = participants
        .values()
        .map(|p| (p.name.clone(), p.message_count as f64 / period_days as f64))
        .collect();

    MessagingPatterns {
        hourly_distribution,
        day_of_week_distribution,
        most_active_hours,
        frequency_per_participant,
    }
}

fn compute_engagement(messages: &[ChatMessage]) -> EngagementMetrics {
    let response_cap = Duration::hours(RESPONSE_TIME_CAP_HOURS);
    let initiation_gap = Duration::hours(CONVERSATION_GAP_HOURS);

    let mut deltas_per_sender: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut conversation_initiations: BTreeMap<String, usize> = BTreeMap::new();

    if let Some(first) = messages.first() {
        *conversation_initiations
            .entry(first.sender.clone())
            .or_insert(0) += 1;
    }

    for pair in messages.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        let delta = match (previous.timestamp, current.timestamp) {
            (Some(a), Some(b)) if b >= a => Some(b - a),
            _ => None,
        };

        if let Some(delta) = delta {
            if delta >= initiation_gap {
                *conversation_initiations
                    .entry(current.sender.clone())
                    .or_insert(0) += 1;
            }
            if current.sender != previous.sender && delta <= response_cap {
                deltas_per_sender
                    .entry(current.sender.clone())
                    .or_default()
                    .push(delta.num_seconds() as f64 / 60.0);
            }
        }
    }

    let response_time_analysis = deltas_per_sender
        .into_iter()
        .map(|(sender, mut deltas)| {
            deltas.sort_by(|a, b| a.total_cmp(b));
            let count = deltas.len();
            let average_minutes = deltas.iter().sum::<f64>() / count as f64;
            (
                sender,
                ResponseTimeStats {
                    average_minutes,
                    median_minutes: median(&deltas),
                    fastest_minutes: deltas[0],
                    slowest_minutes: deltas[count - 1],
                    count,
                },
            )
        })
        .collect();

    EngagementMetrics {
        response_time_analysis,
        conversation_initiations,
        back_and_forth_metrics: compute_exchanges(messages),
    }
}

/// 50th percentile of an ascending slice; even lengths interpolate between
/// the two middle values.
fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        0.0
    } else if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// An exchange is a maximal run of messages whose sender changes on every
/// step; only runs of two or more count.
fn compute_exchanges(messages: &[ChatMessage]) -> BackAndForthMetrics {
    let mut exchange_lengths: Vec<usize> = Vec::new();
    let mut run_length = 0usize;

    for (index, message) in messages.iter().enumerate() {
        if index == 0 || message.sender == messages[index - 1].sender {
            if run_length >= 2 {
                exchange_lengths.push(run_length);
            }
            run_length = 1;
        } else {
            run_length += 1;
        }
    }
    if run_length >= 2 {
        exchange_lengths.push(run_length);
    }

    let total_exchanges = exchange_lengths.len();
    let average_exchange_length = if total_exchanges > 0 {
        exchange_lengths.iter().sum::<usize>() as f64 / total_exchanges as f64
    } else {
        0.0
    };

    BackAndForthMetrics {
        total_exchanges,
        average_exchange_length,
        longest_exchange: exchange_lengths.into_iter().max().unwrap_or(0),
    }
}

#[derive(Default, Clone, Copy)]
struct LabelCounts {
    positive: usize,
    neutral: usize,
    negative: usize,
}

impl LabelCounts {
    fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Negative => self.negative += 1,
        }
    }

    fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    fn ratios(&self) -> SentimentRatios {
        let total = self.total();
        if total == 0 {
            return SentimentRatios::default();
        }
        SentimentRatios {
            positive_ratio: self.positive as f64 / total as f64,
            neutral_ratio: self.neutral as f64 / total as f64,
            negative_ratio: self.negative as f64 / total as f64,
        }
    }
}

fn compute_sentiment_rollup(
    messages: &[ChatMessage],
    labels: &[Option<SentimentLabel>],
    diagnostics: &mut Vec<Diagnostic>,
) -> SentimentRollup {
    let mut per_sender: BTreeMap<String, LabelCounts> = BTreeMap::new();
    let mut overall = LabelCounts::default();

    for message in messages {
        per_sender.entry(message.sender.clone()).or_default();
    }
    for (message, label) in messages.iter().zip(labels) {
        if let Some(label) = label {
            per_sender
                .entry(message.sender.clone())
                .or_default()
                .record(*label);
            overall.record(*label);
        }
    }

    if overall.total() == 0 {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::NoScoredMessages,
            "no_scored_messages",
        ));
    }

    SentimentRollup {
        per_participant: per_sender
            .into_iter()
            .map(|(sender, counts)| (sender, counts.ratios()))
            .collect(),
        overall: overall.ratios(),
    }
}

fn compute_emoji_stats(
    messages: &[ChatMessage],
    participants: &BTreeMap<String, Participant>,
) -> BTreeMap<String, ParticipantEmojiStats> {
    let mut stats: BTreeMap<String, ParticipantEmojiStats> = BTreeMap::new();
    // first-appearance rank per participant, for deterministic tie-breaks
    let mut ranks: BTreeMap<String, Vec<(String, usize, usize)>> = BTreeMap::new();

    for message in messages {
        let signal = sentiment_analysis::analyze_emojis(&message.text);
        if !signal.has_emojis {
            continue;
        }
        let entry = stats.entry(message.sender.clone()).or_default();
        entry.total_emojis += signal.count;

        let ranked = ranks.entry(message.sender.clone()).or_default();
        for (emoji, count) in signal.per_emoji {
            match ranked.iter_mut().find(|(key, _, _)| *key == emoji) {
                Some((_, total, _)) => *total += count,
                None => {
                    let rank = ranked.len();
                    ranked.push((emoji, count, rank));
                }
            }
        }
    }

    for participant in participants.values() {
        let entry = stats.entry(participant.name.clone()).or_default();
        entry.emojis_per_message = if participant.message_count > 0 {
            entry.total_emojis as f64 / participant.message_count as f64
        } else {
            0.0
        };
        if let Some(ranked) = ranks.get_mut(&participant.name) {
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
            entry.most_used_emojis = ranked
                .iter()
                .take(10)
                .map(|(emoji, count, _)| EmojiCount {
                    emoji: emoji.clone(),
                    count: *count,
                })
                .collect();
        }
    }

    stats
}

fn compute_activity(messages: &[ChatMessage]) -> ActivityProfile {
    let question_message_ratio = if messages.is_empty() {
        0.0
    } else {
        messages.iter().filter(|m| m.text.contains('?')).count() as f64 / messages.len() as f64
    };

    let dates: Vec<chrono::NaiveDate> = messages
        .iter()
        .filter_map(|m| m.timestamp)
        .map(|ts| ts.date_naive())
        .collect();
    let daily_counts = match (dates.iter().min(), dates.iter().max()) {
        (Some(&first), Some(&last)) => {
            let span = (last - first).num_days() as usize + 1;
            let mut counts = vec![0usize; span];
            for date in &dates {
                counts[(*date - first).num_days() as usize] += 1;
            }
            counts
        }
        _ => Vec::new(),
    };

    ActivityProfile {
        daily_counts,
        question_message_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(minutes: i64) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2023, 12, 31, 22, 30, 0).unwrap() + Duration::minutes(minutes))
    }

    fn msg(sender: &str, minutes: i64, text: &str) -> ChatMessage {
        ChatMessage {
            timestamp: ts(minutes),
            sender: sender.to_string(),
            text: text.to_string(),
            platform: Platform::Whatsapp,
            is_media: false,
        }
    }

    fn aggregate(
        messages: &[ChatMessage],
        self_name: Option<&str>,
        labels: &[Option<SentimentLabel>],
    ) -> AggregatedConversation {
        Aggregator::new().aggregate(messages, Platform::Whatsapp, self_name, labels)
    }

    #[test]
    fn test_minimal_two_message_conversation() {
        let messages = [
            msg("Alice", 0, "I'm feeling great today! 😊"),
            msg("Bob", 1, "Awesome!"),
        ];
        let labels = [
            Some(SentimentLabel::Positive),
            Some(SentimentLabel::Positive),
        ];
        let result = aggregate(&messages, None, &labels);
        let analysis = &result.analysis;

        assert_eq!(analysis.total_messages, 2);
        assert_eq!(analysis.participants["Alice"].message_count, 1);
        assert_eq!(analysis.participants["Bob"].message_count, 1);
        assert_eq!(analysis.period.as_ref().unwrap().duration_days, 1);
        assert_eq!(
            analysis.sentiment_analysis.per_participant["Alice"].positive_ratio,
            1.0
        );
    }

    #[test]
    fn test_participant_counts_sum_to_total() {
        let messages = [
            msg("Alice", 0, "one"),
            msg("Bob", 5, "two"),
            msg("Alice", 10, "three"),
        ];
        let labels = vec![None; 3];
        let analysis = aggregate(&messages, None, &labels).analysis;

        let sum: usize = analysis.basic_stats.messages_per_participant.values().sum();
        assert_eq!(sum, analysis.total_messages);
        for participant in analysis.participants.values() {
            assert_eq!(
                participant.message_count,
                analysis.basic_stats.messages_per_participant[&participant.name]
            );
        }
    }

    #[test]
    fn test_self_role_is_case_insensitive_and_unique() {
        let messages = [msg("Alice", 0, "hi"), msg("Bob", 1, "hey")];
        let labels = vec![None; 2];
        let analysis = aggregate(&messages, Some("  alice "), &labels).analysis;

        assert_eq!(
            analysis.participants["Alice"].role,
            ParticipantRole::SelfUser
        );
        assert_eq!(analysis.participants["Bob"].role, ParticipantRole::Other);
        let self_count = analysis
            .participants
            .values()
            .filter(|p| p.role == ParticipantRole::SelfUser)
            .count();
        assert_eq!(self_count, 1);
    }

    #[test]
    fn test_hourly_and_weekday_distributions_cover_timestamped_messages() {
        let mut messages = vec![
            msg("Alice", 0, "a"),
            msg("Bob", 60, "b"),
            msg("Alice", 120, "c"),
        ];
        messages.push(ChatMessage {
            timestamp: None,
            sender: "Bob".to_string(),
            text: "no clock".to_string(),
            platform: Platform::Whatsapp,
            is_media: false,
        });
        let labels = vec![None; 4];
        let analysis = aggregate(&messages, None, &labels).analysis;

        let hourly_sum: usize = analysis.messaging_patterns.hourly_distribution.iter().sum();
        assert_eq!(hourly_sum, 3);
        assert_eq!(analysis.messaging_patterns.day_of_week_distribution.total(), 3);
    }

    #[test]
    fn test_most_active_hours_ordering() {
        // 22:30 +0/+1/+2 minutes land in hour 22; +90 lands in hour 0 next day.
        let messages = [
            msg("Alice", 0, "a"),
            msg("Bob", 1, "b"),
            msg("Alice", 2, "c"),
            msg("Bob", 90, "d"),
        ];
        let labels = vec![None; 4];
        let analysis = aggregate(&messages, None, &labels).analysis;

        let hours = &analysis.messaging_patterns.most_active_hours;
        assert!(hours.len() <= 5);
        assert_eq!(hours[0].hour, 22);
        assert_eq!(hours[0].count, 3);
        for pair in hours.windows(2) {
            assert!(
                pair[0].count > pair[1].count
                    || (pair[0].count == pair[1].count && pair[0].hour < pair[1].hour)
            );
        }
    }

    #[test]
    fn test_response_times_only_for_sender_switches_within_cap() {
        let messages = [
            msg("Alice", 0, "a"),
            msg("Alice", 2, "same sender, no response"),
            msg("Bob", 12, "switch after 10 minutes"),
            msg("Alice", 12 + 60 * 25, "switch after 25 hours, capped out"),
        ];
        let labels = vec![None; 4];
        let analysis = aggregate(&messages, None, &labels).analysis;

        let bob = &analysis.engagement_metrics.response_time_analysis["Bob"];
        assert_eq!(bob.count, 1);
        assert!((bob.average_minutes - 10.0).abs() < 1e-9);
        assert!(!analysis
            .engagement_metrics
            .response_time_analysis
            .contains_key("Alice"));
    }

    #[test]
    fn test_response_time_stats_are_ordered() {
        let messages = [
            msg("Alice", 0, "a"),
            msg("Bob", 5, "b"),
            msg("Alice", 6, "c"),
            msg("Bob", 26, "d"),
            msg("Alice", 27, "e"),
            msg("Bob", 30, "f"),
        ];
        let labels = vec![None; 6];
        let analysis = aggregate(&messages, None, &labels).analysis;

        let bob = &analysis.engagement_metrics.response_time_analysis["Bob"];
        assert_eq!(bob.count, 3);
        assert!(bob.fastest_minutes <= bob.median_minutes);
        assert!(bob.median_minutes <= bob.slowest_minutes);
        assert!(bob.fastest_minutes <= bob.average_minutes);
        assert!(bob.average_minutes <= bob.slowest_minutes);
        // deltas 5, 20, 3 → sorted 3, 5, 20
        assert!((bob.median_minutes - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_median_interpolates_even_counts() {
        assert_eq!(median(&[1.0, 3.0]), 2.0);
        assert_eq!(median(&[1.0, 2.0, 3.0, 10.0]), 2.5);
        assert_eq!(median(&[7.0]), 7.0);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_initiations_after_six_hour_gap() {
        let messages = [
            msg("Alice", 0, "opens the transcript"),
            msg("Bob", 10, "quick reply"),
            msg("Bob", 10 + 60 * 7, "returns after seven hours"),
        ];
        let labels = vec![None; 3];
        let analysis = aggregate(&messages, None, &labels).analysis;

        let initiations = &analysis.engagement_metrics.conversation_initiations;
        assert_eq!(initiations["Alice"], 1);
        assert_eq!(initiations["Bob"], 1);
    }

    #[test]
    fn test_exchange_runs() {
        // A B A B (4-run), then B B breaks, then B A (2-run).
        let messages = [
            msg("Alice", 0, "a"),
            msg("Bob", 1, "b"),
            msg("Alice", 2, "c"),
            msg("Bob", 3, "d"),
            msg("Bob", 4, "e"),
            msg("Alice", 5, "f"),
        ];
        let labels = vec![None; 6];
        let analysis = aggregate(&messages, None, &labels).analysis;

        let metrics = &analysis.engagement_metrics.back_and_forth_metrics;
        assert_eq!(metrics.total_exchanges, 2);
        assert_eq!(metrics.longest_exchange, 4);
        assert!((metrics.average_exchange_length - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_sentiment_ratios_sum_to_one() {
        let messages = [
            msg("Alice", 0, "a"),
            msg("Alice", 1, "b"),
            msg("Alice", 2, "c"),
            msg("Bob", 3, "d"),
        ];
        let labels = [
            Some(SentimentLabel::Positive),
            Some(SentimentLabel::Negative),
            Some(SentimentLabel::Neutral),
            Some(SentimentLabel::Positive),
        ];
        let analysis = aggregate(&messages, None, &labels).analysis;

        for ratios in analysis.sentiment_analysis.per_participant.values() {
            let sum = ratios.positive_ratio + ratios.neutral_ratio + ratios.negative_ratio;
            assert!((sum - 1.0).abs() < 1e-6);
        }
        let overall = &analysis.sentiment_analysis.overall;
        assert!((overall.positive_ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_unscored_conversation_is_diagnosed() {
        let messages = [msg("Alice", 0, "a")];
        let labels = [None];
        let result = aggregate(&messages, None, &labels);

        assert_eq!(result.analysis.sentiment_analysis.overall.positive_ratio, 0.0);
        assert!(result
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::NoScoredMessages));
    }

    #[test]
    fn test_emoji_stats_top_counts() {
        let messages = [
            msg("Alice", 0, "🎉🎉😊"),
            msg("Alice", 1, "😊"),
            msg("Bob", 2, "plain"),
        ];
        let labels = vec![None; 3];
        let analysis = aggregate(&messages, None, &labels).analysis;

        let alice = &analysis.emoji_stats["Alice"];
        assert_eq!(alice.total_emojis, 4);
        assert!((alice.emojis_per_message - 2.0).abs() < 1e-9);
        // 🎉 and 😊 both count 2; 🎉 appeared first.
        assert_eq!(alice.most_used_emojis[0].emoji, "🎉");
        assert_eq!(alice.most_used_emojis[0].count, 2);

        let bob = &analysis.emoji_stats["Bob"];
        assert_eq!(bob.total_emojis, 0);
    }

    #[test]
    fn test_period_spans_all_timestamps() {
        let messages = [
            msg("Alice", 0, "a"),
            msg("Bob", 60 * 24 * 3, "three days later"),
        ];
        let labels = vec![None; 2];
        let analysis = aggregate(&messages, None, &labels).analysis;

        let period = analysis.period.unwrap();
        assert_eq!(period.duration_days, 4);
        for message in &messages {
            let ts = message.timestamp.unwrap();
            assert!(ts >= period.start && ts <= period.end);
        }
    }

    #[test]
    fn test_activity_profile_counts_calendar_days() {
        let messages = [
            msg("Alice", 0, "day one?"),
            msg("Bob", 60 * 24 * 2, "day three"),
        ];
        let labels = vec![None; 2];
        let result = aggregate(&messages, None, &labels);

        assert_eq!(result.activity.daily_counts, vec![1, 0, 1]);
        assert!((result.activity.question_message_ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_no_timestamps_means_no_period() {
        let messages = [ChatMessage {
            timestamp: None,
            sender: "Alice".to_string(),
            text: "hi".to_string(),
            platform: Platform::Generic,
            is_media: false,
        }];
        let labels = [None];
        let result = aggregate(&messages, None, &labels);

        assert!(result.analysis.period.is_none());
        assert!(result.activity.daily_counts.is_empty());
    }
}
