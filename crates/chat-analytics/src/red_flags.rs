//! Red-flag detection over the aggregated metrics.
//!
//! Pure rule set with fixed thresholds; each rule emits at most one finding.
//! Red flags drive the health label directly, warnings are soft signals.

use crate::ActivityProfile;
use analysis_core::limits::{
    FREQUENCY_DROP_RATIO, LOW_ENGAGEMENT_AVG_CHARS, MESSAGE_IMBALANCE_RATIO,
    ONE_SIDED_INITIATION_RATIO, SLOW_RESPONSE_MINUTES,
};
use analysis_core::{
    ChatAnalysis, Finding, FindingKind, HealthIndicator, RedFlagReport, Severity,
};
use statrs::statistics::Statistics;

/// Minimum conversation size before the imbalance rule applies.
const IMBALANCE_MIN_MESSAGES: usize = 50;
/// Minimum response events before the slow-response rule applies.
const SLOW_RESPONSE_MIN_EVENTS: usize = 10;
/// Minimum total initiations before the one-sided rule applies.
const ONE_SIDED_MIN_INITIATIONS: usize = 10;
/// Minimum period length in days before the frequency-drop rule applies.
const FREQUENCY_DROP_MIN_DAYS: usize = 14;
/// Question-mark share below which a conversation reads as disengaged.
const LOW_ENGAGEMENT_QUESTION_RATIO: f64 = 0.05;
/// Overall negative share that triggers the sentiment warning.
const NEGATIVE_SENTIMENT_WARNING_RATIO: f64 = 0.45;
/// Night-hour share (00:00–04:59) that triggers the skew warning.
const NIGHT_ACTIVITY_WARNING_RATIO: f64 = 0.25;

pub struct RedFlagDetector;

impl RedFlagDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, analysis: &ChatAnalysis, activity: &ActivityProfile) -> RedFlagReport {
        let mut red_flags = Vec::new();
        let mut warnings = Vec::new();

        if let Some(finding) = check_message_imbalance(analysis) {
            red_flags.push(finding);
        }
        if let Some(finding) = check_slow_responses(analysis) {
            red_flags.push(finding);
        }
        if let Some(finding) = check_frequency_drop(activity) {
            red_flags.push(finding);
        }
        if let Some(finding) = check_one_sided_initiation(analysis) {
            red_flags.push(finding);
        }
        if let Some(finding) = check_low_engagement(analysis, activity) {
            red_flags.push(finding);
        }

        if let Some(finding) = check_negative_sentiment(analysis) {
            warnings.push(finding);
        }
        if let Some(finding) = check_night_activity(analysis) {
            warnings.push(finding);
        }
        if let Some(finding) = check_burst_silence(activity) {
            warnings.push(finding);
        }

        let overall_health = HealthIndicator::derive(&red_flags, &warnings);
        tracing::debug!(
            red_flags = red_flags.len(),
            warnings = warnings.len(),
            health = overall_health.as_str(),
            "red-flag pass complete"
        );

        RedFlagReport {
            total_red_flags: red_flags.len(),
            total_warnings: warnings.len(),
            red_flags,
            warnings,
            overall_health,
        }
    }
}

impl Default for RedFlagDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn check_message_imbalance(analysis: &ChatAnalysis) -> Option<Finding> {
    if analysis.total_messages < IMBALANCE_MIN_MESSAGES || analysis.participants.len() < 2 {
        return None;
    }
    let counts: Vec<usize> = analysis
        .participants
        .values()
        .map(|p| p.message_count)
        .collect();
    let max = *counts.iter().max()?;
    let min = *counts.iter().min()?;
    let ratio = max as f64 / min.max(1) as f64;
    if ratio <= MESSAGE_IMBALANCE_RATIO {
        return None;
    }
    Some(Finding {
        kind: FindingKind::MessageImbalance,
        severity: Severity::High,
        description: format!(
            "One person is sending {ratio:.1}x more messages than the other."
        ),
        suggestion: "A conversation this uneven can feel draining. It may help to notice \
                     whether the effort feels mutual to you."
            .to_string(),
    })
}

fn check_slow_responses(analysis: &ChatAnalysis) -> Option<Finding> {
    let (name, stats) = analysis
        .engagement_metrics
        .response_time_analysis
        .iter()
        .find(|(_, stats)| {
            stats.count >= SLOW_RESPONSE_MIN_EVENTS
                && stats.average_minutes > SLOW_RESPONSE_MINUTES
        })?;
    Some(Finding {
        kind: FindingKind::SlowResponses,
        severity: Severity::Medium,
        description: format!(
            "{name} takes {:.0} minutes to respond on average.",
            stats.average_minutes
        ),
        suggestion: "Long response gaps are not always a bad sign, but a consistent pattern \
                     is worth paying attention to."
            .to_string(),
    })
}

fn check_frequency_drop(activity: &ActivityProfile) -> Option<Finding> {
    if activity.daily_counts.len() < FREQUENCY_DROP_MIN_DAYS {
        return None;
    }
    let first_week: usize = activity.daily_counts[..7].iter().sum();
    let last_week: usize = activity.daily_counts[activity.daily_counts.len() - 7..]
        .iter()
        .sum();
    let first_rate = first_week as f64 / 7.0;
    let last_rate = last_week as f64 / 7.0;
    if first_rate <= 0.0 || last_rate >= FREQUENCY_DROP_RATIO * first_rate {
        return None;
    }
    Some(Finding {
        kind: FindingKind::FrequencyDrop,
        severity: Severity::High,
        description: format!(
            "Daily messages fell from {first_rate:.1} in the first week to {last_rate:.1} in \
             the last week."
        ),
        suggestion: "A sharp drop in contact can mean the conversation is fading. If it \
                     matters to you, it may be worth naming that directly."
            .to_string(),
    })
}

fn check_one_sided_initiation(analysis: &ChatAnalysis) -> Option<Finding> {
    let initiations = &analysis.engagement_metrics.conversation_initiations;
    if initiations.len() < 2 {
        return None;
    }
    let total: usize = initiations.values().sum();
    if total < ONE_SIDED_MIN_INITIATIONS {
        return None;
    }
    let (max_name, max) = initiations.iter().max_by_key(|(_, &count)| count)?;
    let min = *initiations.values().min()?;
    let ratio = *max as f64 / min.max(1) as f64;
    if ratio < ONE_SIDED_INITIATION_RATIO {
        return None;
    }
    Some(Finding {
        kind: FindingKind::OneSidedInitiation,
        severity: Severity::Medium,
        description: format!("{max_name} starts almost every conversation ({max} of {total})."),
        suggestion: "When one person always reaches out first, it can be worth stepping back \
                     to see if the interest runs both ways."
            .to_string(),
    })
}

fn check_low_engagement(analysis: &ChatAnalysis, activity: &ActivityProfile) -> Option<Finding> {
    if analysis.total_messages == 0 {
        return None;
    }
    if analysis.basic_stats.average_message_length >= LOW_ENGAGEMENT_AVG_CHARS
        || activity.question_message_ratio >= LOW_ENGAGEMENT_QUESTION_RATIO
    {
        return None;
    }
    Some(Finding {
        kind: FindingKind::LowEngagement,
        severity: Severity::Medium,
        description: format!(
            "Messages average {:.0} characters and almost none ask a question.",
            analysis.basic_stats.average_message_length
        ),
        suggestion: "Short replies with no questions can signal low investment. Open-ended \
                     questions tend to restart real conversation."
            .to_string(),
    })
}

fn check_negative_sentiment(analysis: &ChatAnalysis) -> Option<Finding> {
    let negative = analysis.sentiment_analysis.overall.negative_ratio;
    if negative <= NEGATIVE_SENTIMENT_WARNING_RATIO {
        return None;
    }
    Some(Finding {
        kind: FindingKind::HighNegativeSentiment,
        severity: Severity::Medium,
        description: format!("{:.0}% of the conversation reads as negative.", negative * 100.0),
        suggestion: "A conversation this heavy can wear on you. Checking in with how these \
                     exchanges leave you feeling is a good habit."
            .to_string(),
    })
}

fn check_night_activity(analysis: &ChatAnalysis) -> Option<Finding> {
    let hourly = &analysis.messaging_patterns.hourly_distribution;
    let total: usize = hourly.iter().sum();
    if total == 0 {
        return None;
    }
    let night: usize = hourly[..5].iter().sum();
    let share = night as f64 / total as f64;
    if share <= NIGHT_ACTIVITY_WARNING_RATIO {
        return None;
    }
    Some(Finding {
        kind: FindingKind::NightActivitySkew,
        severity: Severity::Low,
        description: format!("{:.0}% of messages are sent between midnight and 5am.", share * 100.0),
        suggestion: "Late-night messaging patterns can crowd out rest. Notice whether the \
                     timing is a choice or a pull."
            .to_string(),
    })
}

fn check_burst_silence(activity: &ActivityProfile) -> Option<Finding> {
    if activity.daily_counts.len() < 2 {
        return None;
    }
    let data: Vec<f64> = activity.daily_counts.iter().map(|&c| c as f64).collect();
    let mean = data.iter().mean();
    let std_dev = data.iter().std_dev();
    if mean <= 0.0 || std_dev <= 2.0 * mean {
        return None;
    }
    Some(Finding {
        kind: FindingKind::BurstSilence,
        severity: Severity::Low,
        description: "Messaging swings between intense bursts and long silences.".to_string(),
        suggestion: "Hot-and-cold contact can be unsettling. Steadiness, not volume, is \
                     usually the better signal of a healthy exchange."
            .to_string(),
    })
}
