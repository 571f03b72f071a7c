//! Engine facade.
//!
//! Orchestrates parsing, per-message scoring, aggregation, and red-flag
//! detection behind two entry points: `analyze_message` for a single text
//! run and `analyze_conversation` for a raw transcript. The engine holds no
//! mutable state between calls; concurrency is the host's concern.

use analysis_core::limits::{
    CLASSIFIER_TIMEOUT_MS, MAX_BULK_BYTES, MAX_MESSAGE_CHARS, MIN_CHARS_FOR_IMPORT,
};
use analysis_core::{
    AnalysisError, AnalysisSink, ChatAnalysis, ChatMessage, ClassifierOutput, Diagnostic,
    DiagnosticKind, Platform, SentimentClassifier, SentimentLabel, SentimentResult, SinkError,
};
use chat_analytics::{Aggregator, RedFlagDetector};
use chat_parser::ParsedConversation;
use sentiment_analysis::SentimentAnalysisEngine;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Finished analysis plus everything non-fatal that happened on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationReport {
    pub analysis: ChatAnalysis,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Host cancelled mid-run; the partial report covers the completed
    /// message prefix.
    #[error("analysis canceled by host")]
    Canceled { partial: Box<ConversationReport> },

    /// The sink requested a stop; the partial report covers the messages
    /// persisted before the abort.
    #[error("sink aborted the analysis")]
    SinkAborted { partial: Box<ConversationReport> },
}

pub struct ChatAnalysisEngine {
    scorer: SentimentAnalysisEngine,
    aggregator: Aggregator,
    detector: RedFlagDetector,
    classifier: Option<Arc<dyn SentimentClassifier>>,
    classifier_timeout: Duration,
}

impl ChatAnalysisEngine {
    pub fn new() -> Self {
        Self {
            scorer: SentimentAnalysisEngine::new(),
            aggregator: Aggregator::new(),
            detector: RedFlagDetector::new(),
            classifier: None,
            classifier_timeout: Duration::from_millis(CLASSIFIER_TIMEOUT_MS),
        }
    }

    /// Inject a neural classifier. The engine stays fully functional
    /// without one.
    pub fn with_classifier(mut self, classifier: Arc<dyn SentimentClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_classifier_timeout(mut self, timeout: Duration) -> Self {
        self.classifier_timeout = timeout;
        self
    }

    /// Score a single message. Safe to call concurrently.
    pub async fn analyze_message(&self, text: &str) -> Result<SentimentResult, AnalysisError> {
        let chars = text.chars().count();
        if chars == 0 {
            return Err(AnalysisError::InputTooSmall(0));
        }
        if chars > MAX_MESSAGE_CHARS {
            return Err(AnalysisError::InputTooLarge(text.len()));
        }

        let hint = self.classifier_hint(text).await;
        Ok(self.scorer.score(text, hint.as_ref()))
    }

    /// Parse, score, aggregate, and red-flag one raw transcript.
    ///
    /// Sink emissions happen in message order; sink failures become
    /// diagnostics and only an explicit abort stops the run. Cancellation is
    /// observed between messages and yields a partial report.
    pub async fn analyze_conversation(
        &self,
        raw: &str,
        hint: Option<Platform>,
        self_name: Option<&str>,
        sink: Option<&dyn AnalysisSink>,
        cancel: Option<&CancellationToken>,
    ) -> Result<ConversationReport, EngineError> {
        let trimmed_chars = raw.trim().chars().count();
        if trimmed_chars < MIN_CHARS_FOR_IMPORT {
            return Err(AnalysisError::InputTooSmall(trimmed_chars).into());
        }
        if raw.len() > MAX_BULK_BYTES {
            return Err(AnalysisError::InputTooLarge(raw.len()).into());
        }

        let ParsedConversation {
            format,
            messages,
            mut diagnostics,
        } = chat_parser::parse(raw, hint);

        tracing::info!(
            format = format.as_str(),
            messages = messages.len(),
            "starting conversation analysis"
        );

        let mut labels: Vec<Option<SentimentLabel>> = vec![None; messages.len()];
        let mut classifier_degraded = false;

        for (index, message) in messages.iter().enumerate() {
            if cancel.is_some_and(|token| token.is_cancelled()) {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::Canceled,
                    format!("canceled after {index} of {} messages", messages.len()),
                ));
                let partial = self.finish(
                    format,
                    &messages[..index],
                    self_name,
                    &labels[..index],
                    diagnostics,
                );
                return Err(EngineError::Canceled {
                    partial: Box::new(partial),
                });
            }

            if let Some(sink) = sink {
                match sink.save_message(message).await {
                    Ok(()) => {}
                    Err(SinkError::Abort) => {
                        diagnostics.push(Diagnostic::new(
                            DiagnosticKind::SinkError,
                            format!("sink aborted at message {index}"),
                        ));
                        let partial = self.finish(
                            format,
                            &messages[..index],
                            self_name,
                            &labels[..index],
                            diagnostics,
                        );
                        return Err(EngineError::SinkAborted {
                            partial: Box::new(partial),
                        });
                    }
                    Err(SinkError::Failure(detail)) => {
                        diagnostics.push(Diagnostic::new(DiagnosticKind::SinkError, detail));
                    }
                }
            }

            if message.is_media || message.text.trim().is_empty() {
                continue;
            }
            let hint_output = if self.classifier.is_some() {
                let output = self.classifier_hint(&message.text).await;
                classifier_degraded |= output.is_none();
                output
            } else {
                None
            };
            labels[index] = Some(self.scorer.score(&message.text, hint_output.as_ref()).label);
        }

        if classifier_degraded {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::ClassifierFallback,
                "classifier unavailable for one or more messages; lexical fallback used",
            ));
        }

        let mut report = self.finish(format, &messages, self_name, &labels, diagnostics);

        if let Some(sink) = sink {
            if let Err(error) = sink.save_analysis(&report.analysis).await {
                report.diagnostics.push(Diagnostic::new(
                    DiagnosticKind::SinkError,
                    format!("analysis not persisted: {error}"),
                ));
            }
        }

        Ok(report)
    }

    /// Classifier call with the configured budget; fails open to `None`.
    async fn classifier_hint(&self, text: &str) -> Option<ClassifierOutput> {
        let classifier = self.classifier.as_ref()?;
        match tokio::time::timeout(self.classifier_timeout, classifier.classify(text)).await {
            Ok(Ok(output)) => Some(output),
            Ok(Err(error)) => {
                tracing::warn!(%error, "classifier failed; falling back to lexical scoring");
                None
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.classifier_timeout.as_millis() as u64,
                    "classifier timed out; falling back to lexical scoring"
                );
                None
            }
        }
    }

    fn finish(
        &self,
        format: Platform,
        messages: &[ChatMessage],
        self_name: Option<&str>,
        labels: &[Option<SentimentLabel>],
        mut diagnostics: Vec<Diagnostic>,
    ) -> ConversationReport {
        let aggregated = self.aggregator.aggregate(messages, format, self_name, labels);
        let mut analysis = aggregated.analysis;
        diagnostics.extend(aggregated.diagnostics);
        analysis.red_flags = self.detector.detect(&analysis, &aggregated.activity);
        ConversationReport {
            analysis,
            diagnostics,
        }
    }
}

impl Default for ChatAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
