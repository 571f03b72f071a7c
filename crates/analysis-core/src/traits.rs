use crate::{AnalysisError, ChatAnalysis, ChatMessage, ClassifierOutput, SinkError};
use async_trait::async_trait;

/// Trait for neural sentiment classifiers.
///
/// Implementations may block on I/O; the engine treats every call as
/// cancellable and falls back to lexical scoring on failure or timeout.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<ClassifierOutput, AnalysisError>;
}

/// Trait for persistence sinks.
///
/// The engine emits one `save_message` per parsed message, in message order,
/// followed by a single `save_analysis`. It owns no storage of its own.
#[async_trait]
pub trait AnalysisSink: Send + Sync {
    async fn save_message(&self, message: &ChatMessage) -> Result<(), SinkError>;
    async fn save_analysis(&self, analysis: &ChatAnalysis) -> Result<(), SinkError>;
}
