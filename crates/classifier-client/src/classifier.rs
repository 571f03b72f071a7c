use crate::error::{ClassifierError, ClassifierResult};
use analysis_core::{AnalysisError, ClassifierOutput, Emotion, SentimentClassifier, SentimentLabel};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyResponse {
    pub label: String,
    pub confidence: f64,
    #[serde(default)]
    pub emotions: BTreeMap<String, f64>,
}

/// HTTP adapter for an external neural sentiment classifier. The engine
/// works fully without one; this client exists so a hosted model can be
/// injected at construction time.
#[derive(Clone)]
pub struct ClassifierClient {
    client: reqwest::Client,
    base_url: String,
}

impl ClassifierClient {
    pub fn new(base_url: String, timeout: Duration) -> ClassifierResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Classify one text run.
    pub async fn classify_text(&self, text: &str) -> ClassifierResult<ClassifyResponse> {
        let response = self
            .client
            .post(format!("{}/classify", self.base_url))
            .json(&ClassifyRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "classifier service returned an error");
            return Err(ClassifierError::ServiceUnavailable(format!(
                "Status: {}",
                response.status()
            )));
        }

        Ok(response.json::<ClassifyResponse>().await?)
    }

    /// Check service health.
    pub async fn health(&self) -> ClassifierResult<bool> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(response.status().is_success())
    }
}

fn into_output(response: ClassifyResponse) -> ClassifierResult<ClassifierOutput> {
    let label = SentimentLabel::from_name(&response.label).ok_or_else(|| {
        ClassifierError::InvalidResponse(format!("unknown label: {}", response.label))
    })?;

    // Emotion names outside the closed set are dropped rather than failing
    // the whole classification.
    let emotion_scores = response
        .emotions
        .iter()
        .filter_map(|(name, &score)| Emotion::from_name(name).map(|emotion| (emotion, score)))
        .collect();

    Ok(ClassifierOutput {
        label,
        confidence: response.confidence.clamp(0.0, 1.0),
        emotion_scores,
    })
}

#[async_trait]
impl SentimentClassifier for ClassifierClient {
    async fn classify(&self, text: &str) -> Result<ClassifierOutput, AnalysisError> {
        let response = self
            .classify_text(text)
            .await
            .map_err(|e| AnalysisError::ClassifierUnavailable(e.to_string()))?;
        into_output(response).map_err(|e| AnalysisError::ClassifierUnavailable(e.to_string()))
    }
}
